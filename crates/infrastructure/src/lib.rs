//! Restprobe Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest-backed HTTP client, configuration file
//! loading and the text reporter.

pub mod adapters;
pub mod config;
pub mod http;
pub mod reporting;

pub use adapters::ReqwestHttpClient;
pub use config::{ConfigError, ConfigRepository, PartialConfig};
pub use http::{BodyBuildError, BuiltBody, build_body};
pub use reporting::{TextReporter, format_case, format_summary};
