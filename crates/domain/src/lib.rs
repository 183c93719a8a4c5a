//! Restprobe Domain - Core contract types
//!
//! This crate defines the domain model for the restprobe contract runner:
//! requests, response records, tolerant status-code sets and run results.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod credential;
pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, RunConfig};
pub use credential::Credential;
pub use error::{DomainError, DomainResult};
pub use request::{Endpoint, FilePart, HttpMethod, RequestBody, RequestSpec};
pub use response::{ResponseRecord, StatusCode};
pub use testing::{
    AcceptableCodeSet, CaseOutcome, CaseResult, Observation, RunReport, is_acceptable,
};
