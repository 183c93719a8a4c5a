//! HTTP infrastructure utilities.
//!
//! This module provides body building for the request body kinds the
//! contract runner sends.

mod body_builder;

pub use body_builder::{BodyBuildError, BuiltBody, build_body};
