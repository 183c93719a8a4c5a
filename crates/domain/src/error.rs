//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A credential is missing a required part.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An acceptable status code set was declared without any code.
    #[error("acceptable code set for `{0}` is empty")]
    EmptyCodeSet(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
