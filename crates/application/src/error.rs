//! Application error types

use restprobe_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Errors that abort a run before any case executes.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The HTTP client could not be created.
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] HttpClientError),

    /// The case filter is not a valid regular expression.
    #[error("invalid case filter `{pattern}`: {message}")]
    InvalidFilter {
        /// Pattern as given.
        pattern: String,
        /// Regex compiler message.
        message: String,
    },

    /// The filter matched no case.
    #[error("no case matches filter `{0}`")]
    EmptySelection(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
