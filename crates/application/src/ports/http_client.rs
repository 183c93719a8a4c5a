//! HTTP Client port

use async_trait::async_trait;
use restprobe_domain::{RequestSpec, ResponseRecord};
use thiserror::Error;

/// Failure to complete an HTTP exchange.
///
/// A response with an unexpected status is never one of these; it is an
/// assertion failure decided by the case that sent the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host `{host}`: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// Nothing is listening on the target port.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection-level failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Anything else reported by the HTTP library.
    #[error("{0}")]
    Other(String),
}

/// Port for sending HTTP requests to the server under test.
///
/// Implementations send at most one request per call and never retry.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request and returns status, elapsed time and JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError`] when the exchange cannot be completed.
    async fn send(&self, request: &RequestSpec) -> Result<ResponseRecord, HttpClientError>;
}
