//! Run configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::credential::Credential;
use crate::error::{DomainError, DomainResult};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Validated settings handed to the runner at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Server every endpoint is resolved against.
    pub base_url: Url,
    /// Default credential for authenticated cases.
    pub credential: Credential,
    /// Per-request timeout; exceeding it is a transport error.
    pub timeout: Duration,
    /// Stop executing cases after the first one that does not pass.
    pub fail_fast: bool,
}

impl RunConfig {
    /// Parses and validates raw settings.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when the base URL is not an absolute
    /// `http`/`https` URL, the username is blank, or the timeout is zero.
    pub fn new(
        base_url: &str,
        credential: Credential,
        timeout_secs: u64,
        fail_fast: bool,
    ) -> DomainResult<Self> {
        let base_url = parse_base_url(base_url)?;
        credential.validate()?;

        if timeout_secs == 0 {
            return Err(DomainError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            credential,
            timeout: Duration::from_secs(timeout_secs),
            fail_fast,
        })
    }

    /// Built-in defaults, validated like any other settings.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the default constants fail validation.
    pub fn with_defaults() -> DomainResult<Self> {
        Self::new(
            DEFAULT_BASE_URL,
            Credential::default(),
            DEFAULT_TIMEOUT_SECS,
            false,
        )
    }
}

fn parse_base_url(raw: &str) -> DomainResult<Url> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme `{other}`: {raw}"
            )));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(DomainError::InvalidUrl(format!("missing host: {raw}")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(DomainError::InvalidUrl(format!(
            "base URL cannot carry a query or fragment: {raw}"
        )));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RunConfig::with_defaults().unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.credential, Credential::new("admin", "password"));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.fail_fast);
    }

    #[test]
    fn test_new_accepts_https_with_prefix() {
        let config =
            RunConfig::new("https://example.com/blog", Credential::default(), 5, true).unwrap();
        assert_eq!(config.base_url.path(), "/blog");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.fail_fast);
    }

    #[test]
    fn test_rejects_malformed_url() {
        let err = RunConfig::new("not a url", Credential::default(), 10, false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = RunConfig::new("ftp://example.com", Credential::default(), 10, false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_query_on_base() {
        let err =
            RunConfig::new("http://example.com/?a=1", Credential::default(), 10, false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_blank_username() {
        let err = RunConfig::new(DEFAULT_BASE_URL, Credential::new("", "pw"), 10, false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredential(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = RunConfig::new(DEFAULT_BASE_URL, Credential::default(), 0, false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)));
    }
}
