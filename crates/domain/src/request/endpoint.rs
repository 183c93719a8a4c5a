//! Endpoint paths relative to the configured base URL.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// A URL path plus optional query pairs.
///
/// Endpoints never carry scheme or host; they are joined with the base URL
/// when the request is sent, so the same suite runs against any server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    query: Vec<(String, String)>,
}

impl Endpoint {
    /// Creates an endpoint for the given path. A leading `/` is added if missing.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self {
            path,
            query: Vec::new(),
        }
    }

    /// Appends a query pair (builder pattern).
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query pairs in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Resolves this endpoint against a base URL.
    ///
    /// Any path prefix on the base URL is kept, so a server mounted under
    /// `http://host/blog` resolves `/wp-json/` to `http://host/blog/wp-json/`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] when the joined URL cannot be parsed.
    pub fn resolve(&self, base: &Url) -> DomainResult<Url> {
        let prefix = base.path().trim_end_matches('/');
        let mut url = base.clone();
        url.set_path(&format!("{prefix}{}", self.path));
        url.set_query(None);
        url.set_fragment(None);

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }

        if url.cannot_be_a_base() {
            return Err(DomainError::InvalidUrl(url.to_string()));
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (index, (key, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{separator}{key}={value}")?;
        }
        Ok(())
    }
}
