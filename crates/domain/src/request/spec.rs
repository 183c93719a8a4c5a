//! Request specification type

use serde::{Deserialize, Serialize};

use super::{Endpoint, HttpMethod, RequestBody};
use crate::credential::Credential;

/// Everything needed to issue one HTTP request against the target server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path (and query) relative to the base URL.
    pub endpoint: Endpoint,
    /// Basic-auth credential. `None` sends an unauthenticated request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates an unauthenticated request without body.
    #[must_use]
    pub const fn new(method: HttpMethod, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            credential: None,
            body: RequestBody::None,
        }
    }

    /// Shorthand for a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, Endpoint::new(path))
    }

    /// Shorthand for a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, Endpoint::new(path))
    }

    /// Shorthand for a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, Endpoint::new(path))
    }

    /// Shorthand for a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, Endpoint::new(path))
    }

    /// Attaches a basic-auth credential.
    #[must_use]
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Replaces the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Appends a query pair to the endpoint.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.endpoint = self.endpoint.with_query(key, value);
        self
    }

    /// Short `METHOD /path` label for logs and reports.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builders() {
        let request = RequestSpec::delete("/wp-json/wp/v2/posts/5")
            .with_query("force", "true")
            .with_credential(Credential::new("admin", "password"));

        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.label(), "DELETE /wp-json/wp/v2/posts/5?force=true");
        assert!(request.credential.is_some());
        assert_eq!(request.body, RequestBody::None);
    }
}
