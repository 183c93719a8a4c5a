//! Request methods.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Methods the content API cases issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read a resource.
    Get,
    /// Create a resource or upload media.
    Post,
    /// Replace a resource; sent to collections to check it is refused.
    Put,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_uses_wire_name() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(format!("{:<6}|", HttpMethod::Put), "PUT   |");
    }

    #[test]
    fn test_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&HttpMethod::Post).unwrap_or_default(), r#""POST""#);
    }
}
