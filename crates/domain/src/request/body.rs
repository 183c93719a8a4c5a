//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// A single file part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePart {
    /// Form field name (e.g. `file`).
    pub field: String,
    /// File name sent in the part's content disposition.
    pub filename: String,
    /// Raw file content. May be empty.
    #[serde(default)]
    pub content: Vec<u8>,
}

impl FilePart {
    /// Creates a new file part.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            field: field.into(),
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Body attached to an outgoing request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// Structured payload serialized as `application/json`.
    Json {
        /// The JSON document.
        content: serde_json::Value,
    },
    /// `multipart/form-data` with one or more file parts.
    Multipart {
        /// File parts in send order.
        files: Vec<FilePart>,
    },
}

impl RequestBody {
    /// Creates a JSON body.
    #[must_use]
    pub const fn json(content: serde_json::Value) -> Self {
        Self::Json { content }
    }

    /// Creates a multipart body with a single file part.
    #[must_use]
    pub fn file(
        field: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self::Multipart {
            files: vec![FilePart::new(field, filename, content)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_body_keeps_empty_content() {
        let body = RequestBody::file("file", "test.jpg", Vec::new());
        let RequestBody::Multipart { files } = body else {
            unreachable!("file() always builds a multipart body");
        };
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "test.jpg");
        assert!(files[0].content.is_empty());
    }
}
