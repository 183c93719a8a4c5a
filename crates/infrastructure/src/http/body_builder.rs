//! HTTP request body builder.
//!
//! Converts the domain [`RequestBody`] into something reqwest can send.

use reqwest::multipart::{Form, Part};
use restprobe_domain::{FilePart, RequestBody};

/// Error type for body building operations.
#[derive(Debug, thiserror::Error)]
pub enum BodyBuildError {
    /// The guessed MIME type was rejected.
    #[error("invalid MIME type for `{filename}`: {message}")]
    InvalidMime {
        /// File the part was built for.
        filename: String,
        /// Reason given by reqwest.
        message: String,
    },

    /// The JSON body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result of building a body.
pub enum BuiltBody {
    /// No body.
    None,
    /// Serialized JSON, sent as `application/json`.
    Json(Vec<u8>),
    /// Multipart form data. reqwest sets the content type with its boundary.
    Multipart(Form),
}

impl BuiltBody {
    /// Content-Type header to set explicitly, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::None | Self::Multipart(_) => None,
        }
    }
}

/// Builds an HTTP body from the domain body.
///
/// # Errors
///
/// Returns an error if JSON serialization fails or a part's MIME type is
/// rejected.
pub fn build_body(body: &RequestBody) -> Result<BuiltBody, BodyBuildError> {
    match body {
        RequestBody::None => Ok(BuiltBody::None),
        RequestBody::Json { content } => serde_json::to_vec(content)
            .map(BuiltBody::Json)
            .map_err(|e| BodyBuildError::Serialization(e.to_string())),
        RequestBody::Multipart { files } => build_multipart_form(files).map(BuiltBody::Multipart),
    }
}

fn build_multipart_form(files: &[FilePart]) -> Result<Form, BodyBuildError> {
    let mut form = Form::new();

    for file in files {
        let mime_type = mime_guess::from_path(&file.filename)
            .first_or_octet_stream()
            .to_string();

        let part = Part::bytes(file.content.clone())
            .file_name(file.filename.clone())
            .mime_str(&mime_type)
            .map_err(|e| BodyBuildError::InvalidMime {
                filename: file.filename.clone(),
                message: e.to_string(),
            })?;

        form = form.part(file.field.clone(), part);
    }

    Ok(form)
}
