//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It resolves endpoints against the configured base URL, attaches basic
//! auth and bodies, and times each exchange until the body is fully read.

use std::error::Error as _;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use restprobe_application::ports::{HttpClient, HttpClientError};
use restprobe_domain::{HttpMethod, RequestSpec, ResponseRecord, RunConfig};
use url::Url;

use crate::http::{BuiltBody, build_body};

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps one `reqwest::Client` for connection reuse across a run. Every
/// request is sent exactly once; there are no retries.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("restprobe/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Creates a client from a validated run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn from_config(config: &RunConfig) -> Result<Self, HttpClientError> {
        Self::new(config.base_url.clone(), config.timeout)
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Maps reqwest errors to the transport error taxonomy.
    fn map_error(&self, error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout {
                timeout_ms: self.timeout_ms(),
            };
        }

        let host = error
            .url()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());

        if error.is_connect() {
            let message = error_chain(error);
            let lowered = message.to_lowercase();

            if is_refused(error) || lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(error_chain(error));
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error with all of its sources. reqwest keeps the OS-level
/// reason in the source chain, not in its own message.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn is_refused(error: &reqwest::Error) -> bool {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>()
            && io.kind() == std::io::ErrorKind::ConnectionRefused
        {
            return true;
        }
        source = cause.source();
    }
    false
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseRecord, HttpClientError> {
        let url = request
            .endpoint
            .resolve(&self.base_url)
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        let body = build_body(&request.body).map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url.clone());

        if let Some(credential) = &request.credential {
            builder = builder.basic_auth(&credential.username, Some(&credential.password));
        }
        if let Some(content_type) = body.content_type() {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder = match body {
            BuiltBody::None => builder,
            BuiltBody::Json(bytes) => builder.body(bytes),
            BuiltBody::Multipart(form) => builder.multipart(form),
        };

        let start = Instant::now();

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| self.map_error(&e))?;
        let elapsed = start.elapsed();

        tracing::debug!(
            method = %request.method,
            %url,
            status,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            body_bytes = bytes.len(),
            "http exchange"
        );

        Ok(ResponseRecord::from_raw(
            status,
            elapsed,
            content_type.as_deref(),
            &bytes,
        ))
    }
}
