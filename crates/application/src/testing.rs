//! Scripted HTTP client for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use restprobe_domain::{RequestSpec, ResponseRecord};

use crate::ports::{HttpClient, HttpClientError};

/// Replays queued responses in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<ResponseRecord, HttpClientError>>>,
    sent: Mutex<Vec<RequestSpec>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: ResponseRecord) -> Self {
        self.push(Ok(response))
    }

    pub fn fail(self, error: HttpClientError) -> Self {
        self.push(Err(error))
    }

    pub fn sent(&self) -> Vec<RequestSpec> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    fn push(self, reply: Result<ResponseRecord, HttpClientError>) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseRecord, HttpClientError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(request.clone());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Err(HttpClientError::Other("no scripted reply left".to_string())))
    }
}
