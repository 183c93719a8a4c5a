//! Test cases and the per-case session they run in.
//!
//! A [`TestCase`] is declarative: one request, the status codes it may come
//! back with, an optional latency bound and an optional [`Continuation`] that
//! performs follow-up requests when the primary response warrants it.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use restprobe_domain::{
    AcceptableCodeSet, CaseOutcome, CaseResult, Observation, RequestSpec, ResponseRecord,
};
use thiserror::Error;

use crate::ports::{HttpClient, HttpClientError};

/// Why a case did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseError {
    /// A response arrived but violated an expectation.
    #[error("{0}")]
    Assertion(String),

    /// An exchange could not be completed.
    #[error(transparent)]
    Transport(#[from] HttpClientError),
}

impl CaseError {
    /// Creates an assertion failure.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }
}

impl From<CaseError> for CaseOutcome {
    fn from(error: CaseError) -> Self {
        match error {
            CaseError::Assertion(message) => Self::AssertionFailed { message },
            CaseError::Transport(e) => Self::TransportError {
                message: e.to_string(),
            },
        }
    }
}

/// What a response must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// Acceptable status codes.
    pub codes: AcceptableCodeSet,
    /// Exclusive upper bound on elapsed time.
    pub max_elapsed: Option<Duration>,
}

impl Expectation {
    /// Expects a status in `codes`, with no timing bound.
    #[must_use]
    pub const fn status(codes: AcceptableCodeSet) -> Self {
        Self {
            codes,
            max_elapsed: None,
        }
    }

    /// Additionally requires elapsed time strictly below `limit`.
    #[must_use]
    pub const fn within(mut self, limit: Duration) -> Self {
        self.max_elapsed = Some(limit);
        self
    }

    /// Checks status and timing. Both are evaluated so a failure reports
    /// every violated condition.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Assertion`] describing the observed values.
    pub fn check(&self, response: &ResponseRecord) -> Result<(), CaseError> {
        let mut violations = Vec::new();

        if !self.codes.contains(response.status) {
            violations.push(format!(
                "expected status {}, got {}",
                self.codes.description(),
                response.status
            ));
        }

        if let Some(limit) = self.max_elapsed
            && response.elapsed >= limit
        {
            violations.push(format!(
                "took {}ms, expected < {}ms",
                response.elapsed_ms(),
                limit.as_millis()
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CaseError::Assertion(violations.join("; ")))
        }
    }
}

/// Per-case state shared by the primary request and any follow-ups.
pub struct Session<'a> {
    client: &'a dyn HttpClient,
    observations: Vec<Observation>,
    warnings: Vec<String>,
}

impl<'a> Session<'a> {
    /// Opens a session over the given client.
    #[must_use]
    pub fn new(client: &'a dyn HttpClient) -> Self {
        Self {
            client,
            observations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Sends a request and records the exchange under `step`.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Transport`] when the exchange fails.
    pub async fn send(
        &mut self,
        step: &str,
        request: &RequestSpec,
    ) -> Result<ResponseRecord, CaseError> {
        tracing::debug!(step, request = %request.label(), "sending request");

        let response = self.client.send(request).await.inspect_err(|e| {
            tracing::warn!(step, request = %request.label(), error = %e, "transport error");
        })?;

        tracing::debug!(
            step,
            request = %request.label(),
            status = response.status.as_u16(),
            elapsed_ms = response.elapsed_ms(),
            "response received"
        );
        self.observations.push(Observation::new(
            step,
            request.method,
            request.endpoint.to_string(),
            &response,
        ));
        Ok(response)
    }

    /// Sends a request and requires its status to be in `codes`.
    ///
    /// # Errors
    ///
    /// Returns a transport error or an assertion failure naming the step.
    pub async fn expect(
        &mut self,
        step: &str,
        request: &RequestSpec,
        codes: &AcceptableCodeSet,
    ) -> Result<ResponseRecord, CaseError> {
        let response = self.send(step, request).await?;
        if codes.contains(response.status) {
            Ok(response)
        } else {
            Err(CaseError::Assertion(format!(
                "{step}: expected status {}, got {}",
                codes.description(),
                response.status
            )))
        }
    }

    /// Records a note that does not fail the case.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "weak assertion");
        self.warnings.push(message);
    }

    fn finish(self) -> (Vec<Observation>, Vec<String>) {
        (self.observations, self.warnings)
    }
}

/// Follow-up work run after the primary response of a case.
#[async_trait]
pub trait Continuation: Send + Sync {
    /// Statuses of the primary response that trigger the follow-up.
    ///
    /// Any other acceptable status passes the case without running it.
    fn gate(&self) -> AcceptableCodeSet;

    /// Performs the follow-up requests.
    ///
    /// # Errors
    ///
    /// Returns the first assertion or transport failure.
    async fn run(&self, primary: &ResponseRecord, session: &mut Session<'_>)
    -> Result<(), CaseError>;
}

/// A named, self-contained contract check.
#[derive(Clone)]
pub struct TestCase {
    name: String,
    description: String,
    request: RequestSpec,
    expectation: Expectation,
    continuation: Option<Arc<dyn Continuation>>,
}

impl TestCase {
    /// Creates a case that sends `request` and accepts any status in `codes`.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec, codes: AcceptableCodeSet) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            request,
            expectation: Expectation::status(codes),
            continuation: None,
        }
    }

    /// Sets the description shown by `list`.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Requires the primary response to arrive in under `limit`.
    #[must_use]
    pub fn within(mut self, limit: Duration) -> Self {
        self.expectation.max_elapsed = Some(limit);
        self
    }

    /// Attaches follow-up work.
    #[must_use]
    pub fn then(mut self, continuation: impl Continuation + 'static) -> Self {
        self.continuation = Some(Arc::new(continuation));
        self
    }

    /// Case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Primary request.
    #[must_use]
    pub const fn request(&self) -> &RequestSpec {
        &self.request
    }

    /// Expectation on the primary response.
    #[must_use]
    pub const fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    /// Runs the case once and classifies the outcome.
    pub async fn execute(&self, client: &dyn HttpClient) -> CaseResult {
        let start = Instant::now();
        let mut session = Session::new(client);

        let outcome = match self.drive(&mut session).await {
            Ok(()) => CaseOutcome::Passed,
            Err(e) => e.into(),
        };

        let (observations, warnings) = session.finish();
        CaseResult::new(&self.name, outcome, start.elapsed())
            .with_observations(observations)
            .with_warnings(warnings)
    }

    async fn drive(&self, session: &mut Session<'_>) -> Result<(), CaseError> {
        let response = session.send("request", &self.request).await?;
        self.expectation.check(&response)?;

        let Some(continuation) = &self.continuation else {
            return Ok(());
        };

        if continuation.gate().contains(response.status) {
            continuation.run(&response, session).await
        } else {
            session.warn(format!(
                "follow-up skipped: primary status {} is outside {}",
                response.status,
                continuation.gate().description()
            ));
            Ok(())
        }
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("request", &self.request.label())
            .field("expectation", &self.expectation)
            .field("continuation", &self.continuation.is_some())
            .finish()
    }
}
