//! Suite runner.
//!
//! Executes every case of a suite once, in order, and collects the results
//! into a [`RunReport`].

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use restprobe_domain::{CaseOutcome, CaseResult, RunConfig, RunReport};
use tracing::Instrument;
use uuid::Uuid;

use crate::case::TestCase;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;
use crate::suite::Suite;

/// Runs suites against one HTTP client.
pub struct SuiteRunner<C: HttpClient> {
    client: Arc<C>,
    fail_fast: bool,
}

impl<C: HttpClient> SuiteRunner<C> {
    /// Creates a runner that executes every case.
    pub const fn new(client: Arc<C>) -> Self {
        Self {
            client,
            fail_fast: false,
        }
    }

    /// Creates a runner honoring the run configuration.
    pub const fn from_config(client: Arc<C>, config: &RunConfig) -> Self {
        Self {
            client,
            fail_fast: config.fail_fast,
        }
    }

    /// Set whether to stop after the first case that does not pass.
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Runs the suite and returns the report.
    ///
    /// # Errors
    ///
    /// Returns a setup error when the suite is invalid. Case failures are
    /// never errors; they are recorded in the report.
    pub async fn run(&self, suite: &Suite) -> ApplicationResult<RunReport> {
        self.run_with(suite, |_| {}).await
    }

    /// Runs the suite, handing each result to `on_result` as soon as the
    /// case finishes.
    ///
    /// # Errors
    ///
    /// Returns a setup error when the suite is invalid.
    pub async fn run_with<F>(&self, suite: &Suite, mut on_result: F) -> ApplicationResult<RunReport>
    where
        F: FnMut(&CaseResult),
    {
        suite.validate()?;

        let run_id = Uuid::now_v7();
        let started_at = Utc::now();
        let start = Instant::now();
        let span = tracing::info_span!("run", %run_id, suite = suite.name());

        async move {
            tracing::info!(cases = suite.len(), fail_fast = self.fail_fast, "run started");

            let mut results = Vec::with_capacity(suite.len());
            let mut not_run = Vec::new();

            for (index, case) in suite.cases().iter().enumerate() {
                let result = self.run_case(case).await;
                on_result(&result);

                let stop = self.fail_fast && !result.passed();
                results.push(result);

                if stop {
                    not_run = suite.cases()[index + 1..]
                        .iter()
                        .map(|c| c.name().to_string())
                        .collect();
                    tracing::info!(skipped = not_run.len(), "stopping after first failure");
                    break;
                }
            }

            let report = RunReport::new(run_id, started_at, results, not_run, start.elapsed());
            tracing::info!(
                passed = report.passed(),
                failed = report.failed(),
                errored = report.errored(),
                duration_ms = report.duration_ms,
                "run finished"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    async fn run_case(&self, case: &TestCase) -> CaseResult {
        let span = tracing::debug_span!("case", name = case.name());
        let result = case.execute(self.client.as_ref()).instrument(span).await;

        match &result.outcome {
            CaseOutcome::Passed => {
                tracing::info!(case = %result.name, duration_ms = result.duration_ms, "case passed");
            }
            outcome => {
                tracing::info!(case = %result.name, outcome = outcome.label(), "case did not pass");
            }
        }
        result
    }
}
