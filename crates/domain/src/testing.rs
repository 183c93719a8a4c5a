//! Contract assertions and run results.
//!
//! This module provides the tolerant status-code sets cases are checked
//! against and the result objects a run produces.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::HttpMethod;
use crate::response::{ResponseRecord, StatusCode};

/// Codes for a request the server accepted.
pub const SUCCESS_CODES: [u16; 2] = [200, 201];
/// Codes for a request the server refused for lack of (valid) credentials.
pub const AUTH_ERROR_CODES: [u16; 2] = [401, 403];
/// Codes for a route or resource the server does not expose.
pub const NOT_FOUND_CODES: [u16; 1] = [404];

/// A set of HTTP status codes treated as one valid outcome class.
///
/// Sets combine by union so a case can say "any of these outcomes is fine in
/// this environment" while still failing on a wrong class such as a 500.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcceptableCodeSet {
    codes: BTreeSet<u16>,
}

impl AcceptableCodeSet {
    /// Builds a set from explicit codes.
    #[must_use]
    pub fn of(codes: &[u16]) -> Self {
        Self {
            codes: codes.iter().copied().collect(),
        }
    }

    /// `{200, 201}`
    #[must_use]
    pub fn success() -> Self {
        Self::of(&SUCCESS_CODES)
    }

    /// `{401, 403}`
    #[must_use]
    pub fn auth_error() -> Self {
        Self::of(&AUTH_ERROR_CODES)
    }

    /// `{404}`
    #[must_use]
    pub fn not_found() -> Self {
        Self::of(&NOT_FOUND_CODES)
    }

    /// Success ∪ AuthError ∪ NotFound: "the server responded sensibly".
    #[must_use]
    pub fn valid() -> Self {
        Self::success().union(&Self::auth_error()).union(&Self::not_found())
    }

    /// Returns the union of both sets.
    #[must_use]
    pub fn union(mut self, other: &Self) -> Self {
        self.codes.extend(other.codes.iter().copied());
        self
    }

    /// Adds a single ad-hoc code such as 400 or 405.
    #[must_use]
    pub fn with_code(mut self, code: u16) -> Self {
        self.codes.insert(code);
        self
    }

    /// Returns whether the status is a member of this set.
    #[must_use]
    pub fn contains(&self, status: StatusCode) -> bool {
        self.codes.contains(&status.as_u16())
    }

    /// Returns whether no code has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.codes.iter().copied()
    }

    /// Human-readable description, e.g. `in [401, 403, 404]`.
    #[must_use]
    pub fn description(&self) -> String {
        let codes: Vec<_> = self.codes.iter().map(ToString::to_string).collect();
        format!("in [{}]", codes.join(", "))
    }
}

/// Returns whether `status` is acceptable under `set`.
#[must_use]
pub fn is_acceptable(status: StatusCode, set: &AcceptableCodeSet) -> bool {
    set.contains(status)
}

/// One HTTP exchange performed while running a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// What the exchange was for (`request`, `verify`, `cleanup`).
    pub step: String,
    /// Method used.
    pub method: HttpMethod,
    /// Path and query sent.
    pub path: String,
    /// Status received.
    pub status: StatusCode,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
}

impl Observation {
    /// Records an exchange.
    #[must_use]
    pub fn new(
        step: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
        response: &ResponseRecord,
    ) -> Self {
        Self {
            step: step.into(),
            method,
            path: path.into(),
            status: response.status,
            elapsed_ms: response.elapsed_ms(),
        }
    }
}

/// Final classification of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Every check held.
    Passed,
    /// The exchange completed but a status, timing or body check failed.
    AssertionFailed {
        /// What was expected and what was observed.
        message: String,
    },
    /// The exchange could not be completed.
    TransportError {
        /// Underlying transport failure.
        message: String,
    },
}

impl CaseOutcome {
    /// Short label used in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::AssertionFailed { .. } => "FAIL",
            Self::TransportError { .. } => "ERROR",
        }
    }

    /// Returns true for [`CaseOutcome::Passed`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Result of running a single case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case name.
    pub name: String,
    /// Classification.
    pub outcome: CaseOutcome,
    /// Exchanges performed, in order.
    #[serde(default)]
    pub observations: Vec<Observation>,
    /// Notes on weak or partial checks that did not fail the case.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Wall-clock time spent on the case in milliseconds.
    pub duration_ms: u64,
}

impl CaseResult {
    /// Creates a result with no observations or warnings.
    #[must_use]
    pub fn new(name: impl Into<String>, outcome: CaseOutcome, duration: Duration) -> Self {
        Self {
            name: name.into(),
            outcome,
            observations: Vec::new(),
            warnings: Vec::new(),
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Attaches observations.
    #[must_use]
    pub fn with_observations(mut self, observations: Vec<Observation>) -> Self {
        self.observations = observations;
        self
    }

    /// Attaches warnings.
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Returns whether the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_pass()
    }
}

/// Aggregated results of one suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Identifier of this run, also attached to log events.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case results in execution order.
    pub results: Vec<CaseResult>,
    /// Cases skipped because the run stopped early.
    #[serde(default)]
    pub not_run: Vec<String>,
    /// Total run time in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Creates a report.
    #[must_use]
    pub fn new(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        results: Vec<CaseResult>,
        not_run: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            run_id,
            started_at,
            results,
            not_run,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Number of executed cases.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// Number of assertion failures.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, CaseOutcome::AssertionFailed { .. }))
            .count()
    }

    /// Number of transport errors.
    #[must_use]
    pub fn errored(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, CaseOutcome::TransportError { .. }))
            .count()
    }

    /// True when every case ran and passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.not_run.is_empty() && self.results.iter().all(CaseResult::passed)
    }

    /// Pass rate of executed cases as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            100.0
        } else {
            (self.passed() as f64 / self.total() as f64) * 100.0
        }
    }
}
