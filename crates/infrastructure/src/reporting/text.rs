//! Plain-text report.
//!
//! One line per case, indented warnings below it, then a summary:
//!
//! ```text
//! PASS  rest_api_root  GET /wp-json/ -> 200 OK (12ms)
//! FAIL  invalid_route  expected status in [401, 403, 404], got 500 Internal Server Error | GET /wp-json/does-not-exist -> 500 Internal Server Error (8ms)
//! 2 cases: 1 passed, 1 failed, 0 errors, 0 not run
//! ```

use std::fmt::Write as _;
use std::io;

use restprobe_domain::{CaseOutcome, CaseResult, Observation, RunReport};

/// Formats one case result, including warning lines.
#[must_use]
pub fn format_case(result: &CaseResult) -> String {
    let exchanges = result
        .observations
        .iter()
        .map(format_observation)
        .collect::<Vec<_>>()
        .join(", ");

    let detail = match &result.outcome {
        CaseOutcome::Passed => exchanges,
        CaseOutcome::AssertionFailed { message } | CaseOutcome::TransportError { message } => {
            if exchanges.is_empty() {
                message.clone()
            } else {
                format!("{message} | {exchanges}")
            }
        }
    };

    let mut line = format!("{:<5} {}  {}", result.outcome.label(), result.name, detail);
    line.truncate(line.trim_end().len());
    for warning in &result.warnings {
        let _ = write!(line, "\n      warning: {warning}");
    }
    line
}

fn format_observation(observation: &Observation) -> String {
    format!(
        "{} {} -> {} ({}ms)",
        observation.method, observation.path, observation.status, observation.elapsed_ms
    )
}

/// Formats the closing lines of a report.
#[must_use]
pub fn format_summary(report: &RunReport) -> String {
    let mut out = String::new();
    for name in &report.not_run {
        let _ = writeln!(out, "{:<5} {name}  not run", "SKIP");
    }
    let _ = write!(
        out,
        "{} cases: {} passed, {} failed, {} errors, {} not run\nrun {} started {} took {}ms, pass rate {:.1}%",
        report.total() + report.not_run.len(),
        report.passed(),
        report.failed(),
        report.errored(),
        report.not_run.len(),
        report.run_id,
        report.started_at.to_rfc3339(),
        report.duration_ms,
        report.pass_rate(),
    );
    out
}

/// Streams a report to a writer as cases finish.
pub struct TextReporter<W: io::Write> {
    out: W,
}

impl<W: io::Write> TextReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one case line.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn case(&mut self, result: &CaseResult) -> io::Result<()> {
        writeln!(self.out, "{}", format_case(result))
    }

    /// Writes the summary and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn finish(&mut self, report: &RunReport) -> io::Result<()> {
        writeln!(self.out, "{}", format_summary(report))?;
        self.out.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use restprobe_domain::{HttpMethod, ResponseRecord};
    use std::time::Duration;
    use uuid::Uuid;

    fn observation(step: &str, method: HttpMethod, path: &str, status: u16, ms: u64) -> Observation {
        Observation::new(
            step,
            method,
            path,
            &ResponseRecord::new(status, Duration::from_millis(ms)),
        )
    }

    #[test]
    fn test_format_passed_case() {
        let result = CaseResult::new("rest_api_root", CaseOutcome::Passed, Duration::from_millis(12))
            .with_observations(vec![observation("request", HttpMethod::Get, "/wp-json/", 200, 12)]);

        assert_eq!(
            format_case(&result),
            "PASS  rest_api_root  GET /wp-json/ -> 200 OK (12ms)"
        );
    }

    #[test]
    fn test_format_failed_case_with_warning() {
        let result = CaseResult::new(
            "create_and_verify_post",
            CaseOutcome::AssertionFailed {
                message: "verify: expected status in [200, 201], got 404 Not Found".to_string(),
            },
            Duration::from_millis(30),
        )
        .with_observations(vec![
            observation("request", HttpMethod::Post, "/p", 201, 10),
            observation("verify", HttpMethod::Get, "/p/1", 404, 5),
        ])
        .with_warnings(vec!["slow".to_string()]);

        assert_eq!(
            format_case(&result),
            "FAIL  create_and_verify_post  verify: expected status in [200, 201], got 404 Not Found \
             | POST /p -> 201 Created (10ms), GET /p/1 -> 404 Not Found (5ms)\n      warning: slow"
        );
    }

    #[test]
    fn test_format_transport_error() {
        let result = CaseResult::new(
            "rest_api_root",
            CaseOutcome::TransportError {
                message: "request timed out after 10000ms".to_string(),
            },
            Duration::from_secs(10),
        );

        assert_eq!(
            format_case(&result),
            "ERROR rest_api_root  request timed out after 10000ms"
        );
    }

    #[test]
    fn test_summary_counts_not_run() {
        let report = RunReport::new(
            Uuid::nil(),
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().unwrap(),
            vec![
                CaseResult::new("a", CaseOutcome::Passed, Duration::ZERO),
                CaseResult::new(
                    "b",
                    CaseOutcome::AssertionFailed {
                        message: "x".to_string(),
                    },
                    Duration::ZERO,
                ),
            ],
            vec!["c".to_string()],
            Duration::from_millis(40),
        );

        let summary = format_summary(&report);
        let lines: Vec<_> = summary.lines().collect();

        assert_eq!(lines[0], "SKIP  c  not run");
        assert_eq!(lines[1], "3 cases: 1 passed, 1 failed, 0 errors, 1 not run");
        assert!(lines[2].contains("took 40ms"));
        assert!(lines[2].contains("pass rate 50.0%"));
    }

    #[test]
    fn test_reporter_streams_lines() {
        let mut reporter = TextReporter::new(Vec::new());
        let result = CaseResult::new("a", CaseOutcome::Passed, Duration::ZERO);
        reporter.case(&result).unwrap();
        reporter
            .finish(&RunReport::new(
                Uuid::nil(),
                Utc::now(),
                vec![result],
                Vec::new(),
                Duration::ZERO,
            ))
            .unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.starts_with("PASS  a\n1 cases: 1 passed"));
    }
}
