//! restprobe - Main Entry Point
//!
//! Parses the command line, installs logging and runs the content API
//! suite. Exit codes: 0 when every case passed, 1 when any case failed or
//! was skipped, 2 when the run could not start.

mod cli;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use restprobe_application::{Suite, SuiteRunner, content_api_suite};
use restprobe_domain::{Credential, RunConfig, RunReport};
use restprobe_infrastructure::{ConfigRepository, ReqwestHttpClient, TextReporter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, RunArgs};

const EXIT_PASSED: u8 = 0;
const EXIT_FAILED: u8 = 1;
const EXIT_SETUP: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    ExitCode::from(execute(cli.command).await)
}

/// Runs a subcommand and maps its outcome to a process exit code.
async fn execute(command: Command) -> u8 {
    let result = match command {
        Command::Run(args) => run(&args).await,
        Command::List { filter } => list(filter.as_deref()),
    };

    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "setup failed");
        eprintln!("error: {e:#}");
        EXIT_SETUP
    })
}

/// Logs go to stderr so the report on stdout stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn exit_code(report: &RunReport) -> u8 {
    if report.all_passed() {
        EXIT_PASSED
    } else {
        EXIT_FAILED
    }
}

fn select(suite: Suite, filter: Option<&str>) -> anyhow::Result<Suite> {
    match filter {
        Some(pattern) => suite.select(pattern).context("cannot select cases"),
        None => Ok(suite),
    }
}

/// Resolves configuration and the case selection. Nothing is sent yet.
async fn prepare(args: &RunArgs) -> anyhow::Result<(RunConfig, Suite)> {
    let repository = args
        .config
        .as_ref()
        .map_or_else(ConfigRepository::new, ConfigRepository::with_path);
    let file_layer = repository.load().await.context("cannot load configuration")?;
    let config = args
        .overrides()
        .over(file_layer)
        .resolve()
        .context("invalid configuration")?;

    let suite = select(content_api_suite(&config.credential), args.filter.as_deref())?;
    suite.validate().context("invalid suite")?;

    Ok((config, suite))
}

async fn run(args: &RunArgs) -> anyhow::Result<u8> {
    let (config, suite) = prepare(args).await?;

    let client = ReqwestHttpClient::from_config(&config).context("cannot create HTTP client")?;
    let runner = SuiteRunner::from_config(Arc::new(client), &config);

    tracing::info!(base_url = %config.base_url, cases = suite.len(), "starting run");

    let mut reporter = TextReporter::new(io::stdout());
    let mut write_error = None;
    let report = runner
        .run_with(&suite, |result| {
            if let Err(e) = reporter.case(result)
                && write_error.is_none()
            {
                write_error = Some(e);
            }
        })
        .await
        .context("run aborted")?;

    if let Some(e) = write_error {
        return Err(e).context("cannot write report");
    }
    reporter.finish(&report).context("cannot write report")?;

    Ok(exit_code(&report))
}

fn list(filter: Option<&str>) -> anyhow::Result<u8> {
    let suite = select(content_api_suite(&Credential::default()), filter)?;

    let width = suite.cases().iter().map(|c| c.name().len()).max().unwrap_or(0);
    for case in suite.cases() {
        println!(
            "{:<width$}  {:<7} {}",
            case.name(),
            case.request().method.as_str(),
            case.description()
        );
    }
    Ok(EXIT_PASSED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use restprobe_domain::{CaseOutcome, CaseResult};
    use std::net::TcpListener;
    use std::time::Duration;
    use tempfile::TempDir;
    use uuid::Uuid;

    /// Run arguments that ignore the user's config file and run one case.
    async fn run_args(dir: &TempDir, base_url: &str) -> RunArgs {
        let config = dir.path().join("config.yaml");
        tokio::fs::write(&config, "").await.unwrap();

        RunArgs {
            base_url: Some(base_url.to_string()),
            username: None,
            password: None,
            timeout_secs: Some(2),
            fail_fast: false,
            filter: Some("^rest_api_root$".to_string()),
            config: Some(config),
        }
    }

    fn report(results: Vec<CaseResult>, not_run: Vec<String>) -> RunReport {
        RunReport::new(Uuid::nil(), Utc::now(), results, not_run, Duration::ZERO)
    }

    fn failed(name: &str) -> CaseResult {
        CaseResult::new(
            name,
            CaseOutcome::AssertionFailed {
                message: "status 500 not in [200]".to_string(),
            },
            Duration::ZERO,
        )
    }

    #[test]
    fn test_exit_code_follows_report() {
        let passed = CaseResult::new("a", CaseOutcome::Passed, Duration::ZERO);

        assert_eq!(exit_code(&report(vec![passed.clone()], Vec::new())), 0);
        assert_eq!(
            exit_code(&report(vec![passed.clone(), failed("b")], Vec::new())),
            1
        );
        assert_eq!(exit_code(&report(vec![passed], vec!["b".to_string()])), 1);
    }

    #[tokio::test]
    async fn test_passing_run_exits_zero() {
        let mut server = mockito::Server::new_async().await;
        let root = server
            .mock("GET", "/wp-json/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;
        let dir = TempDir::new().unwrap();

        let code = execute(Command::Run(run_args(&dir, &server.url()).await)).await;

        assert_eq!(code, EXIT_PASSED);
        root.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_server_exits_one() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let dir = TempDir::new().unwrap();
        let args = run_args(&dir, &format!("http://127.0.0.1:{port}")).await;

        assert_eq!(execute(Command::Run(args)).await, EXIT_FAILED);
    }

    #[tokio::test]
    async fn test_setup_errors_exit_two() {
        let dir = TempDir::new().unwrap();
        let never_contacted = "http://127.0.0.1:9";

        let cases = [
            RunArgs {
                base_url: Some("not a url".to_string()),
                ..run_args(&dir, never_contacted).await
            },
            RunArgs {
                timeout_secs: Some(0),
                ..run_args(&dir, never_contacted).await
            },
            RunArgs {
                filter: Some("(".to_string()),
                ..run_args(&dir, never_contacted).await
            },
            RunArgs {
                filter: Some("^nothing_matches$".to_string()),
                ..run_args(&dir, never_contacted).await
            },
            RunArgs {
                config: Some(dir.path().join("absent.yaml")),
                ..run_args(&dir, never_contacted).await
            },
        ];

        for args in cases {
            assert!(prepare(&args).await.is_err());
            assert_eq!(execute(Command::Run(args)).await, EXIT_SETUP);
        }
    }

    #[test]
    fn test_list_rejects_bad_filter() {
        assert!(list(Some("(")).is_err());
        assert_eq!(list(Some("^auth_")).unwrap(), EXIT_PASSED);
    }
}
