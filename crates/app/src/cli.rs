//! Command-line interface.
//!
//! # Environment Variables
//!
//! | Variable | Flag |
//! |----------|------|
//! | `RESTPROBE_BASE_URL` | `--base-url` |
//! | `RESTPROBE_USERNAME` | `--username` |
//! | `RESTPROBE_PASSWORD` | `--password` |
//! | `RESTPROBE_TIMEOUT_SECS` | `--timeout-secs` |
//! | `RESTPROBE_FAIL_FAST` | `--fail-fast` |
//!
//! Flags win over environment variables, which win over the config file.

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use restprobe_infrastructure::PartialConfig;

/// Contract tests for a WordPress-style content REST API.
#[derive(Debug, Parser)]
#[command(name = "restprobe", version, about)]
pub struct Cli {
    /// Log at debug level (overrides `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the suite against a server.
    Run(RunArgs),
    /// List cases without contacting the server.
    List {
        /// Only list cases whose name matches this regular expression.
        #[arg(long)]
        filter: Option<String>,
    },
}

/// Options for `restprobe run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Server base URL [default: http://localhost:8000]
    #[arg(long, env = "RESTPROBE_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for authenticated cases [default: admin]
    #[arg(long, env = "RESTPROBE_USERNAME")]
    pub username: Option<String>,

    /// Password for authenticated cases [default: password]
    #[arg(long, env = "RESTPROBE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, env = "RESTPROBE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Stop after the first case that does not pass.
    #[arg(long, env = "RESTPROBE_FAIL_FAST", value_parser = env_flag())]
    pub fail_fast: bool,

    /// Only run cases whose name matches this regular expression.
    #[arg(long)]
    pub filter: Option<String>,

    /// YAML config file [default: <config dir>/restprobe/config.yaml]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Reads boolean environment values: `0`, `false`, `no`, `off` and an empty
/// value are false, anything else is true.
fn env_flag() -> FalseyValueParser {
    FalseyValueParser::new()
}

impl RunArgs {
    /// Settings given on the command line or in the environment.
    #[must_use]
    pub fn overrides(&self) -> PartialConfig {
        PartialConfig {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout_secs: self.timeout_secs,
            fail_fast: self.fail_fast.then_some(true),
        }
    }
}
