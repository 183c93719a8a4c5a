//! Restprobe Application - Cases, suites and the runner
//!
//! This crate holds the contract-testing logic: declarative test cases,
//! the built-in suites, and the runner that executes them through the
//! [`HttpClient`] port.

pub mod case;
pub mod error;
pub mod ports;
pub mod runner;
pub mod suite;
pub mod suites;

#[cfg(test)]
mod testing;

pub use case::{CaseError, Continuation, Expectation, Session, TestCase};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError};
pub use runner::SuiteRunner;
pub use suite::Suite;
pub use suites::content_api_suite;
