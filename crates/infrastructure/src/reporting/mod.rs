//! Run reporters.

mod text;

pub use text::{TextReporter, format_case, format_summary};
