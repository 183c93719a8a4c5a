//! Response-side types.

mod record;

pub use record::{ResponseRecord, StatusCode};
