//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the contract runner and the outside
//! world. Adapters in the infrastructure layer implement them.

mod http_client;

pub use http_client::{HttpClient, HttpClientError};
