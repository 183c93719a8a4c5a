//! Request-side types: methods, endpoints, bodies and the full request spec.

mod body;
mod endpoint;
mod method;
mod spec;

pub use body::{FilePart, RequestBody};
pub use endpoint::Endpoint;
pub use method::HttpMethod;
pub use spec::RequestSpec;
