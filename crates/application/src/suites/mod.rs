//! Built-in suites.

mod content_api;

pub use content_api::{
    CreateVerifyCleanup, LATENCY_THRESHOLD, MEDIA_PATH, MISSING_ROUTE_PATH, POSTS_PATH, ROOT_PATH,
    USERS_ME_PATH, content_api_suite,
};
