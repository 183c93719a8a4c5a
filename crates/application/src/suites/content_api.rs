//! Contract suite for a WordPress-style content REST API.
//!
//! Every case accepts a tolerant set of status codes so the suite passes on
//! servers that block writes or hide routes, while still catching server
//! errors, wrong semantics and slow responses.

use std::time::Duration;

use async_trait::async_trait;
use restprobe_domain::{AcceptableCodeSet, Credential, RequestBody, RequestSpec, ResponseRecord};
use serde_json::json;

use crate::case::{CaseError, Continuation, Session, TestCase};
use crate::suite::Suite;

/// API discovery root.
pub const ROOT_PATH: &str = "/wp-json/";
/// Posts collection.
pub const POSTS_PATH: &str = "/wp-json/wp/v2/posts";
/// Current-user endpoint.
pub const USERS_ME_PATH: &str = "/wp-json/wp/v2/users/me";
/// Media collection.
pub const MEDIA_PATH: &str = "/wp-json/wp/v2/media";
/// A route no server registers.
pub const MISSING_ROUTE_PATH: &str = "/wp-json/does-not-exist";
/// Exclusive upper bound for the latency case.
pub const LATENCY_THRESHOLD: Duration = Duration::from_secs(3);

const INVALID_POST_ID: u64 = 999_999_999;
const CREATED_TITLE: &str = "Stage3 Auto Test Post";
const CREATED_CONTENT: &str = "This post was created by automated tests.";

/// Builds the fourteen-case content API suite.
///
/// `credential` authenticates every case except the two that probe missing
/// and wrong credentials.
#[must_use]
pub fn content_api_suite(credential: &Credential) -> Suite {
    let valid = AcceptableCodeSet::valid();
    let denied = AcceptableCodeSet::auth_error().union(&AcceptableCodeSet::not_found());
    let rejected = denied.clone().with_code(400);
    let authed = |request: RequestSpec| request.with_credential(credential.clone());

    Suite::new("content-api")
        .with_case(
            TestCase::new("rest_api_root", authed(RequestSpec::get(ROOT_PATH)), valid.clone())
                .describe("API root answers"),
        )
        .with_case(
            TestCase::new(
                "posts_collection_reachable",
                authed(RequestSpec::get(POSTS_PATH)),
                valid.clone(),
            )
            .describe("Posts collection answers"),
        )
        .with_case(
            TestCase::new(
                "users_me_reachable",
                authed(RequestSpec::get(USERS_ME_PATH)),
                valid.clone(),
            )
            .describe("Current user endpoint answers"),
        )
        .with_case(
            TestCase::new("auth_missing", RequestSpec::get(POSTS_PATH), denied.clone())
                .describe("Posts without credentials is refused or hidden"),
        )
        .with_case(
            TestCase::new(
                "auth_wrong_password",
                RequestSpec::get(POSTS_PATH).with_credential(credential.with_wrong_password()),
                denied.clone(),
            )
            .describe("Posts with a wrong password is refused or hidden"),
        )
        .with_case(
            TestCase::new(
                "create_and_verify_post",
                authed(RequestSpec::post(POSTS_PATH)).with_body(RequestBody::json(json!({
                    "title": CREATED_TITLE,
                    "content": CREATED_CONTENT,
                    "status": "publish",
                }))),
                valid.clone(),
            )
            .describe("Create a post, read it back, then delete it")
            .then(CreateVerifyCleanup::new(credential.clone(), CREATED_TITLE)),
        )
        .with_case(
            TestCase::new(
                "create_post_missing_title",
                authed(RequestSpec::post(POSTS_PATH))
                    .with_body(RequestBody::json(json!({ "content": "Missing title test" }))),
                rejected.clone(),
            )
            .describe("Creating a post without a title is rejected"),
        )
        .with_case(
            TestCase::new(
                "create_post_invalid_status",
                authed(RequestSpec::post(POSTS_PATH)).with_body(RequestBody::json(json!({
                    "title": "Invalid status",
                    "content": "This should fail",
                    "status": "not_a_status",
                }))),
                rejected.clone(),
            )
            .describe("Creating a post with an unknown status is rejected"),
        )
        .with_case(
            TestCase::new(
                "get_invalid_post_id",
                authed(RequestSpec::get(format!("{POSTS_PATH}/{INVALID_POST_ID}"))),
                valid.clone(),
            )
            .describe("Looking up a post that does not exist does not error"),
        )
        .with_case(
            TestCase::new(
                "media_upload_valid",
                authed(RequestSpec::post(MEDIA_PATH))
                    .with_body(RequestBody::file("file", "test.jpg", Vec::<u8>::new())),
                valid.clone(),
            )
            .describe("Uploading an image file is accepted or refused cleanly"),
        )
        .with_case(
            TestCase::new(
                "media_upload_invalid_type",
                authed(RequestSpec::post(MEDIA_PATH))
                    .with_body(RequestBody::file("file", "test.txt", b"not an image".to_vec())),
                rejected,
            )
            .describe("Uploading a text file as media is rejected"),
        )
        .with_case(
            TestCase::new(
                "invalid_route",
                authed(RequestSpec::get(MISSING_ROUTE_PATH)),
                denied.clone(),
            )
            .describe("Unknown routes are not found"),
        )
        .with_case(
            TestCase::new(
                "wrong_http_method",
                authed(RequestSpec::put(POSTS_PATH)),
                denied.with_code(400).with_code(405),
            )
            .describe("PUT on the posts collection is not allowed"),
        )
        .with_case(
            TestCase::new("posts_response_time", authed(RequestSpec::get(POSTS_PATH)), valid)
                .within(LATENCY_THRESHOLD)
                .describe("Posts collection answers in under three seconds"),
        )
}

/// Reads back and deletes the post created by the primary request.
#[derive(Debug, Clone)]
pub struct CreateVerifyCleanup {
    credential: Credential,
    title: String,
}

impl CreateVerifyCleanup {
    /// Creates the follow-up for a post created with `title`.
    #[must_use]
    pub fn new(credential: Credential, title: impl Into<String>) -> Self {
        Self {
            credential,
            title: title.into(),
        }
    }

    async fn verify(&self, path: &str, session: &mut Session<'_>) -> Result<(), CaseError> {
        let request = RequestSpec::get(path).with_credential(self.credential.clone());
        let response = session
            .expect("verify", &request, &AcceptableCodeSet::success())
            .await?;

        if response.json.is_none() {
            return Ok(());
        }
        match response.json_field("title.rendered").and_then(|v| v.as_str()) {
            Some(rendered) if rendered.contains(&self.title) => Ok(()),
            Some(rendered) => Err(CaseError::assertion(format!(
                "verify: title `{rendered}` does not contain `{}`",
                self.title
            ))),
            None => Err(CaseError::assertion("verify: response has no `title.rendered`")),
        }
    }
}

#[async_trait]
impl Continuation for CreateVerifyCleanup {
    fn gate(&self) -> AcceptableCodeSet {
        AcceptableCodeSet::success()
    }

    async fn run(
        &self,
        primary: &ResponseRecord,
        session: &mut Session<'_>,
    ) -> Result<(), CaseError> {
        let id = primary
            .json_field("id")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| CaseError::assertion("create: response has no numeric `id`"))?;
        let path = format!("{POSTS_PATH}/{id}");

        let verified = self.verify(&path, session).await;

        // Cleanup runs regardless so the server is left as it was found.
        let cleanup = RequestSpec::delete(&path)
            .with_credential(self.credential.clone())
            .with_query("force", "true");
        let cleaned = session
            .expect(
                "cleanup",
                &cleanup,
                &AcceptableCodeSet::success().union(&AcceptableCodeSet::not_found()),
            )
            .await;

        verified?;
        cleaned.map(|_| ())
    }
}
