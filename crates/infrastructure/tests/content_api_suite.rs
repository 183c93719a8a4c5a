//! Runs the built-in content API suite against a mock server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use restprobe_application::{SuiteRunner, content_api_suite};
use restprobe_domain::{CaseOutcome, Credential, RunConfig};
use restprobe_infrastructure::{ReqwestHttpClient, format_case};
use serde_json::json;

fn basic(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

fn runner_for(base_url: &str, fail_fast: bool) -> SuiteRunner<ReqwestHttpClient> {
    let config = RunConfig::new(base_url, Credential::default(), 5, fail_fast).unwrap();
    let client = ReqwestHttpClient::from_config(&config).unwrap();
    SuiteRunner::from_config(Arc::new(client), &config)
}

/// Mocks a well-behaved content API. Returns the mocks for the
/// create/verify/cleanup round so callers can assert they were hit once.
async fn mock_healthy_api(server: &mut ServerGuard) -> Vec<Mock> {
    let good = basic("admin", "password");
    let posts = "/wp-json/wp/v2/posts";

    for path in ["/wp-json/", "/wp-json/wp/v2/users/me"] {
        server
            .mock("GET", path)
            .match_header("authorization", good.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;
    }

    server
        .mock("GET", posts)
        .match_header("authorization", good.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(2)
        .create_async()
        .await;
    server
        .mock("GET", posts)
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("GET", posts)
        .match_header("authorization", basic("admin", "wrongpass").as_str())
        .with_status(401)
        .create_async()
        .await;

    server
        .mock("POST", posts)
        .match_body(Matcher::Json(json!({ "content": "Missing title test" })))
        .with_status(400)
        .create_async()
        .await;
    server
        .mock("POST", posts)
        .match_body(Matcher::PartialJson(json!({ "status": "not_a_status" })))
        .with_status(400)
        .create_async()
        .await;
    server
        .mock("PUT", posts)
        .with_status(405)
        .create_async()
        .await;
    server
        .mock("GET", "/wp-json/wp/v2/posts/999999999")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/wp-json/does-not-exist")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("POST", "/wp-json/wp/v2/media")
        .match_body(Matcher::Regex(r#"filename="test.jpg""#.to_string()))
        .with_status(201)
        .create_async()
        .await;
    server
        .mock("POST", "/wp-json/wp/v2/media")
        .match_body(Matcher::Regex(r#"filename="test.txt""#.to_string()))
        .with_status(400)
        .create_async()
        .await;

    let create = server
        .mock("POST", posts)
        .match_header("authorization", good.as_str())
        .match_body(Matcher::PartialJson(json!({ "status": "publish" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":42,"title":{"rendered":"Stage3 Auto Test Post"}}"#)
        .expect(1)
        .create_async()
        .await;
    let verify = server
        .mock("GET", "/wp-json/wp/v2/posts/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":42,"title":{"rendered":"Stage3 Auto Test Post"}}"#)
        .expect(1)
        .create_async()
        .await;
    let cleanup = server
        .mock("DELETE", "/wp-json/wp/v2/posts/42")
        .match_query(Matcher::UrlEncoded("force".to_string(), "true".to_string()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    vec![create, verify, cleanup]
}

#[tokio::test]
async fn test_healthy_api_passes_every_case() {
    let mut server = Server::new_async().await;
    let round = mock_healthy_api(&mut server).await;

    let suite = content_api_suite(&Credential::default());
    let report = runner_for(&server.url(), false).run(&suite).await.unwrap();

    let failures: Vec<_> = report
        .results
        .iter()
        .filter(|r| !r.passed())
        .map(format_case)
        .collect();
    assert_eq!(failures, Vec::<String>::new());
    assert_eq!(report.total(), 14);
    assert!(report.all_passed());

    for mock in round {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_unimplemented_server_fails_every_case() {
    // mockito answers 501 when no mock matches
    let server = Server::new_async().await;

    let suite = content_api_suite(&Credential::default());
    let report = runner_for(&server.url(), false).run(&suite).await.unwrap();

    assert_eq!(report.failed(), 14);
    assert_eq!(report.errored(), 0);
    let create = report
        .results
        .iter()
        .find(|r| r.name == "create_and_verify_post")
        .unwrap();
    assert_eq!(create.observations.len(), 1);
}

#[tokio::test]
async fn test_unreachable_server_stops_with_fail_fast() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let suite = content_api_suite(&Credential::default());
    let report = runner_for(&format!("http://127.0.0.1:{port}"), true)
        .run(&suite)
        .await
        .unwrap();

    assert_eq!(report.total(), 1);
    assert!(matches!(
        report.results[0].outcome,
        CaseOutcome::TransportError { .. }
    ));
    assert_eq!(report.not_run.len(), 13);
    assert!(!report.all_passed());
}

#[tokio::test]
async fn test_filtered_run_only_touches_selected_routes() {
    let mut server = Server::new_async().await;
    let root = server
        .mock("GET", "/wp-json/")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let suite = content_api_suite(&Credential::default())
        .select("^rest_api_root$")
        .unwrap();
    let report = runner_for(&server.url(), false).run(&suite).await.unwrap();

    root.assert_async().await;
    assert_eq!(report.total(), 1);
    assert!(report.all_passed());
}
