//! Integration tests for `CodaClient::send` against a local wiremock server.

use rollcall_coda::{CodaClient, CodaError, CodaPayload};
use rollcall_core::{AggregateResult, CategorySummary, TaggingOutcome};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payload() -> CodaPayload {
    let result = AggregateResult {
        total_unique_emails: 0,
        total_profiles_in_window: 0,
        emails_with_multiple_profiles: 0,
        only_b: CategorySummary::empty(),
        only_a: CategorySummary::empty(),
        both: CategorySummary::empty(),
        tagging_results: None,
        run_id: None,
        timestamp: None,
    }
    .with_tagging(TaggingOutcome::default())
    .with_run_metadata("run-abc", 1_700_000_000);

    CodaPayload::from_result(&result, 3).expect("payload should build")
}

#[tokio::test]
async fn send_posts_payload_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hooks/automation"))
        .and(header("authorization", "Bearer coda-token"))
        .and(body_partial_json(json!({
            "run_id": "run-abc",
            "timestamp": 1_700_000_000,
            "recency_days": 3,
            "tagging_results": { "total_profiles_to_tag": 0 }
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/hooks/automation", server.uri());
    let client = CodaClient::new(&url, "coda-token", 5).expect("client should build");
    let result = client.send(&payload()).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn send_sends_all_count_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hooks/automation"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let url = format!("{}/hooks/automation", server.uri());
    let client = CodaClient::new(&url, "coda-token", 5).expect("client should build");
    client.send(&payload()).await.expect("send should succeed");

    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("body should be JSON");
    assert_eq!(body["counts"].as_array().map(Vec::len), Some(36));
}

#[tokio::test]
async fn send_surfaces_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hooks/automation"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let url = format!("{}/hooks/automation", server.uri());
    let client = CodaClient::new(&url, "bad-token", 5).expect("client should build");
    let result = client.send(&payload()).await;
    assert!(
        matches!(result, Err(CodaError::UnexpectedStatus { status: 403 })),
        "expected UnexpectedStatus(403), got: {result:?}"
    );
}
