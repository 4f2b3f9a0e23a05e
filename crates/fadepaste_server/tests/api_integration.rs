//! Integration tests for the fadepaste HTTP API.

mod support;

use axum::http::StatusCode;
use axum_test::TestServer;
use fadepaste_core::models::paste::Paste;
use fadepaste_server::{AppError, PasteStore};
use serde_json::{json, Value};
use std::sync::Arc;
use support::{
    now_header, setup_server_without_test_mode, setup_test_server, test_config,
    test_server_for_store, T0,
};

async fn create(server: &TestServer, body: Value) -> String {
    let response = server.post("/api/pastes").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK, "body: {}", response.text());
    let created: Value = response.json();
    created["id"].as_str().expect("id").to_string()
}

async fn get_at(server: &TestServer, path: &str, now: i64) -> axum_test::TestResponse {
    let (name, value) = now_header(now);
    server.get(path).add_header(name, value).await
}

/// Store whose every operation fails, for exercising 5xx paths.
struct BrokenStore;

impl PasteStore for BrokenStore {
    fn insert(&self, _paste: &Paste) -> Result<(), AppError> {
        Err(AppError::StorageMessage("insert refused".to_string()))
    }

    fn get(&self, _id: &str) -> Result<Option<Paste>, AppError> {
        Err(AppError::StorageMessage("read refused".to_string()))
    }

    fn increment_view(&self, _id: &str) -> Result<Option<u64>, AppError> {
        Err(AppError::StorageMessage("write refused".to_string()))
    }

    fn ping(&self) -> Result<(), AppError> {
        Err(AppError::StorageMessage("unreachable".to_string()))
    }
}

fn broken_server() -> TestServer {
    test_server_for_store(test_config("", true), Arc::new(BrokenStore))
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (server, _temp) = setup_test_server();
    let response = server.get("/api/healthz").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));
}

#[tokio::test]
async fn healthz_reports_storage_failure() {
    let server = broken_server();
    let response = server.get("/api/healthz").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "ok": false }));
}

#[tokio::test]
async fn create_returns_id_and_share_url() {
    let (server, _temp) = setup_test_server();
    let response = server
        .post("/api/pastes")
        .json(&json!({ "content": "Hello, World!" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let created: Value = response.json();
    let id = created["id"].as_str().expect("id");
    let url = created["url"].as_str().expect("url");
    assert!(url.starts_with("http://"), "url: {}", url);
    assert!(url.ends_with(&format!("/p/{}", id)), "url: {}", url);

    let read = server.get(&format!("/api/pastes/{}", id)).await;
    assert_eq!(read.status_code(), StatusCode::OK);
    assert_eq!(
        read.json::<Value>(),
        json!({ "content": "Hello, World!", "remaining_views": null, "expires_at": null })
    );
}

#[tokio::test]
async fn create_assigns_distinct_ids() {
    let (server, _temp) = setup_test_server();
    let mut ids = std::collections::HashSet::new();
    for i in 0..25 {
        let id = create(&server, json!({ "content": format!("paste {}", i) })).await;
        assert!(ids.insert(id));
    }
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let (server, _temp) = setup_test_server();
    let cases = [
        (json!({ "content": "" }), "content is required"),
        (json!({ "content": "   " }), "content is required"),
        (json!({}), "content is required"),
        (json!({ "content": 7 }), "content is required"),
        (json!({ "content": "x", "ttl_seconds": 0 }), "ttl_seconds must be >= 1"),
        (json!({ "content": "x", "ttl_seconds": 2.5 }), "ttl_seconds must be >= 1"),
        (json!({ "content": "x", "max_views": -1 }), "max_views must be >= 1"),
        (json!({ "content": "x", "max_views": "3" }), "max_views must be >= 1"),
        (json!({ "content": "x", "ttl_seconds": null }), "ttl_seconds must be >= 1"),
        (json!({ "content": "x", "max_views": null }), "max_views must be >= 1"),
        (
            json!({ "content": "x", "ttl_seconds": 10_000_000_000_000u64 }),
            "ttl_seconds is too large",
        ),
    ];

    for (body, expected) in cases {
        let response = server.post("/api/pastes").json(&body).await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "body: {}",
            body
        );
        assert_eq!(response.json::<Value>(), json!({ "error": expected }));
    }
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let (server, _temp) = setup_test_server();
    let response = server
        .post("/api/pastes")
        .text("{\"content\": ")
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn create_reports_storage_failure_without_detail() {
    let server = broken_server();
    let response = server
        .post("/api/pastes")
        .json(&json!({ "content": "x" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "database error" }));
}

#[tokio::test]
async fn single_view_paste_is_served_once() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "burn", "max_views": 1 })).await;
    let path = format!("/api/pastes/{}", id);

    let first = server.get(&path).await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let body: Value = first.json();
    assert_eq!(body["content"], "burn");
    assert_eq!(body["remaining_views"], 0);

    let second = server.get(&path).await;
    assert_eq!(second.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remaining_views_count_down() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "thrice", "max_views": 3 })).await;
    let path = format!("/api/pastes/{}", id);

    for expected in [2, 1, 0] {
        let response = server.get(&path).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["remaining_views"], expected);
    }
    assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ttl_boundary_uses_injected_time() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "ttl", "ttl_seconds": 1 })).await;
    let path = format!("/api/pastes/{}", id);

    let before = get_at(&server, &path, T0 + 999).await;
    assert_eq!(before.status_code(), StatusCode::OK);
    assert_eq!(
        before.json::<Value>()["expires_at"],
        "2023-11-14T22:13:21.000Z"
    );

    let at_boundary = get_at(&server, &path, T0 + 1000).await;
    assert_eq!(at_boundary.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_view_shares_ttl_boundary() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "page ttl", "ttl_seconds": 1 })).await;
    let path = format!("/p/{}", id);

    let before = get_at(&server, &path, T0 + 999).await;
    assert_eq!(before.status_code(), StatusCode::OK);
    assert!(before.text().contains("page ttl"));

    let at_boundary = get_at(&server, &path, T0 + 1000).await;
    assert_eq!(at_boundary.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(at_boundary.text(), "Not Found");
}

#[tokio::test]
async fn creation_honours_injected_time() {
    let (server, _temp) = setup_test_server();
    let created_at = T0 + 3_600_000;
    let (name, value) = now_header(created_at);
    let response = server
        .post("/api/pastes")
        .add_header(name, value)
        .json(&json!({ "content": "later", "ttl_seconds": 10 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let id = response.json::<Value>()["id"].as_str().expect("id").to_string();
    let path = format!("/api/pastes/{}", id);

    assert_eq!(
        get_at(&server, &path, created_at + 9_999).await.status_code(),
        StatusCode::OK
    );
    assert_eq!(
        get_at(&server, &path, created_at + 10_000).await.status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn time_header_is_ignored_outside_test_mode() {
    let (server, _temp) = setup_server_without_test_mode();
    let id = create(&server, json!({ "content": "ttl", "ttl_seconds": 1 })).await;

    let response = get_at(&server, &format!("/api/pastes/{}", id), T0 + 60_000).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn expired_and_missing_pastes_look_identical() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "gone", "ttl_seconds": 1 })).await;

    let expired = get_at(&server, &format!("/api/pastes/{}", id), T0 + 5_000).await;
    let missing = server.get("/api/pastes/no-such-paste").await;

    assert_eq!(expired.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(expired.text(), missing.text());
    assert_eq!(missing.json::<Value>(), json!({ "error": "Not found" }));
}

#[tokio::test]
async fn page_view_escapes_content_and_counts_view() {
    let (server, _temp) = setup_test_server();
    let id = create(
        &server,
        json!({ "content": "<script>alert(1)</script>", "max_views": 1 }),
    )
    .await;

    let page = server.get(&format!("/p/{}", id)).await;
    assert_eq!(page.status_code(), StatusCode::OK);
    let html = page.text();
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"), "{}", html);
    assert!(!html.contains("<script>"));

    let api = server.get(&format!("/api/pastes/{}", id)).await;
    assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_view_missing_paste_is_plain_not_found() {
    let (server, _temp) = setup_test_server();
    let response = server.get("/p/no-such-paste").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Not Found");
}

#[tokio::test]
async fn read_storage_failure_is_server_error() {
    let server = broken_server();
    let api = server.get("/api/pastes/anything").await;
    assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let page = server.get("/p/anything").await;
    assert_eq!(page.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(page.text(), "Server Error");
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let (server, _temp) = setup_test_server();
    let response = server.get("/api/healthz").await;
    response.assert_header("x-content-type-options", "nosniff");
    response.assert_header("x-frame-options", "DENY");
    response.assert_contains_header("content-security-policy");
}
