//! Router tests against the in-memory store
//!
//! Requests go straight through the router with `oneshot`; no port is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use async_trait::async_trait;
use uuid::Uuid;

use classqueue_server::db::{DbError, Entry, Page};
use classqueue_server::{build_router, AppState, MemoryStore, QueueStore, ServerConfig};

fn app_with(require_page: bool) -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), require_page);
    build_router(state, &ServerConfig::default())
}

fn app() -> Router {
    app_with(true)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_page(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, post_json("/api/page", json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn add_guest(app: &Router, name: &str, email: &str, page: &str) -> Value {
    let (status, body) = send(
        app,
        post_json(
            "/api/guest",
            json!({ "name": name, "email": email, "pageName": page }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

/// Store whose backing database is gone: every call fails. With `stall`
/// set, the ping hangs instead of failing.
struct UnreachableStore {
    stall: bool,
}

fn pool_timeout() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl QueueStore for UnreachableStore {
    async fn insert_page(&self, _page: Page) -> Result<Page, DbError> {
        Err(pool_timeout())
    }

    async fn list_pages(&self) -> Result<Vec<Page>, DbError> {
        Err(pool_timeout())
    }

    async fn find_page_by_name(&self, _name: &str) -> Result<Option<Page>, DbError> {
        Err(pool_timeout())
    }

    async fn insert_entry(&self, _entry: Entry) -> Result<Entry, DbError> {
        Err(pool_timeout())
    }

    async fn list_entries_for_page(&self, _page_id: Uuid) -> Result<Vec<Entry>, DbError> {
        Err(pool_timeout())
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, DbError> {
        Err(pool_timeout())
    }

    async fn delete_entry(&self, _id: Uuid) -> Result<u64, DbError> {
        Err(pool_timeout())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), DbError> {
        if self.stall {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Err(pool_timeout())
    }
}

fn unreachable_app() -> Router {
    let state = AppState::new(Arc::new(UnreachableStore { stall: false }), true);
    build_router(state, &ServerConfig::default())
}

// ── health ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ready_store() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["store_ready"], true);
    assert_eq!(body["require_page"], true);
}

#[tokio::test]
async fn health_is_503_when_store_unreachable() {
    let (status, body) = send(&unreachable_app(), get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["store"], "postgres");
    assert_eq!(body["store_ready"], false);
}

#[tokio::test(start_paused = true)]
async fn slow_request_times_out_with_408() {
    let state = AppState::new(Arc::new(UnreachableStore { stall: true }), true);
    let config = ServerConfig {
        timeout: Duration::from_secs(1),
        ..ServerConfig::default()
    };
    let app = build_router(state, &config);

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn store_failure_is_opaque_500() {
    let (status, body) = send(&unreachable_app(), get("/api/page")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["status"], 500);
}

// ── pages ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_page_returns_stored_record() {
    let app = app();
    let page = create_page(&app, "Room 101").await;

    assert_eq!(page["name"], "Room 101");
    assert!(uuid::Uuid::parse_str(page["id"].as_str().unwrap()).is_ok());
    let created_at = page["created_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn create_page_sanitizes_name() {
    let app = app();
    let page = create_page(&app, "  <b>Room</b> 102 ").await;
    assert_eq!(page["name"], "Room 102");
}

#[tokio::test]
async fn create_page_requires_name() {
    let app = app();

    let (status, body) = send(&app, post_json("/api/page", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Page name is required.");

    let (status, _) = send(&app, post_json("/api/page", json!({ "name": "<p></p>" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_page_rejects_long_name() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/page", json!({ "name": "x".repeat(256) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Page name exceeds maximum length of 255 characters."
    );
}

#[tokio::test]
async fn duplicate_page_is_conflict() {
    let app = app();
    create_page(&app, "Room 101").await;

    let (status, body) = send(&app, post_json("/api/page", json!({ "name": "Room 101" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Page 'Room 101' already exists.");
}

#[tokio::test]
async fn list_pages_returns_id_and_name() {
    let app = app();
    let a = create_page(&app, "Room 101").await;
    let b = create_page(&app, "Room 102").await;

    let (status, body) = send(&app, get("/api/page")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "pages": [
            { "id": a["id"], "name": "Room 101" },
            { "id": b["id"], "name": "Room 102" },
        ]})
    );
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/page")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn page_other_methods_are_405_with_allow() {
    let app = app();
    let req = Request::builder()
        .method(Method::PUT)
        .uri("/api/page")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()[header::ALLOW], "GET, POST");
}

// ── guests ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn guest_joins_page_queue() {
    let app = app();
    let page = create_page(&app, "Room 101").await;
    let guest = add_guest(&app, "Al Smith", "al@example.com", "Room 101").await;

    assert_eq!(guest["page_id"], page["id"]);
    assert_eq!(guest["name"], "Al Smith");
    assert_eq!(guest["email"], "al@example.com");

    let (status, body) = send(&app, get("/api/guest?pageName=Room%20101")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([guest]));
}

#[tokio::test]
async fn guest_fields_are_sanitized() {
    let app = app();
    create_page(&app, "Room 101").await;
    let guest = add_guest(
        &app,
        "  <script>x</script>Al ",
        " al@example.com<br/>",
        "Room 101",
    )
    .await;

    assert_eq!(guest["name"], "xAl");
    assert_eq!(guest["email"], "al@example.com");
}

#[tokio::test]
async fn page_listing_is_arrival_order() {
    let app = app();
    create_page(&app, "Room 101").await;
    create_page(&app, "Room 102").await;

    let e1 = add_guest(&app, "First", "first@example.com", "Room 101").await;
    add_guest(&app, "Other", "other@example.com", "Room 102").await;
    let e2 = add_guest(&app, "Second", "second@example.com", "Room 101").await;

    let (_, body) = send(&app, get("/api/guest?pageName=Room%20101")).await;
    assert_eq!(body, json!([e1, e2]));
}

#[tokio::test]
async fn unscoped_listing_is_newest_first() {
    let app = app();
    create_page(&app, "Room 101").await;
    let e1 = add_guest(&app, "First", "first@example.com", "Room 101").await;
    let e2 = add_guest(&app, "Second", "second@example.com", "Room 101").await;

    let (status, body) = send(&app, get("/api/guest")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([e2, e1]));
}

#[tokio::test]
async fn missing_name_is_rejected_and_not_stored() {
    let app = app();
    create_page(&app, "Room 101").await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/guest",
            json!({ "name": "", "email": "x@x.com", "pageName": "Room 101" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and email are required.");

    let (_, body) = send(&app, get("/api/guest")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn bad_email_is_rejected_and_not_stored() {
    let app = app();
    create_page(&app, "Room 101").await;

    for email in ["not-an-email", "bob@example", "bob smith@example.com"] {
        let (status, body) = send(
            &app,
            post_json(
                "/api/guest",
                json!({ "name": "Bob", "email": email, "pageName": "Room 101" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
        assert!(body["error"].as_str().unwrap().starts_with("Invalid email"));
    }

    let (_, body) = send(&app, get("/api/guest")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn long_fields_are_rejected() {
    let app = app();
    create_page(&app, "Room 101").await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/guest",
            json!({ "name": "n".repeat(76), "email": "al@example.com", "pageName": "Room 101" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name exceeds maximum length of 75 characters.");
}

#[tokio::test]
async fn page_name_required_by_default() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/guest", json!({ "name": "Bob", "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Page name is required.");
}

#[tokio::test]
async fn page_optional_when_not_required() {
    let app = app_with(false);
    let guest = {
        let (status, body) = send(
            &app,
            post_json("/api/guest", json!({ "name": "Bob", "email": "bob@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    };
    assert_eq!(guest["page_id"], Value::Null);
}

#[tokio::test]
async fn unknown_page_is_404() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/guest",
            json!({ "name": "Bob", "email": "bob@example.com", "pageName": "Nowhere" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Page 'Nowhere' not found.");

    let (status, _) = send(&app, get("/api/guest?pageName=Nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_page_name_query_is_400() {
    let app = app();
    let (status, _) = send(&app, get("/api/guest?pageName=%20%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();
    create_page(&app, "Room 101").await;
    let guest = add_guest(&app, "Al", "al@example.com", "Room 101").await;
    let uri = format!("/api/guest?id={}", guest["id"].as_str().unwrap());

    for _ in 0..2 {
        let (status, body) = send(&app, delete(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    let (_, body) = send(&app, get("/api/guest?pageName=Room%20101")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn delete_requires_valid_id() {
    let app = app();

    let (status, body) = send(&app, delete("/api/guest")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Guest id is required.");

    let (status, body) = send(&app, delete("/api/guest?id=not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid guest id: invalid UUID format");
}

#[tokio::test]
async fn guest_other_methods_are_405_with_allow() {
    let app = app();
    let req = Request::builder()
        .method(Method::PATCH)
        .uri("/api/guest")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()[header::ALLOW], "GET, POST, DELETE");
}
