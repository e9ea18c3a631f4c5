// crates/backend-lib/tests/http.rs
//! Router-level tests driven through tower's oneshot.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use signet_backend_lib::config::Settings;
use signet_backend_lib::router::create_router;
use signet_backend_lib::store::MemoryStore;
use signet_backend_lib::AppState;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let settings = Settings {
        token_secret: "http-test-secret-0123456789abcdef".to_string(),
        ..Settings::default()
    };
    let state = Arc::new(AppState::new(MemoryStore::new(), settings).unwrap());
    create_router(state)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_route() {
    let app = app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_login_scenario() {
    let app = app();

    // Register alice
    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "alice@example.com", "password": "Abcdef1"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["user"].get("password_hash").is_none());
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    // Login with the right password
    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "alice@example.com", "password": "Abcdef1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"].as_str().unwrap(), user_id);

    // Login with the wrong password
    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "alice@example.com", "password": "wrongpw"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_001");
    assert_eq!(body["error"]["message"], "Invalid email or password");

    // Register bob with alice's email
    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "bob", "email": "alice@example.com", "password": "Xyzxyz1"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "AUTH_003");
}

#[tokio::test]
async fn test_login_error_payload_hides_cause() {
    let app = app();
    post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "alice@example.com", "password": "Abcdef1"}),
    )
    .await;

    let (status1, body1) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "nobody@example.com", "password": "Abcdef1"}),
    )
    .await;
    let (status2, body2) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "alice@example.com", "password": "wrongpw"}),
    )
    .await;

    // Unknown email and wrong password must be byte-identical on the wire
    assert_eq!(status1, StatusCode::UNAUTHORIZED);
    assert_eq!(status1, status2);
    assert_eq!(body1, body2);
}

#[tokio::test]
async fn test_register_validation_failures_are_400() {
    let app = app();

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "al", "email": "al@example.com", "password": "Abcdef1"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_001");

    let (status, _) = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "alice@example.com", "password": "weak"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_internal_detail_never_reaches_client() {
    let app = app();

    // Force the only 4xx/5xx paths reachable from outside and check
    // that no body ever carries infrastructure detail.
    let (_, body) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "nobody@example.com", "password": "x"}),
    )
    .await;
    let message = body["error"]["message"].as_str().unwrap();
    assert!(!message.contains("store"));
    assert!(!message.contains("bcrypt"));
    assert!(!message.contains("panic"));
}
