// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router for the authentication endpoints.
use crate::error::AppError;
use crate::store::CredentialStore;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use signet_common::{AuthResponse, LoginRequest, RegisterRequest};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the HTTP router
pub fn create_router<S: CredentialStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe; also documents the exposed operations
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Authentication API is running",
        "endpoints": {
            "register": "POST /api/auth/register",
            "login": "POST /api/auth/login",
        }
    }))
}

/// Handler for `POST /api/auth/register`
async fn register_handler<S: CredentialStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    counter!("http.register.request").increment(1);
    let response = state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for `POST /api/auth/login`
async fn login_handler<S: CredentialStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    counter!("http.login.request").increment(1);
    let response = state.auth.login(req).await?;
    Ok(Json(response))
}
