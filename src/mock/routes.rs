//! Mock API Routes
//!
//! - POST /api/login - Exchange credentials for a user record with token
//! - GET /api/overview - Overview fixture (bearer token required)
//! - GET /api/products - `{ "products": [...] }` (bearer token required)
//! - GET /api/users - Bare user array (bearer token required)
//! - GET /health - Liveness and uptime

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::{MockApiError, MockResult};
use super::state::{MockState, ProductFixture, UserFixture};

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Successful login body, adopted by clients as the session record
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Products wrapped in an object
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductFixture>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<MockState>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> MockResult<Json<LoginResponse>> {
    let Json(body) = body.map_err(|e| MockApiError::BadRequest(e.body_text()))?;

    let account = state
        .authenticate(&body.email, &body.password)
        .ok_or(MockApiError::InvalidCredentials)?;

    let token = state.issue_token(account.id);
    tracing::info!(user = %account.email, "Issued session token");

    Ok(Json(LoginResponse {
        id: account.id,
        name: account.name.clone(),
        email: account.email.clone(),
        token,
    }))
}

/// GET /api/overview
pub async fn overview(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> MockResult<Json<Value>> {
    authorize(&state, &headers)?;
    Ok(Json(state.fixtures.overview.clone()))
}

/// GET /api/products
pub async fn products(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> MockResult<Json<ProductsResponse>> {
    authorize(&state, &headers)?;
    Ok(Json(ProductsResponse {
        products: state.fixtures.products.clone(),
    }))
}

/// GET /api/users
pub async fn users(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> MockResult<Json<Vec<UserFixture>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.fixtures.users.clone()))
}

/// GET /health
pub async fn health(State(state): State<Arc<MockState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unknown paths
pub async fn not_found() -> (axum::http::StatusCode, Json<Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not found" })),
    )
}

fn authorize(state: &MockState, headers: &HeaderMap) -> MockResult<()> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| MockApiError::Unauthorized("Missing bearer token".to_string()))?;

    if state.is_valid_token(token) {
        Ok(())
    } else {
        Err(MockApiError::Unauthorized("Invalid or expired token".to_string()))
    }
}
