//! HTTP API Client
//!
//! Functions for communicating with the TaskFlow API. Every request carries
//! `Content-Type: application/json`, plus `Authorization: Bearer <token>`
//! when a session token is passed in.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::Value;
use web_sys::AbortSignal;

/// Default API origin
pub const DEFAULT_API_BASE: &str = "https://task-api-eight-flax.vercel.app";

/// Local storage key overriding the API origin
const API_URL_KEY: &str = "taskflow_api_url";

/// Message shown when a login is rejected without a reason
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Get the API origin from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API origin in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

// ============ Errors ============

/// Why a request produced no data
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Could not reach the server
    Network(String),
    /// Non-success status, with the body's `message` if any
    Status { status: u16, message: Option<String> },
    /// Body was not JSON
    Parse(String),
    /// Cancelled because the view went away
    Aborted,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "Network error: {}", e),
            FetchError::Status { status, .. } => write!(f, "HTTP {}", status),
            FetchError::Parse(e) => write!(f, "Parse error: {}", e),
            FetchError::Aborted => write!(f, "Request aborted"),
        }
    }
}

impl From<gloo_net::Error> for FetchError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::JsError(js) if js.name == "AbortError" => FetchError::Aborted,
            gloo_net::Error::SerdeError(e) => FetchError::Parse(e.to_string()),
            other => FetchError::Network(other.to_string()),
        }
    }
}

// ============ Shape normalization ============

/// A bare array, or the array under `field`; anything else is empty
pub fn normalize_list(value: Value, field: &str) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

// ============ API Functions ============

fn with_headers(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    let builder = builder.header("Content-Type", "application/json");
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_json(response: Response) -> Result<Value, FetchError> {
    if !response.ok() {
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty());
        return Err(FetchError::Status {
            status: response.status(),
            message,
        });
    }

    Ok(response.json::<Value>().await?)
}

async fn get(path: &str, token: Option<&str>, signal: Option<&AbortSignal>) -> Result<Value, FetchError> {
    let url = format!("{}{}", get_api_base(), path);
    let response = with_headers(Request::get(&url), token)
        .abort_signal(signal)
        .send()
        .await?;
    read_json(response).await
}

/// POST /api/login; the success body is the session record
pub async fn login(email: &str, password: &str) -> Result<Value, FetchError> {
    let url = format!("{}/api/login", get_api_base());
    let body = serde_json::json!({ "email": email, "password": password });

    let response = with_headers(Request::post(&url), None)
        .json(&body)?
        .send()
        .await?;
    login_record(read_json(response).await?)
}

/// A `null` login body names no user
pub fn login_record(body: Value) -> Result<Value, FetchError> {
    match body {
        Value::Null => Err(FetchError::Parse("empty login body".to_string())),
        record => Ok(record),
    }
}

/// GET /api/overview
pub async fn fetch_overview(token: Option<&str>, signal: Option<&AbortSignal>) -> Result<Value, FetchError> {
    get("/api/overview", token, signal).await
}

/// GET /api/products, normalized to a list
pub async fn fetch_products(token: Option<&str>, signal: Option<&AbortSignal>) -> Result<Vec<Value>, FetchError> {
    let body = get("/api/products", token, signal).await?;
    Ok(normalize_list(body, "products"))
}

/// GET /api/users, normalized to a list
pub async fn fetch_users(token: Option<&str>, signal: Option<&AbortSignal>) -> Result<Vec<Value>, FetchError> {
    let body = get("/api/users", token, signal).await?;
    Ok(normalize_list(body, "users"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_list_shapes() {
        assert_eq!(normalize_list(json!([1, 2]), "products").len(), 2);
        assert_eq!(normalize_list(json!({ "products": [1] }), "products").len(), 1);
        assert!(normalize_list(json!({ "users": [1] }), "products").is_empty());
        assert!(normalize_list(json!("nope"), "products").is_empty());
    }

    #[test]
    fn test_null_login_body_rejected() {
        assert!(matches!(login_record(Value::Null), Err(FetchError::Parse(_))));
        let record = json!({ "email": "user1@example.com", "token": "abc" });
        assert_eq!(login_record(record.clone()).unwrap(), record);
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::Status {
            status: 401,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 401");
        assert_eq!(FetchError::Network("offline".into()).to_string(), "Network error: offline");
    }
}
