//! Mock API Error Types
//!
//! Every failure is rendered the way the real TaskFlow API does it: a status
//! code and a `{ "message": ... }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Mock API error types
#[derive(Error, Debug)]
pub enum MockApiError {
    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing or unknown bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// Unreadable request body
    #[error("{0}")]
    BadRequest(String),

    /// Socket or server failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl IntoResponse for MockApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockApiError::InvalidCredentials | MockApiError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            MockApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            MockApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::warn!(status = status.as_u16(), error = %self, "Mock API request rejected");

        let body = MessageBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for mock API handlers
pub type MockResult<T> = Result<T, MockApiError>;
