//! Client error types

use thiserror::Error;

/// Errors that can occur when talking to the TaskFlow API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request could not complete (offline, DNS, timeout, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}")]
    Status {
        status: u16,
        /// `message` field of the error body, when the server sent one
        message: Option<String>,
    },

    /// The body was not the JSON we expected
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Transport(format!("cannot connect: {}", err))
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type for client operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            status: 503,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 503");

        let err = ApiError::Transport("cannot connect".to_string());
        assert_eq!(err.to_string(), "Network error: cannot connect");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
