//! API client error types.

use serde::Deserialize;
use thiserror::Error;

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Ways a backend call can fail.
///
/// `Clone` so a single in-flight request can hand its outcome to every
/// caller waiting on it.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Request rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Classify a non-success HTTP status.
    ///
    /// The backend reports failures as `{ "success": false, "message": "..." }`;
    /// any other body leaves the message empty.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .unwrap_or_default();

        match status {
            401 | 403 => ApiError::Auth { status, message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Validation { status, message },
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// HTTP status that produced this error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the backend attached to the failure, if it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Auth { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Server { message, .. }
                if !message.is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Text to show the user: the backend message, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }

    /// 401/403: the session is missing or expired.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}
