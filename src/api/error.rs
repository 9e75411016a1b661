//! HTTP error classification for the exam backend.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::DrillError;

/// A non-success response from the exam backend.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    /// Message from the response's `{"error": ...}` body, or the status text.
    pub message: String,
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "description", alias = "message")]
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Builds the error from a response's status and raw body text.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string()
            });
        Self::new(status, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    /// Server-side failures that may succeed if retried later.
    pub fn is_transient(&self) -> bool {
        self.status.is_server_error()
            || self.status == StatusCode::TOO_MANY_REQUESTS
            || self.status == StatusCode::REQUEST_TIMEOUT
    }

    pub fn to_drill_error(&self) -> DrillError {
        if self.is_unauthorized() {
            return DrillError::SessionExpired;
        }
        if self.status == StatusCode::NOT_FOUND {
            return DrillError::NotFound(self.message.clone());
        }
        DrillError::Api(format!("{} ({})", self.message, self.status.as_u16()))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status.as_u16())
    }
}

impl From<ApiError> for DrillError {
    fn from(error: ApiError) -> Self {
        error.to_drill_error()
    }
}
