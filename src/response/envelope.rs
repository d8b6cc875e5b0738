use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::codes::ResultCode;

/// Uniform response envelope returned by every handler.
///
/// `code` is the application-level result code (distinct from the transport
/// status, which is always 200). `data` is present only on success and is
/// omitted from the wire entirely when absent, so callers can distinguish
/// "no data" from "empty data". `timestamp` is set once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Application-level result code
    pub code: u16,
    /// Human-readable message
    pub message: Option<String>,
    /// Payload, present only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Envelope creation time, epoch millis
    pub timestamp: i64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl<T> ApiResponse<T> {
    fn new(code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data,
            timestamp: now_millis(),
        }
    }

    /// Success with a payload and the default message
    pub fn success(data: T) -> Self {
        Self::new(
            ResultCode::Success.code(),
            ResultCode::Success.message(),
            Some(data),
        )
    }

    /// Success with a payload and a custom message
    pub fn success_with(message: impl Into<String>, data: T) -> Self {
        Self::new(ResultCode::Success.code(), message, Some(data))
    }

    /// Generic failure with the default message
    pub fn failed() -> Self {
        Self::failed_code(ResultCode::Failed)
    }

    /// Generic failure with a custom message
    pub fn failed_message(message: impl Into<String>) -> Self {
        Self::new(ResultCode::Failed.code(), message, None)
    }

    /// Failure with an explicit code and message
    pub fn failed_with(code: u16, message: impl Into<String>) -> Self {
        Self::new(code, message, None)
    }

    /// Failure from a result code, using its default message
    pub fn failed_code(code: ResultCode) -> Self {
        Self::new(code.code(), code.message(), None)
    }

    /// Failure from a result code with an overridden message
    pub fn failed_code_message(code: ResultCode, message: impl Into<String>) -> Self {
        Self::new(code.code(), message, None)
    }

    /// Whether this envelope reports success
    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success.code()
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn ok() -> Self {
        ApiResponse::new(
            ResultCode::Success.code(),
            ResultCode::Success.message(),
            None,
        )
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        // The envelope code carries the outcome; transport status stays 200.
        (StatusCode::OK, Json(self)).into_response()
    }
}
