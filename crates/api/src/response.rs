//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Envelope shared by every successful response: `{ statusCode, data }`.
///
/// Failures use the same envelope through `AppError`'s `IntoResponse`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
}

/// Body carrying only a human-readable message.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a response with an explicit status.
    pub const fn with_status(status: StatusCode, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
        }
    }

    /// Create a 200 response.
    pub const fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    /// Create a 201 response.
    pub const fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }
}

impl ApiResponse<MessageBody> {
    /// Create a 200 response carrying a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::ok(MessageBody {
            message: message.into(),
        })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
