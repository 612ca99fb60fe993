//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and a flat JSON error body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": "Attendee not found",
///   "code": 2001
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Numeric error code (see ranges on [`GatewayError`]).
    pub code: u32,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1099 | Validation      | 400 Bad Request              |
/// | 1100–1199 | Identity        | 401 Unauthorized / 403       |
/// | 2000–2099 | Not Found       | 404 Not Found                |
/// | 2100–2199 | State           | 409 Conflict                 |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Missing or malformed required fields.
    #[error("{0}")]
    Validation(String),

    /// No usable session principal on the request.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The principal's role does not allow the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Attendee with the given ID was not found.
    #[error("Attendee not found")]
    AttendeeNotFound(String),

    /// Event with the given ID was not found.
    #[error("Event not found")]
    EventNotFound(String),

    /// Certificate with the given ID was not found.
    #[error("Certificate not found")]
    CertificateNotFound(String),

    /// The operation conflicts with the current record state.
    #[error("{0}")]
    Conflict(String),

    /// Underlying persistence failure; carries the raw store message.
    #[error("{0}")]
    Store(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::Unauthorized(_) => 1101,
            Self::Forbidden(_) => 1102,
            Self::AttendeeNotFound(_) => 2001,
            Self::EventNotFound(_) => 2002,
            Self::CertificateNotFound(_) => 2003,
            Self::Conflict(_) => 2101,
            Self::Store(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::AttendeeNotFound(_) | Self::EventNotFound(_) | Self::CertificateNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for GatewayError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
