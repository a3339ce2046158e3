//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`contacts_core::Error`] so that route
//! handlers can return `Result<T, AppError>` and use `?` on service calls.
//! Server-side failures are logged in full but rendered with a generic
//! message so storage paths and SQL details never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: contacts_core::Error,
}

impl AppError {
    pub fn new(inner: contacts_core::Error) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &contacts_core::Error {
        &self.inner
    }
}

impl From<contacts_core::Error> for AppError {
    fn from(e: contacts_core::Error) -> Self {
        Self::new(e)
    }
}

/// The client-facing part of an error response.
///
/// Stored in the response extensions so the request-id middleware can
/// re-render the body with the id of the request that failed.
#[derive(Debug, Clone)]
pub struct ErrorBody {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn render(&self, request_id: Option<&str>) -> Response {
        let body = json!({
            "error": self.message,
            "code": self.code,
            "request_id": request_id,
        });
        let mut response = (self.status, axum::Json(body)).into_response();
        response.extensions_mut().insert(self.clone());
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
            "internal server error".to_string()
        } else {
            self.inner.to_string()
        };

        ErrorBody {
            status,
            code: self.inner.code(),
            message,
        }
        .render(None)
    }
}
