//! Application error type with HTTP response conversion.
//!
//! Every handler in blogmesh returns `Result<_, AppError>`. The status code
//! selects the client-facing category; the wrapped [`anyhow::Error`] carries
//! the message. Server-side failures (5xx other than 502) are logged and
//! rendered with a generic message so store internals never reach clients.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Message returned for every authentication failure, whatever the cause.
pub const UNAUTHENTICATED_MESSAGE: &str = "Not authenticated";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    /// Uniform authentication failure. Callers never learn whether the token
    /// was absent, invalid, or could not be checked.
    pub fn unauthenticated() -> Self {
        Self::unauthorized(UNAUTHENTICATED_MESSAGE.to_string())
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    pub fn bad_gateway<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_GATEWAY, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// The message sent to the client for this error.
    pub fn public_message(&self) -> String {
        match self.status {
            StatusCode::BAD_GATEWAY => "Upstream service unavailable".to_string(),
            status if status.is_server_error() => "Internal server error".to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
