// Centralized error handling for the portal gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Failures talking to the upstream school API.
///
/// A non-2xx status and a `success:false` envelope are deliberate siblings:
/// list views present both through the same error banner.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach backend: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {0}")]
    Http(u16),

    #[error("Backend rejected the request: {0}")]
    Backend(String),

    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the view-local error banner: the server-supplied message
    /// when there is one, a generic fallback otherwise.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Backend(message) => message.clone(),
            ApiError::Http(status) => format!("HTTP error: {status}"),
            ApiError::Transport(_) | ApiError::Decode(_) => {
                "Request failed, please try again".to_string()
            }
        }
    }
}

/// Errors surfaced by portal view handlers.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Login rejected: {0}")]
    LoginRejected(String),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] ApiError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        use crate::models::response::ErrorResponse;

        let (status, error) = match &self {
            ViewError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ViewError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ViewError::LoginRejected(message) => (StatusCode::UNAUTHORIZED, message.clone()),
            ViewError::Upstream(api) => (upstream_status(api), api.display_message()),
            ViewError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

/// CRUD proxies forward the upstream status where one exists; connectivity
/// and decoding problems read as a bad gateway.
fn upstream_status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Http(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ApiError::Backend(_) => StatusCode::BAD_REQUEST,
        ApiError::Transport(_) | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
    }
}
