use axum::response::{IntoResponse, Response};

use crate::core::error::ViewError;

/// 404 for anything outside the portal surface.
pub async fn fallback_handler() -> Response {
    ViewError::NotFound(
        "Unknown route. The portal serves /login, /logout, /session, /health, \
         /admin/... and /student/..."
            .to_string(),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_fallback_is_not_found() {
        let response = fallback_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
