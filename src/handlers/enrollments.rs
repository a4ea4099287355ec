use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::core::error::ViewError;
use crate::core::state::AppState;
use crate::models::enrollment::{EnrollmentsByUser, NewEnrollment};
use crate::models::response::SuccessResponse;
use crate::session::guard::{require_authenticated, RouteDecision};
use crate::session::store::TOKEN_KEY;

/// Enroll a student into a career.
///
/// POST /admin/enrollments
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewEnrollment>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }
    if body.user_id <= 0 || body.career_id <= 0 {
        return Err(ViewError::InvalidParameter(
            "user id and career id must be positive".to_string(),
        ));
    }

    let token = state.session.get(TOKEN_KEY);
    state.api.create_enrollment(token.as_deref(), &body).await?;
    info!(
        user_id = body.user_id,
        career_id = body.career_id,
        "Enrollment created"
    );
    Ok(Json(SuccessResponse {
        success: true,
        message: "Enrollment created".to_string(),
    })
    .into_response())
}

/// Body of the per-user enrollments listing.
#[derive(Debug, Deserialize)]
pub struct ByUserBody {
    pub user_id: i64,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// POST /admin/enrollments/by-user
pub async fn by_user_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ByUserBody>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }
    if body.user_id <= 0 {
        return Err(ViewError::InvalidParameter(
            "user id must be positive".to_string(),
        ));
    }

    let request = EnrollmentsByUser {
        user_id: body.user_id,
        page: body.page.max(1),
        page_size: state.config.lists.page_size,
    };
    let token = state.session.get(TOKEN_KEY);
    let page = state
        .api
        .enrollments_by_user(token.as_deref(), &request)
        .await?;
    Ok(Json(page).into_response())
}

/// DELETE /admin/enrollments/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    state.api.delete_enrollment(token.as_deref(), id).await?;
    info!(enrollment_id = id, "Enrollment deleted");
    Ok(Json(SuccessResponse {
        success: true,
        message: "Enrollment deleted".to_string(),
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ApiClient;
    use crate::core::config::Config;
    use crate::session::store::SessionStore;
    use axum::http::StatusCode;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_state(dir: &TempDir) -> Arc<AppState> {
        let config: Config = toml::from_str(
            r#"
                [server]
                port = 4000

                [backend]
                base_url = "http://127.0.0.1:9"

                [logging]
                level = "info"
                format = "console"
            "#,
        )
        .unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        let api = ApiClient::new(
            "http://127.0.0.1:9".to_string(),
            Duration::from_millis(200),
        )
        .unwrap();
        Arc::new(AppState::new(config, session, api))
    }

    #[tokio::test]
    async fn test_create_rejects_nonpositive_ids() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        state.session.set(TOKEN_KEY, "t").unwrap();

        let err = create_handler(
            State(state),
            Json(NewEnrollment {
                user_id: 0,
                career_id: 2,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ViewError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_anonymous_viewer_is_redirected_before_validation() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        // No token: even an invalid body redirects to login first.
        let response = create_handler(
            State(state),
            Json(NewEnrollment {
                user_id: 0,
                career_id: 0,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");
    }
}
