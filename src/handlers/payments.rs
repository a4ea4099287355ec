use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::core::error::ViewError;
use crate::core::state::AppState;
use crate::handlers::users::SearchBody;
use crate::models::payment::{NewPayment, PaymentCancel, PaymentsByEnrollment};
use crate::pager::scroll::ScrollMetrics;
use crate::session::guard::{require_authenticated, RouteDecision};
use crate::session::store::TOKEN_KEY;

/// Open the global payments list: reset the cursor and load page 1.
///
/// POST /admin/payments/open
pub async fn open_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }

    state.payments.reset();

    let api = Arc::clone(&state.api);
    let token = state.session.get(TOKEN_KEY);
    state
        .payments
        .load_page(1, true, None, move |request| async move {
            api.payments_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.payments.snapshot()).into_response()
}

/// POST /admin/payments/scroll
pub async fn scroll_handler(
    State(state): State<Arc<AppState>>,
    Json(metrics): Json<ScrollMetrics>,
) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }

    let api = Arc::clone(&state.api);
    let token = state.session.get(TOKEN_KEY);
    state
        .payments
        .on_scroll(metrics, move |request| async move {
            api.payments_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.payments.snapshot()).into_response()
}

/// Search by student name, username, DNI or career name.
///
/// POST /admin/payments/search
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchBody>,
) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }

    let api = Arc::clone(&state.api);
    let token = state.session.get(TOKEN_KEY);
    state
        .payments
        .on_filter_submit(body.normalized(), move |request| async move {
            api.payments_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.payments.snapshot()).into_response()
}

/// GET /admin/payments
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }
    Json(state.payments.snapshot()).into_response()
}

/// Register an installment payment for an enrollment. The backend derives
/// the amount from the career's price history.
///
/// POST /admin/payments/create
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewPayment>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }
    if body.enrollment_id <= 0 || body.installment <= 0 {
        return Err(ViewError::InvalidParameter(
            "enrollment id and installment must be positive".to_string(),
        ));
    }

    let token = state.session.get(TOKEN_KEY);
    let payment = state.api.create_payment(token.as_deref(), &body).await?;
    info!(
        payment_id = payment.id,
        enrollment_id = body.enrollment_id,
        installment = body.installment,
        "Payment registered"
    );
    Ok(Json(payment).into_response())
}

/// Body of the per-enrollment payments listing. Cancelled payments are
/// included by default, as the enrollment detail view shows them.
#[derive(Debug, Deserialize)]
pub struct ByEnrollmentBody {
    pub enrollment_id: i64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_include_cancelled")]
    pub include_cancelled: bool,
}

fn default_page() -> u32 {
    1
}

fn default_include_cancelled() -> bool {
    true
}

/// POST /admin/payments/by-enrollment
pub async fn by_enrollment_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ByEnrollmentBody>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }
    if body.enrollment_id <= 0 {
        return Err(ViewError::InvalidParameter(
            "enrollment id must be positive".to_string(),
        ));
    }

    let request = PaymentsByEnrollment {
        enrollment_id: body.enrollment_id,
        page: body.page.max(1),
        page_size: state.config.lists.page_size,
        include_cancelled: body.include_cancelled,
    };
    let token = state.session.get(TOKEN_KEY);
    let page = state
        .api
        .payments_by_enrollment(token.as_deref(), &request)
        .await?;
    Ok(Json(page).into_response())
}

/// Cancel (void) a payment, keeping it in the history.
///
/// PUT /admin/payments/{id}/cancel
pub async fn cancel_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<PaymentCancel>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let payment = state.api.cancel_payment(token.as_deref(), id, &body).await?;
    info!(payment_id = id, "Payment cancelled");
    Ok(Json(payment).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ApiClient;
    use crate::core::config::Config;
    use crate::session::store::SessionStore;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_config() -> Config {
        toml::from_str(
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
        .unwrap()
    }

    fn test_state(dir: &TempDir) -> Arc<AppState> {
        let session = SessionStore::open(dir.path()).unwrap();
        session.set(TOKEN_KEY, "t").unwrap();
        let api = ApiClient::new(
            "http://127.0.0.1:9".to_string(),
            Duration::from_millis(200),
        )
        .unwrap();
        Arc::new(AppState::new(test_config(), session, api))
    }

    #[tokio::test]
    async fn test_create_rejects_nonpositive_ids_before_any_network_call() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let err = create_handler(
            State(Arc::clone(&state)),
            Json(NewPayment {
                enrollment_id: 0,
                installment: 1,
                paid_at: None,
                prepaid: false,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ViewError::InvalidParameter(_)));

        let err = create_handler(
            State(state),
            Json(NewPayment {
                enrollment_id: 5,
                installment: 0,
                paid_at: None,
                prepaid: false,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ViewError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_by_enrollment_rejects_nonpositive_id() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let err = by_enrollment_handler(
            State(state),
            Json(ByEnrollmentBody {
                enrollment_id: -1,
                page: 1,
                include_cancelled: true,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ViewError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_by_enrollment_body_defaults() {
        let body: ByEnrollmentBody =
            serde_json::from_str(r#"{"enrollment_id": 4}"#).unwrap();
        assert_eq!(body.page, 1);
        assert!(body.include_cancelled);
    }
}
