use axum::{
    extract::State,
    response::{IntoResponse, Json, Redirect, Response},
};
use std::sync::Arc;

use crate::core::error::ViewError;
use crate::core::state::AppState;
use crate::session::guard::{require_authenticated, RouteDecision};
use crate::session::store::TOKEN_KEY;

// Thin proxies over the upstream student endpoints. The upstream enforces
// that the token belongs to a student; the gateway only gates on having a
// session at all, like every other protected view.

/// GET /student/profile
pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let profile = state.api.student_profile(token.as_deref()).await?;
    Ok(Json(profile).into_response())
}

/// Careers the student is enrolled in.
///
/// GET /student/careers
pub async fn careers_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let careers = state.api.student_careers(token.as_deref()).await?;
    Ok(Json(careers).into_response())
}

/// The student's own payment history across enrollments.
///
/// GET /student/payments
pub async fn payments_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let payments = state.api.student_payments(token.as_deref()).await?;
    Ok(Json(payments).into_response())
}
