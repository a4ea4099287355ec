use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Redirect, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::core::error::ViewError;
use crate::core::state::AppState;
use crate::models::news::{NewNews, NewsUpdate};
use crate::models::response::SuccessResponse;
use crate::pager::scroll::ScrollMetrics;
use crate::session::guard::{require_authenticated, RouteDecision};
use crate::session::store::TOKEN_KEY;

// The news feed is one pager shared by the admin list and the student feed:
// both render the same upstream list, newest first.

/// Open the news feed: reset the cursor and load page 1.
///
/// POST /news/open
pub async fn open_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }

    state.news.reset();

    let api = Arc::clone(&state.api);
    let token = state.session.get(TOKEN_KEY);
    state
        .news
        .load_page(1, true, None, move |request| async move {
            api.news_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.news.snapshot()).into_response()
}

/// POST /news/scroll
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
        .news
        .on_scroll(metrics, move |request| async move {
            api.news_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.news.snapshot()).into_response()
}

/// GET /news
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }
    Json(state.news.snapshot()).into_response()
}

/// POST /admin/news/create
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewNews>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }
    if body.title.trim().is_empty() || body.content.trim().is_empty() {
        return Err(ViewError::InvalidParameter(
            "title and content are required".to_string(),
        ));
    }

    let token = state.session.get(TOKEN_KEY);
    let news = state.api.create_news(token.as_deref(), &body).await?;
    info!(news_id = news.id, "News entry created");
    Ok(Json(news).into_response())
}

/// GET /admin/news/{id}
pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let news = state.api.get_news(token.as_deref(), id).await?;
    Ok(Json(news).into_response())
}

/// PUT /admin/news/{id}
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewsUpdate>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let news = state.api.update_news(token.as_deref(), id, &body).await?;
    info!(news_id = id, "News entry updated");
    Ok(Json(news).into_response())
}

/// DELETE /admin/news/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    state.api.delete_news(token.as_deref(), id).await?;
    info!(news_id = id, "News entry deleted");
    Ok(Json(SuccessResponse {
        success: true,
        message: "News entry deleted".to_string(),
    })
    .into_response())
}
