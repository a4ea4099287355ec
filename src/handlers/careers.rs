use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Redirect, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::api::types::CareerPricesRequest;
use crate::core::error::ViewError;
use crate::core::state::AppState;
use crate::handlers::users::SearchBody;
use crate::models::career::NewCareer;
use crate::models::response::SuccessResponse;
use crate::pager::scroll::ScrollMetrics;
use crate::session::guard::{require_authenticated, RouteDecision};
use crate::session::store::TOKEN_KEY;

/// Open the career catalog: reset the cursor and load page 1.
///
/// POST /admin/careers/open
pub async fn open_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }

    state.careers.reset();

    let api = Arc::clone(&state.api);
    let token = state.session.get(TOKEN_KEY);
    state
        .careers
        .load_page(1, true, None, move |request| async move {
            api.careers_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.careers.snapshot()).into_response()
}

/// POST /admin/careers/scroll
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
        .careers
        .on_scroll(metrics, move |request| async move {
            api.careers_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.careers.snapshot()).into_response()
}

/// POST /admin/careers/search
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
        .careers
        .on_filter_submit(body.normalized(), move |request| async move {
            api.careers_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.careers.snapshot()).into_response()
}

/// GET /admin/careers
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }
    Json(state.careers.snapshot()).into_response()
}

/// Open the price history of one career. The career id rides in the pager
/// filter so subsequent scroll events stay scoped to it.
///
/// POST /admin/careers/{id}/prices/open
pub async fn prices_open_handler(
    State(state): State<Arc<AppState>>,
    Path(career_id): Path<i64>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }
    if career_id <= 0 {
        return Err(ViewError::InvalidParameter(
            "career id must be positive".to_string(),
        ));
    }

    let api = Arc::clone(&state.api);
    let token = state.session.get(TOKEN_KEY);
    state
        .career_prices
        .on_filter_submit(Some(career_id.to_string()), move |request| async move {
            let wire = CareerPricesRequest {
                career_id,
                page: request.page,
                page_size: request.page_size,
            };
            api.career_prices_page(token.as_deref(), &wire).await
        })
        .await;

    Ok(Json(state.career_prices.snapshot()).into_response())
}

/// POST /admin/careers/prices/scroll
pub async fn prices_scroll_handler(
    State(state): State<Arc<AppState>>,
    Json(metrics): Json<ScrollMetrics>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let career_id = state
        .career_prices
        .filter()
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| {
            ViewError::InvalidParameter("price history view is not open".to_string())
        })?;

    let api = Arc::clone(&state.api);
    let token = state.session.get(TOKEN_KEY);
    state
        .career_prices
        .on_scroll(metrics, move |request| async move {
            let wire = CareerPricesRequest {
                career_id,
                page: request.page,
                page_size: request.page_size,
            };
            api.career_prices_page(token.as_deref(), &wire).await
        })
        .await;

    Ok(Json(state.career_prices.snapshot()).into_response())
}

/// GET /admin/careers/prices
pub async fn prices_state_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }
    Json(state.career_prices.snapshot()).into_response()
}

/// POST /admin/careers/create
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewCareer>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let career = state.api.create_career(token.as_deref(), &body).await?;
    info!(career_id = career.id, name = %career.name, "Career created");
    Ok(Json(career).into_response())
}

/// GET /admin/careers/{id}
pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let career = state.api.get_career(token.as_deref(), id).await?;
    Ok(Json(career).into_response())
}

/// PUT /admin/careers/{id}
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewCareer>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let career = state.api.update_career(token.as_deref(), id, &body).await?;
    info!(career_id = id, "Career updated");
    Ok(Json(career).into_response())
}

/// DELETE /admin/careers/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    state.api.delete_career(token.as_deref(), id).await?;
    info!(career_id = id, "Career deleted");
    Ok(Json(SuccessResponse {
        success: true,
        message: "Career deleted".to_string(),
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ApiClient;
    use crate::core::config::Config;
    use crate::session::store::SessionStore;
    use axum::routing::post;
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_config(base_url: &str) -> Config {
        toml::from_str(&format!(
            r#"
                [server]
                port = 4000

                [backend]
                base_url = "{base_url}"

                [logging]
                level = "info"
                format = "console"
            "#
        ))
        .unwrap()
    }

    fn test_state(dir: &TempDir, base_url: &str) -> Arc<AppState> {
        let session = SessionStore::open(dir.path()).unwrap();
        session.set(TOKEN_KEY, "t").unwrap();
        let api = ApiClient::new(base_url.to_string(), Duration::from_secs(2)).unwrap();
        Arc::new(AppState::new(test_config(base_url), session, api))
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn prices_stub() -> Router {
        Router::new().route(
            "/careers/prices/paginated",
            post(|Json(body): Json<Value>| async move {
                // The wire body is career-scoped, not a free-text search.
                let career_id = body["id_carrera"].as_i64().unwrap();
                let page = body["page"].as_u64().unwrap();
                Json(json!({
                    "success": true,
                    "data": {
                        "id_carrera": career_id,
                        "career_name": "Sistemas",
                        "items": [
                            { "id": page * 10, "monto": 52000, "fecha_desde": "2025-03-01T00:00:00" }
                        ],
                        "page": page,
                        "page_size": 20,
                        "total_items": 3,
                        "total_pages": 3,
                        "has_next": page < 3
                    }
                }))
            }),
        )
    }

    #[tokio::test]
    async fn test_price_history_is_scoped_to_the_opened_career() {
        let dir = TempDir::new().unwrap();
        let base = spawn_stub(prices_stub()).await;
        let state = test_state(&dir, &base);

        let snapshot = body_json(
            prices_open_handler(State(Arc::clone(&state)), Path(3))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(snapshot["filter"], "3");
        assert_eq!(snapshot["items"].as_array().unwrap().len(), 1);

        let metrics = ScrollMetrics {
            scroll_top: 1400.0,
            client_height: 600.0,
            scroll_height: 2000.0,
        };
        let snapshot = body_json(
            prices_scroll_handler(State(Arc::clone(&state)), Json(metrics))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(snapshot["items"].as_array().unwrap().len(), 2);
        assert_eq!(snapshot["page"], 2);
    }

    #[tokio::test]
    async fn test_prices_scroll_without_open_view_is_invalid() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, "http://127.0.0.1:9");

        let metrics = ScrollMetrics {
            scroll_top: 1400.0,
            client_height: 600.0,
            scroll_height: 2000.0,
        };
        let err = prices_scroll_handler(State(state), Json(metrics))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_prices_open_rejects_nonpositive_id() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, "http://127.0.0.1:9");
        let err = prices_open_handler(State(state), Path(0)).await.unwrap_err();
        assert!(matches!(err, ViewError::InvalidParameter(_)));
    }
}
