use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::core::error::ViewError;
use crate::core::state::AppState;
use crate::models::response::SuccessResponse;
use crate::models::user::{NewUser, UserUpdate};
use crate::pager::scroll::ScrollMetrics;
use crate::session::guard::{require_authenticated, RouteDecision};
use crate::session::store::TOKEN_KEY;

/// Search form submission for a list view. An empty string means "no
/// filter", same as the web client sending `null`.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchBody {
    pub fn normalized(self) -> Option<String> {
        self.search.filter(|value| !value.trim().is_empty())
    }
}

/// Open the users list: reset the cursor and load page 1.
///
/// POST /admin/users/open
pub async fn open_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }

    state.users.reset();

    let api = Arc::clone(&state.api);
    let token = state.session.get(TOKEN_KEY);
    state
        .users
        .load_page(1, true, None, move |request| async move {
            api.users_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.users.snapshot()).into_response()
}

/// Scroll event from the list container; fetches the next page when the
/// viewport is near the bottom.
///
/// POST /admin/users/scroll
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
        .users
        .on_scroll(metrics, move |request| async move {
            api.users_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.users.snapshot()).into_response()
}

/// Search form submit: one logical reset to page 1 under the new filter.
///
/// POST /admin/users/search
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
        .users
        .on_filter_submit(body.normalized(), move |request| async move {
            api.users_page(token.as_deref(), &request).await
        })
        .await;

    Json(state.users.snapshot()).into_response()
}

/// Current accumulator and cursor for rendering.
///
/// GET /admin/users
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Response {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Redirect::to(path).into_response();
    }
    Json(state.users.snapshot()).into_response()
}

/// POST /admin/users/create
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewUser>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let user = state.api.create_user(token.as_deref(), &body).await?;
    info!(user_id = user.id, username = %user.username, "User created");
    Ok(Json(user).into_response())
}

/// GET /admin/users/{id}
pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let user = state.api.get_user(token.as_deref(), id).await?;
    Ok(Json(user).into_response())
}

/// PUT /admin/users/{id}
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UserUpdate>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    let user = state.api.update_user(token.as_deref(), id, &body).await?;
    info!(user_id = id, "User updated");
    Ok(Json(user).into_response())
}

/// DELETE /admin/users/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_authenticated(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let token = state.session.get(TOKEN_KEY);
    state.api.delete_user(token.as_deref(), id).await?;
    info!(user_id = id, "User deleted");
    Ok(Json(SuccessResponse {
        success: true,
        message: "User deleted".to_string(),
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
        session.set(TOKEN_KEY, "fake-token-user-1").unwrap();
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

    /// Stub that serves 45 users across three pages and filters on demand.
    fn users_stub() -> Router {
        Router::new().route(
            "/users/paginated",
            post(|Json(body): Json<Value>| async move {
                let page = body["page"].as_u64().unwrap() as i64;
                let page_size = body["page_size"].as_u64().unwrap() as i64;
                let search = body["search"].as_str().unwrap_or("");

                let total: i64 = if search.is_empty() { 45 } else { 2 };
                let start = (page - 1) * page_size;
                let end = (start + page_size).min(total);
                let items: Vec<Value> = (start..end)
                    .map(|i| {
                        json!({
                            "id": i + 1,
                            "username": format!("user{}{}", search, i + 1),
                            "type": "alumno"
                        })
                    })
                    .collect();
                let total_pages = (total + page_size - 1) / page_size;

                Json(json!({
                    "success": true,
                    "data": {
                        "items": items,
                        "page": page,
                        "page_size": page_size,
                        "total_items": total,
                        "total_pages": total_pages,
                        "has_next": page < total_pages
                    }
                }))
            }),
        )
    }

    fn near_bottom() -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 1400.0,
            client_height: 600.0,
            scroll_height: 2000.0,
        }
    }

    #[tokio::test]
    async fn test_open_then_scroll_accumulates_pages() {
        let dir = TempDir::new().unwrap();
        let base = spawn_stub(users_stub()).await;
        let state = test_state(&dir, &base);

        let snapshot = body_json(open_handler(State(Arc::clone(&state))).await).await;
        assert_eq!(snapshot["items"].as_array().unwrap().len(), 20);
        assert_eq!(snapshot["page"], 1);
        assert_eq!(snapshot["has_more"], true);

        let snapshot = body_json(
            scroll_handler(State(Arc::clone(&state)), Json(near_bottom())).await,
        )
        .await;
        assert_eq!(snapshot["items"].as_array().unwrap().len(), 40);
        assert_eq!(snapshot["page"], 2);

        let snapshot = body_json(
            scroll_handler(State(Arc::clone(&state)), Json(near_bottom())).await,
        )
        .await;
        assert_eq!(snapshot["items"].as_array().unwrap().len(), 45);
        assert_eq!(snapshot["has_more"], false);

        // Exhausted: a further scroll never issues page 4.
        let snapshot = body_json(
            scroll_handler(State(Arc::clone(&state)), Json(near_bottom())).await,
        )
        .await;
        assert_eq!(snapshot["items"].as_array().unwrap().len(), 45);
    }

    #[tokio::test]
    async fn test_search_replaces_accumulator() {
        let dir = TempDir::new().unwrap();
        let base = spawn_stub(users_stub()).await;
        let state = test_state(&dir, &base);

        body_json(open_handler(State(Arc::clone(&state))).await).await;
        body_json(scroll_handler(State(Arc::clone(&state)), Json(near_bottom())).await).await;

        let snapshot = body_json(
            search_handler(
                State(Arc::clone(&state)),
                Json(SearchBody {
                    search: Some("gar".to_string()),
                }),
            )
            .await,
        )
        .await;

        let items = snapshot["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0]["username"].as_str().unwrap().contains("gar"));
        assert_eq!(snapshot["filter"], "gar");
    }

    #[tokio::test]
    async fn test_anonymous_viewer_is_redirected_to_login() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, "http://127.0.0.1:9");
        state.session.clear_session();

        let response = open_handler(State(Arc::clone(&state))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_error_and_keeps_items() {
        let dir = TempDir::new().unwrap();
        let base = spawn_stub(users_stub()).await;
        let state = test_state(&dir, &base);

        body_json(open_handler(State(Arc::clone(&state))).await).await;

        // Point the pager's next fetch at a dead backend by swapping state.
        let dead = Arc::new(AppState {
            api: Arc::new(
                ApiClient::new("http://127.0.0.1:9".to_string(), Duration::from_millis(200))
                    .unwrap(),
            ),
            ..(*state).clone()
        });

        let snapshot =
            body_json(scroll_handler(State(dead), Json(near_bottom())).await).await;
        assert_eq!(snapshot["items"].as_array().unwrap().len(), 20);
        assert_eq!(snapshot["error"], "Request failed, please try again");
    }

    #[tokio::test]
    async fn test_empty_search_normalizes_to_none() {
        let body = SearchBody {
            search: Some("   ".to_string()),
        };
        assert_eq!(body.normalized(), None);
        let body = SearchBody { search: None };
        assert_eq!(body.normalized(), None);
        let body = SearchBody {
            search: Some("ana".to_string()),
        };
        assert_eq!(body.normalized(), Some("ana".to_string()));
    }
}
