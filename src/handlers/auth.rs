use axum::{
    extract::State,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::error::{ApiError, ViewError};
use crate::core::state::AppState;
use crate::nav::menu::{menu_for, MenuItem};
use crate::session::guard::{logout, require_anonymous, RouteDecision, LOGIN_PATH};
use crate::session::resolver::{resolve_session, Role, Session, StoredUser};
use crate::session::store::{TOKEN_KEY, USER_ID_KEY, USER_KEY, USER_TYPE_KEY};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// Resolved session plus the navigation the shell needs to render.
#[derive(Debug, Serialize)]
pub struct SessionPayload {
    pub authenticated: bool,
    pub user_id: i64,
    pub username: Option<String>,
    pub display_name: String,
    pub initials: String,
    pub role: Role,
    pub home: &'static str,
    pub menu: Vec<MenuItem>,
}

impl From<Session> for SessionPayload {
    fn from(session: Session) -> Self {
        Self {
            authenticated: true,
            user_id: session.user_id,
            display_name: session.display_name(),
            initials: session.initials(),
            role: session.role,
            home: session.role.home_path(),
            menu: menu_for(session.role),
            username: session.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnonymousPayload {
    pub authenticated: bool,
    pub login: &'static str,
}

/// Authenticates against the upstream API and persists the session.
///
/// On success the four session keys are written in the same order the web
/// client used: token, user record, user_id, user_type. Invalid credentials
/// come back as 401 with the server's message; the form keeps its values
/// client-side so the user can retry.
///
/// POST /login
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<Response, ViewError> {
    if let RouteDecision::Redirect(path) = require_anonymous(&state.session) {
        return Ok(Redirect::to(path).into_response());
    }

    let login = match state.api.login(&body.username, &body.password).await {
        Ok(login) => login,
        Err(ApiError::Backend(message)) => {
            warn!(username = %body.username, "Login rejected by backend");
            return Err(ViewError::LoginRejected(message));
        }
        Err(err) => return Err(ViewError::Upstream(err)),
    };

    let role = Role::parse(&login.user.role).unwrap_or(Role::Student);
    let stored = StoredUser {
        id: login.user.id,
        username: login.user.username.clone(),
        first_name: None,
        last_name: None,
        role: Some(role.as_str().to_string()),
    };
    let user_json =
        serde_json::to_string(&stored).map_err(|e| ViewError::Internal(e.to_string()))?;

    let store = &state.session;
    store
        .set(TOKEN_KEY, &login.token)
        .map_err(|e| ViewError::Internal(e.to_string()))?;
    store
        .set(USER_KEY, &user_json)
        .map_err(|e| ViewError::Internal(e.to_string()))?;
    store
        .set(USER_ID_KEY, &login.user.id.to_string())
        .map_err(|e| ViewError::Internal(e.to_string()))?;
    store
        .set(USER_TYPE_KEY, role.as_str())
        .map_err(|e| ViewError::Internal(e.to_string()))?;

    info!(
        user_id = login.user.id,
        role = role.as_str(),
        "Login succeeded"
    );

    let session = resolve_session(store)
        .ok_or_else(|| ViewError::Internal("session was not persisted".to_string()))?;
    Ok(Json(SessionPayload::from(session)).into_response())
}

/// Clears the persisted session and routes back to the login form.
/// Safe to call with no session present.
///
/// POST /logout
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> Response {
    match logout(&state.session) {
        RouteDecision::Redirect(path) => Redirect::to(path).into_response(),
        RouteDecision::Continue => Redirect::to(LOGIN_PATH).into_response(),
    }
}

/// Current session plus the role menu, for the shell's sidebar.
///
/// GET /session
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Response {
    match resolve_session(&state.session) {
        Some(session) => Json(SessionPayload::from(session)).into_response(),
        None => Json(AnonymousPayload {
            authenticated: false,
            login: LOGIN_PATH,
        })
        .into_response(),
    }
}
