use tracing::info;

use crate::session::resolver::resolve_session;
use crate::session::store::{SessionStore, TOKEN_KEY};

pub const LOGIN_PATH: &str = "/login";

/// Instruction handed to the routing layer, which owns actual navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Continue,
    Redirect(&'static str),
}

/// Gate for protected routes: anonymous viewers are sent to the login form.
pub fn require_authenticated(store: &SessionStore) -> RouteDecision {
    if store.get(TOKEN_KEY).is_none() {
        return RouteDecision::Redirect(LOGIN_PATH);
    }
    RouteDecision::Continue
}

/// Gate for the login route: logged-in viewers are sent to their role home.
pub fn require_anonymous(store: &SessionStore) -> RouteDecision {
    match resolve_session(store) {
        Some(session) => RouteDecision::Redirect(session.role.home_path()),
        None => RouteDecision::Continue,
    }
}

/// Clears every session key and routes back to the login form.
///
/// Idempotent: logging out with no session present ends in the same state
/// as logging out once.
pub fn logout(store: &SessionStore) -> RouteDecision {
    store.clear_session();
    info!("Session cleared");
    RouteDecision::Redirect(LOGIN_PATH)
}
