use tracing::{info, warn};

use crate::core::state::AppState;
use crate::session::resolver::resolve_session;

/// Reports the persisted session state at boot.
///
/// The resolver never fails here: malformed persisted data degrades to the
/// least-privileged role instead of aborting startup.
pub fn report_restored_session(state: &AppState) {
    match resolve_session(&state.session) {
        Some(session) => info!(
            user_id = session.user_id,
            role = session.role.as_str(),
            "Restored persisted session"
        ),
        None => info!("No persisted session, portal starts anonymous"),
    }
}

/// Checks whether the upstream API answers at all. Any HTTP status counts
/// as reachable; only a transport failure is reported, and startup
/// continues either way.
pub async fn probe_backend(state: &AppState) {
    match state.api.probe().await {
        Ok(status) => info!(status, "Backend reachable"),
        Err(e) => warn!(
            error = %e,
            "Backend not reachable, views will surface errors until it comes back"
        ),
    }
}
