use serde::{Deserialize, Serialize};

use crate::session::store::{SessionStore, TOKEN_KEY, USER_ID_KEY, USER_KEY, USER_TYPE_KEY};

/// Privilege level of the logged-in actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    /// Accepts every value the store may hold. `"alumno"` is the legacy
    /// spelling still written by older clients sharing the storage.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "student" | "alumno" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }

    /// Landing route for the role.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Student => "/student",
        }
    }
}

/// The `user` record as persisted at login. Every field beyond `id` and
/// `username` is optional so partially-written records still parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "type", default)]
    pub role: Option<String>,
}

/// Resolved client session. Either no session exists at all, or token, user
/// id and role are all present here.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Session {
    /// First and last name joined, falling back to the username.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.username.clone().unwrap_or_else(|| "user".to_string())
    }

    /// Up to two initials for the avatar badge.
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// Reads the persisted session. Returns `None` when no token is stored.
///
/// Role resolution is a two-tier fallback kept for compatibility with both
/// storage shapes in the wild: the scalar `user_type` key wins when it holds
/// a valid role, the `user` record's `type` field is consulted next, and
/// anything else (missing keys, malformed JSON, unknown values) degrades to
/// `Role::Student`, the least-privileged role, applied uniformly.
pub fn resolve_session(store: &SessionStore) -> Option<Session> {
    let token = store.get(TOKEN_KEY)?;

    let stored_user: Option<StoredUser> = store
        .get(USER_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok());

    let role = store
        .get(USER_TYPE_KEY)
        .as_deref()
        .and_then(Role::parse)
        .or_else(|| {
            stored_user
                .as_ref()
                .and_then(|user| user.role.as_deref())
                .and_then(Role::parse)
        })
        .unwrap_or(Role::Student);

    let user_id = store
        .get(USER_ID_KEY)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .or_else(|| stored_user.as_ref().map(|user| user.id))
        .unwrap_or(0);

    Some(Session {
        token,
        user_id,
        role,
        username: stored_user.as_ref().map(|user| user.username.clone()),
        first_name: stored_user.as_ref().and_then(|user| user.first_name.clone()),
        last_name: stored_user.as_ref().and_then(|user| user.last_name.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SessionStore) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_no_token_means_no_session() {
        let (_dir, store) = store();
        store.set(USER_TYPE_KEY, "admin").unwrap();
        assert!(resolve_session(&store).is_none());
    }

    #[test]
    fn test_direct_user_type_wins() {
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_TYPE_KEY, "admin").unwrap();
        store
            .set(USER_KEY, r#"{"id":4,"username":"ana","type":"student"}"#)
            .unwrap();

        let session = resolve_session(&store).unwrap();
        assert_eq!(session.role, Role::Admin);
    }

    #[test]
    fn test_nested_user_record_is_the_fallback() {
        // user_type absent, user JSON present with {"type":"admin"}.
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        store
            .set(USER_KEY, r#"{"id":4,"username":"ana","type":"admin"}"#)
            .unwrap();

        let session = resolve_session(&store).unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.user_id, 4);
    }

    #[test]
    fn test_malformed_user_json_degrades_to_student() {
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, "{not json at all").unwrap();

        let session = resolve_session(&store).unwrap();
        assert_eq!(session.role, Role::Student);
        assert_eq!(session.user_id, 0);
    }

    #[test]
    fn test_unknown_role_value_degrades_to_student() {
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_TYPE_KEY, "superuser").unwrap();
        store
            .set(USER_KEY, r#"{"id":4,"username":"ana","type":"teacher"}"#)
            .unwrap();

        let session = resolve_session(&store).unwrap();
        assert_eq!(session.role, Role::Student);
    }

    #[test]
    fn test_legacy_alumno_spelling_parses_as_student() {
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_TYPE_KEY, "alumno").unwrap();

        let session = resolve_session(&store).unwrap();
        assert_eq!(session.role, Role::Student);
    }

    #[test]
    fn test_user_id_prefers_scalar_key() {
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_ID_KEY, "9").unwrap();
        store
            .set(USER_KEY, r#"{"id":4,"username":"ana"}"#)
            .unwrap();

        let session = resolve_session(&store).unwrap();
        assert_eq!(session.user_id, 9);
    }

    #[test]
    fn test_unparseable_user_id_falls_back_to_record() {
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_ID_KEY, "not-a-number").unwrap();
        store
            .set(USER_KEY, r#"{"id":4,"username":"ana"}"#)
            .unwrap();

        let session = resolve_session(&store).unwrap();
        assert_eq!(session.user_id, 4);
    }

    #[test]
    fn test_display_name_joins_names_and_falls_back() {
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        store
            .set(
                USER_KEY,
                r#"{"id":4,"username":"agarcia","first_name":"Ana","last_name":"García"}"#,
            )
            .unwrap();

        let session = resolve_session(&store).unwrap();
        assert_eq!(session.display_name(), "Ana García");
        assert_eq!(session.initials(), "AG");

        store
            .set(USER_KEY, r#"{"id":4,"username":"agarcia"}"#)
            .unwrap();
        let session = resolve_session(&store).unwrap();
        assert_eq!(session.display_name(), "agarcia");
    }

    #[test]
    fn test_resolver_never_panics_on_partial_state() {
        let (_dir, store) = store();
        store.set(TOKEN_KEY, "t").unwrap();
        // Token alone: least privilege, zero id, no names.
        let session = resolve_session(&store).unwrap();
        assert_eq!(session.role, Role::Student);
        assert_eq!(session.user_id, 0);
        assert_eq!(session.display_name(), "user");
    }
}
