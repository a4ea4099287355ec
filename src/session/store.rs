use anyhow::{Context, Result};
use dashmap::DashMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Persisted session keys. The portal owns exactly these four; nothing else
/// reads or writes them outside the login flow.
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const USER_ID_KEY: &str = "user_id";
pub const USER_TYPE_KEY: &str = "user_type";

const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USER_KEY, USER_ID_KEY, USER_TYPE_KEY];

/// File-backed key-value store holding the persisted portal session.
///
/// One file per key under the storage directory; a write replaces the whole
/// file through a temp-file rename, so a key is always observed at either
/// its old or its new value. There is no cross-key transaction; callers
/// rely only on per-key atomicity.
pub struct SessionStore {
    dir: PathBuf,
    cache: DashMap<String, String>,
}

impl SessionStore {
    /// Opens the store, creating the directory and loading any keys
    /// persisted by a previous run. Unreadable entries are skipped, never
    /// fatal.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create session dir: {}", dir.display()))?;

        let cache = DashMap::new();
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read session dir: {}", dir.display()))?;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable session entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(key) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            // Leftover temp files from an interrupted write are not keys.
            if key.ends_with(".tmp") {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(value) => {
                    cache.insert(key.to_string(), value);
                }
                Err(e) => warn!(key, error = %e, "Skipping unreadable session key"),
            }
        }

        Ok(Self { dir, cache })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).map(|entry| entry.value().clone())
    }

    /// Writes one key. The write is atomic for this key only.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)
            .with_context(|| format!("Failed to write session key '{key}'"))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to persist session key '{key}'"))?;
        self.cache.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Removes one key. Removing a missing key is a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.cache.remove(key);
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove session key '{key}'"))
            }
        }
    }

    /// Removes every session key. Safe to call with no session present; the
    /// in-memory state is cleared even if a file removal fails.
    pub fn clear_session(&self) {
        for key in SESSION_KEYS {
            if let Err(e) = self.remove(key) {
                warn!(key, error = %e, "Failed to remove session key file");
            }
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        assert_eq!(store.get(TOKEN_KEY), None);
        store.set(TOKEN_KEY, "fake-token-user-7").unwrap();
        assert_eq!(store.get(TOKEN_KEY), Some("fake-token-user-7".to_string()));
    }

    #[test]
    fn test_keys_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = SessionStore::open(dir.path()).unwrap();
            store.set(TOKEN_KEY, "t").unwrap();
            store.set(USER_TYPE_KEY, "admin").unwrap();
        }

        let store = SessionStore::open(dir.path()).unwrap();
        assert_eq!(store.get(TOKEN_KEY), Some("t".to_string()));
        assert_eq!(store.get(USER_TYPE_KEY), Some("admin".to_string()));
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.remove(USER_KEY).unwrap();
        store.remove(USER_KEY).unwrap();
    }

    #[test]
    fn test_clear_session_removes_all_keys() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, r#"{"id":1,"username":"ana"}"#).unwrap();
        store.set(USER_ID_KEY, "1").unwrap();
        store.set(USER_TYPE_KEY, "student").unwrap();

        store.clear_session();

        for key in SESSION_KEYS {
            assert_eq!(store.get(key), None, "key '{key}' should be gone");
        }

        // And nothing comes back after a reopen.
        let store = SessionStore::open(dir.path()).unwrap();
        for key in SESSION_KEYS {
            assert_eq!(store.get(key), None);
        }
    }

    #[test]
    fn test_clear_session_with_no_session_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.clear_session();
        store.clear_session();
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_leftover_tmp_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("token.tmp"), "half-written").unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        assert_eq!(store.get("token.tmp"), None);
        assert_eq!(store.get(TOKEN_KEY), None);
    }
}
