use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

type Result<T> = std::result::Result<T, StorageError>;

/// Namespaced key/value store backing all per-user state.
///
/// Every operation is fallible underneath but infallible at the surface:
/// a read that hits a missing file, unreadable file, or corrupt JSON
/// returns `None`, and a failed write is logged and dropped. Callers must
/// treat "absent" exactly like a first run.
#[derive(Clone)]
pub struct StateStore {
    base_path: PathBuf,
}

impl StateStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("abhyasa"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Directory holding one user's state files
    fn user_dir(&self, username: &str) -> PathBuf {
        self.base_path.join("state").join(sanitize(username))
    }

    fn entry_path(&self, username: &str, key: &str) -> PathBuf {
        self.user_dir(username).join(format!("{}.json", sanitize(key)))
    }

    /// Store a value under a user-scoped key. Faults are logged and dropped.
    pub fn set<T: Serialize>(&self, username: &str, key: &str, value: &T) {
        if let Err(e) = self.try_set(username, key, value) {
            log::warn!("failed to save state '{}' for '{}': {}", key, username, e);
        }
    }

    fn try_set<T: Serialize>(&self, username: &str, key: &str, value: &T) -> Result<()> {
        let dir = self.user_dir(username);
        fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.entry_path(username, key), json)?;
        Ok(())
    }

    /// Load a value, or `None` if never set or unreadable.
    pub fn get<T: DeserializeOwned>(&self, username: &str, key: &str) -> Option<T> {
        let path = self.entry_path(username, key);
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("failed to read state '{}' for '{}': {}", key, username, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("corrupt state '{}' for '{}': {}", key, username, e);
                None
            }
        }
    }

    /// Delete an entry. Deleting an absent entry is not an error.
    pub fn remove(&self, username: &str, key: &str) {
        let path = self.entry_path(username, key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("failed to remove state '{}' for '{}': {}", key, username, e);
            }
        }
    }

    /// Delete several entries, typically on logout or syllabus reset.
    pub fn remove_many(&self, username: &str, keys: &[&str]) {
        for key in keys {
            self.remove(username, key);
        }
    }
}

/// Map a username or key to a safe file name component.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, StateStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn test_get_absent_returns_none() {
        let (_dir, store) = store();
        let value: Option<Vec<String>> = store.get("student", "sections");
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let (_dir, store) = store();
        store.set("student", "sections", &vec!["a".to_string(), "b".to_string()]);

        let value: Option<Vec<String>> = store.get("student", "sections");
        assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let (_dir, store) = store();
        store.set("student", "flag", &true);

        let other: Option<bool> = store.get("learner", "flag");
        assert!(other.is_none());
    }

    #[test]
    fn test_corrupt_json_degrades_to_absent() {
        let (_dir, store) = store();
        store.set("student", "stats", &42u32);

        let path = store.entry_path("student", "stats");
        fs::write(&path, "{not json").unwrap();

        let value: Option<u32> = store.get("student", "stats");
        assert!(value.is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = store();
        store.set("student", "flag", &true);
        store.remove("student", "flag");
        store.remove("student", "flag");

        let value: Option<bool> = store.get("student", "flag");
        assert!(value.is_none());
    }

    #[test]
    fn test_remove_many() {
        let (_dir, store) = store();
        store.set("student", "a", &1u32);
        store.set("student", "b", &2u32);
        store.set("student", "c", &3u32);

        store.remove_many("student", &["a", "b"]);

        assert!(store.get::<u32>("student", "a").is_none());
        assert!(store.get::<u32>("student", "b").is_none());
        assert_eq!(store.get::<u32>("student", "c"), Some(3));
    }

    #[test]
    fn test_sanitize_keeps_names_on_disk() {
        let (_dir, store) = store();
        store.set("weird/user:name", "key", &7u32);
        assert_eq!(store.get::<u32>("weird/user:name", "key"), Some(7));
    }
}
