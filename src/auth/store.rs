use std::collections::BTreeMap;

use thiserror::Error;

use super::models::User;
use crate::storage::StateStore;

/// Reserved namespace for app-global (not per-user) entries.
const AUTH_NAMESPACE: &str = "_auth";
const USERS_KEY: &str = "users";
const SESSION_KEY: &str = "session";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid username or password")]
    InvalidCredentials,
}

type UserMap = BTreeMap<String, String>;

/// Username/password map plus the current-session pointer.
///
/// Passwords are stored and compared as plain values. That is a carried-over
/// simplification of the original design, not a contract; a production
/// deployment must hash them.
pub struct CredentialStore {
    store: StateStore,
}

impl CredentialStore {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Seed accounts written on first run so the store is never empty.
    fn default_users() -> UserMap {
        let mut users = UserMap::new();
        users.insert("student".to_string(), "password123".to_string());
        users.insert("learner".to_string(), "sanskrit".to_string());
        users
    }

    /// Load the account map, initializing the seed set when absent or empty.
    fn users(&self) -> UserMap {
        match self.store.get::<UserMap>(AUTH_NAMESPACE, USERS_KEY) {
            Some(users) if !users.is_empty() => users,
            _ => {
                let users = Self::default_users();
                self.store.set(AUTH_NAMESPACE, USERS_KEY, &users);
                users
            }
        }
    }

    fn save_users(&self, users: &UserMap) {
        self.store.set(AUTH_NAMESPACE, USERS_KEY, users);
    }

    /// Register a new account and sign it in.
    pub fn sign_up(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let mut users = self.users();

        if users.contains_key(username) {
            return Err(AuthError::DuplicateUser(username.to_string()));
        }

        users.insert(username.to_string(), password.to_string());
        self.save_users(&users);

        let user = User::new(username);
        self.store.set(AUTH_NAMESPACE, SESSION_KEY, &user);
        Ok(user)
    }

    /// Verify credentials and establish the session pointer.
    pub fn log_in(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let users = self.users();

        match users.get(username) {
            Some(stored) if stored == password => {
                let user = User::new(username);
                self.store.set(AUTH_NAMESPACE, SESSION_KEY, &user);
                Ok(user)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// The currently remembered user, if a session pointer exists.
    pub fn check_session(&self) -> Option<User> {
        self.store.get(AUTH_NAMESPACE, SESSION_KEY)
    }

    /// Clear the session pointer.
    pub fn log_out(&self) {
        self.store.remove(AUTH_NAMESPACE, SESSION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn auth() -> (TempDir, CredentialStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().to_path_buf());
        (dir, CredentialStore::new(store))
    }

    #[test]
    fn test_seed_accounts_exist_on_first_run() {
        let (_dir, auth) = auth();
        let user = auth.log_in("student", "password123").unwrap();
        assert_eq!(user.username, "student");
    }

    #[test]
    fn test_sign_up_signs_in_and_log_in_works() {
        let (_dir, auth) = auth();
        auth.sign_up("asha", "gita108").unwrap();
        assert_eq!(auth.check_session().unwrap().username, "asha");

        auth.log_out();
        let user = auth.log_in("asha", "gita108").unwrap();
        assert_eq!(user.username, "asha");
    }

    #[test]
    fn test_sign_up_duplicate_rejected() {
        let (_dir, auth) = auth();
        auth.sign_up("asha", "one").unwrap();

        let err = auth.sign_up("asha", "two").unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser(u) if u == "asha"));
    }

    #[test]
    fn test_log_in_wrong_password() {
        let (_dir, auth) = auth();
        let err = auth.log_in("student", "wrong").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_log_in_unknown_user() {
        let (_dir, auth) = auth();
        let err = auth.log_in("nobody", "password123").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_session_lifecycle() {
        let (_dir, auth) = auth();
        assert!(auth.check_session().is_none());

        auth.log_in("learner", "sanskrit").unwrap();
        assert_eq!(auth.check_session().unwrap().username, "learner");

        auth.log_out();
        assert!(auth.check_session().is_none());
    }

    #[test]
    fn test_failed_log_in_leaves_no_session() {
        let (_dir, auth) = auth();
        let _ = auth.log_in("student", "wrong");
        assert!(auth.check_session().is_none());
    }
}
