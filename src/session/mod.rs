//! Persisted session: access token and user record.
//!
//! The store is the single owner of the two storage keys. The auth effects
//! write it; the products client reads the token for its bearer header.

mod storage;
mod token;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use token::{is_token_live, is_token_live_at, token_expiry};

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Use sparingly and only when actually sending to the API.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Token + user persistence over a [`Storage`] backend.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn Storage>,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Replace the stored token and user.
    pub fn persist(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, &user_json)?;
        tracing::info!(user = %user.email, "Session persisted");
        Ok(())
    }

    /// Remove both keys. Removal of one key is attempted even if the other fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        token.and(user)
    }

    pub fn token(&self) -> Option<SecureString> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(SecureString::new(token)),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    /// Stored user record. A corrupt record reads as absent.
    pub fn user(&self) -> Option<User> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt stored user record");
                None
            }
        }
    }

    /// A stored token whose `exp` is in the future.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.token()
            .is_some_and(|token| is_token_live_at(token.expose(), now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
        }
    }

    #[test]
    fn secure_string_does_not_leak() {
        let secret = SecureString::new("my-secret-token".to_string());
        assert!(!format!("{:?}", secret).contains("my-secret-token"));
        assert!(!format!("{}", secret).contains("my-secret-token"));
        assert_eq!(secret.expose(), "my-secret-token");
    }

    #[test]
    fn persist_then_clear() {
        let store = CredentialStore::in_memory();
        store.persist("tok", &user()).unwrap();
        assert_eq!(store.token().unwrap().expose(), "tok");
        assert_eq!(store.user(), Some(user()));

        store.clear().unwrap();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn corrupt_user_reads_as_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(USER_KEY, "{not json").unwrap();
        let store = CredentialStore::new(storage);
        assert!(store.user().is_none());
    }

    #[test]
    fn opaque_token_is_not_authenticated() {
        let store = CredentialStore::in_memory();
        store.persist("opaque", &user()).unwrap();
        assert!(!store.is_authenticated());
    }
}
