//! Session token lifecycle and the current-user cache.

use std::sync::{Arc, PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};

use quantum_pay_core::User;

use crate::storage::{KeyValueStorage, StorageError, keys};

/// Holds the bearer token and a cached current user.
///
/// The token is persisted under [`keys::AUTH_TOKEN`] in durable storage and
/// mirrored in memory; presence of a token is what `is_authenticated`
/// reports. The cached user is invalidated whenever the token changes.
///
/// Cheaply cloneable; all clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    storage: Arc<dyn KeyValueStorage>,
    token: RwLock<Option<SecretString>>,
    user: RwLock<Option<User>>,
}

impl SessionStore {
    /// Load the session from durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StorageError> {
        let token = storage.get(keys::AUTH_TOKEN)?.map(SecretString::from);

        Ok(Self {
            inner: Arc::new(SessionStoreInner {
                storage,
                token: RwLock::new(token),
                user: RwLock::new(None),
            }),
        })
    }

    /// Store a new token, persisting it and dropping any cached user.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted; in-memory state is
    /// updated regardless, so the running session stays usable.
    pub fn set_token(&self, token: SecretString) -> Result<(), StorageError> {
        let result = self
            .inner
            .storage
            .set(keys::AUTH_TOKEN, token.expose_secret());

        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
        self.invalidate_user();

        result
    }

    /// Remove the token from memory and durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted token cannot be removed; in-memory
    /// state is cleared regardless, so the session fails closed.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.invalidate_user();

        self.inner.storage.remove(keys::AUTH_TOKEN)
    }

    /// Whether a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The `Authorization` header value for the current token, if any.
    ///
    /// This is the single place the secret leaves its wrapper on the request
    /// path.
    #[must_use]
    pub fn authorization_value(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    /// The cached current user, if one has been fetched since the last token
    /// change.
    #[must_use]
    pub fn cached_user(&self) -> Option<User> {
        self.inner
            .user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Cache the current user.
    pub fn cache_user(&self, user: User) {
        *self
            .inner
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Drop the cached current user.
    pub fn invalidate_user(&self) {
        *self
            .inner
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use quantum_pay_core::{Email, UserId};

    fn store() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::load(Arc::clone(&storage) as Arc<dyn KeyValueStorage>).unwrap();
        (storage, session)
    }

    fn some_user() -> User {
        User {
            id: UserId::new("usr_1"),
            name: "Ada Lovelace".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
        }
    }

    #[test]
    fn test_starts_unauthenticated() {
        let (_, session) = store();
        assert!(!session.is_authenticated());
        assert_eq!(session.authorization_value(), None);
    }

    #[test]
    fn test_set_token_persists_and_authenticates() {
        let (storage, session) = store();
        session.set_token(SecretString::from("tok_abc")).unwrap();

        assert!(session.is_authenticated());
        assert_eq!(
            session.authorization_value().unwrap(),
            "Bearer tok_abc"
        );
        assert_eq!(
            storage.get(keys::AUTH_TOKEN).unwrap(),
            Some("tok_abc".to_owned())
        );
    }

    #[test]
    fn test_loads_existing_token() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::AUTH_TOKEN, "tok_persisted").unwrap();

        let session = SessionStore::load(storage as Arc<dyn KeyValueStorage>).unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_clear_token_removes_everything() {
        let (storage, session) = store();
        session.set_token(SecretString::from("tok_abc")).unwrap();
        session.cache_user(some_user());

        session.clear_token().unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(session.cached_user(), None);
        assert_eq!(storage.get(keys::AUTH_TOKEN).unwrap(), None);
    }

    #[test]
    fn test_token_change_invalidates_user_cache() {
        let (_, session) = store();
        session.set_token(SecretString::from("tok_1")).unwrap();
        session.cache_user(some_user());
        assert!(session.cached_user().is_some());

        session.set_token(SecretString::from("tok_2")).unwrap();
        assert_eq!(session.cached_user(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let (_, session) = store();
        let other = session.clone();
        session.set_token(SecretString::from("tok_abc")).unwrap();
        assert!(other.is_authenticated());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let (_, session) = store();
        session.set_token(SecretString::from("tok_secret")).unwrap();
        let debug = format!("{session:?}");
        assert!(!debug.contains("tok_secret"));
    }
}
