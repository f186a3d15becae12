//! Session store trait and the in-memory implementation.

use super::model::{Session, UserProfile};
use std::sync::RwLock;

/// Single source of truth for "is the user authenticated, and who are they".
///
/// The store is injected into the API client and the use cases at
/// construction time; nothing reaches for a global.
///
/// # Failure semantics
///
/// No method returns an error. An absent token is an expected state, and a
/// durable store that cannot write to disk logs the failure and still
/// updates its in-memory view.
pub trait SessionStore: Send + Sync {
    /// Returns the current bearer token, if any.
    fn token(&self) -> Option<String>;

    /// Replaces token and cached user together.
    fn set_session(&self, token: String, user: UserProfile);

    /// Removes token and cached user. Idempotent.
    fn clear_session(&self);

    /// Returns the cached profile without a network call.
    fn cached_user(&self) -> Option<UserProfile>;

    /// Returns true when a token is present.
    fn has_session(&self) -> bool {
        self.token().is_some()
    }
}

/// Process-local session store.
///
/// Nothing survives a restart. Used by tests and throwaway shells.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: RwLock<Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a session.
    pub fn with_session(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            session: RwLock::new(Session::new(token, user)),
        }
    }

    /// Returns a copy of the whole session.
    pub fn snapshot(&self) -> Session {
        self.session
            .read()
            .map(|session| session.clone())
            .unwrap_or_default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn token(&self) -> Option<String> {
        self.session.read().ok().and_then(|s| s.token.clone())
    }

    fn set_session(&self, token: String, user: UserProfile) {
        if let Ok(mut session) = self.session.write() {
            *session = Session::new(token, user);
        }
    }

    fn clear_session(&self) {
        if let Ok(mut session) = self.session.write() {
            *session = Session::default();
        }
    }

    fn cached_user(&self) -> Option<UserProfile> {
        self.session.read().ok().and_then(|s| s.cached_user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            id: 1,
            email: "admin@pillcare.test".to_string(),
            full_name: None,
            role: None,
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = InMemorySessionStore::new();
        assert!(store.token().is_none());
        assert!(store.cached_user().is_none());
        assert!(!store.has_session());
    }

    #[test]
    fn test_set_and_clear_session() {
        let store = InMemorySessionStore::new();
        store.set_session("abc".to_string(), user());

        assert_eq!(store.token().as_deref(), Some("abc"));
        assert_eq!(store.cached_user(), Some(user()));

        store.clear_session();
        assert!(store.token().is_none());
        assert!(store.cached_user().is_none());

        // Clearing twice is fine
        store.clear_session();
        assert!(!store.has_session());
    }

    #[test]
    fn test_set_session_replaces_wholesale() {
        let store = InMemorySessionStore::with_session("old", user());
        let other = UserProfile {
            id: 2,
            email: "other@pillcare.test".to_string(),
            full_name: Some("Other".to_string()),
            role: None,
        };
        store.set_session("new".to_string(), other.clone());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.token.as_deref(), Some("new"));
        assert_eq!(snapshot.cached_user, Some(other));
    }
}
