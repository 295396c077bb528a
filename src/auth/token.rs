//! Access-token persistence port.
//!
//! The browser build keeps the access token under a fixed local-storage key
//! so a reload can resume the session. The store is a port so tests and
//! non-browser embedders can supply their own slot.

use std::sync::{Arc, RwLock};

/// Port for reading and writing the single persisted access token.
///
/// Implementations must be cheap to clone and safe to share between the
/// HTTP client and the login flow.
pub trait TokenStore: Send + Sync {
    /// Returns the current access token, if one is stored.
    fn access_token(&self) -> Option<String>;

    /// Replaces the stored access token.
    fn set_access_token(&self, token: String);

    /// Removes the stored access token.
    fn clear(&self);
}

/// In-memory [`TokenStore`] backed by an `RwLock`.
///
/// Used in tests and headless embedders; a browser embedder would adapt
/// this port over its local-storage slot instead.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_access_token(token.into());
        store
    }
}

impl TokenStore for InMemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        // A poisoned lock degrades to "no token stored"; the next request
        // then fails authentication rather than panicking the client.
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set_access_token(&self, token: String) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryTokenStore, TokenStore};

    #[test]
    fn store_round_trips_token() {
        let store = InMemoryTokenStore::new();
        assert_eq!(store.access_token(), None);

        store.set_access_token("jwt-1".to_owned());
        assert_eq!(store.access_token(), Some("jwt-1".to_owned()));

        store.set_access_token("jwt-2".to_owned());
        assert_eq!(store.access_token(), Some("jwt-2".to_owned()));

        store.clear();
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn clones_share_the_same_slot() {
        let store = InMemoryTokenStore::with_token("shared");
        let view = store.clone();
        store.set_access_token("rotated".to_owned());
        assert_eq!(view.access_token(), Some("rotated".to_owned()));
    }
}
