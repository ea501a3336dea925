//! Session context owning the single access-token slot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client reads the token to build `Authorization` headers, the auth
//! manager overwrites it after each successful sign-in, and route guards test
//! its expiry. All three go through one [`Session`] handle provided via Leptos
//! context so the storage key is never spelled out anywhere else.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::util::{storage, token};

/// localStorage key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Backing storage for the token slot.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// Token slot in browser `localStorage` under [`ACCESS_TOKEN_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        storage::load_string(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn store(&self, token: &str) {
        storage::save_string(ACCESS_TOKEN_KEY, token);
    }

    fn clear(&self) {
        storage::remove(ACCESS_TOKEN_KEY);
    }
}

/// Process-local token slot, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn store(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Cheap-to-clone handle over the token slot.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("has_token", &self.token().is_some()).finish()
    }
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    /// Session backed by browser `localStorage`.
    pub fn browser() -> Self {
        Self::new(BrowserTokenStore)
    }

    /// Session backed by an in-memory slot.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    /// Overwrite the slot with `token`.
    pub fn persist(&self, token: &str) {
        self.store.store(token);
    }

    /// Empty the slot.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Whether the stored token exists and its `exp` is after `now_secs`.
    pub fn is_authenticated_at(&self, now_secs: f64) -> bool {
        token::is_authenticated(self.token().as_deref(), now_secs)
    }

    /// [`Session::is_authenticated_at`] against the wall clock.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(crate::util::clock::now_secs())
    }
}
