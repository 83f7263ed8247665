//! Durable client-side session persistence with change broadcast.
//!
//! DESIGN
//! ======
//! The storage medium sits behind [`StorageBackend`] so the evaluator and
//! the auth facade can be exercised natively against [`MemoryStorage`];
//! [`BrowserStorage`] is the production backend over `localStorage`. Only
//! the safe user projection and the raw token are ever written — never
//! credentials.
//!
//! Change notifications fire strictly after the writes they announce, so a
//! listener reacting to one always observes the post-write state.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::{TOKEN_KEY, USER_KEY};
use crate::net::types::Role;

/// Minimal non-sensitive user record persisted client-side.
///
/// Field defaults make loading total: a stored record missing `name` or
/// `email` reads as empty strings and an unrecognized role reads as viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeUser {
    /// Primary identifier, keyed `_id` on the wire. May be absent when the
    /// backend omits it from the user payload; the session evaluator
    /// backfills it from token claims.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Pluggable key-value medium behind the session store.
///
/// `Send + Sync` is required because the store travels through Leptos
/// context, whose values are shared across the reactive system.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    /// Broadcast a change notification. The store calls this strictly after
    /// the mutation it announces.
    fn notify(&self);
}

/// `window.localStorage` backend.
///
/// Every operation degrades to a no-op / `None` when the browser medium is
/// absent (server-side rendering), matching the rest of the hydrate-gated
/// code in this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }

    fn notify(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Ok(event) = web_sys::Event::new(super::AUTH_EVENT) {
                    let _ = window.dispatch_event(&event);
                }
            }
        }
    }
}

type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// In-memory backend for native tests.
///
/// Clones share both the map and the listener list, so two handles model two
/// tabs open on the same origin: a mutation through one handle notifies
/// subscribers registered through the other, mirroring the browser's
/// `storage` event.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    listeners: Arc<Mutex<Vec<ChangeListener>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change listener invoked after every mutation.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Arc::new(listener));
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    fn notify(&self) {
        // Snapshot so listeners may subscribe or mutate without deadlocking.
        let listeners: Vec<ChangeListener> = match self.listeners.lock() {
            Ok(listeners) => listeners.clone(),
            Err(_) => return,
        };
        for listener in listeners {
            listener();
        }
    }
}

/// Facade over the storage backend holding the persisted session record.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn StorageBackend>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::browser()
    }
}

impl SessionStore {
    /// Store backed by `window.localStorage` (no-op outside the browser).
    pub fn browser() -> Self {
        Self { backend: Arc::new(BrowserStorage) }
    }

    /// Store over an injected backend, used by tests.
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Persist the user projection and, when given, the bearer token, then
    /// broadcast a change notification.
    pub fn save(&self, user: &SafeUser, token: Option<&str>) {
        if let Some(token) = token {
            self.backend.set(TOKEN_KEY, token);
        }
        match serde_json::to_string(user) {
            Ok(raw) => self.backend.set(USER_KEY, &raw),
            Err(err) => log::warn!("session store: failed to serialize user: {err}"),
        }
        self.backend.notify();
    }

    /// Read the persisted user projection.
    ///
    /// Absent or unparseable data reads as `None`; a parse failure is logged
    /// and swallowed, treated identically to absence.
    pub fn load(&self) -> Option<SafeUser> {
        let raw = self.backend.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("session store: failed to parse stored user: {err}");
                None
            }
        }
    }

    /// Read the persisted bearer token.
    pub fn token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY)
    }

    /// Remove both session keys, then broadcast a change notification.
    pub fn clear(&self) {
        self.backend.remove(USER_KEY);
        self.backend.remove(TOKEN_KEY);
        self.backend.notify();
    }
}
