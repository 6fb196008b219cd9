//! Durable key-value store seam and the persisted session cache.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps the last-known identity in `localStorage`; the CLI keeps
//! it in a JSON file. Both sit behind [`KeyValueStore`] so the provider only
//! ever sees [`SessionCache`].
//!
//! ERROR HANDLING
//! ==============
//! The cache is advisory. Read and write failures are logged and treated as
//! "nothing cached"; they never fail a session resolution.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::identity::SessionIdentity;

/// Key under which the last-known identity is cached.
pub const SESSION_CACHE_KEY: &str = "user";

/// Key under which the hosted session's bearer token is kept.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// String key-value storage. `set` replaces the whole value for `key`.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store for tests and non-browser renders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<K> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// The persisted cache entry: last-known identity (or `null`) as JSON text.
pub struct SessionCache {
    store: Box<dyn KeyValueStore>,
}

impl SessionCache {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self { store: Box::new(store) }
    }

    /// Read the cached identity. Absent, `null` and corrupt entries are `None`.
    #[must_use]
    pub fn load(&self) -> Option<SessionIdentity> {
        let raw = match self.store.get(SESSION_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "session cache read failed");
                return None;
            }
        };
        match serde_json::from_str::<Option<SessionIdentity>>(&raw) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "discarding corrupt session cache entry");
                None
            }
        }
    }

    /// Replace the cached value with `identity` (or `null`).
    pub fn save(&self, identity: Option<&SessionIdentity>) {
        let result = serde_json::to_string(&identity)
            .map_err(StoreError::from)
            .and_then(|raw| self.store.set(SESSION_CACHE_KEY, &raw));
        if let Err(e) = result {
            tracing::warn!(error = %e, "session cache write failed");
        }
    }

    pub fn clear(&self) {
        self.save(None);
    }
}
