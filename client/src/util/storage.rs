//! Browser `localStorage` as the session cache's key-value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes the web-sys glue so the `auth` provider only sees a
//! `KeyValueStore`. Off-browser builds have no storage: reads are empty and
//! writes are dropped.

use auth::{KeyValueStore, StoreError};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StoreError::Unavailable("localStorage not available".to_owned()))
}

#[cfg(feature = "csr")]
fn js_error(e: &wasm_bindgen::JsValue) -> StoreError {
    StoreError::Unavailable(format!("{e:?}"))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
