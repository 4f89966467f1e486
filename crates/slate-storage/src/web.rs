//! Browser `localStorage` backend
//!
//! Browsers count `localStorage` in UTF-16 code units, so sizes here are
//! two bytes per unit of key and value.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::config::DEFAULT_CAPACITY_BYTES;
use crate::error::StoreError;
use crate::store::{KeyValueStore, QuotaProbe};

/// `window.localStorage` with an assumed capacity ceiling
pub struct LocalStorage {
    storage: Storage,
    capacity: u64,
}

impl LocalStorage {
    /// Open the window's local storage with the default 5 MiB ceiling
    pub fn open() -> Result<Self, StoreError> {
        Self::open_with_capacity(DEFAULT_CAPACITY_BYTES)
    }

    /// Open the window's local storage with a custom ceiling
    pub fn open_with_capacity(capacity: u64) -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".into()))?;
        Ok(Self { storage, capacity })
    }

    fn utf16_bytes(text: &str) -> u64 {
        text.encode_utf16().count() as u64 * 2
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Unavailable(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // The only failure setItem reports in practice is QuotaExceededError
        self.storage.set_item(key, value).map_err(|_| StoreError::QuotaExceeded {
            requested: self.entry_bytes(key, value),
            available: self.capacity.saturating_sub(self.used_bytes()),
        })
    }

    fn remove(&self, key: &str) {
        let _ = self.storage.remove_item(key);
    }

    fn keys(&self) -> Vec<String> {
        let len = self.storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| self.storage.key(i).ok().flatten())
            .collect()
    }
}

impl QuotaProbe for LocalStorage {
    fn used_bytes(&self) -> u64 {
        self.keys()
            .iter()
            .map(|key| {
                let value = self.get(key).unwrap_or_default();
                Self::utf16_bytes(key) + Self::utf16_bytes(&value)
            })
            .sum()
    }

    fn capacity_bytes(&self) -> u64 {
        self.capacity
    }

    fn entry_bytes(&self, key: &str, value: &str) -> u64 {
        Self::utf16_bytes(key) + Self::utf16_bytes(value)
    }
}
