//! Key-value store seam
//!
//! [`KeyValueStore`] is the minimal surface the manager needs from a backend
//! and [`QuotaProbe`] reports how full it is. Both take `&self`; backends use
//! interior mutability the way browser storage does.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::config::DEFAULT_CAPACITY_BYTES;
use crate::error::StoreError;

/// String key-value storage
pub trait KeyValueStore {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, failing when the backend is out of space
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value; absent keys are ignored
    fn remove(&self, key: &str);

    /// All keys currently stored
    fn keys(&self) -> Vec<String>;
}

/// Reports consumption against a capacity ceiling
pub trait QuotaProbe {
    fn used_bytes(&self) -> u64;

    fn capacity_bytes(&self) -> u64;

    /// Bytes a single entry occupies under this probe's accounting
    fn entry_bytes(&self, key: &str, value: &str) -> u64 {
        (key.len() + value.len()) as u64
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

impl<T: QuotaProbe + ?Sized> QuotaProbe for Rc<T> {
    fn used_bytes(&self) -> u64 {
        (**self).used_bytes()
    }

    fn capacity_bytes(&self) -> u64 {
        (**self).capacity_bytes()
    }

    fn entry_bytes(&self, key: &str, value: &str) -> u64 {
        (**self).entry_bytes(key, value)
    }
}

/// In-memory store with a hard capacity, for tests and headless use
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    capacity: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store with the default 5 MiB capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY_BYTES)
    }

    /// Create an empty store with a custom capacity
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            capacity,
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn size_of(key: &str, value: &str) -> u64 {
        (key.len() + value.len()) as u64
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.borrow_mut();
        let used: u64 = entries.iter().map(|(k, v)| Self::size_of(k, v)).sum();
        let replaced = entries.get(key).map_or(0, |old| Self::size_of(key, old));
        let available = self.capacity.saturating_sub(used - replaced);
        let requested = Self::size_of(key, value);
        if requested > available {
            return Err(StoreError::QuotaExceeded { requested, available });
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl QuotaProbe for MemoryStore {
    fn used_bytes(&self) -> u64 {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| Self::size_of(k, v))
            .sum()
    }

    fn capacity_bytes(&self) -> u64 {
        self.capacity
    }
}

/// Probe reporting fixed numbers, for simulating a nearly full backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedQuota {
    pub used: u64,
    pub capacity: u64,
}

impl FixedQuota {
    pub fn new(used: u64, capacity: u64) -> Self {
        Self { used, capacity }
    }
}

impl QuotaProbe for FixedQuota {
    fn used_bytes(&self) -> u64 {
        self.used
    }

    fn capacity_bytes(&self) -> u64 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set("presentation_dairy", "{}").unwrap();
        assert_eq!(store.get("presentation_dairy").as_deref(), Some("{}"));
        assert_eq!(store.keys(), vec!["presentation_dairy".to_string()]);

        store.remove("presentation_dairy");
        assert!(store.get("presentation_dairy").is_none());
        assert!(store.is_empty());
        store.remove("presentation_dairy");
    }

    #[test]
    fn test_used_bytes_counts_keys_and_values() {
        let store = MemoryStore::with_capacity(100);
        store.set("ab", "cdef").unwrap();
        store.set("g", "h").unwrap();
        assert_eq!(store.used_bytes(), 8);
        assert_eq!(store.capacity_bytes(), 100);
    }

    #[test]
    fn test_set_rejects_over_capacity() {
        let store = MemoryStore::with_capacity(10);
        store.set("k", "12345").unwrap();
        assert_matches!(
            store.set("j", "123456"),
            Err(StoreError::QuotaExceeded { requested: 7, available: 4 })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite_reclaims_old_value() {
        let store = MemoryStore::with_capacity(10);
        store.set("k", "123456789").unwrap();
        store.set("k", "987654321").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("987654321"));
    }

    #[test]
    fn test_rc_delegates() {
        let store = Rc::new(MemoryStore::with_capacity(64));
        let shared = Rc::clone(&store);
        shared.set("x", "y").unwrap();
        assert_eq!(store.get("x").as_deref(), Some("y"));
        assert_eq!(QuotaProbe::used_bytes(&shared), 2);
    }
}
