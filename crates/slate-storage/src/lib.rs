//! Slate storage layer
//!
//! Persists one presentation per sector into a bounded key-value store
//! (browser `localStorage` in production, [`MemoryStore`] in tests):
//!
//! - **Store**: [`KeyValueStore`] and [`QuotaProbe`] seams over the backend
//! - **Usage**: byte accounting against the capacity ceiling
//! - **Manager**: save with quota pre-check, stale-record cleanup and
//!   degraded backup; load with default regeneration on missing or corrupt data
//! - **Web**: `localStorage` backend behind the `web` feature
//!
//! # Design Principles
//!
//! 1. **Never lose the deck silently**: a failed save reports
//!    [`StorageError::Exhausted`] with the outcome of the backup attempt
//! 2. **Loads never fail**: missing or unreadable records become a starter deck
//! 3. **One namespace**: every record key starts with the configured prefix

pub mod config;
pub mod error;
pub mod manager;
pub mod store;
pub mod usage;

#[cfg(feature = "web")]
pub mod web;

pub use config::StorageConfig;
pub use error::{BackupOutcome, StorageError, StoreError};
pub use manager::{CleanupReport, SaveReport, StorageManager};
pub use store::{FixedQuota, KeyValueStore, MemoryStore, QuotaProbe};
pub use usage::StorageUsage;

#[cfg(feature = "web")]
pub use web::LocalStorage;
