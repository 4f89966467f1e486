//! Storage configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};
use slate_model::SectorId;

/// Assumed capacity of a browser origin's `localStorage` (5 MiB)
pub const DEFAULT_CAPACITY_BYTES: u64 = 5 * 1024 * 1024;

/// Headroom demanded on top of the record itself (1 MiB)
pub const DEFAULT_SAFETY_MARGIN_BYTES: u64 = 1024 * 1024;

/// Records not updated for this many days are eligible for cleanup
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Tunables for [`StorageManager`](crate::StorageManager)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// Soft ceiling; usage is measured against the smaller of this and the
    /// backend's reported capacity
    pub capacity_bytes: u64,
    pub safety_margin_bytes: u64,
    pub retention_days: i64,
    /// Namespace prefix of presentation records
    pub key_prefix: String,
    /// Appended to a record key for its degraded backup
    pub backup_suffix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            safety_margin_bytes: DEFAULT_SAFETY_MARGIN_BYTES,
            retention_days: DEFAULT_RETENTION_DAYS,
            key_prefix: String::from("presentation_"),
            backup_suffix: String::from("-backup"),
        }
    }
}

impl StorageConfig {
    /// Key of a sector's primary record
    pub fn record_key(&self, sector: &SectorId) -> String {
        format!("{}{}", self.key_prefix, sector)
    }

    /// Key of a sector's degraded backup record
    pub fn backup_key(&self, sector: &SectorId) -> String {
        format!("{}{}", self.record_key(sector), self.backup_suffix)
    }

    /// Whether a key belongs to the presentation namespace
    pub fn owns(&self, key: &str) -> bool {
        key.starts_with(&self.key_prefix)
    }

    /// Retention window as a duration
    pub fn retention(&self) -> Duration {
        Duration::days(self.retention_days.max(0))
    }
}
