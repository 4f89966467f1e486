//! Storage usage accounting

use serde::{Deserialize, Serialize};

/// Snapshot of how much of the store is in use
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUsage {
    /// Bytes consumed by all keys and values
    pub used_bytes: u64,
    /// Bytes left before the capacity ceiling
    pub available_bytes: u64,
    /// Usage percentage, 0-100 (above 100 when the estimate is exceeded)
    pub percent_used: f64,
}

impl StorageUsage {
    /// Compute usage from used bytes and a capacity ceiling
    pub fn new(used_bytes: u64, capacity_bytes: u64) -> Self {
        let percent_used = if capacity_bytes == 0 {
            0.0
        } else {
            used_bytes as f64 * 100.0 / capacity_bytes as f64
        };
        Self {
            used_bytes,
            available_bytes: capacity_bytes.saturating_sub(used_bytes),
            percent_used,
        }
    }

    /// Total capacity
    pub fn capacity_bytes(&self) -> u64 {
        self.used_bytes + self.available_bytes
    }

    /// Check if writing `additional_bytes` would exceed capacity
    #[inline]
    pub fn would_exceed(&self, additional_bytes: u64) -> bool {
        additional_bytes > self.available_bytes
    }
}
