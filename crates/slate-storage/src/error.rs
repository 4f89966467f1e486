//! Storage error types

use thiserror::Error;

/// Failure reported by a [`KeyValueStore`](crate::KeyValueStore) backend
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend refused the write for lack of space
    #[error("quota exceeded: {requested} bytes requested, {available} available")]
    QuotaExceeded { requested: u64, available: u64 },

    /// The backend cannot be reached (disabled, private mode, no window)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// What happened to the degraded backup after a failed save
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackupOutcome {
    /// Backup written under `key` with `stripped` ephemeral elements removed
    Saved { key: String, stripped: usize },
    /// Backup could not be written either
    Failed { reason: String },
}

impl BackupOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, BackupOutcome::Saved { .. })
    }
}

/// Errors from [`StorageManager`](crate::StorageManager) operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// Not enough room even after cleaning up stale records
    #[error("storage exhausted: {required} bytes required, {available} available")]
    Exhausted {
        required: u64,
        available: u64,
        backup: BackupOutcome,
    },

    #[error("failed to serialize presentation: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StorageError {
    /// Check if the error is a storage-exhaustion failure
    pub fn is_exhausted(&self) -> bool {
        matches!(self, StorageError::Exhausted { .. })
    }

    /// User-facing advice for recovering from this error
    pub fn guidance(&self) -> &'static str {
        match self {
            StorageError::Exhausted { .. } => {
                "Storage is full. Use smaller or compressed images and videos, or remove unused media."
            }
            StorageError::Serialize(_) => "The presentation could not be encoded for saving.",
            StorageError::Store(StoreError::QuotaExceeded { .. }) => {
                "Storage is full. Remove unused media and try again."
            }
            StorageError::Store(StoreError::Unavailable(_)) => {
                "Browser storage is unavailable. Changes will not persist."
            }
        }
    }
}
