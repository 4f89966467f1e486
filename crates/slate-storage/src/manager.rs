//! Presentation persistence with quota handling
//!
//! Save path:
//!
//! ```text
//! serialize ─► fits (record + margin)? ──yes──► write ─► SaveReport
//!                     │ no
//!                     ▼
//!               cleanup stale records ─► fits? ──yes──► write
//!                     │ no
//!                     ▼
//!               write degraded backup ─► Err(Exhausted { backup })
//! ```
//!
//! Loads never fail: an absent or unreadable record is replaced by a
//! starter deck, which is persisted on a best-effort basis.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use slate_model::{Clock, ElementId, Presentation, SectorId, SystemClock};
use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::error::{BackupOutcome, StorageError, StoreError};
use crate::store::{KeyValueStore, MemoryStore, QuotaProbe};
use crate::usage::StorageUsage;

/// Result of a successful save
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveReport {
    /// Key the record was written under
    pub key: String,
    /// Size of the written record
    pub bytes: u64,
    /// Present when the save had to clean up first
    pub cleanup: Option<CleanupReport>,
}

/// Records removed by a cleanup pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<String>,
    pub freed_bytes: u64,
}

/// The only part of a record cleanup needs to read
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordStamp {
    updated_at: DateTime<Utc>,
}

/// Saves and loads presentations through a bounded key-value store
pub struct StorageManager<S, Q> {
    store: S,
    quota: Q,
    config: StorageConfig,
    clock: Rc<dyn Clock>,
}

impl StorageManager<Rc<MemoryStore>, Rc<MemoryStore>> {
    /// Manager over a fresh in-memory store that is also its own quota probe
    pub fn in_memory(capacity_bytes: u64) -> Self {
        let store = Rc::new(MemoryStore::with_capacity(capacity_bytes));
        Self::new(Rc::clone(&store), store)
    }
}

impl<S: KeyValueStore, Q: QuotaProbe> StorageManager<S, Q> {
    /// Create a manager with default configuration and the system clock
    pub fn new(store: S, quota: Q) -> Self {
        Self {
            store,
            quota,
            config: StorageConfig::default(),
            clock: Rc::new(SystemClock),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: StorageConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the clock used for timestamps and retention
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    /// Clock stamping saved records and judging retention
    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Current consumption against the capacity ceiling: the smaller of the
    /// probe's capacity and the configured one
    pub fn usage(&self) -> StorageUsage {
        let capacity = self.quota.capacity_bytes().min(self.config.capacity_bytes);
        StorageUsage::new(self.quota.used_bytes(), capacity)
    }

    /// Persist a presentation, stamping its `updated_at`.
    ///
    /// Requires room for the record plus the safety margin. When that is
    /// missing, or the backend rejects the write anyway, stale records are
    /// cleaned up and the attempt repeated once; if it still fails a degraded
    /// backup is attempted and [`StorageError::Exhausted`] returned. The
    /// in-memory presentation is never modified beyond the timestamp.
    pub fn save(&self, presentation: &mut Presentation) -> Result<SaveReport, StorageError> {
        presentation.touch(self.clock.now());
        let key = self.config.record_key(&presentation.id);
        let json = serde_json::to_string(presentation)?;
        let bytes = self.quota.entry_bytes(&key, &json);
        let required = bytes + self.config.safety_margin_bytes;

        let mut cleanup = None;
        if self.room_for(&key).would_exceed(required) {
            debug!(key = %key, required, "not enough room, cleaning up stale records");
            cleanup = Some(self.cleanup());
            let room = self.room_for(&key);
            if room.would_exceed(required) {
                return Err(self.exhausted(presentation, required, room.available_bytes));
            }
        }

        let mut written = self.store.set(&key, &json);
        if matches!(written, Err(StoreError::QuotaExceeded { .. })) && cleanup.is_none() {
            warn!(key = %key, bytes, "backend rejected write within estimated quota, cleaning up");
            cleanup = Some(self.cleanup());
            written = self.store.set(&key, &json);
        }

        match written {
            Ok(()) => {
                info!(key = %key, bytes, "presentation saved");
                Ok(SaveReport { key, bytes, cleanup })
            }
            Err(StoreError::QuotaExceeded { available, .. }) => {
                warn!(key = %key, bytes, "backend rejected write after cleanup");
                Err(self.exhausted(presentation, required, available))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Load a sector's presentation, regenerating defaults when the record
    /// is missing or unreadable
    pub fn load(&self, sector: &SectorId, sector_name: &str) -> Presentation {
        let key = self.config.record_key(sector);
        let Some(raw) = self.store.get(&key) else {
            debug!(%sector, "no saved presentation, creating default");
            return self.create_default(sector, sector_name);
        };

        match serde_json::from_str::<Presentation>(&raw) {
            Ok(mut presentation) => {
                if presentation.needs_migration() {
                    info!(%sector, from = presentation.version, "migrating presentation record");
                    presentation.migrate();
                }
                if let Err(err) = presentation.validate() {
                    warn!(%sector, %err, "repairing slide order");
                    presentation.reindex();
                }
                if presentation.id != *sector {
                    warn!(%sector, stored = %presentation.id, "record id does not match its key");
                    presentation.id = sector.clone();
                }
                presentation
            }
            Err(err) => {
                warn!(%sector, %err, "corrupt presentation record, regenerating default");
                self.create_default(sector, sector_name)
            }
        }
    }

    /// Build the three-slide starter deck and try to persist it
    pub fn create_default(&self, sector: &SectorId, sector_name: &str) -> Presentation {
        let mut presentation = Presentation::starter(sector.clone(), sector_name, self.clock.now());
        if let Err(err) = self.save(&mut presentation) {
            warn!(%sector, %err, "default presentation kept in memory only");
        }
        presentation
    }

    /// Read the degraded backup written by a failed save, if any
    pub fn load_backup(&self, sector: &SectorId) -> Option<Presentation> {
        let raw = self.store.get(&self.config.backup_key(sector))?;
        match serde_json::from_str(&raw) {
            Ok(presentation) => Some(presentation),
            Err(err) => {
                warn!(%sector, %err, "unreadable backup record");
                None
            }
        }
    }

    /// Remove a sector's record and its backup
    pub fn delete(&self, sector: &SectorId) {
        self.store.remove(&self.config.record_key(sector));
        self.store.remove(&self.config.backup_key(sector));
        debug!(%sector, "presentation deleted");
    }

    /// Human-readable JSON for download
    pub fn export_json(&self, presentation: &Presentation) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(presentation)?)
    }

    /// Delete namespace records not updated within the retention window,
    /// and records whose timestamp cannot be read
    pub fn cleanup(&self) -> CleanupReport {
        let cutoff = self.clock.now() - self.config.retention();
        let mut report = CleanupReport::default();

        for key in self.store.keys().into_iter().filter(|k| self.config.owns(k)) {
            let Some(raw) = self.store.get(&key) else {
                continue;
            };
            let stale = match serde_json::from_str::<RecordStamp>(&raw) {
                Ok(stamp) => stamp.updated_at < cutoff,
                Err(err) => {
                    debug!(key = %key, %err, "unreadable record");
                    true
                }
            };
            if stale {
                report.freed_bytes += self.quota.entry_bytes(&key, &raw);
                self.store.remove(&key);
                report.removed.push(key);
            }
        }

        if !report.removed.is_empty() {
            info!(
                removed = report.removed.len(),
                freed_bytes = report.freed_bytes,
                "cleaned up stale presentations"
            );
        }
        report
    }

    /// Usage as it would be with `key` removed, so an overwrite can reuse
    /// the old record's bytes
    fn room_for(&self, key: &str) -> StorageUsage {
        let reclaimed = self
            .store
            .get(key)
            .map_or(0, |old| self.quota.entry_bytes(key, &old));
        let usage = self.usage();
        StorageUsage::new(usage.used_bytes.saturating_sub(reclaimed), usage.capacity_bytes())
    }

    fn exhausted(&self, presentation: &Presentation, required: u64, available: u64) -> StorageError {
        let backup = self.write_backup(presentation);
        warn!(
            sector = %presentation.id,
            required,
            available,
            backup_saved = backup.is_saved(),
            "storage exhausted"
        );
        StorageError::Exhausted {
            required,
            available,
            backup,
        }
    }

    /// Write a copy without ephemeral media, no safety margin
    fn write_backup(&self, presentation: &Presentation) -> BackupOutcome {
        let (degraded, stripped) = strip_ephemeral(presentation);
        let key = self.config.backup_key(&presentation.id);
        let json = match serde_json::to_string(&degraded) {
            Ok(json) => json,
            Err(err) => return BackupOutcome::Failed { reason: err.to_string() },
        };
        match self.store.set(&key, &json) {
            Ok(()) => BackupOutcome::Saved { key, stripped },
            Err(err) => BackupOutcome::Failed { reason: err.to_string() },
        }
    }
}

/// Copy of the deck with every element backed by an ephemeral source removed
fn strip_ephemeral(presentation: &Presentation) -> (Presentation, usize) {
    let mut degraded = presentation.clone();
    let mut stripped = 0;
    for slide in &mut degraded.slides {
        let ephemeral: Vec<ElementId> = slide
            .media
            .iter()
            .filter(|m| m.src().is_ephemeral())
            .map(|m| m.id)
            .collect();
        for id in ephemeral {
            if slide.remove_media(id).is_ok() {
                stripped += 1;
            }
        }
    }
    (degraded, stripped)
}
