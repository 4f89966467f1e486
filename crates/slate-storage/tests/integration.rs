//! Storage scenarios across save, cleanup and load

use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use slate_model::{Clock, ManualClock, MediaContent, Presentation, SectorId};
use slate_storage::{
    BackupOutcome, FixedQuota, KeyValueStore, MemoryStore, StorageError, StorageManager,
};

const KIB: usize = 1024;
const MIB: u64 = 1024 * 1024;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

fn padded_deck(sector: &str, padding: usize, now: DateTime<Utc>) -> Presentation {
    let mut deck = Presentation::starter(SectorId::new(sector), sector, now);
    deck.description = "x".repeat(padding);
    deck
}

#[test]
fn test_cleanup_frees_room_for_save() {
    let clock = Rc::new(ManualClock::new(t0()));
    let manager = StorageManager::in_memory(2 * MIB).with_clock(Rc::clone(&clock));

    let stale = padded_deck("old-sector", 1000 * KIB, clock.now());
    manager
        .store()
        .set("presentation_old-sector", &serde_json::to_string(&stale).unwrap())
        .unwrap();

    clock.advance(Duration::days(45));
    let mut current = padded_deck("dairy", 100 * KIB, clock.now());
    let report = manager.save(&mut current).unwrap();

    let cleanup = report.cleanup.expect("save should have cleaned up first");
    assert_eq!(cleanup.removed, vec!["presentation_old-sector".to_string()]);
    assert!(manager.store().get("presentation_old-sector").is_none());
    assert!(manager.store().get("presentation_dairy").is_some());
}

#[test]
fn test_exhaustion_keeps_deck_and_writes_backup() {
    let clock = Rc::new(ManualClock::new(t0()));
    let manager = StorageManager::in_memory(2 * MIB).with_clock(Rc::clone(&clock));
    manager
        .store()
        .set("analytics_cache", &"y".repeat(1000 * KIB))
        .unwrap();

    let mut deck = padded_deck("dairy", 100 * KIB, clock.now());
    deck.slides[0].add_media(MediaContent::video("blob:https://app.example/clip"));
    let before = deck.slides.clone();

    let err = manager.save(&mut deck).unwrap_err();
    match &err {
        StorageError::Exhausted { required, available, backup } => {
            assert!(required > available);
            assert_eq!(
                backup,
                &BackupOutcome::Saved {
                    key: "presentation_dairy-backup".to_string(),
                    stripped: 1,
                }
            );
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert!(!err.guidance().is_empty());
    assert_eq!(deck.slides, before);

    let backup = manager.load_backup(&SectorId::new("dairy")).unwrap();
    assert!(backup.slides[0].media.is_empty());
    assert!(manager.store().get("analytics_cache").is_some());
}

#[test]
fn test_corrupt_record_loads_starter_deck() {
    let manager = StorageManager::in_memory(5 * MIB).with_clock(ManualClock::new(t0()));
    manager
        .store()
        .set("presentation_dairy", r#"{"slides": [1, 2"#)
        .unwrap();

    let deck = manager.load(&SectorId::new("dairy"), "Dairy");
    assert_eq!(deck.len(), 3);
    assert!(deck.validate().is_ok());
}

#[test]
fn test_fixed_quota_reports_usage() {
    let store = Rc::new(MemoryStore::new());
    let manager = StorageManager::new(store, FixedQuota::new(3 * MIB, 4 * MIB));
    let usage = manager.usage();
    assert_eq!(usage.available_bytes, MIB);
    assert!((usage.percent_used - 75.0).abs() < 0.001);
}
