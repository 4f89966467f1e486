//! End-to-end flows through the studio: edit, persist, play back

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use slate_model::{ManualClock, MediaContent, Presentation, SectorId, Vec2, ViewerSettings};
use slate_storage::{KeyValueStore, MemoryStore, StorageConfig, StorageError, StorageManager};
use slate_studio::{Studio, StudioError};
use slate_viewer::testing::{HostEvent, RecordingHost};
use slate_viewer::KeyResult;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

type TestStudio = Studio<Rc<MemoryStore>, Rc<MemoryStore>, RecordingHost>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn open(capacity: u64) -> TestStudio {
    open_with(StorageManager::in_memory(capacity))
}

fn open_with(storage: StorageManager<Rc<MemoryStore>, Rc<MemoryStore>>) -> TestStudio {
    init_tracing();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap());
    Studio::open(
        storage.with_clock(clock),
        RecordingHost::new(),
        ViewerSettings::default(),
        &SectorId::new("dairy"),
        "Dairy",
    )
}

fn stored(studio: &TestStudio) -> Presentation {
    let raw = studio.storage().store().get("presentation_dairy").unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_edit_then_play_edited_slide() {
    let mut studio = open(5 * 1024 * 1024);
    let slide_id = studio.presentation().slides[1].id;

    let editor = studio.open_editor(slide_id).unwrap();
    let video = editor.add_media(MediaContent::video("https://cdn.example/milking.mp4"));
    editor.handle_pointer_down(Vec2::new(150.0, 150.0));
    editor.handle_pointer_move(Vec2::new(250.0, 180.0));
    editor.handle_pointer_up();
    studio.close_editor(true).unwrap();

    let saved = stored(&studio);
    let element = saved.slides[1].element(video).unwrap();
    assert!((element.rect.x - 200.0).abs() < 0.001);
    assert!((element.rect.y - 130.0).abs() < 0.001);

    assert_eq!(studio.handle_key("P", true, 0.0), KeyResult::Handled);
    assert_eq!(studio.viewer().slide_index(), Some(0));
    assert!(studio.viewer().host().playing().is_empty());

    assert_eq!(studio.handle_key("ArrowRight", false, 10.0), KeyResult::Handled);
    assert!(studio.viewer().host().is_playing(video));

    studio.close_viewer();
    let host = studio.viewer().host();
    assert!(!host.is_playing(video));
    assert_eq!(host.count(|e| *e == HostEvent::Release(video)), 1);
}

#[test]
fn test_viewer_plays_snapshot_of_deck() {
    let mut studio = open(5 * 1024 * 1024);
    studio.launch_viewer(0, 0.0).unwrap();
    studio.add_slide("Late Addition").unwrap();

    assert_eq!(studio.viewer().position(), Some((0, 3)));
    assert_eq!(studio.presentation().len(), 4);
}

#[test]
fn test_start_index_out_of_range() {
    let mut studio = open(5 * 1024 * 1024);
    assert_matches!(studio.launch_viewer(9, 0.0), Err(StudioError::Viewer(_)));
    assert!(!studio.viewer().is_open());
}

#[test]
fn test_exhausted_save_keeps_change_in_memory() {
    let config = StorageConfig {
        safety_margin_bytes: 16 * 1024,
        ..StorageConfig::default()
    };
    let mut studio = open_with(StorageManager::in_memory(64 * 1024).with_config(config));
    assert_eq!(stored(&studio).len(), 3);

    let filler = "x".repeat(60 * 1024);
    studio.storage().store().set("analytics_cache", &filler).unwrap();

    let err = studio.add_slide("Overflow").unwrap_err();
    assert_matches!(err, StudioError::Storage(StorageError::Exhausted { .. }));
    assert!(err.save_guidance().is_some());
    assert_eq!(studio.presentation().len(), 4);
    assert_eq!(stored(&studio).len(), 3);
}

#[test]
fn test_remove_slide_discards_its_editor() {
    let mut studio = open(5 * 1024 * 1024);
    let slide_id = studio.presentation().slides[2].id;
    studio.open_editor(slide_id).unwrap().set_title("Changed");

    studio.remove_slide(slide_id).unwrap();
    assert!(studio.editor().is_none());
    assert_matches!(studio.close_editor(true), Err(StudioError::NoEditor));
    assert_eq!(stored(&studio).len(), 2);
}

#[test]
fn test_shutdown_releases_everything() {
    let mut studio = open(5 * 1024 * 1024);
    let slide_id = studio.presentation().slides[0].id;
    let editor = studio.open_editor(slide_id).unwrap();
    let video = editor.add_media(MediaContent::video("https://cdn.example/herd.mp4"));
    studio.close_editor(true).unwrap();

    studio.launch_viewer(0, 0.0).unwrap();
    assert!(studio.viewer().host().is_playing(video));
    studio.open_editor(slide_id).unwrap();

    studio.shutdown();
    assert!(!studio.viewer().is_open());
    assert!(studio.editor().is_none());
    assert!(!studio.viewer().host().is_playing(video));
}
