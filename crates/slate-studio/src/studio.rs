//! Host screen for one sector's presentation

use slate_editor::EditorEngine;
use slate_model::{Presentation, SectorId, SlideId, ViewerSettings};
use slate_storage::{KeyValueStore, QuotaProbe, SaveReport, StorageManager, StorageUsage};
use slate_viewer::{KeyResult, PlaybackController, PlaybackHost};
use tracing::{debug, info, warn};

use crate::error::StudioError;
use crate::keys::HostKey;

/// Owns storage, the working presentation, the editor modal and the viewer.
///
/// Timestamps come from the storage manager's clock, so slide creation,
/// commits and saves agree.
pub struct Studio<S, Q, H> {
    storage: StorageManager<S, Q>,
    presentation: Presentation,
    editor: Option<EditorEngine>,
    viewer: PlaybackController<H>,
}

impl<S, Q, H> Studio<S, Q, H>
where
    S: KeyValueStore,
    Q: QuotaProbe,
    H: PlaybackHost,
{
    /// Load (or create) the sector's presentation
    pub fn open(
        storage: StorageManager<S, Q>,
        host: H,
        settings: ViewerSettings,
        sector: &SectorId,
        sector_name: &str,
    ) -> Self {
        let presentation = storage.load(sector, sector_name);
        info!(%sector, slides = presentation.len(), "studio opened");
        Self {
            storage,
            presentation,
            editor: None,
            viewer: PlaybackController::new(host, settings),
        }
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn storage(&self) -> &StorageManager<S, Q> {
        &self.storage
    }

    pub fn usage(&self) -> StorageUsage {
        self.storage.usage()
    }

    /// Persist the working presentation
    pub fn save(&mut self) -> Result<SaveReport, StudioError> {
        match self.storage.save(&mut self.presentation) {
            Ok(report) => Ok(report),
            Err(err) => {
                warn!(sector = %self.presentation.id, %err, "save failed, changes kept in memory");
                Err(err.into())
            }
        }
    }

    /// Pretty JSON of the working presentation
    pub fn export_json(&self) -> Result<String, StudioError> {
        Ok(self.storage.export_json(&self.presentation)?)
    }

    // ========== Slides ==========

    pub fn add_slide(&mut self, title: &str) -> Result<SlideId, StudioError> {
        let id = self.presentation.add_slide(title, self.storage.clock().now());
        self.save()?;
        Ok(id)
    }

    pub fn duplicate_slide(&mut self, id: SlideId) -> Result<SlideId, StudioError> {
        let copy = self.presentation.duplicate_slide(id, self.storage.clock().now())?;
        self.save()?;
        Ok(copy)
    }

    /// Remove a slide, discarding an open editor for it
    pub fn remove_slide(&mut self, id: SlideId) -> Result<(), StudioError> {
        if self.editor.as_ref().is_some_and(|e| e.slide().id == id) {
            self.editor = None;
            debug!(slide = %id, "editor discarded with its slide");
        }
        self.presentation.remove_slide(id)?;
        self.save()?;
        Ok(())
    }

    pub fn move_slide_up(&mut self, index: usize) -> Result<bool, StudioError> {
        let moved = self.presentation.move_slide_up(index)?;
        if moved {
            self.save()?;
        }
        Ok(moved)
    }

    pub fn move_slide_down(&mut self, index: usize) -> Result<bool, StudioError> {
        let moved = self.presentation.move_slide_down(index)?;
        if moved {
            self.save()?;
        }
        Ok(moved)
    }

    // ========== Editor modal ==========

    /// Open the editor on a copy of a slide
    pub fn open_editor(&mut self, id: SlideId) -> Result<&mut EditorEngine, StudioError> {
        if let Some(editor) = &self.editor {
            return Err(StudioError::EditorBusy(editor.slide().id));
        }
        let slide = self
            .presentation
            .slide(id)
            .cloned()
            .ok_or(slate_model::ModelError::SlideNotFound(id))?;
        Ok(self.editor.insert(EditorEngine::new(slide)))
    }

    pub fn editor(&self) -> Option<&EditorEngine> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorEngine> {
        self.editor.as_mut()
    }

    /// Close the editor. With `commit`, unsaved changes are written into the
    /// presentation and persisted, and an element still being dragged keeps
    /// its latest position. Without it every change is dropped.
    ///
    /// On a failed save the editor is closed and the change stays in the
    /// working presentation.
    pub fn close_editor(&mut self, commit: bool) -> Result<Option<SaveReport>, StudioError> {
        let mut editor = self.editor.take().ok_or(StudioError::NoEditor)?;
        if !commit || !editor.is_dirty() {
            debug!(slide = %editor.slide().id, commit, "editor closed without changes");
            return Ok(None);
        }
        editor.commit_into(&mut self.presentation, self.storage.clock().now())?;
        self.save().map(Some)
    }

    // ========== Viewer ==========

    /// Play the presentation from `start_index`
    pub fn launch_viewer(&mut self, start_index: usize, now_ms: f64) -> Result<(), StudioError> {
        self.viewer.open(self.presentation.clone(), start_index, now_ms)?;
        Ok(())
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
    }

    pub fn viewer(&self) -> &PlaybackController<H> {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut PlaybackController<H> {
        &mut self.viewer
    }

    // ========== Input & time ==========

    /// Route a key event: to the viewer when it is open, else host shortcuts.
    /// Keys pass through while the editor modal is open.
    pub fn handle_key(&mut self, key: &str, shift: bool, now_ms: f64) -> KeyResult {
        if self.viewer.is_open() {
            return self.viewer.handle_key(key, shift, now_ms);
        }
        if self.editor.is_some() {
            return KeyResult::PassThrough;
        }
        match HostKey::from_event(key, shift) {
            Some(HostKey::LaunchViewer) => match self.launch_viewer(0, now_ms) {
                Ok(()) => KeyResult::Handled,
                Err(err) => {
                    warn!(%err, "could not launch viewer");
                    KeyResult::PassThrough
                }
            },
            None => KeyResult::PassThrough,
        }
    }

    /// Drive viewer timers
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.viewer.tick(now_ms)
    }

    /// Tear down: close the viewer and drop any open editor without saving
    pub fn shutdown(&mut self) {
        self.viewer.close();
        if self.editor.take().is_some() {
            debug!("editor discarded on shutdown");
        }
        info!(sector = %self.presentation.id, "studio closed");
    }
}
