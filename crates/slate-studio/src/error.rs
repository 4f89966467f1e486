//! Studio error types

use slate_editor::EditorError;
use slate_model::{ModelError, SlideId};
use slate_storage::StorageError;
use slate_viewer::ViewerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    /// An editor modal is already open
    #[error("slide {0} is already being edited")]
    EditorBusy(SlideId),

    #[error("no editor is open")]
    NoEditor,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    /// The change is kept in memory but could not be persisted
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),
}

impl StudioError {
    /// User-facing message for a failed save, if this is one
    pub fn save_guidance(&self) -> Option<&'static str> {
        match self {
            StudioError::Storage(err) => Some(err.guidance()),
            _ => None,
        }
    }
}
