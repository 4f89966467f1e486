//! Viewer error and warning types

use serde::Serialize;
use slate_model::ElementId;
use thiserror::Error;

/// Errors opening a presentation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("presentation has no slides")]
    EmptyPresentation,

    #[error("start slide {index} out of range for {len} slides")]
    StartOutOfRange { index: usize, len: usize },
}

/// Rejections from asynchronous media operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// Autoplay refused, typically by browser policy
    #[error("playback blocked: {0}")]
    PlaybackBlocked(String),

    #[error("fullscreen request rejected: {0}")]
    FullscreenRejected(String),
}

/// Non-fatal problems surfaced to the host UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ViewerWarning {
    /// Video would not play even when muted
    AutoplayBlocked { element_id: ElementId, reason: String },
    /// Entering or leaving fullscreen failed
    Fullscreen { reason: String },
}
