//! Editor error types

use slate_model::{ElementId, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// Element is not on the slide being edited
    #[error("element {0} is not on this slide")]
    UnknownElement(ElementId),

    /// A video-only property was set on an image
    #[error("element {0} is not a video")]
    NotVideo(ElementId),

    #[error(transparent)]
    Model(#[from] ModelError),
}
