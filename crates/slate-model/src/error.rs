//! Error types for model operations.

use thiserror::Error;

use crate::media::ElementId;
use crate::slide::SlideId;

/// Errors from presentation and slide operations.
///
/// Geometry is never an error here: out-of-range rotation, opacity or sizes
/// are normalized by the setters instead.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No slide with this id in the presentation
    #[error("slide {0} not found")]
    SlideNotFound(SlideId),

    /// No media element with this id on the slide
    #[error("media element {0} not found")]
    ElementNotFound(ElementId),

    /// Slide index past the end of the sequence
    #[error("slide index {index} out of range (presentation has {len} slides)")]
    SlideIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current slide count
        len: usize,
    },

    /// A slide's `order` does not match its position
    #[error("slide at position {index} has order {order}")]
    OrderMismatch {
        /// Position in the sequence
        index: usize,
        /// Stored order value
        order: usize,
    },

    /// Settings document could not be parsed
    #[error("invalid viewer settings: {0}")]
    Settings(#[from] serde_json::Error),
}
