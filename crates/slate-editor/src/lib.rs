//! Slate slide editor
//!
//! Interactive editing of one slide's media in design units:
//!
//! - [`handle`]: the four corner resize handles and their hit test
//! - [`geometry`]: pure drag and resize math
//! - [`drag`] / [`router`]: the in-flight interaction state machine
//! - [`engine`]: [`EditorEngine`], which owns the working copy of a slide
//!
//! The engine never touches the persisted presentation until
//! [`EditorEngine::commit_into`] is called, so pointer moves only change
//! in-memory state.

pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod result;
pub mod router;

pub use drag::{DragState, EditorState};
pub use engine::EditorEngine;
pub use error::EditorError;
pub use geometry::{drag_position, resize_rect, HANDLE_HIT_RADIUS, MIN_ELEMENT_SIZE};
pub use handle::ResizeHandle;
pub use result::InputResult;
pub use router::InputRouter;
