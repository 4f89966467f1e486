//! Interaction state for drag and resize operations

use serde::Serialize;
use slate_model::{ElementId, Rect, Vec2};

use crate::handle::ResizeHandle;

/// In-flight pointer interaction
#[derive(Clone, Debug)]
pub enum DragState {
    /// Moving an element
    Dragging {
        element_id: ElementId,
        /// Pointer position at start (design units)
        start_pointer: Vec2,
        /// Element rectangle at start
        origin: Rect,
    },
    /// Resizing an element from a corner
    Resizing {
        element_id: ElementId,
        handle: ResizeHandle,
        /// Pointer position at start (design units)
        start_pointer: Vec2,
        /// Element rectangle at start
        origin: Rect,
    },
}

impl DragState {
    /// Element being manipulated
    pub fn element_id(&self) -> ElementId {
        match self {
            DragState::Dragging { element_id, .. } | DragState::Resizing { element_id, .. } => *element_id,
        }
    }

    /// Element rectangle when the interaction started
    pub fn origin(&self) -> Rect {
        match self {
            DragState::Dragging { origin, .. } | DragState::Resizing { origin, .. } => *origin,
        }
    }

    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, DragState::Resizing { .. })
    }
}

/// Observable editor state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EditorState {
    Idle,
    Dragging { element_id: ElementId },
    Resizing { element_id: ElementId, handle: ResizeHandle },
}

impl From<Option<&DragState>> for EditorState {
    fn from(drag: Option<&DragState>) -> Self {
        match drag {
            None => EditorState::Idle,
            Some(DragState::Dragging { element_id, .. }) => EditorState::Dragging { element_id: *element_id },
            Some(DragState::Resizing { element_id, handle, .. }) => EditorState::Resizing {
                element_id: *element_id,
                handle: *handle,
            },
        }
    }
}
