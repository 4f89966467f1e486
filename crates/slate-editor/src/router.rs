//! Input router state machine

use slate_model::{ElementId, Rect, Vec2};

use crate::drag::DragState;
use crate::handle::ResizeHandle;

/// Tracks the single in-flight interaction
#[derive(Debug, Default)]
pub struct InputRouter {
    drag: Option<DragState>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self { drag: None }
    }

    /// Get current drag state
    #[inline]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Check if an interaction is in flight
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start moving an element
    pub fn start_drag(&mut self, element_id: ElementId, start_pointer: Vec2, origin: Rect) {
        self.drag = Some(DragState::Dragging {
            element_id,
            start_pointer,
            origin,
        });
    }

    /// Start resizing an element from a corner
    pub fn start_resize(&mut self, element_id: ElementId, handle: ResizeHandle, start_pointer: Vec2, origin: Rect) {
        self.drag = Some(DragState::Resizing {
            element_id,
            handle,
            start_pointer,
            origin,
        });
    }

    /// End the current interaction, returning it
    pub fn end_drag(&mut self) -> Option<DragState> {
        self.drag.take()
    }
}
