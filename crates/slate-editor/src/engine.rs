//! Editor engine
//!
//! Owns the working copy of one slide plus the selection and the in-flight
//! interaction. Pointer positions are in design units; the host converts
//! from its canvas pixels before calling in.

use chrono::{DateTime, Utc};
use slate_model::{
    ElementId, MediaContent, MediaElement, Presentation, Rect, Size, Slide, SlideKind, Vec2,
    VideoOptions, DESIGN_SIZE,
};
use tracing::debug;

use crate::drag::{DragState, EditorState};
use crate::error::EditorError;
use crate::geometry::{drag_position, fit_rect, resize_rect, HANDLE_HIT_RADIUS};
use crate::handle::ResizeHandle;
use crate::result::InputResult;
use crate::router::InputRouter;

/// Editing session for a single slide
pub struct EditorEngine {
    slide: Slide,
    selection: Option<ElementId>,
    input: InputRouter,
    container: Size,
    dirty: bool,
}

impl EditorEngine {
    /// Start editing a copy of `slide`
    pub fn new(slide: Slide) -> Self {
        debug!(slide = %slide.id, "editor opened");
        Self {
            slide,
            selection: None,
            input: InputRouter::new(),
            container: DESIGN_SIZE,
            dirty: false,
        }
    }

    /// Working copy of the slide
    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    /// Give up the working copy
    pub fn into_slide(self) -> Slide {
        self.slide
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Current interaction state
    pub fn state(&self) -> EditorState {
        EditorState::from(self.input.drag_state())
    }

    /// Whether the working copy differs from what was last committed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ========== Selection ==========

    /// Select an element
    pub fn select(&mut self, id: ElementId) -> Result<(), EditorError> {
        self.require(id)?;
        self.selection = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Topmost element under `pos`
    pub fn element_at(&self, pos: Vec2) -> Option<ElementId> {
        self.slide
            .media_by_z()
            .into_iter()
            .rev()
            .find(|m| m.rect.contains(pos))
            .map(|m| m.id)
    }

    /// Resize handle of the selected element under `pos`
    pub fn handle_at(&self, pos: Vec2) -> Option<(ElementId, ResizeHandle)> {
        let element = self.slide.element(self.selection?)?;
        ResizeHandle::hit_test(&element.rect, pos, HANDLE_HIT_RADIUS).map(|h| (element.id, h))
    }

    /// CSS cursor for hovering at `pos`
    pub fn cursor_at(&self, pos: Vec2) -> &'static str {
        if let Some((_, handle)) = self.handle_at(pos) {
            return handle.cursor();
        }
        if self.element_at(pos).is_some() {
            "move"
        } else {
            "default"
        }
    }

    // ========== Pointer input ==========

    /// Pointer pressed: grab a handle of the selection, else the topmost
    /// element, else clear the selection
    pub fn handle_pointer_down(&mut self, pos: Vec2) -> InputResult {
        self.input.end_drag();

        if let Some((id, handle)) = self.handle_at(pos) {
            return self.start_resize(id, handle, pos);
        }

        match self.element_at(pos) {
            Some(id) => self.start_drag(id, pos),
            None => {
                self.selection = None;
                InputResult::Unhandled
            }
        }
    }

    /// Start moving an element
    pub fn start_drag(&mut self, id: ElementId, pointer: Vec2) -> InputResult {
        let Some(element) = self.slide.element(id) else {
            return InputResult::Unhandled;
        };
        let origin = element.rect;
        self.selection = Some(id);
        self.input.start_drag(id, pointer, origin);
        debug!(element = %id, "drag started");
        InputResult::Handled
    }

    /// Start resizing an element from a corner
    pub fn start_resize(&mut self, id: ElementId, handle: ResizeHandle, pointer: Vec2) -> InputResult {
        let Some(element) = self.slide.element(id) else {
            return InputResult::Unhandled;
        };
        let origin = element.rect;
        self.selection = Some(id);
        self.input.start_resize(id, handle, pointer, origin);
        debug!(element = %id, ?handle, "resize started");
        InputResult::Handled
    }

    /// Pointer moved: update the manipulated element from the drag origin
    pub fn handle_pointer_move(&mut self, pos: Vec2) -> InputResult {
        let Some(drag) = self.input.drag_state() else {
            return InputResult::Unhandled;
        };

        let (id, rect) = match *drag {
            DragState::Dragging { element_id, start_pointer, origin } => {
                let position = drag_position(origin.position(), pos - start_pointer, origin.size(), self.container);
                (element_id, Rect::from_pos_size(position, origin.size()))
            }
            DragState::Resizing { element_id, handle, start_pointer, origin } => {
                (element_id, resize_rect(handle, origin, pos - start_pointer))
            }
        };

        match self.slide.element_mut(id) {
            Some(element) => {
                element.rect = rect;
                self.dirty = true;
                InputResult::Handled
            }
            None => {
                self.input.end_drag();
                InputResult::Unhandled
            }
        }
    }

    /// Pointer released anywhere: always back to idle
    pub fn handle_pointer_up(&mut self) -> InputResult {
        match self.input.end_drag() {
            Some(drag) => {
                debug!(element = %drag.element_id(), "interaction ended");
                InputResult::Handled
            }
            None => InputResult::Unhandled,
        }
    }

    /// Abort the in-flight interaction, restoring the element's starting geometry
    pub fn cancel(&mut self) {
        if let Some(drag) = self.input.end_drag() {
            if let Some(element) = self.slide.element_mut(drag.element_id()) {
                element.rect = drag.origin();
            }
            debug!(element = %drag.element_id(), "interaction cancelled");
        }
    }

    // ========== Element operations ==========

    /// Add media with default geometry on top and select it
    pub fn add_media(&mut self, content: MediaContent) -> ElementId {
        let id = self.slide.add_media(content);
        self.selection = Some(id);
        self.dirty = true;
        id
    }

    pub fn bring_to_front(&mut self, id: ElementId) -> Result<(), EditorError> {
        self.slide.bring_to_front(id)?;
        self.dirty = true;
        Ok(())
    }

    pub fn send_to_back(&mut self, id: ElementId) -> Result<(), EditorError> {
        self.slide.send_to_back(id)?;
        self.dirty = true;
        Ok(())
    }

    /// Duplicate an element and select the copy
    pub fn duplicate(&mut self, id: ElementId) -> Result<ElementId, EditorError> {
        let copy = self.slide.duplicate_media(id)?;
        self.selection = Some(copy);
        self.dirty = true;
        Ok(copy)
    }

    /// Remove an element, clearing the selection if it was selected
    pub fn delete(&mut self, id: ElementId) -> Result<MediaElement, EditorError> {
        if self.input.drag_state().is_some_and(|d| d.element_id() == id) {
            self.input.end_drag();
        }
        let removed = self.slide.remove_media(id)?;
        if self.selection == Some(id) {
            self.selection = None;
        }
        self.dirty = true;
        Ok(removed)
    }

    /// Set an element's rectangle, floored to the minimum size and kept on the canvas
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> Result<(), EditorError> {
        let container = self.container;
        self.element_mut(id)?.rect = fit_rect(rect, container);
        Ok(())
    }

    pub fn set_rotation(&mut self, id: ElementId, degrees: f32) -> Result<(), EditorError> {
        self.element_mut(id)?.set_rotation(degrees);
        Ok(())
    }

    pub fn set_opacity(&mut self, id: ElementId, opacity: f32) -> Result<(), EditorError> {
        self.element_mut(id)?.set_opacity(opacity);
        Ok(())
    }

    pub fn set_corner_radius(&mut self, id: ElementId, radius: f32) -> Result<(), EditorError> {
        self.element_mut(id)?.set_corner_radius(radius);
        Ok(())
    }

    /// Make an element cover the whole viewport during playback
    pub fn set_fullscreen(&mut self, id: ElementId, fullscreen: bool) -> Result<(), EditorError> {
        self.element_mut(id)?.fullscreen = fullscreen;
        Ok(())
    }

    /// Replace a video's playback flags
    pub fn set_video_options(&mut self, id: ElementId, options: VideoOptions) -> Result<(), EditorError> {
        let slot = self
            .element_mut(id)?
            .video_options_mut()
            .ok_or(EditorError::NotVideo(id))?;
        *slot = options;
        Ok(())
    }

    // ========== Slide properties ==========

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.slide.title = title.into();
        self.dirty = true;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.slide.content = content.into();
        self.dirty = true;
    }

    pub fn set_kind(&mut self, kind: SlideKind) {
        self.slide.kind = kind;
        self.dirty = true;
    }

    /// Background and text colors
    pub fn set_colors(&mut self, background: impl Into<String>, text: impl Into<String>) {
        self.slide.background_color = background.into();
        self.slide.text_color = text.into();
        self.dirty = true;
    }

    pub fn set_text_visibility(&mut self, show_title: bool, show_content: bool) {
        self.slide.show_title = show_title;
        self.slide.show_content = show_content;
        self.dirty = true;
    }

    /// Set or clear the background image
    pub fn set_background_image(&mut self, image: Option<(String, f32)>) {
        match image {
            Some((url, opacity)) => self.slide.set_background_image(url, opacity),
            None => self.slide.clear_background_image(),
        }
        self.dirty = true;
    }

    // ========== Commit ==========

    /// Write the working copy back into `presentation`, stamping both
    /// modification times. Ends any in-flight interaction first.
    pub fn commit_into(&mut self, presentation: &mut Presentation, now: DateTime<Utc>) -> Result<(), EditorError> {
        self.input.end_drag();
        self.slide.touch(now);
        presentation.replace_slide(self.slide.clone())?;
        presentation.touch(now);
        self.dirty = false;
        debug!(slide = %self.slide.id, "slide committed");
        Ok(())
    }

    fn require(&self, id: ElementId) -> Result<&MediaElement, EditorError> {
        self.slide.element(id).ok_or(EditorError::UnknownElement(id))
    }

    /// Mutable element lookup that marks the session dirty
    fn element_mut(&mut self, id: ElementId) -> Result<&mut MediaElement, EditorError> {
        let element = self.slide.element_mut(id).ok_or(EditorError::UnknownElement(id))?;
        self.dirty = true;
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn engine_with_image() -> (EditorEngine, ElementId) {
        let mut engine = EditorEngine::new(Slide::new("Harvest", 0, now()));
        let id = engine.add_media(MediaContent::image("https://cdn.example/field.jpg"));
        engine.clear_selection();
        (engine, id)
    }

    #[test]
    fn test_pointer_down_on_body_starts_drag() {
        let (mut engine, id) = engine_with_image();
        let result = engine.handle_pointer_down(Vec2::new(200.0, 200.0));
        assert_eq!(result, InputResult::Handled);
        assert_eq!(engine.selection(), Some(id));
        assert_eq!(engine.state(), EditorState::Dragging { element_id: id });
    }

    #[test]
    fn test_drag_moves_and_clamps() {
        let (mut engine, id) = engine_with_image();
        engine.handle_pointer_down(Vec2::new(200.0, 200.0));
        engine.handle_pointer_move(Vec2::new(260.0, 150.0));
        let rect = engine.slide().element(id).unwrap().rect;
        assert!((rect.x - 160.0).abs() < 0.001);
        assert!((rect.y - 50.0).abs() < 0.001);

        engine.handle_pointer_move(Vec2::new(-800.0, 2000.0));
        let rect = engine.slide().element(id).unwrap().rect;
        assert!((rect.x - 0.0).abs() < 0.001);
        assert!((rect.y - 475.0).abs() < 0.001);
    }

    #[test]
    fn test_cursor_follows_hover_target() {
        let (mut engine, id) = engine_with_image();
        assert_eq!(engine.cursor_at(Vec2::new(398.0, 298.0)), "move");
        assert_eq!(engine.cursor_at(Vec2::new(800.0, 600.0)), "default");

        engine.select(id).unwrap();
        assert_eq!(engine.cursor_at(Vec2::new(398.0, 298.0)), "nwse-resize");
        assert_eq!(engine.cursor_at(Vec2::new(398.0, 102.0)), "nesw-resize");
    }

    #[test]
    fn test_handle_requires_selection() {
        let (mut engine, id) = engine_with_image();
        // Bottom-right corner while nothing is selected is a body hit
        engine.handle_pointer_down(Vec2::new(395.0, 295.0));
        assert_eq!(engine.state(), EditorState::Dragging { element_id: id });
        engine.handle_pointer_up();

        engine.handle_pointer_down(Vec2::new(398.0, 298.0));
        assert_eq!(
            engine.state(),
            EditorState::Resizing { element_id: id, handle: ResizeHandle::Se }
        );
    }

    #[test]
    fn test_resize_from_nw_keeps_opposite_corner() {
        let (mut engine, id) = engine_with_image();
        engine.select(id).unwrap();
        engine.handle_pointer_down(Vec2::new(100.0, 100.0));
        engine.handle_pointer_move(Vec2::new(600.0, 600.0));

        let rect = engine.slide().element(id).unwrap().rect;
        assert!((rect.width - 50.0).abs() < 0.001);
        assert!((rect.height - 50.0).abs() < 0.001);
        assert!((rect.right() - 400.0).abs() < 0.001);
        assert!((rect.bottom() - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_pointer_up_always_returns_to_idle() {
        let (mut engine, _id) = engine_with_image();
        engine.handle_pointer_down(Vec2::new(200.0, 200.0));
        assert_eq!(engine.handle_pointer_up(), InputResult::Handled);
        assert_eq!(engine.state(), EditorState::Idle);
        assert_eq!(engine.handle_pointer_up(), InputResult::Unhandled);
        assert_eq!(engine.handle_pointer_move(Vec2::new(10.0, 10.0)), InputResult::Unhandled);
    }

    #[test]
    fn test_pointer_down_on_empty_clears_selection() {
        let (mut engine, id) = engine_with_image();
        engine.select(id).unwrap();
        assert_eq!(engine.handle_pointer_down(Vec2::new(900.0, 600.0)), InputResult::Unhandled);
        assert_eq!(engine.selection(), None);
    }

    #[test]
    fn test_topmost_element_wins() {
        let (mut engine, below) = engine_with_image();
        let above = engine.add_media(MediaContent::image("https://cdn.example/cow.jpg"));
        assert_eq!(engine.element_at(Vec2::new(150.0, 150.0)), Some(above));

        engine.send_to_back(above).unwrap();
        assert_eq!(engine.element_at(Vec2::new(150.0, 150.0)), Some(below));
    }

    #[test]
    fn test_cancel_restores_origin() {
        let (mut engine, id) = engine_with_image();
        engine.handle_pointer_down(Vec2::new(200.0, 200.0));
        engine.handle_pointer_move(Vec2::new(300.0, 300.0));
        engine.cancel();

        assert_eq!(engine.state(), EditorState::Idle);
        assert_eq!(engine.slide().element(id).unwrap().rect, slate_model::DEFAULT_MEDIA_RECT);
    }

    #[test]
    fn test_delete_clears_selection() {
        let (mut engine, id) = engine_with_image();
        engine.select(id).unwrap();
        engine.delete(id).unwrap();
        assert_eq!(engine.selection(), None);
        assert_eq!(engine.slide().kind, SlideKind::Text);
        assert_matches!(engine.delete(id), Err(EditorError::Model(_)));
    }

    #[test]
    fn test_duplicate_selects_copy() {
        let (mut engine, id) = engine_with_image();
        let copy = engine.duplicate(id).unwrap();
        assert_eq!(engine.selection(), Some(copy));
        let rect = engine.slide().element(copy).unwrap().rect;
        assert!((rect.x - 120.0).abs() < 0.001);
    }

    #[test]
    fn test_video_options_on_image_rejected() {
        let (mut engine, id) = engine_with_image();
        assert_matches!(
            engine.set_video_options(id, VideoOptions::default()),
            Err(EditorError::NotVideo(_))
        );
        assert_matches!(
            engine.set_opacity(ElementId::new(), 0.5),
            Err(EditorError::UnknownElement(_))
        );
    }

    #[test]
    fn test_commit_into_replaces_slide() {
        let mut deck = Presentation::starter("dairy".into(), "Dairy", now());
        let mut engine = EditorEngine::new(deck.slides[1].clone());
        engine.add_media(MediaContent::video("https://cdn.example/milking.mp4"));
        engine.set_title("Our Herd");
        assert!(engine.is_dirty());

        let later = now() + chrono::Duration::hours(1);
        engine.commit_into(&mut deck, later).unwrap();
        assert!(!engine.is_dirty());
        assert_eq!(deck.slides[1].title, "Our Herd");
        assert_eq!(deck.slides[1].media.len(), 1);
        assert_eq!(deck.slides[1].updated_at, later);
        assert_eq!(deck.updated_at, later);
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn test_commit_into_unknown_slide() {
        let mut deck = Presentation::starter("dairy".into(), "Dairy", now());
        let mut engine = EditorEngine::new(Slide::new("Orphan", 0, now()));
        assert_matches!(
            engine.commit_into(&mut deck, now()),
            Err(EditorError::Model(slate_model::ModelError::SlideNotFound(_)))
        );
    }
}
