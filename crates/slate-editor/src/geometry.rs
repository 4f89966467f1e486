//! Drag and resize math
//!
//! Pure functions over design-unit geometry. Out-of-range input is clamped,
//! never rejected.

use slate_model::{Rect, Size, Vec2};

use crate::handle::ResizeHandle;

/// Smallest width and height an element can be resized to
pub const MIN_ELEMENT_SIZE: f32 = 50.0;

/// Half-size of the square around each corner that grabs a resize handle
pub const HANDLE_HIT_RADIUS: f32 = 12.0;

/// New top-left corner for a dragged element, kept inside the container
/// independently per axis
pub fn drag_position(origin: Vec2, delta: Vec2, element: Size, container: Size) -> Vec2 {
    let max = Vec2::new(container.width - element.width, container.height - element.height);
    (origin + delta).clamp(Vec2::ZERO, max)
}

/// New rectangle after dragging `handle` by `delta` from `origin`.
///
/// Width and height never drop below [`MIN_ELEMENT_SIZE`]. Handles on the
/// top or left edge also move `y`/`x` so the opposite corner stays fixed.
pub fn resize_rect(handle: ResizeHandle, origin: Rect, delta: Vec2) -> Rect {
    let width = if handle.moves_left() {
        origin.width - delta.x
    } else {
        origin.width + delta.x
    }
    .max(MIN_ELEMENT_SIZE);

    let height = if handle.moves_top() {
        origin.height - delta.y
    } else {
        origin.height + delta.y
    }
    .max(MIN_ELEMENT_SIZE);

    let x = if handle.moves_left() { origin.right() - width } else { origin.x };
    let y = if handle.moves_top() { origin.bottom() - height } else { origin.y };

    Rect::new(x, y, width, height)
}

/// Clamp an arbitrary rectangle to the minimum size and shift it onto the container
pub fn fit_rect(rect: Rect, container: Size) -> Rect {
    let size = rect.size().at_least(MIN_ELEMENT_SIZE);
    Rect::from_pos_size(rect.position(), size).shift_within(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_model::DESIGN_SIZE;

    fn origin() -> Rect {
        Rect::new(100.0, 100.0, 300.0, 200.0)
    }

    #[test]
    fn test_drag_moves_by_delta() {
        let pos = drag_position(Vec2::new(100.0, 100.0), Vec2::new(50.0, -30.0), Size::new(300.0, 200.0), DESIGN_SIZE);
        assert!((pos.x - 150.0).abs() < 0.001);
        assert!((pos.y - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_drag_clamps_each_axis() {
        let size = Size::new(300.0, 200.0);
        let pos = drag_position(Vec2::new(100.0, 100.0), Vec2::new(5000.0, -5000.0), size, DESIGN_SIZE);
        assert!((pos.x - 900.0).abs() < 0.001);
        assert!((pos.y - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_drag_oversized_element_pins_to_origin() {
        let pos = drag_position(Vec2::ZERO, Vec2::new(40.0, 40.0), Size::new(1500.0, 800.0), DESIGN_SIZE);
        assert!((pos.x - 0.0).abs() < 0.001);
        assert!((pos.y - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_se_keeps_position() {
        let rect = resize_rect(ResizeHandle::Se, origin(), Vec2::new(40.0, 25.0));
        assert!((rect.x - 100.0).abs() < 0.001);
        assert!((rect.y - 100.0).abs() < 0.001);
        assert!((rect.width - 340.0).abs() < 0.001);
        assert!((rect.height - 225.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_nw_anchors_bottom_right() {
        let rect = resize_rect(ResizeHandle::Nw, origin(), Vec2::new(-20.0, 30.0));
        assert!((rect.right() - 400.0).abs() < 0.001);
        assert!((rect.bottom() - 300.0).abs() < 0.001);
        assert!((rect.width - 320.0).abs() < 0.001);
        assert!((rect.height - 170.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_ne_anchors_bottom_left() {
        let rect = resize_rect(ResizeHandle::Ne, origin(), Vec2::new(10.0, -10.0));
        assert!((rect.x - 100.0).abs() < 0.001);
        assert!((rect.bottom() - 300.0).abs() < 0.001);
        assert!((rect.width - 310.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_sw_anchors_top_right() {
        let rect = resize_rect(ResizeHandle::Sw, origin(), Vec2::new(10.0, 10.0));
        assert!((rect.y - 100.0).abs() < 0.001);
        assert!((rect.right() - 400.0).abs() < 0.001);
        assert!((rect.height - 210.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_floor_with_anchor() {
        let rect = resize_rect(ResizeHandle::Nw, origin(), Vec2::new(1000.0, 1000.0));
        assert!((rect.width - MIN_ELEMENT_SIZE).abs() < 0.001);
        assert!((rect.height - MIN_ELEMENT_SIZE).abs() < 0.001);
        assert!((rect.right() - 400.0).abs() < 0.001);
        assert!((rect.bottom() - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_rect() {
        let rect = fit_rect(Rect::new(1180.0, 10.0, 10.0, 80.0), DESIGN_SIZE);
        assert!((rect.width - 50.0).abs() < 0.001);
        assert!((rect.x - 1150.0).abs() < 0.001);
    }
}
