//! Corner resize handles

use serde::{Deserialize, Serialize};
use slate_model::{Rect, Vec2};

/// One of the four corner handles of a selected element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top-left
    Nw,
    /// Top-right
    Ne,
    /// Bottom-left
    Sw,
    /// Bottom-right
    Se,
}

impl ResizeHandle {
    /// All handles in hit-test priority order
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::Nw,
        ResizeHandle::Ne,
        ResizeHandle::Sw,
        ResizeHandle::Se,
    ];

    /// Whether dragging this handle moves the left edge
    #[inline]
    pub fn moves_left(&self) -> bool {
        matches!(self, ResizeHandle::Nw | ResizeHandle::Sw)
    }

    /// Whether dragging this handle moves the top edge
    #[inline]
    pub fn moves_top(&self) -> bool {
        matches!(self, ResizeHandle::Nw | ResizeHandle::Ne)
    }

    /// Get CSS cursor style for this handle
    pub fn cursor(&self) -> &'static str {
        match self {
            ResizeHandle::Nw | ResizeHandle::Se => "nwse-resize",
            ResizeHandle::Ne | ResizeHandle::Sw => "nesw-resize",
        }
    }

    /// Position of this corner on `rect`
    pub fn corner(&self, rect: &Rect) -> Vec2 {
        let x = if self.moves_left() { rect.x } else { rect.right() };
        let y = if self.moves_top() { rect.y } else { rect.bottom() };
        Vec2::new(x, y)
    }

    /// Handle whose square of half-size `radius` around its corner contains `pos`
    pub fn hit_test(rect: &Rect, pos: Vec2, radius: f32) -> Option<ResizeHandle> {
        Self::ALL.into_iter().find(|handle| {
            let corner = handle.corner(rect);
            (pos.x - corner.x).abs() <= radius && (pos.y - corner.y).abs() <= radius
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        assert!(ResizeHandle::Nw.moves_left() && ResizeHandle::Nw.moves_top());
        assert!(!ResizeHandle::Ne.moves_left() && ResizeHandle::Ne.moves_top());
        assert!(ResizeHandle::Sw.moves_left() && !ResizeHandle::Sw.moves_top());
        assert!(!ResizeHandle::Se.moves_left() && !ResizeHandle::Se.moves_top());
    }

    #[test]
    fn test_hit_test_corners() {
        let rect = Rect::new(100.0, 100.0, 300.0, 200.0);
        assert_eq!(ResizeHandle::hit_test(&rect, Vec2::new(95.0, 104.0), 12.0), Some(ResizeHandle::Nw));
        assert_eq!(ResizeHandle::hit_test(&rect, Vec2::new(405.0, 98.0), 12.0), Some(ResizeHandle::Ne));
        assert_eq!(ResizeHandle::hit_test(&rect, Vec2::new(100.0, 300.0), 12.0), Some(ResizeHandle::Sw));
        assert_eq!(ResizeHandle::hit_test(&rect, Vec2::new(411.0, 311.0), 12.0), Some(ResizeHandle::Se));
        assert_eq!(ResizeHandle::hit_test(&rect, Vec2::new(250.0, 200.0), 12.0), None);
    }

    #[test]
    fn test_cursor_and_name() {
        assert_eq!(ResizeHandle::Se.cursor(), "nwse-resize");
        assert_eq!(ResizeHandle::Sw.cursor(), "nesw-resize");
        assert_eq!(serde_json::to_string(&ResizeHandle::Nw).unwrap(), "\"nw\"");
    }
}
