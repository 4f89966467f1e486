//! Design-space to viewport projection
//!
//! The fixed 1200x675 design canvas is scaled uniformly to fit the viewport
//! and centered, leaving bars on one axis:
//!
//! ```text
//! scale   = min(Vw / 1200, Vh / 675)
//! offsetX = (Vw - 1200 * scale) / 2
//! offsetY = (Vh - 675 * scale) / 2
//! ```
//!
//! Projected geometry is rounded to two decimals so repeated renders do not
//! jitter by sub-pixel amounts.

use serde::Serialize;
use slate_model::{
    round2, ElementId, MediaElement, MediaKind, Rect, Size, Vec2, VideoOptions, DESIGN_HEIGHT,
    DESIGN_WIDTH,
};

/// Fit of the design canvas onto one viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    /// Viewport size in pixels
    pub viewport: Size,
    /// Uniform design-unit to pixel factor
    pub scale: f32,
    /// Letterbox offset in pixels
    pub offset: Vec2,
}

/// An element ready to draw, in viewport pixels
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedElement {
    pub id: ElementId,
    pub kind: MediaKind,
    pub src: String,
    pub rect: Rect,
    /// Degrees; scale does not affect it
    pub rotation: f32,
    pub opacity: f32,
    pub corner_radius: f32,
    pub z_index: i32,
    pub fullscreen: bool,
    pub video: Option<VideoOptions>,
}

impl ViewportTransform {
    /// Letterboxed fit for a viewport
    pub fn fit(viewport: Size) -> Self {
        let width = viewport.width.max(0.0);
        let height = viewport.height.max(0.0);
        let scale = (width / DESIGN_WIDTH).min(height / DESIGN_HEIGHT);
        let offset = Vec2::new(
            (width - DESIGN_WIDTH * scale) / 2.0,
            (height - DESIGN_HEIGHT * scale) / 2.0,
        );
        Self {
            viewport: Size::new(width, height),
            scale,
            offset,
        }
    }

    /// Area covered by the design canvas
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            round2(DESIGN_WIDTH * self.scale),
            round2(DESIGN_HEIGHT * self.scale),
        )
    }

    /// Project a design-space rectangle, then shift it inside the viewport
    /// without resizing
    pub fn project_rect(&self, rect: &Rect) -> Rect {
        let projected = Rect::new(
            round2(rect.x * self.scale) + self.offset.x,
            round2(rect.y * self.scale) + self.offset.y,
            round2(rect.width * self.scale),
            round2(rect.height * self.scale),
        );
        projected.shift_within(self.viewport)
    }

    /// Project an element; fullscreen elements cover the whole viewport
    pub fn project_element(&self, element: &MediaElement) -> ProjectedElement {
        let rect = if element.fullscreen {
            Rect::from_pos_size(Vec2::ZERO, self.viewport)
        } else {
            self.project_rect(&element.rect)
        };
        ProjectedElement {
            id: element.id,
            kind: element.kind(),
            src: element.src().as_str().to_string(),
            rect,
            rotation: element.rotation,
            opacity: element.opacity,
            corner_radius: round2(element.corner_radius * self.scale),
            z_index: element.z_index,
            fullscreen: element.fullscreen,
            video: element.video_options().copied(),
        }
    }

    /// Map a viewport point back to design units
    pub fn screen_to_design(&self, screen: Vec2) -> Vec2 {
        if self.scale <= 0.0 {
            return Vec2::ZERO;
        }
        (screen - self.offset) / self.scale
    }

    /// Map a design point to viewport pixels (unrounded)
    pub fn design_to_screen(&self, design: Vec2) -> Vec2 {
        design * self.scale + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_model::{MediaContent, DESIGN_SIZE};

    #[test]
    fn test_identity_at_design_size() {
        let transform = ViewportTransform::fit(DESIGN_SIZE);
        assert!((transform.scale - 1.0).abs() < 0.001);
        assert!((transform.offset.x - 0.0).abs() < 0.001);
        assert!((transform.offset.y - 0.0).abs() < 0.001);

        let rect = Rect::new(123.45, 67.89, 300.0, 200.0);
        assert_eq!(transform.project_rect(&rect), rect);
    }

    #[test]
    fn test_letterbox_square_viewport() {
        let transform = ViewportTransform::fit(Size::new(800.0, 800.0));
        assert!((transform.scale - 0.667).abs() < 0.001);
        assert!((transform.offset.x - 0.0).abs() < 0.001);
        assert!((transform.offset.y - 175.0).abs() < 0.01);
    }

    #[test]
    fn test_pillarbox_wide_viewport() {
        let transform = ViewportTransform::fit(Size::new(1920.0, 675.0));
        assert!((transform.scale - 1.0).abs() < 0.001);
        assert!((transform.offset.x - 360.0).abs() < 0.001);

        let rect = transform.project_rect(&Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!((rect.x - 360.0).abs() < 0.001);
    }

    #[test]
    fn test_projection_rounds_to_two_decimals() {
        let transform = ViewportTransform::fit(Size::new(1000.0, 1000.0));
        let rect = transform.project_rect(&Rect::new(100.0, 100.0, 333.0, 111.0));
        let scaled = rect.width * 100.0;
        assert!((scaled - scaled.round()).abs() < 0.01);
    }

    #[test]
    fn test_projection_is_shifted_into_viewport() {
        let transform = ViewportTransform::fit(DESIGN_SIZE);
        let rect = transform.project_rect(&Rect::new(1100.0, 600.0, 300.0, 200.0));
        assert!((rect.right() - 1200.0).abs() < 0.001);
        assert!((rect.bottom() - 675.0).abs() < 0.001);
        assert!((rect.width - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_fullscreen_element_covers_viewport() {
        let transform = ViewportTransform::fit(Size::new(1280.0, 1024.0));
        let mut element = MediaElement::new(MediaContent::video("https://cdn.example/bg.mp4"), 1);
        element.fullscreen = true;
        element.corner_radius = 12.0;
        element.rotation = 15.0;

        let projected = transform.project_element(&element);
        assert_eq!(projected.rect, Rect::new(0.0, 0.0, 1280.0, 1024.0));
        assert!((projected.rotation - 15.0).abs() < 0.001);
        assert!(projected.video.is_some());
    }

    #[test]
    fn test_corner_radius_scales() {
        let transform = ViewportTransform::fit(Size::new(600.0, 337.5));
        let mut element = MediaElement::new(MediaContent::image("https://cdn.example/a.png"), 1);
        element.corner_radius = 16.0;
        let projected = transform.project_element(&element);
        assert!((projected.corner_radius - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_screen_to_design_inverts() {
        let transform = ViewportTransform::fit(Size::new(800.0, 800.0));
        let design = Vec2::new(600.0, 300.0);
        let back = transform.screen_to_design(transform.design_to_screen(design));
        assert!((back.x - design.x).abs() < 0.01);
        assert!((back.y - design.y).abs() < 0.01);
    }

    #[test]
    fn test_zero_viewport() {
        let transform = ViewportTransform::fit(Size::ZERO);
        assert!((transform.scale - 0.0).abs() < 0.001);
        assert_eq!(transform.screen_to_design(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    }
}
