//! Render output for one frame

use serde::Serialize;
use slate_model::{Rect, Slide, SlideKind};

use crate::transform::{ProjectedElement, ViewportTransform};

/// Everything the rendering surface needs to draw the current slide
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideFrame {
    /// Zero-based slide index
    pub index: usize,
    pub count: usize,
    pub kind: SlideKind,
    /// Letterboxed design canvas within the viewport
    pub canvas: Rect,
    pub scale: f32,
    pub background_color: String,
    /// Image URL and opacity
    pub background_image: Option<(String, f32)>,
    pub text_color: String,
    /// `None` when hidden
    pub title: Option<String>,
    /// `None` when hidden
    pub content: Option<String>,
    /// Back to front
    pub elements: Vec<ProjectedElement>,
    pub controls_visible: bool,
}

impl SlideFrame {
    /// Project a slide through a viewport transform
    pub fn build(
        slide: &Slide,
        index: usize,
        count: usize,
        transform: &ViewportTransform,
        controls_visible: bool,
    ) -> Self {
        Self {
            index,
            count,
            kind: slide.kind,
            canvas: transform.canvas_rect(),
            scale: transform.scale,
            background_color: slide.background_color.clone(),
            background_image: slide
                .background_image
                .clone()
                .map(|url| (url, slide.background_image_opacity)),
            text_color: slide.text_color.clone(),
            title: slide.show_title.then(|| slide.title.clone()),
            content: slide.show_content.then(|| slide.content.clone()),
            elements: slide
                .media_by_z()
                .into_iter()
                .map(|m| transform.project_element(m))
                .collect(),
            controls_visible,
        }
    }

    /// One-based position for a progress indicator
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.count)
    }
}
