//! Slide: text, background styling and a set of media elements

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;
use crate::media::{ElementId, MediaContent, MediaElement};

/// Unique slide identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(Uuid);

impl SlideId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlideId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Layout kind of a slide
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideKind {
    /// Text only
    #[default]
    Text,
    /// Text plus media elements
    Mixed,
    /// Background image fills the slide
    FullscreenBackground,
}

/// Default slide background
pub const DEFAULT_BACKGROUND: &str = "#0f172a";

/// Default slide text color
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// A single slide
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    pub title: String,
    pub content: String,
    pub kind: SlideKind,
    pub background_color: String,
    #[serde(default)]
    pub background_image: Option<String>,
    pub background_image_opacity: f32,
    pub text_color: String,
    pub show_title: bool,
    pub show_content: bool,
    /// Position in the presentation, kept equal to the index
    pub order: usize,
    /// Insertion order; stacking is decided by `z_index`
    #[serde(default)]
    pub media: Vec<MediaElement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slide {
    /// Create an empty text slide
    pub fn new(title: impl Into<String>, order: usize, now: DateTime<Utc>) -> Self {
        Self {
            id: SlideId::new(),
            title: title.into(),
            content: String::new(),
            kind: SlideKind::Text,
            background_color: DEFAULT_BACKGROUND.to_string(),
            background_image: None,
            background_image_opacity: 1.0,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            show_title: true,
            show_content: true,
            order,
            media: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style body text
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Stamp the modification time
    #[inline]
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Set the background image and its opacity (clamped to 0..=1)
    pub fn set_background_image(&mut self, url: impl Into<String>, opacity: f32) {
        self.background_image = Some(url.into());
        self.background_image_opacity = opacity.clamp(0.0, 1.0);
    }

    /// Remove the background image; a fullscreen-background slide falls back to text
    pub fn clear_background_image(&mut self) {
        self.background_image = None;
        if self.kind == SlideKind::FullscreenBackground {
            self.kind = if self.media.is_empty() { SlideKind::Text } else { SlideKind::Mixed };
        }
    }

    /// Get an element by id
    pub fn element(&self, id: ElementId) -> Option<&MediaElement> {
        self.media.iter().find(|m| m.id == id)
    }

    /// Get a mutable element by id
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut MediaElement> {
        self.media.iter_mut().find(|m| m.id == id)
    }

    /// Highest z-index plus one, or 1 for an empty slide
    pub fn next_z(&self) -> i32 {
        self.media.iter().map(|m| m.z_index).max().map_or(1, |z| z.saturating_add(1))
    }

    /// Re-pack z-indexes to `1..=n` in stacking order
    pub fn restack(&mut self) {
        let order: Vec<ElementId> = self.media_by_z().iter().map(|m| m.id).collect();
        for (z, id) in (1..).zip(order) {
            if let Some(element) = self.element_mut(id) {
                element.z_index = z;
            }
        }
    }

    /// Restack when a z-index sits at either end of the `i32` range
    fn ensure_z_headroom(&mut self) {
        if self.media.iter().any(|m| m.z_index == i32::MAX || m.z_index == i32::MIN) {
            self.restack();
        }
    }

    /// Add media with default geometry on top of the stack
    pub fn add_media(&mut self, content: MediaContent) -> ElementId {
        self.ensure_z_headroom();
        let element = MediaElement::new(content, self.next_z());
        let id = element.id;
        self.push_element(element);
        id
    }

    /// Append a fully built element, promoting a text slide to mixed
    pub fn push_element(&mut self, element: MediaElement) {
        self.media.push(element);
        if self.kind == SlideKind::Text {
            self.kind = SlideKind::Mixed;
        }
    }

    /// Remove an element; a mixed slide with no media left becomes text
    pub fn remove_media(&mut self, id: ElementId) -> Result<MediaElement, ModelError> {
        let index = self
            .media
            .iter()
            .position(|m| m.id == id)
            .ok_or(ModelError::ElementNotFound(id))?;
        let removed = self.media.remove(index);
        if self.media.is_empty() && self.kind == SlideKind::Mixed {
            self.kind = SlideKind::Text;
        }
        Ok(removed)
    }

    /// Duplicate an element on top of the stack, returning the copy's id
    pub fn duplicate_media(&mut self, id: ElementId) -> Result<ElementId, ModelError> {
        self.ensure_z_headroom();
        let z = self.next_z();
        let copy = self
            .element(id)
            .ok_or(ModelError::ElementNotFound(id))?
            .duplicate(z);
        let copy_id = copy.id;
        self.push_element(copy);
        Ok(copy_id)
    }

    /// Place an element above all of its siblings
    pub fn bring_to_front(&mut self, id: ElementId) -> Result<(), ModelError> {
        self.ensure_z_headroom();
        let top = self.media.iter().filter(|m| m.id != id).map(|m| m.z_index).max();
        let element = self.element_mut(id).ok_or(ModelError::ElementNotFound(id))?;
        if let Some(top) = top {
            element.z_index = top.saturating_add(1);
        }
        Ok(())
    }

    /// Place an element below all of its siblings
    pub fn send_to_back(&mut self, id: ElementId) -> Result<(), ModelError> {
        self.ensure_z_headroom();
        let bottom = self.media.iter().filter(|m| m.id != id).map(|m| m.z_index).min();
        let element = self.element_mut(id).ok_or(ModelError::ElementNotFound(id))?;
        if let Some(bottom) = bottom {
            element.z_index = bottom.saturating_sub(1);
        }
        Ok(())
    }

    /// Elements back to front. Equal z-indexes keep insertion order, so the
    /// later-inserted element is drawn on top.
    pub fn media_by_z(&self) -> Vec<&MediaElement> {
        let mut sorted: Vec<&MediaElement> = self.media.iter().collect();
        sorted.sort_by_key(|m| m.z_index);
        sorted
    }

    /// Video elements on this slide
    pub fn videos(&self) -> impl Iterator<Item = &MediaElement> {
        self.media.iter().filter(|m| m.is_video())
    }

    /// Fresh identities for the slide and all of its elements
    pub(crate) fn reidentify(&mut self) {
        self.id = SlideId::new();
        for element in &mut self.media {
            element.id = ElementId::new();
        }
    }
}
