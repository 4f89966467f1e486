//! Media elements placed on a slide
//!
//! An element is an image or a video with a rectangle in design units,
//! a rotation, opacity, corner radius and a stacking order. Video-only
//! playback flags live inside the `Video` variant of [`MediaContent`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::math::{Rect, Vec2, DESIGN_SIZE};

/// Default rectangle for newly dropped media
pub const DEFAULT_MEDIA_RECT: Rect = Rect::new(100.0, 100.0, 300.0, 200.0);

/// Offset applied to a duplicated element
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Unique media element identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to the bytes backing an element
///
/// Sources are URLs: durable ones (`data:`, `https:`) survive a reload,
/// `blob:` handles only live as long as the page that created them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaSource(String);

impl MediaSource {
    /// Wrap a source URL
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The raw URL
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this source is a transient local handle that cannot be persisted
    pub fn is_ephemeral(&self) -> bool {
        self.0.starts_with("blob:")
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminator for the kind of media
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Playback flags for video elements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOptions {
    pub muted: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub auto_play: bool,
    pub controls: bool,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            muted: true,
            looped: true,
            auto_play: true,
            controls: false,
        }
    }
}

/// Kind-specific content of an element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaContent {
    Image {
        src: MediaSource,
    },
    Video {
        src: MediaSource,
        #[serde(default)]
        options: VideoOptions,
    },
}

impl MediaContent {
    /// Image content
    pub fn image(src: impl Into<String>) -> Self {
        MediaContent::Image { src: MediaSource::new(src) }
    }

    /// Video content with default playback flags
    pub fn video(src: impl Into<String>) -> Self {
        MediaContent::Video {
            src: MediaSource::new(src),
            options: VideoOptions::default(),
        }
    }

    /// Kind discriminator
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaContent::Image { .. } => MediaKind::Image,
            MediaContent::Video { .. } => MediaKind::Video,
        }
    }

    /// Source reference
    pub fn src(&self) -> &MediaSource {
        match self {
            MediaContent::Image { src } | MediaContent::Video { src, .. } => src,
        }
    }
}

/// A positioned image or video on a slide
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaElement {
    pub id: ElementId,
    pub content: MediaContent,
    /// Rectangle in design units
    pub rect: Rect,
    /// Degrees, kept in -180..=180
    pub rotation: f32,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f32,
    pub corner_radius: f32,
    /// Stacking order; only relative order matters
    pub z_index: i32,
    /// Covers the whole viewport during playback, ignoring `rect`
    #[serde(default)]
    pub fullscreen: bool,
}

impl MediaElement {
    /// Create an element with default geometry
    pub fn new(content: MediaContent, z_index: i32) -> Self {
        Self {
            id: ElementId::new(),
            content,
            rect: DEFAULT_MEDIA_RECT,
            rotation: 0.0,
            opacity: 1.0,
            corner_radius: 0.0,
            z_index,
            fullscreen: false,
        }
    }

    /// Kind discriminator
    #[inline]
    pub fn kind(&self) -> MediaKind {
        self.content.kind()
    }

    /// Check if this is a video element
    #[inline]
    pub fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }

    /// Source reference
    #[inline]
    pub fn src(&self) -> &MediaSource {
        self.content.src()
    }

    /// Video playback flags, `None` for images
    pub fn video_options(&self) -> Option<&VideoOptions> {
        match &self.content {
            MediaContent::Video { options, .. } => Some(options),
            MediaContent::Image { .. } => None,
        }
    }

    /// Mutable video playback flags, `None` for images
    pub fn video_options_mut(&mut self) -> Option<&mut VideoOptions> {
        match &mut self.content {
            MediaContent::Video { options, .. } => Some(options),
            MediaContent::Image { .. } => None,
        }
    }

    /// Set rotation, wrapping the angle into -180..=180
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }

    /// Set opacity, clamped to 0..=1
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 1.0 };
    }

    /// Set corner radius, never negative
    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    }

    /// Copy with a fresh id, shifted by [`DUPLICATE_OFFSET`] and kept on the canvas
    pub fn duplicate(&self, z_index: i32) -> Self {
        let mut copy = self.clone();
        copy.id = ElementId::new();
        copy.z_index = z_index;
        copy.rect = self.rect.translate(DUPLICATE_OFFSET).shift_within(DESIGN_SIZE);
        copy
    }
}

/// Wrap an angle into -180..=180 degrees
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let mut wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped < -180.0 {
        wrapped += 360.0;
    }
    wrapped
}
