//! Slate deck model
//!
//! Pure data and validation for slide decks, no I/O:
//! - [`math`]: geometry in design units (`Vec2`, `Size`, `Rect`) on the fixed
//!   1200x675 authoring canvas
//! - [`media`]: image and video elements with stacking order
//! - [`slide`]: slides, their media and z-order operations
//! - [`presentation`]: the ordered deck and its reorder invariant
//! - [`settings`]: viewer configuration
//! - [`clock`]: injectable wall clock for timestamps
//!
//! ## Invariants
//!
//! 1. `presentation.slides[i].order == i` after every public operation
//! 2. New and duplicated elements stack above the current maximum z-index
//! 3. A mixed slide whose last element is removed becomes a text slide

pub mod clock;
pub mod error;
pub mod math;
pub mod media;
pub mod presentation;
pub mod settings;
pub mod slide;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ModelError;
pub use math::{round2, Rect, Size, Vec2, DESIGN_HEIGHT, DESIGN_SIZE, DESIGN_WIDTH};
pub use media::{
    ElementId, MediaContent, MediaElement, MediaKind, MediaSource, VideoOptions,
    DEFAULT_MEDIA_RECT, DUPLICATE_OFFSET,
};
pub use presentation::{Presentation, SectorId};
pub use settings::{Theme, ViewerSettings};
pub use slide::{Slide, SlideId, SlideKind};
