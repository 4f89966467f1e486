//! Slate presentation viewer
//!
//! Plays a presentation on a viewport of any size:
//!
//! - [`transform`]: letterboxed projection from design units to the viewport
//! - [`timer`]: single-shot deadlines polled with an explicit `now_ms`
//! - [`keys`]: the recognized keyboard shortcuts
//! - [`host`]: [`PlaybackHost`], the seam to real video elements and fullscreen
//! - [`controller`]: [`PlaybackController`], navigation, auto-advance, video
//!   sync and control fading for one open presentation
//! - [`frame`]: per-frame render output
//! - [`testing`]: a recording host for tests
//!
//! # Time
//!
//! Nothing here reads a clock. Every entry point that can arm or fire a
//! timer takes `now_ms`, and the host drives expiry by calling
//! [`PlaybackController::tick`].

pub mod controller;
pub mod error;
pub mod frame;
pub mod host;
pub mod keys;
pub mod testing;
pub mod timer;
pub mod transform;

pub use controller::PlaybackController;
pub use error::{MediaError, ViewerError, ViewerWarning};
pub use frame::SlideFrame;
pub use host::PlaybackHost;
pub use keys::{KeyResult, ViewerKey};
pub use timer::{Timer, CONTROL_FADE_MS};
pub use transform::{ProjectedElement, ViewportTransform};
