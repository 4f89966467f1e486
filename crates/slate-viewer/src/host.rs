//! Playback host seam
//!
//! The controller decides what should happen to each video element and
//! to fullscreen; the host carries it out on real elements. Async
//! operations that can be rejected (play, fullscreen) report the
//! rejection as a [`MediaError`] instead of panicking or propagating.

use slate_model::ElementId;

use crate::error::MediaError;

/// Media and fullscreen operations performed on the host page
pub trait PlaybackHost {
    /// Rewind a video to time 0
    fn seek_to_start(&mut self, id: ElementId);

    /// Start playing a video
    fn play(&mut self, id: ElementId) -> Result<(), MediaError>;

    fn pause(&mut self, id: ElementId);

    fn set_muted(&mut self, id: ElementId, muted: bool);

    /// Stop a video and drop its decoder resources
    fn release(&mut self, id: ElementId);

    fn request_fullscreen(&mut self) -> Result<(), MediaError>;

    fn exit_fullscreen(&mut self) -> Result<(), MediaError>;
}
