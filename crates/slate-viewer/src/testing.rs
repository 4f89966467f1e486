//! Recording playback host
//!
//! Stands in for real video elements in tests and headless runs. Every
//! call is recorded, and autoplay or fullscreen can be made to fail.

use std::collections::BTreeMap;

use slate_model::ElementId;

use crate::error::MediaError;
use crate::host::PlaybackHost;

/// A call made on the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    SeekToStart(ElementId),
    /// Successful play, with the element's mute state at the time
    Play { id: ElementId, muted: bool },
    /// Rejected play
    PlayRejected(ElementId),
    Pause(ElementId),
    SetMuted(ElementId, bool),
    Release(ElementId),
    RequestFullscreen,
    ExitFullscreen,
}

/// Autoplay policy to simulate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoplayPolicy {
    /// Every play succeeds
    #[default]
    Allow,
    /// Only muted elements may play, as in most browsers
    MutedOnly,
    /// Every play is rejected
    Deny,
}

/// Host that records calls and tracks per-element state
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    pub policy: AutoplayPolicy,
    pub reject_fullscreen: bool,
    muted: BTreeMap<ElementId, bool>,
    playing: BTreeMap<ElementId, bool>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with an autoplay policy
    pub fn with_policy(policy: AutoplayPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Whether an element is currently playing
    pub fn is_playing(&self, id: ElementId) -> bool {
        self.playing.get(&id).copied().unwrap_or(false)
    }

    /// Last mute state set on an element
    pub fn is_muted(&self, id: ElementId) -> Option<bool> {
        self.muted.get(&id).copied()
    }

    /// Elements currently playing
    pub fn playing(&self) -> Vec<ElementId> {
        self.playing
            .iter()
            .filter(|(_, playing)| **playing)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Count events matching a predicate
    pub fn count(&self, predicate: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PlaybackHost for RecordingHost {
    fn seek_to_start(&mut self, id: ElementId) {
        self.events.push(HostEvent::SeekToStart(id));
    }

    fn play(&mut self, id: ElementId) -> Result<(), MediaError> {
        let muted = self.is_muted(id).unwrap_or(false);
        let allowed = match self.policy {
            AutoplayPolicy::Allow => true,
            AutoplayPolicy::MutedOnly => muted,
            AutoplayPolicy::Deny => false,
        };
        if !allowed {
            self.events.push(HostEvent::PlayRejected(id));
            return Err(MediaError::PlaybackBlocked("NotAllowedError".into()));
        }
        self.playing.insert(id, true);
        self.events.push(HostEvent::Play { id, muted });
        Ok(())
    }

    fn pause(&mut self, id: ElementId) {
        self.playing.insert(id, false);
        self.events.push(HostEvent::Pause(id));
    }

    fn set_muted(&mut self, id: ElementId, muted: bool) {
        self.muted.insert(id, muted);
        self.events.push(HostEvent::SetMuted(id, muted));
    }

    fn release(&mut self, id: ElementId) {
        self.playing.remove(&id);
        self.muted.remove(&id);
        self.events.push(HostEvent::Release(id));
    }

    fn request_fullscreen(&mut self) -> Result<(), MediaError> {
        if self.reject_fullscreen {
            return Err(MediaError::FullscreenRejected("permission denied".into()));
        }
        self.events.push(HostEvent::RequestFullscreen);
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), MediaError> {
        self.events.push(HostEvent::ExitFullscreen);
        Ok(())
    }
}
