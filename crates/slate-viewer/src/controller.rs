//! Playback controller
//!
//! One open presentation at a time. The session owns both timers
//! (auto-advance and control fade) as plain `Option<Timer>` values, so
//! closing the session drops them and nothing can fire afterwards.
//!
//! Flags start as: auto-play from `settings.auto_advance`, video playback
//! on, sound on, windowed.

use slate_model::{ElementId, Presentation, Size, Slide, VideoOptions, ViewerSettings};
use tracing::{debug, info, warn};

use crate::error::{ViewerError, ViewerWarning};
use crate::frame::SlideFrame;
use crate::host::PlaybackHost;
use crate::keys::{KeyResult, ViewerKey};
use crate::timer::{Timer, CONTROL_FADE_MS};
use crate::transform::ViewportTransform;

/// State of an open presentation
struct Session {
    presentation: Presentation,
    index: usize,
    is_auto_playing: bool,
    is_video_playing: bool,
    is_muted: bool,
    is_fullscreen: bool,
    controls_visible: bool,
    auto_advance: Option<Timer>,
    control_fade: Option<Timer>,
}

impl Session {
    fn current_videos(&self) -> Vec<(ElementId, VideoOptions)> {
        self.presentation
            .slides
            .get(self.index)
            .map(|slide| {
                slide
                    .videos()
                    .filter_map(|m| m.video_options().map(|o| (m.id, *o)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn last_index(&self) -> usize {
        self.presentation.len().saturating_sub(1)
    }

    /// Auto-advance timer to arm at `now_ms`, if auto-play applies
    fn auto_advance_timer(&self, settings: &ViewerSettings, now_ms: f64) -> Option<Timer> {
        (self.is_auto_playing && settings.auto_advance)
            .then(|| Timer::after(now_ms, settings.auto_advance_delay_ms()))
    }
}

/// Start a video, retrying once muted before giving up with a warning
fn start_video<H: PlaybackHost>(host: &mut H, id: ElementId, warnings: &mut Vec<ViewerWarning>) {
    let Err(first) = host.play(id) else {
        return;
    };
    debug!(element = %id, reason = %first, "playback rejected, retrying muted");
    host.set_muted(id, true);
    if let Err(err) = host.play(id) {
        warn!(element = %id, reason = %err, "video playback blocked");
        warnings.push(ViewerWarning::AutoplayBlocked {
            element_id: id,
            reason: err.to_string(),
        });
    }
}

/// Presentation playback
pub struct PlaybackController<H> {
    host: H,
    settings: ViewerSettings,
    session: Option<Session>,
    warnings: Vec<ViewerWarning>,
}

impl<H: PlaybackHost> PlaybackController<H> {
    /// Create a closed controller
    pub fn new(host: H, settings: ViewerSettings) -> Self {
        Self {
            host,
            settings: settings.normalized(),
            session: None,
            warnings: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Replace the settings, re-arming auto-advance under the new delay
    pub fn set_settings(&mut self, settings: ViewerSettings, now_ms: f64) {
        self.settings = settings.normalized();
        if let Some(session) = self.session.as_mut() {
            session.auto_advance = session.auto_advance_timer(&self.settings, now_ms);
        }
    }

    // ========== Lifecycle ==========

    /// Show `presentation` starting at `start_index`, closing any open one
    pub fn open(&mut self, presentation: Presentation, start_index: usize, now_ms: f64) -> Result<(), ViewerError> {
        if presentation.is_empty() {
            return Err(ViewerError::EmptyPresentation);
        }
        if start_index >= presentation.len() {
            return Err(ViewerError::StartOutOfRange {
                index: start_index,
                len: presentation.len(),
            });
        }

        self.close();
        self.warnings.clear();
        info!(
            sector = %presentation.id,
            slides = presentation.len(),
            start_index,
            "viewer opened"
        );
        self.session = Some(Session {
            presentation,
            index: start_index,
            is_auto_playing: self.settings.auto_advance,
            is_video_playing: true,
            is_muted: false,
            is_fullscreen: false,
            controls_visible: true,
            auto_advance: None,
            control_fade: None,
        });
        self.show_current(now_ms);
        Ok(())
    }

    /// Cancel timers, release live videos and leave fullscreen
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        for (id, _) in session.current_videos() {
            self.host.pause(id);
            self.host.release(id);
        }
        if session.is_fullscreen {
            if let Err(err) = self.host.exit_fullscreen() {
                warn!(reason = %err, "could not leave fullscreen on close");
            }
        }
        info!(sector = %session.presentation.id, "viewer closed");
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    // ========== State ==========

    /// Zero-based index of the current slide
    pub fn slide_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.index)
    }

    /// One-based position and slide count, for a progress indicator
    pub fn position(&self) -> Option<(usize, usize)> {
        self.session.as_ref().map(|s| (s.index + 1, s.presentation.len()))
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        self.session.as_ref().map(|s| &s.presentation)
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.session.as_ref().and_then(|s| s.presentation.slides.get(s.index))
    }

    pub fn is_auto_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_auto_playing)
    }

    pub fn is_video_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_video_playing)
    }

    pub fn is_muted(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_muted)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_fullscreen)
    }

    /// Whether navigation and transport chrome should be drawn
    pub fn controls_visible(&self) -> bool {
        self.settings.show_controls && self.session.as_ref().is_some_and(|s| s.controls_visible)
    }

    /// When the auto-advance timer fires, if armed
    pub fn auto_advance_deadline(&self) -> Option<f64> {
        self.session.as_ref()?.auto_advance.map(|t| t.deadline_ms)
    }

    /// Non-fatal problems since the presentation was opened
    pub fn warnings(&self) -> &[ViewerWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<ViewerWarning> {
        std::mem::take(&mut self.warnings)
    }

    // ========== Navigation ==========

    /// Advance one slide. At the last slide this wraps to the first only
    /// while auto-playing.
    pub fn next(&mut self, now_ms: f64) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let target = if session.index < session.last_index() {
            session.index + 1
        } else if session.is_auto_playing {
            0
        } else {
            return false;
        };
        self.change_slide(target, now_ms);
        true
    }

    /// Go back one slide; no-op at the first
    pub fn previous(&mut self, now_ms: f64) -> bool {
        match self.slide_index() {
            Some(index) if index > 0 => {
                self.change_slide(index - 1, now_ms);
                true
            }
            _ => false,
        }
    }

    /// Jump to a slide if it exists
    pub fn go_to(&mut self, index: usize, now_ms: f64) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if index >= session.presentation.len() || index == session.index {
            return false;
        }
        self.change_slide(index, now_ms);
        true
    }

    /// Pause the outgoing slide's videos and show `index`
    fn change_slide(&mut self, index: usize, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for (id, _) in session.current_videos() {
            self.host.pause(id);
        }
        debug!(from = session.index, to = index, "slide change");
        session.index = index;
        self.show_current(now_ms);
    }

    /// Rewind the current slide's videos, start the autoplay ones and
    /// re-arm auto-advance
    fn show_current(&mut self, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for (id, options) in session.current_videos() {
            self.host.seek_to_start(id);
            self.host.set_muted(id, options.muted || session.is_muted);
            if options.auto_play && session.is_video_playing {
                start_video(&mut self.host, id, &mut self.warnings);
            }
        }
        session.auto_advance = session.auto_advance_timer(&self.settings, now_ms);
    }

    // ========== Toggles ==========

    /// Flip auto-play, arming or cancelling the auto-advance timer
    pub fn toggle_auto_play(&mut self, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.is_auto_playing = !session.is_auto_playing;
        session.auto_advance = session.auto_advance_timer(&self.settings, now_ms);
        debug!(auto_playing = session.is_auto_playing, "auto-play toggled");
    }

    /// Pause or resume every video on the current slide
    pub fn toggle_video_playback(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.is_video_playing = !session.is_video_playing;
        for (id, _) in session.current_videos() {
            if session.is_video_playing {
                start_video(&mut self.host, id, &mut self.warnings);
            } else {
                self.host.pause(id);
            }
        }
    }

    /// Flip mute and apply it to every live video
    pub fn toggle_mute(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.is_muted = !session.is_muted;
        for (id, _) in session.current_videos() {
            self.host.set_muted(id, session.is_muted);
        }
    }

    /// Rewind the current slide's videos to time 0
    pub fn restart_videos(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        for (id, options) in session.current_videos() {
            self.host.seek_to_start(id);
            if options.auto_play && session.is_video_playing {
                start_video(&mut self.host, id, &mut self.warnings);
            }
        }
    }

    /// Enter or leave fullscreen. Returns whether the state changed.
    pub fn toggle_fullscreen(&mut self, now_ms: f64) -> bool {
        if self.is_fullscreen() {
            return self.exit_fullscreen();
        }
        if !self.settings.allow_fullscreen || self.session.is_none() {
            return false;
        }
        match self.host.request_fullscreen() {
            Ok(()) => {
                self.fullscreen_changed(true, now_ms);
                true
            }
            Err(err) => {
                warn!(reason = %err, "fullscreen request rejected");
                self.warnings.push(ViewerWarning::Fullscreen { reason: err.to_string() });
                false
            }
        }
    }

    /// Leave fullscreen if active
    pub fn exit_fullscreen(&mut self) -> bool {
        if !self.is_fullscreen() {
            return false;
        }
        match self.host.exit_fullscreen() {
            Ok(()) => {
                self.fullscreen_changed(false, 0.0);
                true
            }
            Err(err) => {
                warn!(reason = %err, "could not leave fullscreen");
                self.warnings.push(ViewerWarning::Fullscreen { reason: err.to_string() });
                false
            }
        }
    }

    /// Sync with a fullscreen change made outside the controller
    /// (e.g. the browser's own Escape handling)
    pub fn fullscreen_changed(&mut self, is_fullscreen: bool, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.is_fullscreen = is_fullscreen;
        session.controls_visible = true;
        session.control_fade = is_fullscreen.then(|| Timer::after(now_ms, CONTROL_FADE_MS));
        debug!(is_fullscreen, "fullscreen changed");
    }

    /// Show the controls; in fullscreen they hide again after inactivity
    pub fn pointer_moved(&mut self, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.controls_visible = true;
        session.control_fade = session
            .is_fullscreen
            .then(|| Timer::after(now_ms, CONTROL_FADE_MS));
    }

    // ========== Input & time ==========

    /// Dispatch a key event (DOM `key` value plus shift state)
    pub fn handle_key(&mut self, key: &str, shift: bool, now_ms: f64) -> KeyResult {
        if !self.is_open() {
            return KeyResult::PassThrough;
        }
        let Some(key) = ViewerKey::from_event(key, shift) else {
            return KeyResult::PassThrough;
        };

        match key {
            ViewerKey::Previous => {
                self.previous(now_ms);
            }
            ViewerKey::Next => {
                self.next(now_ms);
            }
            ViewerKey::Escape => {
                if self.is_fullscreen() {
                    self.exit_fullscreen();
                } else {
                    self.close();
                    return KeyResult::Close;
                }
            }
            ViewerKey::ToggleFullscreen => {
                if !self.settings.allow_fullscreen {
                    return KeyResult::PassThrough;
                }
                self.toggle_fullscreen(now_ms);
            }
            ViewerKey::ToggleAutoPlay => self.toggle_auto_play(now_ms),
            ViewerKey::TogglePlayback => self.toggle_video_playback(),
            ViewerKey::ToggleMute => self.toggle_mute(),
            ViewerKey::RestartVideos => self.restart_videos(),
            ViewerKey::JumpTo(index) => {
                let len = self.presentation().map_or(0, Presentation::len);
                if index >= len {
                    return KeyResult::PassThrough;
                }
                self.go_to(index, now_ms);
            }
        }
        KeyResult::Handled
    }

    /// Fire due timers. Returns whether anything visible changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let mut changed = false;

        if session.control_fade.is_some_and(|t| t.is_due(now_ms)) {
            session.control_fade = None;
            session.controls_visible = false;
            changed = true;
        }

        let advance = session.auto_advance.is_some_and(|t| t.is_due(now_ms));
        if advance {
            session.auto_advance = None;
            changed |= self.next(now_ms);
        }
        changed
    }

    /// Render output for a viewport of the given size
    pub fn frame(&self, viewport: Size) -> Option<SlideFrame> {
        let session = self.session.as_ref()?;
        let slide = session.presentation.slides.get(session.index)?;
        let transform = ViewportTransform::fit(viewport);
        Some(SlideFrame::build(
            slide,
            session.index,
            session.presentation.len(),
            &transform,
            self.controls_visible(),
        ))
    }
}
