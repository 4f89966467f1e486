//! Keyboard shortcuts
//!
//! | key | action |
//! |---|---|
//! | `ArrowLeft` | previous slide |
//! | `ArrowRight`, `Space` | next slide |
//! | `Escape` | leave fullscreen, else close |
//! | `F` | toggle fullscreen |
//! | `Shift+P` | toggle auto-play |
//! | `P` | toggle video playback |
//! | `M` | toggle mute |
//! | `R` | restart videos on the current slide |
//! | `1`-`9` | jump to that slide |

use serde::Serialize;

/// A recognized viewer shortcut
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "slide", rename_all = "camelCase")]
pub enum ViewerKey {
    Previous,
    Next,
    Escape,
    ToggleFullscreen,
    ToggleAutoPlay,
    TogglePlayback,
    ToggleMute,
    RestartVideos,
    /// Zero-based slide index
    JumpTo(usize),
}

impl ViewerKey {
    /// Parse a DOM `KeyboardEvent.key` value; unrecognized keys give `None`
    pub fn from_event(key: &str, shift: bool) -> Option<Self> {
        let key = match key {
            "ArrowLeft" => return Some(ViewerKey::Previous),
            "ArrowRight" | " " | "Spacebar" | "Space" => return Some(ViewerKey::Next),
            "Escape" | "Esc" => return Some(ViewerKey::Escape),
            other => other,
        };

        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return None;
        };

        match ch.to_ascii_lowercase() {
            'f' => Some(ViewerKey::ToggleFullscreen),
            'p' if shift => Some(ViewerKey::ToggleAutoPlay),
            'p' => Some(ViewerKey::TogglePlayback),
            'm' => Some(ViewerKey::ToggleMute),
            'r' => Some(ViewerKey::RestartVideos),
            '1'..='9' => ch.to_digit(10).map(|d| ViewerKey::JumpTo(d as usize - 1)),
            _ => None,
        }
    }
}

/// What the host should do with a key event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyResult {
    /// Consumed; prevent the default action
    Handled,
    /// Not a viewer shortcut, or not applicable right now
    PassThrough,
    /// The viewer closed itself
    Close,
}
