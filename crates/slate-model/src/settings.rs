//! Viewer settings
//!
//! Configuration for playback. Not persisted with the presentation.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Color theme of the viewer chrome
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Playback configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerSettings {
    /// Advance to the next slide after a delay while auto-play is on
    pub auto_advance: bool,
    /// Seconds between auto-advances, at least 1
    pub auto_advance_delay_seconds: u32,
    /// Show on-screen navigation and transport chrome
    pub show_controls: bool,
    /// Enable the fullscreen toggle
    pub allow_fullscreen: bool,
    pub theme: Theme,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            auto_advance: false,
            auto_advance_delay_seconds: 5,
            show_controls: true,
            allow_fullscreen: true,
            theme: Theme::Dark,
        }
    }
}

impl ViewerSettings {
    /// Parse settings from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let settings: ViewerSettings = serde_json::from_str(json)?;
        Ok(settings.normalized())
    }

    /// Copy with out-of-range values corrected
    pub fn normalized(mut self) -> Self {
        self.auto_advance_delay_seconds = self.auto_advance_delay_seconds.max(1);
        self
    }

    /// Auto-advance delay in milliseconds
    pub fn auto_advance_delay_ms(&self) -> f64 {
        f64::from(self.auto_advance_delay_seconds.max(1)) * 1000.0
    }
}
