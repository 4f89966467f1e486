//! Host page shortcuts

/// Shortcut recognized on the host page while no modal is open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostKey {
    /// `Shift+P`: play the presentation from the first slide
    LaunchViewer,
}

impl HostKey {
    /// Parse a DOM `KeyboardEvent.key` value plus shift state
    pub fn from_event(key: &str, shift: bool) -> Option<Self> {
        match key {
            "P" | "p" if shift => Some(HostKey::LaunchViewer),
            _ => None,
        }
    }
}
