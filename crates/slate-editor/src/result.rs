//! Input result type

use serde::Serialize;

/// Result of pointer handling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// Input was consumed by the editor
    Handled,
    /// Input was not for the editor (pass through)
    Unhandled,
}
