//! Slate studio
//!
//! Wires the pieces together for one sector's host screen:
//!
//! ```text
//! EditorEngine ──commit──► Presentation ──save──► StorageManager
//!                               │
//!                               └──clone──► PlaybackController
//! ```
//!
//! Every committed change is persisted immediately; the viewer plays a
//! snapshot and never writes back.

pub mod error;
pub mod keys;
pub mod studio;

pub use error::StudioError;
pub use keys::HostKey;
pub use studio::Studio;
