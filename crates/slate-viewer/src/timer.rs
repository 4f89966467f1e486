//! Single-shot timers on an injected millisecond clock

/// Inactivity period after which fullscreen controls hide
pub const CONTROL_FADE_MS: f64 = 3000.0;

/// A deadline armed at some `now_ms`.
///
/// Owners hold timers as `Option<Timer>`; dropping the value cancels it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timer {
    /// Fire time (ms timestamp)
    pub deadline_ms: f64,
}

impl Timer {
    /// Timer firing `delay_ms` after `now_ms`
    pub fn after(now_ms: f64, delay_ms: f64) -> Self {
        Self {
            deadline_ms: now_ms + delay_ms.max(0.0),
        }
    }

    /// Check if the deadline has passed
    #[inline]
    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms >= self.deadline_ms
    }
}
