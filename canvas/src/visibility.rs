//! Auto-hiding chrome: visible on activity, hidden after a quiet interval.

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

/// Visibility of an auto-hiding panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// `{visible, hidden}` state machine driven by interaction timestamps.
#[derive(Debug, Clone, Copy)]
pub struct AutoHide {
    state: Visibility,
    last_activity_ms: f64,
    timeout_ms: f64,
}

impl AutoHide {
    /// Start visible, as if activity happened at `now_ms`.
    #[must_use]
    pub fn new(now_ms: f64, timeout_ms: f64) -> Self {
        Self { state: Visibility::Visible, last_activity_ms: now_ms, timeout_ms }
    }

    #[must_use]
    pub fn state(&self) -> Visibility {
        self.state
    }

    /// Record activity. Returns `true` if this made the panel reappear.
    pub fn on_activity(&mut self, now_ms: f64) -> bool {
        self.last_activity_ms = now_ms;
        let changed = self.state == Visibility::Hidden;
        self.state = Visibility::Visible;
        changed
    }

    /// Advance time. Returns `true` if this hid the panel.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.state == Visibility::Visible && now_ms - self.last_activity_ms >= self.timeout_ms {
            self.state = Visibility::Hidden;
            return true;
        }
        false
    }
}
