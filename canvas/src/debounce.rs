//! Trailing-edge debounce driven by caller-supplied timestamps.
//!
//! The engine marks the scene collection dirty on every mutation and
//! reschedules this timer; the write fires once the quiet interval elapses
//! without another mutation, so only the latest state is ever persisted.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

/// A cancellable one-shot deadline that moves back on every `schedule`.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    interval_ms: f64,
    deadline_ms: Option<f64>,
}

impl Debounce {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, deadline_ms: None }
    }

    /// Cancel any pending deadline and start a new one from `now_ms`.
    pub fn schedule(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + self.interval_ms);
    }

    /// Returns `true` exactly once, when the pending deadline has passed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline_ms.take().is_some()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }
}
