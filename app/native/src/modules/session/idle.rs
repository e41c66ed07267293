//! Single-shot inactivity countdown.

use std::time::{Duration, Instant};

/// Fires once after `timeout` without activity.
#[derive(Debug, Clone)]
pub struct IdleMonitor {
    timeout: Duration,
    enabled: bool,
    deadline: Option<Instant>,
}

impl IdleMonitor {
    /// Creates a disarmed monitor. Call [`reset`](Self::reset) to arm it.
    #[must_use]
    pub const fn new(timeout: Duration, enabled: bool) -> Self {
        Self { timeout, enabled, deadline: None }
    }

    /// Records activity: the monitor now fires `timeout` after `now`.
    pub fn reset(&mut self, now: Instant) {
        if self.enabled {
            self.deadline = Some(now + self.timeout);
        }
    }

    /// Disarms the monitor until the next [`reset`](Self::reset).
    pub const fn cancel(&mut self) { self.deadline = None; }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// When the monitor will fire, if armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> { self.deadline }
}
