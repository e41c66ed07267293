//! Press counting on the ball.
//!
//! The first press opens a fixed window; presses inside it are counted. A
//! third press resolves immediately, otherwise the count resolves when the
//! window closes. Later presses never extend the window.

use std::time::{Duration, Instant};

/// A resolved press gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Single,
    Double,
    Triple,
}

/// Counts presses within a window.
#[derive(Debug, Clone)]
pub struct ClickCounter {
    window: Duration,
    count: u8,
    deadline: Option<Instant>,
}

impl ClickCounter {
    /// Creates a counter with the given window.
    #[must_use]
    pub const fn new(window: Duration) -> Self { Self { window, count: 0, deadline: None } }

    /// Records a press. Returns [`Gesture::Triple`] on the third press.
    ///
    /// Callers should [`poll`](Self::poll) first so an expired window
    /// resolves before a new one opens.
    pub fn press(&mut self, now: Instant) -> Option<Gesture> {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.window);
        }

        self.count = self.count.saturating_add(1);
        if self.count >= 3 {
            self.reset();
            return Some(Gesture::Triple);
        }

        None
    }

    /// Resolves the count once the window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<Gesture> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        let gesture = match self.count {
            1 => Some(Gesture::Single),
            2 => Some(Gesture::Double),
            _ => None,
        };
        self.reset();
        gesture
    }

    /// When the current window closes, if one is open.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> { self.deadline }

    /// Discards any pending presses.
    pub const fn reset(&mut self) {
        self.count = 0;
        self.deadline = None;
    }
}
