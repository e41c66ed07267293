//! Gesture and idle timing configuration.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default press-counting window in milliseconds.
const DEFAULT_PRESS_WINDOW_MS: u64 = 350;

/// Default idle timeout in milliseconds (five minutes).
const DEFAULT_IDLE_TIMEOUT_MS: u64 = 300_000;

/// Press counting on the ball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Window in milliseconds, opened by the first press, during which further
    /// presses are counted towards a double or triple gesture.
    /// Default: 350
    pub press_window: u64,
}

impl Default for GestureConfig {
    fn default() -> Self { Self { press_window: DEFAULT_PRESS_WINDOW_MS } }
}

impl GestureConfig {
    /// The press window as a duration.
    #[must_use]
    pub const fn window(&self) -> Duration { Duration::from_millis(self.press_window) }
}

/// Idle monitor that starts the bounce effect after a period of inactivity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct IdleConfig {
    /// Whether the idle bounce is enabled.
    /// Default: true
    pub enabled: bool,

    /// Inactivity in milliseconds before the idle bounce starts.
    /// Default: 300000 (5 minutes)
    pub timeout: u64,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: DEFAULT_IDLE_TIMEOUT_MS,
        }
    }
}

impl IdleConfig {
    /// Returns whether the idle monitor is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool { self.enabled && self.timeout > 0 }

    /// The idle timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration { Duration::from_millis(self.timeout) }
}
