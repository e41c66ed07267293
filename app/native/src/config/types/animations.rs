//! Animation program configuration.
//!
//! All durations are in milliseconds. Defaults reproduce the stock feel of the
//! widget; changing them only alters pacing, never the phase structure.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for all animation programs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationsConfig {
    /// Edge collision spin of the content surface.
    pub spin: SpinConfig,

    /// Chaotic bounce of the ball and preview.
    pub bounce: BounceConfig,

    /// Charge-and-launch ("ultimate") effect.
    pub ultimate: UltimateConfig,

    /// Overlay barrage ("shotgun") effect.
    pub shotgun: ShotgunConfig,
}

/// Edge collision spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SpinConfig {
    /// Total duration.
    /// Default: 800
    pub duration: u64,

    /// Tick interval.
    /// Default: 8
    pub tick: u64,

    /// Elastic bounce amplitude in pixels when spinning sideways.
    /// Default: 50
    pub horizontal_intensity: f64,

    /// Elastic bounce amplitude in pixels when spinning up or down.
    /// Default: 60
    pub vertical_intensity: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration: 800,
            tick: 8,
            horizontal_intensity: 50.0,
            vertical_intensity: 60.0,
        }
    }
}

impl SpinConfig {
    /// Total duration.
    #[must_use]
    pub const fn duration(&self) -> Duration { Duration::from_millis(self.duration) }

    /// Tick interval, at least one millisecond.
    #[must_use]
    pub const fn tick(&self) -> Duration { tick_or_min(self.tick) }
}

/// Chaotic bounce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BounceConfig {
    /// Time the bodies spend ricocheting.
    /// Default: 5000
    pub duration: u64,

    /// Motionless pause before returning home.
    /// Default: 300
    pub pause: u64,

    /// Eased return of the ball to where it started.
    /// Default: 400
    pub return_duration: u64,

    /// Tick interval.
    /// Default: 6
    pub tick: u64,

    /// Ball speed in pixels per tick.
    /// Default: 70
    pub ball_speed: f64,

    /// Maximum perturbation applied to the ball on each wall hit.
    /// Default: 18
    pub ball_jitter: f64,

    /// Preview speed in pixels per tick.
    /// Default: 60
    pub preview_speed: f64,

    /// Maximum perturbation applied to the preview on each wall hit.
    /// Default: 15
    pub preview_jitter: f64,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            duration: 5000,
            pause: 300,
            return_duration: 400,
            tick: 6,
            ball_speed: 70.0,
            ball_jitter: 18.0,
            preview_speed: 60.0,
            preview_jitter: 15.0,
        }
    }
}

impl BounceConfig {
    /// Active phase duration.
    #[must_use]
    pub const fn duration(&self) -> Duration { Duration::from_millis(self.duration) }

    /// Pause phase duration.
    #[must_use]
    pub const fn pause(&self) -> Duration { Duration::from_millis(self.pause) }

    /// Return phase duration.
    #[must_use]
    pub const fn return_duration(&self) -> Duration { Duration::from_millis(self.return_duration) }

    /// Tick interval, at least one millisecond.
    #[must_use]
    pub const fn tick(&self) -> Duration { tick_or_min(self.tick) }
}

/// Charge and launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UltimateConfig {
    /// Delay before the ball starts charging.
    /// Default: 100
    pub start_delay: u64,

    /// Tick interval while charging.
    /// Default: 16
    pub tick: u64,

    /// Progress added per tick, in `(0, 1]`.
    /// Default: 0.08
    pub step: f64,

    /// Time the overlay owns the screen after launch.
    /// Default: 60000
    pub restore_delay: u64,
}

impl Default for UltimateConfig {
    fn default() -> Self {
        Self {
            start_delay: 100,
            tick: 16,
            step: 0.08,
            restore_delay: 60_000,
        }
    }
}

impl UltimateConfig {
    /// Charge start delay.
    #[must_use]
    pub const fn start_delay(&self) -> Duration { Duration::from_millis(self.start_delay) }

    /// Tick interval, at least one millisecond.
    #[must_use]
    pub const fn tick(&self) -> Duration { tick_or_min(self.tick) }

    /// Progress step, forced into `(0, 1]` so the charge always completes.
    #[must_use]
    pub fn step(&self) -> f64 {
        if self.step.is_finite() && self.step > 0.0 { self.step.min(1.0) } else { 0.08 }
    }

    /// Restoration delay after launch.
    #[must_use]
    pub const fn restore_delay(&self) -> Duration { Duration::from_millis(self.restore_delay) }
}

/// Overlay barrage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ShotgunConfig {
    /// Time the overlay owns the screen.
    /// Default: 28000
    pub duration: u64,
}

impl Default for ShotgunConfig {
    fn default() -> Self { Self { duration: 28_000 } }
}

impl ShotgunConfig {
    /// Barrage duration.
    #[must_use]
    pub const fn duration(&self) -> Duration { Duration::from_millis(self.duration) }
}

const fn tick_or_min(ms: u64) -> Duration { Duration::from_millis(if ms == 0 { 1 } else { ms }) }
