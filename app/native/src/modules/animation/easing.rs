//! Easing curves and the edge rebound used by the spin and charge programs.

use std::f64::consts::PI;

/// Cubic easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic, slow start. Used for falls.
    EaseIn,
    /// Cubic, slow finish. Used for throws and returns.
    EaseOut,
    /// Cubic, slow at both ends. Used for the cross-screen slide.
    EaseInOut,
}

impl Easing {
    /// Maps `t` in `[0, 1]` onto the curve. Both endpoints are exact.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t.powi(3),
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut if t < 0.5 => 4.0 * t.powi(3),
            Self::EaseInOut => 1.0 - (2.0 - 2.0 * t).powi(3) / 2.0,
        }
    }
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 { (end - start).mul_add(t, start) }

/// Damped rebound offset `sin(tπ) * intensity * (1 - t)`.
///
/// Zero at both ends with a single peak a little before a third of the way in.
#[inline]
pub fn elastic_bounce(t: f64, intensity: f64) -> f64 { (t * PI).sin() * intensity * (1.0 - t) }
