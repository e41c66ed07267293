//! Point-to-point surface transitions.

use super::easing::{Easing, lerp};
use crate::modules::geometry::Point;

/// A surface moving from one position to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Starting position.
    pub from: Point,
    /// Target position.
    pub to: Point,
}

impl Transition {
    /// Creates a new transition.
    #[must_use]
    pub const fn new(from: Point, to: Point) -> Self { Self { from, to } }

    /// Position at `progress` along the eased curve.
    ///
    /// The endpoints are returned exactly, without interpolation error.
    #[must_use]
    pub fn position_at(&self, progress: f64, easing: Easing) -> Point {
        if progress <= 0.0 || progress.is_nan() {
            return self.from;
        }
        if progress >= 1.0 {
            return self.to;
        }

        let t = easing.apply(progress);
        Point::new(lerp(self.from.x, self.to.x, t), lerp(self.from.y, self.to.y, t))
    }
}
