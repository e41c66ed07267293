//! Edge collision spin of the content surface.
//!
//! The content surface slides into one screen wall, rebounds, optionally
//! crosses to the opposite wall and rebounds again, then settles back exactly
//! where it started. The choreography depends only on the axis and side of
//! the dock edge and is expressed as a static segment table per edge.

use std::time::Duration;

use smallvec::smallvec;

use super::easing::{Easing, elastic_bounce, lerp};
use super::{Action, Tick};
use crate::config::SpinConfig;
use crate::modules::geometry::{Axis, Edge, EdgeSpec, Point, Rect, Side};
use crate::modules::surface::Role;

/// Reference positions on the spin axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Near,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    /// Eased travel between two anchors.
    Slide { from: Anchor, to: Anchor, easing: Easing },
    /// Damped rebound off a wall, pushing away from it.
    Rebound { wall: Anchor },
}

/// A motion that lasts until `until` (fraction of the whole spin).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    until: f64,
    motion: Motion,
}

const fn slide(until: f64, from: Anchor, to: Anchor, easing: Easing) -> Segment {
    Segment { until, motion: Motion::Slide { from, to, easing } }
}

const fn rebound(until: f64, wall: Anchor) -> Segment { Segment { until, motion: Motion::Rebound { wall } } }

/// Docked left or right: far wall, near wall, home.
const SIDEWAYS: &[Segment] = &[
    slide(0.3, Anchor::Start, Anchor::Far, Easing::EaseOut),
    rebound(0.4, Anchor::Far),
    slide(0.7, Anchor::Far, Anchor::Near, Easing::EaseInOut),
    rebound(0.8, Anchor::Near),
    slide(1.0, Anchor::Near, Anchor::Start, Easing::EaseOut),
];

/// Docked top: fall to the bottom and come back up.
const DROP: &[Segment] = &[
    slide(0.35, Anchor::Start, Anchor::Far, Easing::EaseIn),
    rebound(0.5, Anchor::Far),
    slide(1.0, Anchor::Far, Anchor::Start, Easing::EaseOut),
];

/// Docked bottom: thrown to the top and falling back.
const TOSS: &[Segment] = &[
    slide(0.35, Anchor::Start, Anchor::Near, Easing::EaseOut),
    rebound(0.5, Anchor::Near),
    slide(1.0, Anchor::Near, Anchor::Start, Easing::EaseIn),
];

/// Edge collision spin program.
#[derive(Debug, Clone)]
pub struct SpinCollision {
    start: Point,
    axis: Axis,
    near: f64,
    far: f64,
    plan: &'static [Segment],
    intensity: f64,
    duration: Duration,
    tick: Duration,
}

impl SpinCollision {
    /// Plans a spin of the content surface whose current frame is `content`.
    #[must_use]
    pub fn new(edge: Edge, content: &Rect, screen: &Rect, config: &SpinConfig) -> Self {
        let EdgeSpec { axis, side } = edge.spec();
        let (plan, intensity) = match (axis, side) {
            (Axis::Horizontal, _) => (SIDEWAYS, config.horizontal_intensity),
            (Axis::Vertical, Side::Near) => (DROP, config.vertical_intensity),
            (Axis::Vertical, Side::Far) => (TOSS, config.vertical_intensity),
        };

        Self {
            start: content.origin(),
            axis,
            near: screen.start(axis),
            far: screen.end(axis) - content.extent(axis),
            plan,
            intensity,
            duration: config.duration(),
            tick: config.tick(),
        }
    }

    /// Where the spin started (and ends).
    #[must_use]
    pub const fn start(&self) -> Point { self.start }

    const fn anchor(&self, anchor: Anchor) -> f64 {
        match anchor {
            Anchor::Start => self.start.along(self.axis),
            Anchor::Near => self.near,
            Anchor::Far => self.far,
        }
    }

    /// Position of the content surface at `progress` in `[0, 1]`.
    ///
    /// Progress at or outside either end yields the start position exactly.
    #[must_use]
    pub fn position_at(&self, progress: f64) -> Point {
        if progress <= 0.0 || progress >= 1.0 || progress.is_nan() {
            return self.start;
        }

        let mut lower = 0.0;
        for segment in self.plan {
            if progress < segment.until {
                let t = (progress - lower) / (segment.until - lower);
                return self.start.with_along(self.axis, self.offset(segment.motion, t));
            }
            lower = segment.until;
        }

        self.start
    }

    fn offset(&self, motion: Motion, t: f64) -> f64 {
        match motion {
            Motion::Slide { from, to, easing } => {
                lerp(self.anchor(from), self.anchor(to), easing.apply(t))
            }
            Motion::Rebound { wall } => {
                let push = elastic_bounce(t, self.intensity);
                match wall {
                    Anchor::Far => self.far - push,
                    Anchor::Near | Anchor::Start => self.anchor(wall) + push,
                }
            }
        }
    }

    /// Advances the spin to `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> Tick {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        if progress >= 1.0 {
            return Tick::finished(smallvec![Action::Move(Role::Content, self.start)]);
        }

        Tick::after(smallvec![Action::Move(Role::Content, self.position_at(progress))], self.tick)
    }
}
