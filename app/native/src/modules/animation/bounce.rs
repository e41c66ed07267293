//! Chaotic bounce of the ball and the image preview.
//!
//! Both bodies launch in random directions and ricochet off the work area
//! walls, picking up a random sideways kick on every hit. After the active
//! phase they freeze briefly, the preview disappears, and the ball eases back
//! to its starting position, finally snapping onto it exactly.

use std::f64::consts::TAU;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::smallvec;

use super::easing::Easing;
use super::transition::Transition;
use super::{Action, Actions, Tick};
use crate::config::BounceConfig;
use crate::modules::geometry::{Axis, Point, Rect, Size};
use crate::modules::surface::Role;

/// A moving surface.
#[derive(Debug, Clone)]
struct Body {
    role: Role,
    position: Point,
    velocity: Point,
    size: Size,
    jitter: f64,
}

impl Body {
    fn launch(role: Role, position: Point, size: Size, speed: f64, jitter: f64, rng: &mut StdRng) -> Self {
        let angle = rng.random_range(0.0..TAU);
        Self {
            role,
            position,
            velocity: Point::new(angle.cos() * speed, angle.sin() * speed),
            size,
            jitter,
        }
    }

    /// Moves one tick and resolves wall hits on both axes.
    fn step(&mut self, bounds: &Rect, rng: &mut StdRng) {
        self.position = self.position.offset(self.velocity.x, self.velocity.y);

        for axis in [Axis::Horizontal, Axis::Vertical] {
            let value = self.position.along(axis);
            let extent = self.size.along(axis);
            let low = bounds.start(axis);
            let high = bounds.end(axis) - extent;

            if value <= low || value >= high {
                let cross = axis.cross();
                let kick = rng.random_range(-0.5..0.5) * self.jitter;

                self.velocity = self.velocity.with_along(axis, -self.velocity.along(axis));
                self.velocity = self.velocity.with_along(cross, self.velocity.along(cross) + kick);
                self.position = self.position.with_along(axis, bounds.clamp_span(axis, value, extent));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Pause,
    Return,
    Done,
}

/// Chaotic bounce program.
#[derive(Debug)]
pub struct ChaoticBounce {
    ball: Body,
    preview: Body,
    start: Point,
    end: Point,
    bounds: Rect,
    rng: StdRng,
    phase: Phase,
    active: Duration,
    pause: Duration,
    return_duration: Duration,
    tick: Duration,
}

impl ChaoticBounce {
    /// Plans a bounce starting from the ball frame `ball` with the preview
    /// at `preview_start`.
    #[must_use]
    pub fn new(
        ball: &Rect,
        preview_start: Point,
        preview_size: Size,
        screen: &Rect,
        config: &BounceConfig,
        mut rng: StdRng,
    ) -> Self {
        let start = ball.origin();
        let ball_body = Body::launch(
            Role::Ball,
            start,
            ball.size(),
            config.ball_speed,
            config.ball_jitter,
            &mut rng,
        );
        let preview_body = Body::launch(
            Role::Preview,
            preview_start,
            preview_size,
            config.preview_speed,
            config.preview_jitter,
            &mut rng,
        );

        Self {
            ball: ball_body,
            preview: preview_body,
            start,
            end: start,
            bounds: *screen,
            rng,
            phase: Phase::Active,
            active: config.duration(),
            pause: config.pause(),
            return_duration: config.return_duration(),
            tick: config.tick(),
        }
    }

    /// Plans a bounce with a generator seeded from `seed`.
    #[must_use]
    pub fn seeded(
        ball: &Rect,
        preview_start: Point,
        preview_size: Size,
        screen: &Rect,
        config: &BounceConfig,
        seed: u64,
    ) -> Self {
        Self::new(ball, preview_start, preview_size, screen, config, StdRng::seed_from_u64(seed))
    }

    /// Advances the bounce to `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> Tick {
        if elapsed < self.active {
            self.ball.step(&self.bounds, &mut self.rng);
            self.preview.step(&self.bounds, &mut self.rng);
            self.end = self.ball.position;

            return Tick::after(
                smallvec![
                    Action::Move(self.ball.role, self.ball.position),
                    Action::Move(self.preview.role, self.preview.position),
                ],
                self.tick,
            );
        }

        let settled = elapsed - self.active;
        if settled < self.pause {
            self.phase = Phase::Pause;
            return Tick::after(Actions::new(), self.pause - settled);
        }

        let returning = settled - self.pause;
        let mut actions = Actions::new();
        if matches!(self.phase, Phase::Active | Phase::Pause) {
            actions.push(Action::Hide(Role::Preview));
        }

        if returning < self.return_duration {
            self.phase = Phase::Return;
            let progress = returning.as_secs_f64() / self.return_duration.as_secs_f64();
            let position = Transition::new(self.end, self.start).position_at(progress, Easing::EaseOut);
            actions.push(Action::Move(Role::Ball, position));
            return Tick::after(actions, self.tick);
        }

        self.phase = Phase::Done;
        actions.push(Action::Move(Role::Ball, self.start));
        Tick::finished(actions)
    }
}
