//! Charge and launch: the ball flies to the screen centre, then hands over to
//! the overlay and stays hidden until the overlay is done.
//!
//! Unlike the other programs this one advances by a fixed progress step per
//! tick rather than by elapsed time, so a late tick slows the charge instead
//! of skipping ahead.

use std::time::Duration;

use smallvec::smallvec;

use super::easing::Easing;
use super::transition::Transition;
use super::{Action, Actions, Tick};
use crate::config::UltimateConfig;
use crate::events::{self, OverlayLaunch};
use crate::modules::geometry::{Rect, Size};
use crate::modules::surface::Role;

/// Charge and launch program.
#[derive(Debug, Clone)]
pub struct ChargeAndLaunch {
    path: Transition,
    ball_size: Size,
    screen: Rect,
    progress: f64,
    step: f64,
    start_delay: Duration,
    tick: Duration,
    restore_delay: Duration,
    launched_at: Option<Duration>,
}

impl ChargeAndLaunch {
    /// Plans a charge from the ball frame `ball` to the centre of `screen`.
    #[must_use]
    pub fn new(ball: &Rect, screen: &Rect, config: &UltimateConfig) -> Self {
        Self {
            path: Transition::new(ball.origin(), screen.centered(ball.size())),
            ball_size: ball.size(),
            screen: *screen,
            progress: 0.0,
            step: config.step(),
            start_delay: config.start_delay(),
            tick: config.tick(),
            restore_delay: config.restore_delay(),
            launched_at: None,
        }
    }

    /// Advances the charge to `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> Tick {
        if let Some(launched_at) = self.launched_at {
            let restore_at = launched_at + self.restore_delay;
            return if elapsed >= restore_at {
                Tick::finished(Actions::new())
            } else {
                Tick::after(Actions::new(), restore_at - elapsed)
            };
        }

        if elapsed < self.start_delay {
            return Tick::after(Actions::new(), self.start_delay - elapsed);
        }

        self.progress = (self.progress + self.step).min(1.0);
        if self.progress < 1.0 {
            let position = self.path.position_at(self.progress, Easing::EaseOut);
            return Tick::after(smallvec![Action::Move(Role::Ball, position)], self.tick);
        }

        self.launched_at = Some(elapsed);
        let center = self.path.to;
        let ball_center = Rect::from_parts(center, self.ball_size).center();
        let launch = OverlayLaunch::new(ball_center, &self.screen);

        Tick::after(
            smallvec![
                Action::Move(Role::Ball, center),
                Action::Notify(Role::Overlay, events::overlay::START_DESTRUCTION, launch.to_json()),
                Action::Hide(Role::Ball),
            ],
            self.restore_delay,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::animation::{Program, drive};
    use crate::modules::geometry::Point;

    fn screen() -> Rect { Rect::new(0.0, 0.0, 1920.0, 1080.0) }

    #[test]
    fn test_charge_reaches_exact_centre_then_launches() {
        let ball = Rect::new(1890.0, 920.0, 60.0, 60.0);
        let mut program = Program::from(ChargeAndLaunch::new(&ball, &screen(), &UltimateConfig::default()));
        let log = drive(&mut program);

        let moves: Vec<_> = log
            .iter()
            .filter_map(|(at, a)| match a {
                Action::Move(Role::Ball, p) => Some((*at, *p)),
                _ => None,
            })
            .collect();

        // First move after the start delay, 13 steps of 0.08 to reach 1.
        assert_eq!(moves[0].0, Duration::from_millis(100));
        assert_eq!(moves.len(), 13);
        assert_eq!(moves.last().unwrap().1, Point::new(930.0, 510.0));

        let launch_at = moves.last().unwrap().0;
        assert_eq!(launch_at, Duration::from_millis(100 + 12 * 16));

        let notify = log
            .iter()
            .find_map(|(_, a)| match a {
                Action::Notify(Role::Overlay, topic, payload) => Some((*topic, payload.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(notify.0, events::overlay::START_DESTRUCTION);
        assert_eq!(notify.1["ballX"], 960.0);
        assert_eq!(notify.1["ballY"], 540.0);
        assert_eq!(notify.1["screenWidth"], 1920.0);

        let hide_index = log.iter().position(|(_, a)| *a == Action::Hide(Role::Ball)).unwrap();
        assert_eq!(hide_index, log.len() - 1);

        // The program ends one restore delay after launch.
        let mut replay = ChargeAndLaunch::new(&ball, &screen(), &UltimateConfig::default());
        let mut elapsed = Duration::ZERO;
        loop {
            let tick = replay.advance(elapsed);
            match tick.next {
                Some(delay) => elapsed += delay,
                None => break,
            }
        }
        assert_eq!(elapsed, launch_at + Duration::from_secs(60));
    }

    #[test]
    fn test_charge_moves_monotonically_towards_centre() {
        let ball = Rect::new(0.0, 0.0, 60.0, 60.0);
        let mut program = ChargeAndLaunch::new(&ball, &screen(), &UltimateConfig::default());
        let mut last_x = -1.0;
        let mut elapsed = Duration::from_millis(100);
        for _ in 0..12 {
            let tick = program.advance(elapsed);
            let Action::Move(Role::Ball, p) = tick.actions[0] else {
                panic!("expected a ball move");
            };
            assert!(p.x > last_x);
            last_x = p.x;
            elapsed += tick.next.unwrap();
        }
    }
}
