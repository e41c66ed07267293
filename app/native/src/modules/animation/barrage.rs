//! Barrage: the ball hides and the overlay fires at its last position.

use std::time::Duration;

use smallvec::smallvec;

use super::{Action, Actions, Tick};
use crate::config::ShotgunConfig;
use crate::events::{self, OverlayLaunch};
use crate::modules::geometry::Rect;
use crate::modules::surface::Role;

/// Barrage program.
#[derive(Debug, Clone)]
pub struct Barrage {
    launch: OverlayLaunch,
    duration: Duration,
    fired: bool,
}

impl Barrage {
    /// Plans a barrage aimed at the centre of the ball frame `ball`.
    #[must_use]
    pub fn new(ball: &Rect, screen: &Rect, config: &ShotgunConfig) -> Self {
        Self {
            launch: OverlayLaunch::new(ball.center(), screen),
            duration: config.duration(),
            fired: false,
        }
    }

    /// Advances the barrage to `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> Tick {
        if !self.fired {
            self.fired = true;
            return Tick::after(
                smallvec![
                    Action::Hide(Role::Ball),
                    Action::Notify(Role::Overlay, events::overlay::START_SHOTGUN, self.launch.to_json()),
                ],
                self.duration.saturating_sub(elapsed),
            );
        }

        if elapsed >= self.duration {
            Tick::finished(Actions::new())
        } else {
            Tick::after(Actions::new(), self.duration - elapsed)
        }
    }
}
