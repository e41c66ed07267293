//! Time-stepped animation programs.
//!
//! Each program is an explicit state machine. The owner calls
//! [`Program::advance`] with the time elapsed since the program started and
//! gets back a [`Tick`]: the surface actions to apply now and how long to wait
//! before the next call. A `Tick` without a delay means the program finished.
//!
//! Programs never sleep, spawn or touch surfaces themselves, so the same
//! program runs under the real-time actor, the synthetic-time simulator and
//! unit tests unchanged.
//!
//! - `easing` - cubic curves and the elastic rebound
//! - `transition` - point-to-point eased movement
//! - `spin` - content surface slams into the screen edges and back
//! - `bounce` - ball and preview ricochet around the screen
//! - `charge` - ball charges to the centre and launches the overlay
//! - `barrage` - ball hides while the overlay fires

mod barrage;
mod bounce;
mod charge;
mod easing;
mod spin;
mod transition;

use std::time::Duration;

pub use barrage::Barrage;
pub use bounce::ChaoticBounce;
pub use charge::ChargeAndLaunch;
pub use easing::{Easing, elastic_bounce, lerp};
use smallvec::SmallVec;
pub use spin::SpinCollision;
pub use transition::Transition;

use crate::modules::geometry::Point;
use crate::modules::surface::Role;

// ============================================================================
// Ticks
// ============================================================================

/// A surface operation requested by a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move the surface's top-left corner.
    Move(Role, Point),
    /// Show the surface without focusing it.
    Show(Role),
    /// Hide the surface.
    Hide(Role),
    /// Post a message to the surface.
    Notify(Role, &'static str, serde_json::Value),
}

/// Actions produced by a single tick. Ticks rarely carry more than three.
pub type Actions = SmallVec<[Action; 3]>;

/// Result of advancing a program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tick {
    /// Actions to apply now, in order.
    pub actions: Actions,
    /// Delay until the next advance, `None` once the program finished.
    pub next: Option<Duration>,
}

impl Tick {
    /// A tick that asks to be advanced again after `delay`.
    #[must_use]
    pub const fn after(actions: Actions, delay: Duration) -> Self { Self { actions, next: Some(delay) } }

    /// A final tick.
    #[must_use]
    pub const fn finished(actions: Actions) -> Self { Self { actions, next: None } }

    /// Whether the program is done.
    #[must_use]
    pub const fn is_finished(&self) -> bool { self.next.is_none() }
}

// ============================================================================
// Programs
// ============================================================================

/// Any animation program.
#[derive(Debug)]
pub enum Program {
    Spin(SpinCollision),
    Bounce(ChaoticBounce),
    Charge(ChargeAndLaunch),
    Barrage(Barrage),
}

impl Program {
    /// Advances the program to `elapsed` since it started.
    pub fn advance(&mut self, elapsed: Duration) -> Tick {
        match self {
            Self::Spin(program) => program.advance(elapsed),
            Self::Bounce(program) => program.advance(elapsed),
            Self::Charge(program) => program.advance(elapsed),
            Self::Barrage(program) => program.advance(elapsed),
        }
    }

    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Spin(_) => "spin",
            Self::Bounce(_) => "bounce",
            Self::Charge(_) => "charge",
            Self::Barrage(_) => "barrage",
        }
    }
}

impl From<SpinCollision> for Program {
    fn from(program: SpinCollision) -> Self { Self::Spin(program) }
}

impl From<ChaoticBounce> for Program {
    fn from(program: ChaoticBounce) -> Self { Self::Bounce(program) }
}

impl From<ChargeAndLaunch> for Program {
    fn from(program: ChargeAndLaunch) -> Self { Self::Charge(program) }
}

impl From<Barrage> for Program {
    fn from(program: Barrage) -> Self { Self::Barrage(program) }
}

/// Runs a program to completion with perfectly punctual ticks.
#[cfg(test)]
pub(crate) fn drive(program: &mut Program) -> Vec<(Duration, Action)> {
    let mut elapsed = Duration::ZERO;
    let mut log = Vec::new();

    for _ in 0..100_000 {
        let tick = program.advance(elapsed);
        log.extend(tick.actions.into_iter().map(|action| (elapsed, action)));
        match tick.next {
            Some(delay) => elapsed += delay,
            None => return log,
        }
    }

    panic!("{} did not finish", program.name());
}
