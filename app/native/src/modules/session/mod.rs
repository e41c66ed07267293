//! Trigger gate, gesture counting and the widget actor.
//!
//! - [`coordinator`] - owns dock state, surface slots and the running effect
//! - [`actor`] - tokio task driving the coordinator in real time
//! - [`gesture`] - single/double/triple press counting
//! - [`idle`] - inactivity countdown
//! - [`effect`] - the exclusive effect kinds

pub mod actor;
pub mod coordinator;
pub mod effect;
pub mod gesture;
pub mod idle;

pub use actor::{ActorError, WidgetActor, WidgetHandle, WidgetMessage};
pub use coordinator::{DockState, SessionCoordinator, Signal, Snapshot};
pub use effect::EffectKind;
pub use gesture::{ClickCounter, Gesture};
pub use idle::IdleMonitor;
