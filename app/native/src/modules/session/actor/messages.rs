//! Message types for the widget actor.

use tokio::sync::oneshot;

use crate::modules::session::coordinator::{Signal, Snapshot};

/// Messages sent to the widget actor.
#[derive(Debug)]
pub enum WidgetMessage {
    /// An input for the coordinator.
    Signal(Signal),

    /// Read the current dock and session state.
    Query { respond_to: oneshot::Sender<Snapshot> },

    /// Stop the actor, closing every surface.
    Shutdown,
}

impl WidgetMessage {
    /// Message name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Signal(signal) => signal.name(),
            Self::Query { .. } => "Query",
            Self::Shutdown => "Shutdown",
        }
    }
}

impl From<Signal> for WidgetMessage {
    fn from(signal: Signal) -> Self { Self::Signal(signal) }
}
