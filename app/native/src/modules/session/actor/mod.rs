//! Widget actor.
//!
//! The actor owns the [`SessionCoordinator`] and processes one message or
//! timer expiry at a time. Between messages it sleeps until the coordinator's
//! next deadline, so no timer ever runs on its own task.
//!
//! # Panic Recovery
//!
//! A panic while handling a signal is caught and logged, and the actor keeps
//! serving. The coordinator state may be partially updated afterwards.

mod handle;
mod messages;

use std::panic::{AssertUnwindSafe, catch_unwind};

pub use handle::{ActorError, WidgetHandle};
pub use messages::WidgetMessage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::coordinator::SessionCoordinator;
use crate::modules::surface::Surfaces;

/// Channel buffer size for the widget actor.
const CHANNEL_BUFFER_SIZE: usize = 256;

/// The task that owns all widget state.
pub struct WidgetActor<S: Surfaces> {
    coordinator: SessionCoordinator<S>,
    receiver: mpsc::Receiver<WidgetMessage>,
}

impl<S> WidgetActor<S>
where
    S: Surfaces + Send + 'static,
{
    /// Spawns the actor on the current tokio runtime.
    ///
    /// The join handle yields the coordinator back once the actor stops, so
    /// callers can inspect the host afterwards.
    #[must_use]
    pub fn spawn(coordinator: SessionCoordinator<S>) -> (WidgetHandle, JoinHandle<SessionCoordinator<S>>) {
        tracing::debug!("spawning widget actor");
        let (sender, receiver) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let actor = Self { coordinator, receiver };
        let task = tokio::spawn(actor.run());
        (WidgetHandle::new(sender), task)
    }

    async fn run(mut self) -> SessionCoordinator<S> {
        self.coordinator.start(now());

        loop {
            let deadline = self.coordinator.next_deadline();

            tokio::select! {
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else {
                        tracing::debug!("widget actor channel closed");
                        break;
                    };
                    let name = msg.name();
                    tracing::trace!(kind = name, "widget actor message");

                    match msg {
                        WidgetMessage::Shutdown => {
                            tracing::debug!("widget actor received shutdown message");
                            break;
                        }
                        WidgetMessage::Query { respond_to } => {
                            // The caller may have given up waiting.
                            let _ = respond_to.send(self.coordinator.snapshot());
                        }
                        WidgetMessage::Signal(signal) => {
                            self.guarded(name, |coordinator| coordinator.handle(signal, now()));
                        }
                    }
                }
                () = sleep_until(deadline) => {
                    self.guarded("poll", |coordinator| coordinator.poll(now()));
                }
            }
        }

        self.coordinator.shutdown();
        self.coordinator
    }

    /// Runs `f` against the coordinator, surviving a panic.
    fn guarded(&mut self, name: &str, f: impl FnOnce(&mut SessionCoordinator<S>)) {
        let coordinator = &mut self.coordinator;
        let result = catch_unwind(AssertUnwindSafe(|| f(coordinator)));

        if let Err(panic_info) = result {
            let panic_msg = panic_info
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());

            tracing::error!(signal = name, panic = %panic_msg, "widget actor recovered from panic");
        }
    }
}

/// Current time on the runtime clock, which tests can pause and advance.
fn now() -> std::time::Instant { Instant::now().into_std() }

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
