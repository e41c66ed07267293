//! Handle for communicating with the widget actor.
//!
//! The `WidgetHandle` is cheap to clone; every host callback (pointer, drag,
//! shortcut, surface loaded) holds one and forwards its input as a [`Signal`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use super::messages::WidgetMessage;
use crate::modules::session::coordinator::{Signal, Snapshot};

/// Error types for actor communication.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// Failed to send message to actor.
    #[error("Failed to send message to actor: channel closed")]
    SendFailed,

    /// Failed to receive response from actor.
    #[error("Failed to receive response from actor: channel closed")]
    ReceiveFailed,

    /// Query timed out.
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
}

/// Handle for communicating with the widget actor.
#[derive(Clone, Debug)]
pub struct WidgetHandle {
    sender: mpsc::Sender<WidgetMessage>,
}

impl WidgetHandle {
    pub(crate) const fn new(sender: mpsc::Sender<WidgetMessage>) -> Self { Self { sender } }

    /// Send a signal without waiting for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed or full.
    pub fn send(&self, signal: Signal) -> Result<(), ActorError> {
        self.sender.try_send(signal.into()).map_err(|_| ActorError::SendFailed)
    }

    /// Send a signal, waiting for buffer space.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed.
    pub async fn send_async(&self, signal: Signal) -> Result<(), ActorError> {
        self.sender.send(signal.into()).await.map_err(|_| ActorError::SendFailed)
    }

    /// Read the current dock and session state.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed, or
    /// [`ActorError::ReceiveFailed`] if the actor dropped the request.
    pub async fn query(&self) -> Result<Snapshot, ActorError> {
        let (tx, rx) = oneshot::channel();

        self.sender
            .send(WidgetMessage::Query { respond_to: tx })
            .await
            .map_err(|_| ActorError::SendFailed)?;

        rx.await.map_err(|_| ActorError::ReceiveFailed)
    }

    /// [`Self::query`] with a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Timeout`] if the actor does not answer in time,
    /// or any error from [`Self::query`].
    pub async fn query_timeout(&self, timeout: Duration) -> Result<Snapshot, ActorError> {
        tokio::time::timeout(timeout, self.query())
            .await
            .map_err(|_| ActorError::Timeout(timeout))?
    }

    /// Ask the actor to stop.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the actor already stopped.
    pub async fn shutdown(&self) -> Result<(), ActorError> {
        self.sender.send(WidgetMessage::Shutdown).await.map_err(|_| ActorError::SendFailed)
    }

    /// Whether the actor has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool { self.sender.is_closed() }
}
