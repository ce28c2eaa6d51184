//! Trait abstraction for the transport collaborator
//!
//! The transport owns the network stream and the message list; the runtime
//! only asks it to start or stop a turn. The trait seam enables testing the
//! runtime with mock implementations.

use crate::message::SubmitPayload;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by the transport collaborator.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External collaborator delivering the progress-event stream.
#[async_trait]
pub trait ResearchTransport: Send + Sync {
    /// Start a turn: hand off the payload for streaming.
    async fn submit(&self, payload: &SubmitPayload) -> Result<(), TransportError>;

    /// Cancel the in-flight turn; no further events should be delivered.
    async fn stop(&self) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: ResearchTransport + ?Sized> ResearchTransport for Arc<T> {
    async fn submit(&self, payload: &SubmitPayload) -> Result<(), TransportError> {
        (**self).submit(payload).await
    }

    async fn stop(&self) -> Result<(), TransportError> {
        (**self).stop().await
    }
}
