//! Events that drive the turn state machine

use crate::classifier::ProgressEvent;
use crate::message::{AgentMessage, MessageRole, SubmitPayload};

/// Events that trigger turn state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// A new user query is being submitted.
    Submit { payload: SubmitPayload },

    /// One raw progress event arrived from the transport stream.
    Progress(ProgressEvent),

    /// The externally-owned message list changed; only the last element's
    /// role and id are consulted.
    MessagesChanged { last: Option<MessageMeta> },

    /// The user requested cancellation of the in-flight turn.
    Cancel,

    /// Internal: the completed turn's snapshot has been written.
    SnapshotArchived,
}

/// The parts of the last message the completion check reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMeta {
    pub role: MessageRole,
    pub id: String,
}

impl MessageMeta {
    pub fn of(message: &AgentMessage) -> Self {
        Self {
            role: message.role,
            id: message.id.clone(),
        }
    }

    /// A final agent-authored answer carrying a usable identifier.
    pub fn is_final_answer(&self) -> bool {
        self.role == MessageRole::Ai && !self.id.is_empty()
    }
}
