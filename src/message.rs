//! Message list and submit payload wire contracts
//!
//! The message list itself is owned by the external transport collaborator;
//! the controller only reads the last element's role and id.

use serde::{Deserialize, Serialize};

/// Author of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User-authored query.
    Human,
    /// Agent-authored answer.
    Ai,
}

/// One message in the externally-owned conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub role: MessageRole,
    pub content: String,
}

impl AgentMessage {
    pub fn human(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Human,
            content: content.into(),
        }
    }

    pub fn ai(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Ai,
            content: content.into(),
        }
    }
}

/// Request payload handed to the transport to start a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitPayload {
    pub messages: Vec<AgentMessage>,
    pub initial_search_query_count: u32,
    pub max_research_loops: u32,
    pub reasoning_model: String,
}
