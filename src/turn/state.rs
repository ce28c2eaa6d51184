//! Turn state types

use crate::activity::TurnId;
use serde::{Deserialize, Serialize};

/// Lifecycle state of the current turn.
///
/// The completion latch lives inside `Streaming`: `terminal_seen` is set by
/// the terminal phase marker, `final_message` records the id of the final
/// agent-authored message once the message list materializes it. Both are
/// reset by construction whenever a new turn enters `Streaming`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnState {
    /// No turn in flight.
    #[default]
    Idle,

    /// Events arriving for an in-flight turn.
    Streaming {
        /// The terminal phase marker has been observed.
        terminal_seen: bool,
        /// Id of the final agent message, once present in the message list.
        final_message: Option<TurnId>,
    },

    /// Both completion signals observed; the snapshot is being archived.
    Complete { turn_id: TurnId },
}

impl TurnState {
    /// Fresh streaming state with both latch flags cleared.
    pub fn streaming() -> Self {
        TurnState::Streaming {
            terminal_seen: false,
            final_message: None,
        }
    }

    /// Whether a turn is currently in flight (streaming or archiving).
    pub fn is_turn_in_flight(&self) -> bool {
        !matches!(self, TurnState::Idle)
    }
}
