//! Effects produced by turn state transitions

use crate::activity::{ActivityEntry, TurnId};
use crate::message::SubmitPayload;

/// Effects to be executed after a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Clear the live timeline (turn start and post-archive reset).
    ClearTimeline,

    /// Append one classified entry to the live timeline.
    AppendEntry { entry: ActivityEntry },

    /// Freeze the live timeline into the snapshot store under `turn_id`.
    ArchiveSnapshot { turn_id: TurnId },

    /// Hand the submit payload to the transport to start the turn.
    SubmitRequest { payload: SubmitPayload },

    /// Tell the transport to stop delivering events for the in-flight turn.
    StopStream,
}

impl Effect {
    pub fn append(entry: ActivityEntry) -> Self {
        Effect::AppendEntry { entry }
    }

    pub fn archive(turn_id: TurnId) -> Self {
        Effect::ArchiveSnapshot { turn_id }
    }
}
