//! Pure turn transition function
//!
//! Given the same state and event this always produces the same outputs,
//! with no I/O side effects. The completion check is level-triggered: it
//! runs after every progress event and every message-list change, so the
//! arrival order of the two completion signals does not matter.

use super::{Effect, MessageMeta, TurnEvent, TurnState};
use crate::activity::TurnId;
use crate::classifier::classify;
use thiserror::Error;

/// Result of a turn transition.
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during a transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("A turn is already in flight, cancel it before submitting again")]
    TurnInFlight,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function.
pub fn transition(
    state: &TurnState,
    event: TurnEvent,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Submission
        // ============================================================

        // Idle + Submit -> Streaming with a cleared timeline and latch
        (TurnState::Idle, TurnEvent::Submit { payload }) => {
            Ok(TransitionResult::new(TurnState::streaming())
                .with_effect(Effect::ClearTimeline)
                .with_effect(Effect::SubmitRequest { payload }))
        }

        (TurnState::Streaming { .. } | TurnState::Complete { .. }, TurnEvent::Submit { .. }) => {
            Err(TransitionError::TurnInFlight)
        }

        // ============================================================
        // Streaming: progress events and message-list changes
        // ============================================================

        (
            TurnState::Streaming {
                terminal_seen,
                final_message,
            },
            TurnEvent::Progress(progress),
        ) => {
            let classification = classify(&progress);
            let terminal_seen = *terminal_seen || classification.terminal;

            let mut result = completion_check(terminal_seen, final_message.clone());
            if let Some(entry) = classification.entry {
                // Append before any archive effect so the snapshot contains
                // the entry produced by the terminal event itself.
                result.effects.insert(0, Effect::append(entry));
            }
            Ok(result)
        }

        (
            TurnState::Streaming {
                terminal_seen,
                final_message,
            },
            TurnEvent::MessagesChanged { last },
        ) => {
            let final_message = match last {
                Some(meta) if meta.is_final_answer() => Some(TurnId::new(meta.id)),
                _ => final_message.clone(),
            };
            Ok(completion_check(*terminal_seen, final_message))
        }

        // Stale stream traffic outside a turn is tolerated (the transport
        // may still flush events after a cancel).
        (
            TurnState::Idle | TurnState::Complete { .. },
            TurnEvent::Progress(_) | TurnEvent::MessagesChanged { .. },
        ) => Ok(TransitionResult::new(state.clone())),

        // ============================================================
        // Snapshot archival
        // ============================================================

        // Complete + SnapshotArchived -> Idle, state fully reset
        (TurnState::Complete { .. }, TurnEvent::SnapshotArchived) => {
            Ok(TransitionResult::new(TurnState::Idle).with_effect(Effect::ClearTimeline))
        }

        (TurnState::Idle | TurnState::Streaming { .. }, TurnEvent::SnapshotArchived) => {
            Err(TransitionError::InvalidTransition(format!(
                "SnapshotArchived outside Complete (state {state:?})"
            )))
        }

        // ============================================================
        // Cancellation
        // ============================================================

        // Cancelled turns are never archived; all turn state is discarded.
        (TurnState::Streaming { .. } | TurnState::Complete { .. }, TurnEvent::Cancel) => {
            Ok(TransitionResult::new(TurnState::Idle)
                .with_effect(Effect::StopStream)
                .with_effect(Effect::ClearTimeline))
        }

        // Idempotent: cancelling with no turn in flight is a no-op.
        (TurnState::Idle, TurnEvent::Cancel) => Ok(TransitionResult::new(TurnState::Idle)),
    }
}

/// Level-triggered conjunction of the two completion signals.
fn completion_check(terminal_seen: bool, final_message: Option<TurnId>) -> TransitionResult {
    match final_message {
        Some(turn_id) if terminal_seen => {
            TransitionResult::new(TurnState::Complete {
                turn_id: turn_id.clone(),
            })
            .with_effect(Effect::archive(turn_id))
        }
        final_message => TransitionResult::new(TurnState::Streaming {
            terminal_seen,
            final_message,
        }),
    }
}
