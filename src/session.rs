//! Synchronous session core
//!
//! `ResearchSession` owns the live timeline, the snapshot archive, and the
//! turn state, and applies turn events run-to-completion: each call to
//! [`ResearchSession::handle`] finishes before the next event is processed,
//! so the COMPLETE transition is deterministic for a fixed arrival
//! interleaving. Effects that touch session state are applied internally;
//! transport-facing effects and observable changes are reported back as
//! [`SessionUpdate`]s for the caller to act on.

use crate::activity::{ActivityEntry, SnapshotStore, Timeline, TurnId};
use crate::message::SubmitPayload;
use crate::turn::{transition, Effect, TransitionError, TurnEvent, TurnState};

/// Outward-visible consequences of handling one turn event.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// Hand this payload to the transport to start the turn.
    SubmitRequest(SubmitPayload),
    /// Tell the transport to stop delivering events.
    StopRequested,
    /// The live timeline was cleared.
    TimelineCleared,
    /// An entry was appended to the live timeline.
    EntryAppended(ActivityEntry),
    /// A completed turn's timeline was frozen under `turn_id`.
    TurnArchived { turn_id: TurnId },
    /// A request was rejected or an internal step failed.
    Error { message: String },
}

/// Turn-lifetime state for one conversation session.
#[derive(Debug, Default)]
pub struct ResearchSession {
    state: TurnState,
    timeline: Timeline,
    snapshots: SnapshotStore,
}

impl ResearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current in-flight timeline, updated incrementally.
    pub fn live_timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Archived timelines, read-only per completed turn.
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn is_turn_in_flight(&self) -> bool {
        self.state.is_turn_in_flight()
    }

    /// Apply one turn event and any internally chained follow-ups.
    ///
    /// The snapshot-archive effect chains a `SnapshotArchived` event so the
    /// `Complete -> Idle` reset happens within the same call, before any
    /// later event can observe the intermediate state.
    pub fn handle(&mut self, event: TurnEvent) -> Result<Vec<SessionUpdate>, TransitionError> {
        let mut updates = Vec::new();
        let mut queue = vec![event];

        while let Some(current) = queue.pop() {
            let result = transition(&self.state, current)?;
            self.state = result.new_state;

            for effect in result.effects {
                if let Some(chained) = self.apply_effect(effect, &mut updates) {
                    queue.push(chained);
                }
            }
        }

        Ok(updates)
    }

    fn apply_effect(
        &mut self,
        effect: Effect,
        updates: &mut Vec<SessionUpdate>,
    ) -> Option<TurnEvent> {
        match effect {
            Effect::ClearTimeline => {
                if !self.timeline.is_empty() {
                    self.timeline.clear();
                    updates.push(SessionUpdate::TimelineCleared);
                }
                None
            }

            Effect::AppendEntry { entry } => {
                self.timeline.push(entry.clone());
                updates.push(SessionUpdate::EntryAppended(entry));
                None
            }

            Effect::ArchiveSnapshot { turn_id } => {
                // Copy by value: the snapshot must not alias the live
                // timeline, which is cleared right after.
                let frozen = self.timeline.clone();
                if self.snapshots.archive(turn_id.clone(), frozen) {
                    updates.push(SessionUpdate::TurnArchived { turn_id });
                }
                Some(TurnEvent::SnapshotArchived)
            }

            Effect::SubmitRequest { payload } => {
                updates.push(SessionUpdate::SubmitRequest(payload));
                None
            }

            Effect::StopStream => {
                updates.push(SessionUpdate::StopRequested);
                None
            }
        }
    }
}
