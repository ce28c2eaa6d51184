//! Property-based tests for the turn state machine
//!
//! These verify the session invariants hold across arbitrary event
//! sequences and signal interleavings.

use super::*;
use crate::activity::TurnId;
use crate::classifier::{classify, ProgressEvent, Source};
use crate::message::{MessageRole, SubmitPayload};
use crate::session::ResearchSession;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_payload() -> SubmitPayload {
    SubmitPayload {
        messages: vec![],
        initial_search_query_count: 3,
        max_research_loops: 3,
        reasoning_model: "test-model".to_string(),
    }
}

fn streaming_session() -> ResearchSession {
    let mut session = ResearchSession::new();
    session
        .handle(TurnEvent::Submit {
            payload: test_payload(),
        })
        .expect("submit from idle");
    session
}

fn ai_message_event(id: &str) -> TurnEvent {
    TurnEvent::MessagesChanged {
        last: Some(MessageMeta {
            role: MessageRole::Ai,
            id: id.to_string(),
        }),
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_source() -> impl Strategy<Value = Source> {
    (
        proptest::option::of("[a-zA-Z ]{1,20}"),
        proptest::option::of("[a-zA-Z0-9 ]{0,150}"),
    )
        .prop_map(|(title, snippet)| Source { title, snippet })
}

fn arb_string_list() -> impl Strategy<Value = Option<Vec<String>>> {
    proptest::option::of(proptest::collection::vec("[a-z ]{1,15}", 0..4))
}

fn arb_non_terminal_event() -> impl Strategy<Value = ProgressEvent> {
    prop_oneof![
        arb_string_list().prop_map(|query_list| ProgressEvent::GenerateQuery { query_list }),
        proptest::collection::vec(arb_source(), 0..5)
            .prop_map(|sources| ProgressEvent::WebResearch { sources }),
        (any::<bool>(), arb_string_list()).prop_map(|(is_sufficient, follow_up_queries)| {
            ProgressEvent::Reflection {
                is_sufficient,
                follow_up_queries,
            }
        }),
        Just(ProgressEvent::Unknown),
    ]
}

fn arb_progress_event() -> impl Strategy<Value = ProgressEvent> {
    prop_oneof![
        4 => arb_non_terminal_event(),
        1 => Just(ProgressEvent::FinalizeAnswer),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The live timeline holds exactly the entries produced by non-silent
    /// classifications, in input order, with length at most N.
    #[test]
    fn timeline_matches_classifications_in_order(
        events in proptest::collection::vec(arb_progress_event(), 0..20)
    ) {
        let mut session = streaming_session();

        let expected: Vec<_> = events
            .iter()
            .filter_map(|e| classify(e).entry)
            .collect();

        for event in events.iter().cloned() {
            session.handle(TurnEvent::Progress(event)).unwrap();
        }

        prop_assert!(session.live_timeline().len() <= events.len());
        prop_assert_eq!(session.live_timeline().entries(), expected.as_slice());
    }

    /// Submitting a new query always starts from an empty timeline with both
    /// latch flags cleared, regardless of prior turn activity.
    #[test]
    fn submit_always_resets_turn_state(
        prior_events in proptest::collection::vec(arb_progress_event(), 0..10)
    ) {
        let mut session = streaming_session();
        for event in prior_events {
            session.handle(TurnEvent::Progress(event)).unwrap();
        }
        // Return to Idle so the next submission is accepted.
        session.handle(TurnEvent::Cancel).unwrap();

        session
            .handle(TurnEvent::Submit { payload: test_payload() })
            .unwrap();

        prop_assert!(session.live_timeline().is_empty());
        prop_assert_eq!(session.state(), &TurnState::streaming());
    }

    /// The COMPLETE transition fires exactly when both signals have been
    /// observed, irrespective of their interleaving with other events.
    #[test]
    fn completion_is_order_independent(
        before in proptest::collection::vec(arb_non_terminal_event(), 0..6),
        between in proptest::collection::vec(arb_non_terminal_event(), 0..6),
        terminal_first in any::<bool>(),
    ) {
        let mut session = streaming_session();

        for event in before {
            session.handle(TurnEvent::Progress(event)).unwrap();
        }
        prop_assert!(session.snapshots().is_empty());

        let (first, second) = if terminal_first {
            (TurnEvent::Progress(ProgressEvent::FinalizeAnswer), ai_message_event("final-1"))
        } else {
            (ai_message_event("final-1"), TurnEvent::Progress(ProgressEvent::FinalizeAnswer))
        };

        session.handle(first).unwrap();
        prop_assert!(session.snapshots().is_empty());

        for event in between {
            session.handle(TurnEvent::Progress(event)).unwrap();
        }

        session.handle(second).unwrap();

        prop_assert_eq!(session.snapshots().len(), 1);
        prop_assert!(session.snapshots().contains(&TurnId::from("final-1")));
        prop_assert_eq!(session.state(), &TurnState::Idle);
        prop_assert!(session.live_timeline().is_empty());
    }

    /// Cancellation never produces a snapshot, even when one latch flag was
    /// already set.
    #[test]
    fn cancel_never_archives(
        events in proptest::collection::vec(arb_progress_event(), 0..10),
        latch_message in any::<bool>(),
    ) {
        let mut session = streaming_session();
        for event in events {
            session.handle(TurnEvent::Progress(event)).unwrap();
        }
        if latch_message && session.is_turn_in_flight() {
            // Half-latch via the message signal, but only while no terminal
            // event has completed the turn already.
            if matches!(session.state(), TurnState::Streaming { terminal_seen: false, .. }) {
                session.handle(ai_message_event("m-1")).unwrap();
            }
        }
        let snapshots_before = session.snapshots().len();

        session.handle(TurnEvent::Cancel).unwrap();

        prop_assert_eq!(session.snapshots().len(), snapshots_before);
        prop_assert!(session.live_timeline().is_empty());
        prop_assert_eq!(session.state(), &TurnState::Idle);
    }
}
