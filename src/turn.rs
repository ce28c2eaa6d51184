//! Turn lifecycle state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! transition function maps (state, event) to a new state plus effects, and
//! never performs I/O itself.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{MessageMeta, TurnEvent};
pub use state::TurnState;
pub use transition::{transition, TransitionError, TransitionResult};
