//! research_console - client core for a multi-step research agent
//!
//! Consumes the agent's asynchronous progress-event stream, reduces it into
//! a live activity timeline, detects turn completion via a two-signal latch,
//! and archives a frozen timeline per completed turn. Transport and
//! rendering are external collaborators reached through the seams in
//! [`runtime`].

pub mod activity;
pub mod classifier;
pub mod effort;
pub mod message;
pub mod runtime;
pub mod session;
pub mod turn;

pub use activity::{ActivityEntry, SnapshotStore, Timeline, TurnId};
pub use classifier::{classify, Classification, ProgressEvent};
pub use effort::{EffortLevel, EffortPolicy};
pub use message::{AgentMessage, MessageRole, SubmitPayload};
pub use runtime::{ClientCommand, ResearchTransport, SessionRuntime, TransportError};
pub use session::{ResearchSession, SessionUpdate};
pub use turn::{TurnEvent, TurnState};
