//! Session runtime executor
//!
//! Bridges the two external push sources (the progress-event stream and the
//! externally-owned message list) plus client commands onto the synchronous
//! session core, executes transport-facing updates, and broadcasts every
//! observable change to the rendering collaborator.

use super::traits::ResearchTransport;
use crate::classifier::ProgressEvent;
use crate::effort::EffortLevel;
use crate::message::{AgentMessage, SubmitPayload};
use crate::session::{ResearchSession, SessionUpdate};
use crate::turn::{MessageMeta, TurnEvent};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Commands from the rendering collaborator.
#[derive(Debug, Clone)]
pub enum ClientCommand {
    /// Submit a new user query, starting a turn.
    Submit {
        query: String,
        effort: EffortLevel,
        model: String,
    },
    /// Cancel the in-flight turn.
    Cancel,
}

/// Event loop that drives one research session.
///
/// All session mutation happens on this single logical thread of control;
/// each handler runs to completion before the next arm fires.
pub struct SessionRuntime<T: ResearchTransport + 'static> {
    session: ResearchSession,
    transport: Arc<T>,
    command_rx: mpsc::Receiver<ClientCommand>,
    progress_rx: mpsc::Receiver<serde_json::Value>,
    messages_rx: watch::Receiver<Vec<AgentMessage>>,
    update_tx: broadcast::Sender<SessionUpdate>,
}

impl<T: ResearchTransport + 'static> SessionRuntime<T> {
    pub fn new(
        transport: T,
        command_rx: mpsc::Receiver<ClientCommand>,
        progress_rx: mpsc::Receiver<serde_json::Value>,
        messages_rx: watch::Receiver<Vec<AgentMessage>>,
        update_tx: broadcast::Sender<SessionUpdate>,
    ) -> Self {
        Self {
            session: ResearchSession::new(),
            transport: Arc::new(transport),
            command_rx,
            progress_rx,
            messages_rx,
            update_tx,
        }
    }

    /// Run until all input channels close. Returns the final session so
    /// callers can inspect the archive.
    pub async fn run(mut self) -> ResearchSession {
        tracing::info!("Starting session runtime");

        loop {
            tokio::select! {
                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command).await;
                }
                Some(raw) = self.progress_rx.recv() => {
                    self.handle_progress(&raw).await;
                }
                Ok(()) = self.messages_rx.changed() => {
                    self.handle_messages_changed().await;
                }
                else => break,
            }
        }

        tracing::info!("Session runtime stopped");
        self.session
    }

    async fn handle_command(&mut self, command: ClientCommand) {
        match command {
            ClientCommand::Submit {
                query,
                effort,
                model,
            } => {
                let payload = self.build_payload(query, effort, model);
                self.apply(TurnEvent::Submit { payload }).await;
            }
            ClientCommand::Cancel => {
                self.apply(TurnEvent::Cancel).await;
            }
        }
    }

    async fn handle_progress(&mut self, raw: &serde_json::Value) {
        let event = ProgressEvent::from_value(raw);
        tracing::debug!(?event, "Progress event");
        self.apply(TurnEvent::Progress(event)).await;
    }

    async fn handle_messages_changed(&mut self) {
        let last = self.messages_rx.borrow().last().map(MessageMeta::of);
        self.apply(TurnEvent::MessagesChanged { last }).await;
    }

    /// Assemble the submit payload: current message list plus the new human
    /// message, with the effort policy expanded to its integer parameters.
    fn build_payload(&self, query: String, effort: EffortLevel, model: String) -> SubmitPayload {
        let policy = effort.policy();
        let mut messages = self.messages_rx.borrow().clone();
        messages.push(AgentMessage::human(
            uuid::Uuid::new_v4().to_string(),
            query,
        ));
        SubmitPayload {
            messages,
            initial_search_query_count: policy.query_count,
            max_research_loops: policy.max_loops,
            reasoning_model: model,
        }
    }

    async fn apply(&mut self, event: TurnEvent) {
        let updates = match self.session.handle(event) {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "Turn event rejected");
                self.broadcast(SessionUpdate::Error {
                    message: e.to_string(),
                });
                return;
            }
        };

        for update in updates {
            match &update {
                SessionUpdate::SubmitRequest(payload) => {
                    if let Err(e) = self.transport.submit(payload).await {
                        tracing::error!(error = %e, "Transport submit failed");
                        self.broadcast(SessionUpdate::Error {
                            message: e.to_string(),
                        });
                    }
                }
                SessionUpdate::StopRequested => {
                    if let Err(e) = self.transport.stop().await {
                        tracing::error!(error = %e, "Transport stop failed");
                        self.broadcast(SessionUpdate::Error {
                            message: e.to_string(),
                        });
                    }
                }
                SessionUpdate::TurnArchived { turn_id } => {
                    tracing::info!(%turn_id, "Turn archived");
                }
                SessionUpdate::TimelineCleared | SessionUpdate::EntryAppended(_) => {}
                SessionUpdate::Error { message } => {
                    tracing::warn!(%message, "Session error");
                }
            }
            self.broadcast(update);
        }
    }

    fn broadcast(&self, update: SessionUpdate) {
        // No receivers is fine; the renderer may not be attached yet.
        let _ = self.update_tx.send(update);
    }
}
