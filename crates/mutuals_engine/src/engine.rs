use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use mutuals_logging::{mutuals_debug, mutuals_error};
use thiserror::Error;

use crate::{
    fetch_relations, ClientSettings, EngineEvent, FetchError, GitHubClient, MutationKind,
    RelationMutator, RelationSource, Scheduler,
};

/// Receiver of engine completions. Called from runtime worker threads.
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    Check {
        generation: u64,
        login: String,
        credential: Option<String>,
    },
    Mutate {
        login: String,
        kind: MutationKind,
        credential: String,
    },
    Schedule {
        timer: u64,
        delay: Duration,
    },
    Cancel {
        timer: u64,
    },
}

/// Front of the background IO thread.
///
/// Commands are queued without blocking; results arrive on the [`EventSink`]
/// given at construction. Dropping the handle stops the thread once queued
/// commands are drained.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client = Arc::new(GitHubClient::new(settings)?);
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let scheduler = Scheduler::new(runtime.handle().clone());
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Schedule { timer, delay } => {
                        let sink = sink.clone();
                        scheduler.schedule(timer, delay, move || {
                            sink.emit(EngineEvent::TimerFired { timer });
                        });
                    }
                    EngineCommand::Cancel { timer } => {
                        if !scheduler.cancel(timer) {
                            mutuals_debug!("Timer {} already gone", timer);
                        }
                    }
                    command => {
                        let client = client.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            handle_command(client.as_ref(), command, sink.as_ref()).await;
                        });
                    }
                }
            }
            mutuals_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn check(&self, generation: u64, login: impl Into<String>, credential: Option<String>) {
        self.send(EngineCommand::Check {
            generation,
            login: login.into(),
            credential,
        });
    }

    pub fn mutate(&self, login: impl Into<String>, kind: MutationKind, credential: String) {
        self.send(EngineCommand::Mutate {
            login: login.into(),
            kind,
            credential,
        });
    }

    pub fn schedule(&self, timer: u64, delay: Duration) {
        self.send(EngineCommand::Schedule { timer, delay });
    }

    pub fn cancel(&self, timer: u64) {
        self.send(EngineCommand::Cancel { timer });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            mutuals_error!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(client: &GitHubClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Check {
            generation,
            login,
            credential,
        } => {
            let source: &dyn RelationSource = client;
            let result = fetch_relations(source, &login, credential.as_deref()).await;
            sink.emit(EngineEvent::CheckCompleted { generation, result });
        }
        EngineCommand::Mutate {
            login,
            kind,
            credential,
        } => {
            let result = client.apply(&login, kind, &credential).await;
            sink.emit(EngineEvent::MutationCompleted {
                login,
                kind,
                result,
            });
        }
        EngineCommand::Schedule { .. } | EngineCommand::Cancel { .. } => {}
    }
}
