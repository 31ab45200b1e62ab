use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use mutuals_core::{
    ActionFailure, ActionKind, CheckError, Effect, Identity, Msg, PresentationSink,
    RelationEntry, RelationSnapshot, TimerId,
};
use mutuals_engine::{
    ClientSettings, EngineEvent, EngineHandle, EventSink, FailureKind, FetchError,
    MutationError, MutationKind, RelationLists, UserRecord,
};
use mutuals_logging::{mutuals_debug, mutuals_info};

use super::app::AppEvent;

/// Runs core effects against the engine and the presentation sink.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, events: mpsc::Sender<AppEvent>) -> Result<Self> {
        let forwarder = Arc::new(MsgForwarder { tx: events });
        let engine = EngineHandle::new(settings, forwarder).context("failed to start engine")?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>, sink: &mut dyn PresentationSink) {
        for effect in effects {
            match effect {
                Effect::FetchRelations {
                    generation,
                    identity,
                    credential,
                } => {
                    mutuals_info!("FetchRelations #{} identity={}", generation, identity);
                    self.engine.check(
                        generation,
                        identity.as_str(),
                        credential.map(|c| c.expose().to_string()),
                    );
                }
                Effect::Mutate {
                    identity,
                    kind,
                    credential,
                } => {
                    mutuals_info!("Mutate {} identity={}", kind, identity);
                    self.engine.mutate(
                        identity.as_str(),
                        to_mutation_kind(kind),
                        credential.expose().to_string(),
                    );
                }
                Effect::ScheduleTimer { timer, delay } => {
                    mutuals_debug!("Schedule {} in {:?}", timer, delay);
                    self.engine.schedule(timer.0, delay);
                }
                Effect::CancelTimer { timer } => {
                    mutuals_debug!("Cancel {}", timer);
                    self.engine.cancel(timer.0);
                }
                Effect::Present(notice) => notice.deliver(sink),
            }
        }
    }
}

/// Turns engine completions into core messages on the app channel.
struct MsgForwarder {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgForwarder {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Core(to_msg(event)));
    }
}

pub(crate) fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CheckCompleted { generation, result } => Msg::CheckCompleted {
            generation,
            result: result.map(to_snapshot).map_err(to_check_error),
        },
        EngineEvent::MutationCompleted {
            login,
            kind,
            result,
        } => Msg::ActionCompleted {
            identity: Identity::new(login),
            kind: to_action_kind(kind),
            result: result.map_err(|err| to_action_failure(kind, err)),
        },
        EngineEvent::TimerFired { timer } => Msg::TimerFired {
            timer: TimerId(timer),
        },
    }
}

fn to_snapshot(lists: RelationLists) -> RelationSnapshot {
    RelationSnapshot {
        followers: lists.followers.into_iter().map(to_entry).collect(),
        following: lists.following.into_iter().map(to_entry).collect(),
    }
}

fn to_entry(user: UserRecord) -> RelationEntry {
    RelationEntry::new(user.login, user.html_url, user.avatar_url)
}

fn to_check_error(err: FetchError) -> CheckError {
    match err.kind {
        FailureKind::NotFound => CheckError::NotFound,
        FailureKind::RateLimited => CheckError::RateLimited,
        FailureKind::HttpStatus(code) => CheckError::Transport(code),
        FailureKind::Decode => CheckError::Decode(err.message),
        FailureKind::InvalidUrl | FailureKind::Timeout | FailureKind::Network => {
            CheckError::Network(err.message)
        }
    }
}

fn to_action_failure(kind: MutationKind, err: MutationError) -> ActionFailure {
    match (kind, err) {
        (MutationKind::Follow, MutationError::HttpStatus(404)) => ActionFailure::PrivateOrDeleted,
        (_, MutationError::HttpStatus(code)) => ActionFailure::RemoteError(code),
        (_, MutationError::InvalidUrl(message))
        | (_, MutationError::Timeout(message))
        | (_, MutationError::Network(message)) => ActionFailure::Network(message),
    }
}

fn to_mutation_kind(kind: ActionKind) -> MutationKind {
    match kind {
        ActionKind::Follow => MutationKind::Follow,
        ActionKind::Unfollow => MutationKind::Unfollow,
    }
}

fn to_action_kind(kind: MutationKind) -> ActionKind {
    match kind {
        MutationKind::Follow => ActionKind::Follow,
        MutationKind::Unfollow => ActionKind::Unfollow,
    }
}
