//! Mutuals engine: remote API access, concurrent checks and timers.
mod check;
mod client;
mod engine;
mod fetch;
mod mutate;
mod scheduler;
mod types;

pub use check::fetch_relations;
pub use client::{ClientSettings, GitHubClient};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use fetch::RelationSource;
pub use mutate::RelationMutator;
pub use scheduler::Scheduler;
pub use types::{
    EngineEvent, FailureKind, FetchError, MutationError, MutationKind, RelationKind,
    RelationLists, UserRecord, DEFAULT_PAGE_SIZE,
};
