//! Mutuals core: pure state machine for comparing followers and following.
//!
//! Nothing in this crate performs IO. Requests arrive as [`Msg`] values, and
//! [`update`] answers with [`Effect`]s that the host runs (network calls,
//! timers, presentation notices).
mod action;
mod effect;
mod error;
mod model;
mod msg;
mod reconcile;
mod sink;
mod state;
mod store;
mod update;
mod view_model;

pub use action::{ActionExecutor, ActionTimings};
pub use effect::{Effect, TimerId};
pub use error::{ActionFailure, CheckError};
pub use model::{
    ActionKind, ActionState, Counts, Credential, DerivedSets, Identity, ListKind, RelationEntry,
    RelationSnapshot,
};
pub use msg::Msg;
pub use reconcile::reconcile;
pub use sink::{Notice, PresentationSink};
pub use state::AppState;
pub use store::{LoadState, RelationStore};
pub use update::update;
pub use view_model::{AppViewModel, EntryRowView};
