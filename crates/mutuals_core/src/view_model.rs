use crate::{ActionKind, ActionState, Counts, Identity, LoadState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub load: LoadState,
    pub identity: Option<Identity>,
    pub counts: Counts,
    pub not_following_back: Vec<EntryRowView>,
    pub not_following: Vec<EntryRowView>,
    /// False without a credential: lists are shown but no action is offered.
    pub actions_available: bool,
    pub pending_actions: usize,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRowView {
    pub identity: Identity,
    pub display_name: String,
    pub profile_url: String,
    pub avatar_url: String,
    pub action: ActionKind,
    pub state: ActionState,
}
