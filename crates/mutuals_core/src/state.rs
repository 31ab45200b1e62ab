use crate::view_model::{AppViewModel, EntryRowView};
use crate::{
    ActionExecutor, ActionKind, ActionTimings, CheckError, Credential, Identity, LoadState,
    RelationEntry, RelationStore,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    store: RelationStore,
    actions: ActionExecutor,
    identity: Option<Identity>,
    credential: Option<Credential>,
    generation: u64,
    last_error: Option<CheckError>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timings(timings: ActionTimings) -> Self {
        Self {
            actions: ActionExecutor::new(timings),
            ..Self::default()
        }
    }

    pub fn store(&self) -> &RelationStore {
        &self.store
    }

    pub fn actions(&self) -> &ActionExecutor {
        &self.actions
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> AppViewModel {
        let rows = |list: &[RelationEntry], kind: ActionKind| {
            list.iter()
                .map(|entry| EntryRowView {
                    identity: entry.identity.clone(),
                    display_name: entry.display_name.clone(),
                    profile_url: entry.profile_url.clone(),
                    avatar_url: entry.avatar_url.clone(),
                    action: kind,
                    state: self.actions.state_of(&entry.identity),
                })
                .collect()
        };
        let derived = self.store.derived();
        AppViewModel {
            load: self.store.load_state(),
            identity: self.identity.clone(),
            counts: self.store.counts(),
            not_following_back: rows(&derived.not_following_back, ActionKind::Unfollow),
            not_following: rows(&derived.not_following, ActionKind::Follow),
            actions_available: self.credential.is_some(),
            pending_actions: self.actions.pending_count(),
            last_error: self.last_error.as_ref().map(ToString::to_string),
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.store.load_state() == LoadState::Loading
    }

    pub(crate) fn start_check(&mut self, identity: Identity, credential: Option<Credential>) -> u64 {
        self.generation += 1;
        self.identity = Some(identity);
        self.credential = credential;
        self.last_error = None;
        self.store.begin_loading();
        self.generation
    }

    pub(crate) fn set_error(&mut self, err: CheckError) {
        self.last_error = Some(err);
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut RelationStore, &mut ActionExecutor, Option<&Credential>) {
        (&mut self.store, &mut self.actions, self.credential.as_ref())
    }
}
