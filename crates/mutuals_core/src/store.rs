use crate::{reconcile, Counts, DerivedSets, Identity, ListKind, RelationEntry, RelationSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Empty,
    Loading,
    Loaded,
}

/// Single owner of the relation lists and the sets derived from them.
///
/// Lists only change through the transitions below, which keep two
/// invariants: `following` and `not_following` never share an identity, and
/// `not_following_back` is always a subset of `following`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationStore {
    load: LoadState,
    snapshot: RelationSnapshot,
    derived: DerivedSets,
}

impl RelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn followers(&self) -> &[RelationEntry] {
        &self.snapshot.followers
    }

    pub fn following(&self) -> &[RelationEntry] {
        &self.snapshot.following
    }

    pub fn derived(&self) -> &DerivedSets {
        &self.derived
    }

    pub fn counts(&self) -> Counts {
        Counts {
            followers: self.snapshot.followers.len(),
            following: self.snapshot.following.len(),
            not_following_back: self.derived.not_following_back.len(),
            not_following: self.derived.not_following.len(),
        }
    }

    /// Looks up an identity in one of the derived lists.
    pub fn find(&self, list: ListKind, identity: &Identity) -> Option<&RelationEntry> {
        self.derived
            .list(list)
            .iter()
            .find(|entry| &entry.identity == identity)
    }

    /// Drops the current lists while a new check is in flight.
    pub fn begin_loading(&mut self) {
        self.snapshot = RelationSnapshot::default();
        self.derived = DerivedSets::default();
        self.load = LoadState::Loading;
    }

    /// A failed check leaves nothing to display.
    pub fn fail_loading(&mut self) {
        self.snapshot = RelationSnapshot::default();
        self.derived = DerivedSets::default();
        self.load = LoadState::Empty;
    }

    pub fn replace_snapshot(&mut self, snapshot: RelationSnapshot) {
        self.derived = reconcile(&snapshot.followers, &snapshot.following);
        self.snapshot = snapshot;
        self.load = LoadState::Loaded;
    }

    /// Returns `false` when the identity was not being followed.
    pub fn remove_from_following(&mut self, identity: &Identity) -> bool {
        let before = self.snapshot.following.len();
        self.snapshot.following.retain(|e| &e.identity != identity);
        self.derived
            .not_following_back
            .retain(|e| &e.identity != identity);
        self.snapshot.following.len() != before
    }

    /// Returns `false` when the identity was already being followed.
    pub fn add_to_following(&mut self, entry: RelationEntry) -> bool {
        self.derived
            .not_following
            .retain(|e| e.identity != entry.identity);
        if self
            .snapshot
            .following
            .iter()
            .any(|e| e.identity == entry.identity)
        {
            return false;
        }
        self.snapshot.following.push(entry);
        true
    }
}
