use crate::{ActionFailure, ActionKind, CheckError, Counts, DerivedSets, Identity, ListKind};

/// Receiver of everything the user should see.
///
/// Implemented by the presentation layer. The core never calls it directly:
/// `update` emits [`Notice`] values inside `Effect::Present`, and the host
/// delivers them in order with [`Notice::deliver`].
pub trait PresentationSink {
    fn on_check_started(&mut self);
    /// A check was requested while another one is still running.
    fn on_check_busy(&mut self);
    fn on_check_failed(&mut self, message: &str);
    fn on_snapshot_ready(&mut self, counts: Counts, derived: &DerivedSets);
    fn on_action_pending(&mut self, identity: &Identity, kind: ActionKind);
    fn on_action_succeeded(&mut self, identity: &Identity, kind: ActionKind, counts: Counts);
    fn on_action_failed(&mut self, identity: &Identity, kind: ActionKind, reason: &ActionFailure);
    /// A transient failure has cleared and the action may be offered again.
    fn on_action_reset(&mut self, identity: &Identity, kind: ActionKind);
    fn on_item_retired(&mut self, identity: &Identity);
    fn on_list_emptied(&mut self, list: ListKind);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    CheckStarted,
    CheckBusy,
    CheckFailed(CheckError),
    SnapshotReady {
        counts: Counts,
        derived: DerivedSets,
    },
    ActionPending {
        identity: Identity,
        kind: ActionKind,
    },
    ActionSucceeded {
        identity: Identity,
        kind: ActionKind,
        counts: Counts,
    },
    ActionFailed {
        identity: Identity,
        kind: ActionKind,
        reason: ActionFailure,
    },
    ActionReset {
        identity: Identity,
        kind: ActionKind,
    },
    ItemRetired {
        identity: Identity,
    },
    ListEmptied(ListKind),
}

impl Notice {
    pub fn deliver(&self, sink: &mut dyn PresentationSink) {
        match self {
            Notice::CheckStarted => sink.on_check_started(),
            Notice::CheckBusy => sink.on_check_busy(),
            Notice::CheckFailed(err) => sink.on_check_failed(&err.to_string()),
            Notice::SnapshotReady { counts, derived } => sink.on_snapshot_ready(*counts, derived),
            Notice::ActionPending { identity, kind } => sink.on_action_pending(identity, *kind),
            Notice::ActionSucceeded {
                identity,
                kind,
                counts,
            } => sink.on_action_succeeded(identity, *kind, *counts),
            Notice::ActionFailed {
                identity,
                kind,
                reason,
            } => sink.on_action_failed(identity, *kind, reason),
            Notice::ActionReset { identity, kind } => sink.on_action_reset(identity, *kind),
            Notice::ItemRetired { identity } => sink.on_item_retired(identity),
            Notice::ListEmptied(list) => sink.on_list_emptied(*list),
        }
    }
}
