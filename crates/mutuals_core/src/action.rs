use std::collections::BTreeMap;
use std::time::Duration;

use mutuals_logging::{mutuals_debug, mutuals_trace};

use crate::{
    ActionFailure, ActionKind, ActionState, Credential, Effect, Identity, Notice, RelationEntry,
    RelationStore, TimerId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTimings {
    /// Delay before a succeeded item is retired from display.
    pub grace: Duration,
    /// Delay before a transient failure re-offers the action.
    pub reset: Duration,
}

impl Default for ActionTimings {
    fn default() -> Self {
        Self {
            grace: Duration::from_millis(2000),
            reset: Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerPurpose {
    Retire,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActionSlot {
    kind: ActionKind,
    state: ActionState,
    /// Entry as it was listed when the action started.
    entry: RelationEntry,
    timer: Option<TimerId>,
}

/// Per-identity follow/unfollow lifecycle: Idle -> Pending -> Succeeded | Failed.
///
/// An identity without a slot is Idle. A slot lives from the moment the
/// action is accepted until its retire/reset timer fires, or until the next
/// snapshot replaces everything. While a slot exists, further requests for
/// the same identity are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionExecutor {
    timings: ActionTimings,
    slots: BTreeMap<Identity, ActionSlot>,
    timers: BTreeMap<TimerId, (Identity, TimerPurpose)>,
    next_timer: u64,
}

impl Default for ActionExecutor {
    fn default() -> Self {
        Self::new(ActionTimings::default())
    }
}

impl ActionExecutor {
    pub fn new(timings: ActionTimings) -> Self {
        Self {
            timings,
            slots: BTreeMap::new(),
            timers: BTreeMap::new(),
            next_timer: 1,
        }
    }

    pub fn state_of(&self, identity: &Identity) -> ActionState {
        self.slots
            .get(identity)
            .map(|slot| slot.state.clone())
            .unwrap_or_default()
    }

    /// Number of actions awaiting a remote reply.
    pub fn pending_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.state == ActionState::Pending)
            .count()
    }

    pub fn request(
        &mut self,
        store: &RelationStore,
        identity: Identity,
        kind: ActionKind,
        credential: Option<&Credential>,
    ) -> Vec<Effect> {
        if let Some(slot) = self.slots.get(&identity) {
            mutuals_debug!(
                "Ignoring {} for {}: already {:?}",
                kind,
                identity,
                slot.state
            );
            return Vec::new();
        }
        let Some(entry) = store.find(kind.source_list(), &identity) else {
            mutuals_debug!("Ignoring {} for {}: not listed", kind, identity);
            return Vec::new();
        };
        let Some(credential) = credential else {
            return vec![Effect::Present(Notice::ActionFailed {
                identity,
                kind,
                reason: ActionFailure::MissingCredential,
            })];
        };

        self.slots.insert(
            identity.clone(),
            ActionSlot {
                kind,
                state: ActionState::Pending,
                entry: entry.clone(),
                timer: None,
            },
        );
        vec![
            Effect::Present(Notice::ActionPending {
                identity: identity.clone(),
                kind,
            }),
            Effect::Mutate {
                identity,
                kind,
                credential: credential.clone(),
            },
        ]
    }

    pub fn complete(
        &mut self,
        store: &mut RelationStore,
        identity: Identity,
        kind: ActionKind,
        result: Result<(), ActionFailure>,
    ) -> Vec<Effect> {
        let entry = match self.slots.get(&identity) {
            Some(slot) if slot.kind == kind && slot.state == ActionState::Pending => {
                slot.entry.clone()
            }
            _ => {
                // Snapshot was replaced while the mutation was in flight.
                mutuals_debug!("Dropping stale {} completion for {}", kind, identity);
                return Vec::new();
            }
        };

        match result {
            Ok(()) => {
                match kind {
                    ActionKind::Follow => {
                        store.add_to_following(entry);
                    }
                    ActionKind::Unfollow => {
                        store.remove_from_following(&identity);
                    }
                }
                let timer = self.arm(&identity, TimerPurpose::Retire, ActionState::Succeeded);
                vec![
                    Effect::Present(Notice::ActionSucceeded {
                        identity,
                        kind,
                        counts: store.counts(),
                    }),
                    Effect::ScheduleTimer {
                        timer,
                        delay: self.timings.grace,
                    },
                ]
            }
            Err(failure) => {
                // DELETE on an absent relation is not a permanent condition.
                let reason = match (kind, failure) {
                    (ActionKind::Unfollow, ActionFailure::PrivateOrDeleted) => {
                        ActionFailure::RemoteError(404)
                    }
                    (_, failure) => failure,
                };
                let mut effects = vec![Effect::Present(Notice::ActionFailed {
                    identity: identity.clone(),
                    kind,
                    reason: reason.clone(),
                })];
                if reason.is_permanent() {
                    if let Some(slot) = self.slots.get_mut(&identity) {
                        slot.state = ActionState::Failed(reason);
                    }
                } else {
                    let timer = self.arm(&identity, TimerPurpose::Reset, ActionState::Failed(reason));
                    effects.push(Effect::ScheduleTimer {
                        timer,
                        delay: self.timings.reset,
                    });
                }
                effects
            }
        }
    }

    pub fn timer_fired(
        &mut self,
        store: &RelationStore,
        timer: TimerId,
        credential_present: bool,
    ) -> Vec<Effect> {
        let Some((identity, purpose)) = self.timers.remove(&timer) else {
            mutuals_trace!("Ignoring {}: cancelled or unknown", timer);
            return Vec::new();
        };
        let owned = self
            .slots
            .get(&identity)
            .is_some_and(|slot| slot.timer == Some(timer));
        if !owned {
            return Vec::new();
        }
        let Some(slot) = self.slots.remove(&identity) else {
            return Vec::new();
        };

        match purpose {
            TimerPurpose::Retire => {
                let mut effects = vec![Effect::Present(Notice::ItemRetired {
                    identity: identity.clone(),
                })];
                let list = slot.kind.source_list();
                let still_showing = self
                    .slots
                    .values()
                    .any(|other| other.kind == slot.kind && other.state == ActionState::Succeeded);
                if store.derived().list(list).is_empty() && !still_showing {
                    effects.push(Effect::Present(Notice::ListEmptied(list)));
                }
                effects
            }
            TimerPurpose::Reset => {
                if credential_present {
                    vec![Effect::Present(Notice::ActionReset {
                        identity,
                        kind: slot.kind,
                    })]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Forgets every slot and cancels outstanding timers.
    pub fn clear(&mut self) -> Vec<Effect> {
        self.slots.clear();
        std::mem::take(&mut self.timers)
            .into_keys()
            .map(|timer| Effect::CancelTimer { timer })
            .collect()
    }

    fn arm(&mut self, identity: &Identity, purpose: TimerPurpose, state: ActionState) -> TimerId {
        let timer = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(timer, (identity.clone(), purpose));
        if let Some(slot) = self.slots.get_mut(identity) {
            slot.state = state;
            slot.timer = Some(timer);
        }
        timer
    }
}
