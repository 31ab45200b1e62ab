use mutuals_logging::{mutuals_debug, mutuals_info, mutuals_warn};

use crate::{AppState, CheckError, Credential, Effect, Identity, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CheckRequested {
            identity,
            credential,
        } => {
            if state.is_loading() {
                mutuals_debug!("Check for {:?} ignored: another check is in flight", identity);
                return (state, vec![Effect::Present(Notice::CheckBusy)]);
            }
            let identity = identity.trim();
            if identity.is_empty() {
                state.set_error(CheckError::Validation);
                return (
                    state,
                    vec![Effect::Present(Notice::CheckFailed(CheckError::Validation))],
                );
            }

            let identity = Identity::new(identity);
            let credential = credential.as_deref().and_then(Credential::parse);
            let mut effects = {
                let (_, actions, _) = state.parts_mut();
                actions.clear()
            };
            let generation = state.start_check(identity.clone(), credential.clone());
            mutuals_info!(
                "Check #{} started for {} (authenticated: {})",
                generation,
                identity,
                credential.is_some()
            );
            effects.push(Effect::Present(Notice::CheckStarted));
            effects.push(Effect::FetchRelations {
                generation,
                identity,
                credential,
            });
            effects
        }
        Msg::CheckCompleted { generation, result } => {
            if generation != state.generation() || !state.is_loading() {
                mutuals_debug!("Dropping completion of superseded check #{}", generation);
                return (state, Vec::new());
            }
            match result {
                Ok(snapshot) => {
                    state.clear_error();
                    let (store, actions, _) = state.parts_mut();
                    let mut effects = actions.clear();
                    store.replace_snapshot(snapshot);
                    let counts = store.counts();
                    mutuals_info!(
                        "Check #{} loaded {} followers, {} following",
                        generation,
                        counts.followers,
                        counts.following
                    );
                    effects.push(Effect::Present(Notice::SnapshotReady {
                        counts,
                        derived: store.derived().clone(),
                    }));
                    effects
                }
                Err(err) => {
                    mutuals_warn!("Check #{} failed: {}", generation, err);
                    let (store, _, _) = state.parts_mut();
                    store.fail_loading();
                    state.set_error(err.clone());
                    vec![Effect::Present(Notice::CheckFailed(err))]
                }
            }
        }
        Msg::ActionRequested { identity, kind } => {
            let (store, actions, credential) = state.parts_mut();
            actions.request(store, identity, kind, credential)
        }
        Msg::ActionCompleted {
            identity,
            kind,
            result,
        } => {
            let (store, actions, _) = state.parts_mut();
            actions.complete(store, identity, kind, result)
        }
        Msg::TimerFired { timer } => {
            let (store, actions, credential) = state.parts_mut();
            actions.timer_fired(store, timer, credential.is_some())
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
