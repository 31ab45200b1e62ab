#![allow(dead_code)]

use std::sync::Once;

use mutuals_core::{update, AppState, Effect, Msg, RelationEntry, RelationSnapshot, TimerId};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(mutuals_logging::initialize_for_tests);
}

pub fn entry(id: &str) -> RelationEntry {
    RelationEntry::new(
        id,
        format!("https://github.com/{id}"),
        format!("https://avatars.example/{id}.png"),
    )
}

pub fn snapshot(followers: &[&str], following: &[&str]) -> RelationSnapshot {
    RelationSnapshot {
        followers: followers.iter().map(|id| entry(id)).collect(),
        following: following.iter().map(|id| entry(id)).collect(),
    }
}

pub fn request_check(state: AppState, identity: &str, token: Option<&str>) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::CheckRequested {
            identity: identity.to_string(),
            credential: token.map(ToOwned::to_owned),
        },
    )
}

pub fn fetch_generation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchRelations { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("fetch effect")
}

pub fn scheduled_timer(effects: &[Effect]) -> TimerId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleTimer { timer, .. } => Some(*timer),
            _ => None,
        })
        .expect("schedule effect")
}

/// State after a successful check for `me`.
pub fn loaded(followers: &[&str], following: &[&str], token: Option<&str>) -> AppState {
    let (state, effects) = request_check(AppState::new(), "me", token);
    let generation = fetch_generation(&effects);
    let (state, _) = update(
        state,
        Msg::CheckCompleted {
            generation,
            result: Ok(snapshot(followers, following)),
        },
    );
    state
}

pub fn ids(list: &[RelationEntry]) -> Vec<&str> {
    list.iter().map(|e| e.identity.as_str()).collect()
}
