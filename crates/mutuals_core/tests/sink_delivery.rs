mod common;

use common::*;
use mutuals_core::{
    update, ActionFailure, ActionKind, CheckError, Counts, DerivedSets, Effect, Identity,
    ListKind, Msg, Notice, PresentationSink,
};

#[derive(Default)]
struct RecordingSink {
    calls: Vec<String>,
}

impl PresentationSink for RecordingSink {
    fn on_check_started(&mut self) {
        self.calls.push("started".into());
    }

    fn on_check_busy(&mut self) {
        self.calls.push("busy".into());
    }

    fn on_check_failed(&mut self, message: &str) {
        self.calls.push(format!("check failed: {message}"));
    }

    fn on_snapshot_ready(&mut self, counts: Counts, derived: &DerivedSets) {
        self.calls.push(format!(
            "snapshot {}/{} nfb={} nf={}",
            counts.followers,
            counts.following,
            derived.not_following_back.len(),
            derived.not_following.len()
        ));
    }

    fn on_action_pending(&mut self, identity: &Identity, kind: ActionKind) {
        self.calls.push(format!("pending {kind} {identity}"));
    }

    fn on_action_succeeded(&mut self, identity: &Identity, kind: ActionKind, counts: Counts) {
        self.calls
            .push(format!("succeeded {kind} {identity} following={}", counts.following));
    }

    fn on_action_failed(&mut self, identity: &Identity, kind: ActionKind, reason: &ActionFailure) {
        self.calls.push(format!("failed {kind} {identity}: {reason}"));
    }

    fn on_action_reset(&mut self, identity: &Identity, kind: ActionKind) {
        self.calls.push(format!("reset {kind} {identity}"));
    }

    fn on_item_retired(&mut self, identity: &Identity) {
        self.calls.push(format!("retired {identity}"));
    }

    fn on_list_emptied(&mut self, list: ListKind) {
        self.calls.push(format!("emptied {list:?}"));
    }
}

fn present(sink: &mut RecordingSink, effects: &[Effect]) {
    for effect in effects {
        if let Effect::Present(notice) = effect {
            notice.deliver(sink);
        }
    }
}

#[test]
fn notices_reach_the_sink_in_order() {
    init_logging();
    let mut sink = RecordingSink::default();

    let (state, effects) = request_check(mutuals_core::AppState::new(), "me", Some("tok"));
    present(&mut sink, &effects);
    let generation = fetch_generation(&effects);
    let (state, effects) = update(
        state,
        Msg::CheckCompleted {
            generation,
            result: Ok(snapshot(&["A", "B"], &["B", "C"])),
        },
    );
    present(&mut sink, &effects);

    let (state, effects) = update(
        state,
        Msg::ActionRequested {
            identity: Identity::new("C"),
            kind: ActionKind::Unfollow,
        },
    );
    present(&mut sink, &effects);
    let (state, effects) = update(
        state,
        Msg::ActionCompleted {
            identity: Identity::new("C"),
            kind: ActionKind::Unfollow,
            result: Ok(()),
        },
    );
    present(&mut sink, &effects);
    let (_state, effects) = update(
        state,
        Msg::TimerFired {
            timer: scheduled_timer(&effects),
        },
    );
    present(&mut sink, &effects);

    assert_eq!(
        sink.calls,
        vec![
            "started",
            "snapshot 2/2 nfb=1 nf=1",
            "pending unfollow C",
            "succeeded unfollow C following=1",
            "retired C",
            "emptied NotFollowingBack",
        ]
    );
}

#[test]
fn failure_notices_carry_readable_messages() {
    let mut sink = RecordingSink::default();

    Notice::CheckFailed(CheckError::Transport(502)).deliver(&mut sink);
    Notice::ActionFailed {
        identity: Identity::new("D"),
        kind: ActionKind::Follow,
        reason: ActionFailure::PrivateOrDeleted,
    }
    .deliver(&mut sink);
    Notice::ActionReset {
        identity: Identity::new("D"),
        kind: ActionKind::Follow,
    }
    .deliver(&mut sink);

    assert_eq!(
        sink.calls,
        vec![
            "check failed: error fetching data: http status 502",
            "failed follow D: profile is private or deleted",
            "reset follow D",
        ]
    );
}
