use crate::{ActionFailure, ActionKind, CheckError, Identity, RelationSnapshot, TimerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked to compare followers and following for an identity.
    CheckRequested {
        identity: String,
        credential: Option<String>,
    },
    /// Both relation lists arrived, or the check failed as a whole.
    CheckCompleted {
        generation: u64,
        result: Result<RelationSnapshot, CheckError>,
    },
    /// User pressed follow/unfollow on a listed entry.
    ActionRequested { identity: Identity, kind: ActionKind },
    /// Remote mutation finished.
    ActionCompleted {
        identity: Identity,
        kind: ActionKind,
        result: Result<(), ActionFailure>,
    },
    /// A timer scheduled through `Effect::ScheduleTimer` elapsed.
    TimerFired { timer: TimerId },
    /// Fallback for placeholder wiring.
    NoOp,
}
