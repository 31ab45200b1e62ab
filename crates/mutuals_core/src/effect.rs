use std::fmt;
use std::time::Duration;

use crate::{ActionKind, Credential, Identity, Notice};

/// Handle of a deferred callback owned by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch followers and following concurrently; reply with `Msg::CheckCompleted`.
    FetchRelations {
        generation: u64,
        identity: Identity,
        credential: Option<Credential>,
    },
    /// Perform one follow/unfollow; reply with `Msg::ActionCompleted`.
    Mutate {
        identity: Identity,
        kind: ActionKind,
        credential: Credential,
    },
    /// Deliver `Msg::TimerFired` after `delay` unless cancelled first.
    ScheduleTimer { timer: TimerId, delay: Duration },
    CancelTimer { timer: TimerId },
    /// Forward a notice to the presentation sink.
    Present(Notice),
}
