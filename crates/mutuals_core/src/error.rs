use thiserror::Error;

/// Failure of a whole check. Any of these aborts the check; no partial lists
/// are ever shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("please enter a user name")]
    Validation,
    #[error("user not found")]
    NotFound,
    #[error("request limit reached; try again later or use an access token")]
    RateLimited,
    #[error("error fetching data: http status {0}")]
    Transport(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Failure of a single follow/unfollow action. Scoped to one item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionFailure {
    #[error("an access token is required for this action")]
    MissingCredential,
    #[error("profile is private or deleted")]
    PrivateOrDeleted,
    #[error("remote error: http status {0}")]
    RemoteError(u16),
    #[error("network error: {0}")]
    Network(String),
}

impl ActionFailure {
    /// Permanent failures never re-offer the action control.
    pub fn is_permanent(&self) -> bool {
        matches!(self, ActionFailure::PrivateOrDeleted)
    }
}
