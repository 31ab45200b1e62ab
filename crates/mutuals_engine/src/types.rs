use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Page size the upstream API documents as its maximum.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One item of a followers/following page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Followers,
    Following,
}

impl RelationKind {
    pub(crate) fn path_segment(self) -> &'static str {
        match self {
            RelationKind::Followers => "followers",
            RelationKind::Following => "following",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Follow,
    Unfollow,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Follow => write!(f, "follow"),
            MutationKind::Unfollow => write!(f, "unfollow"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationLists {
    pub followers: Vec<UserRecord>,
    pub following: Vec<UserRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CheckCompleted {
        generation: u64,
        result: Result<RelationLists, FetchError>,
    },
    MutationCompleted {
        login: String,
        kind: MutationKind,
        result: Result<(), MutationError>,
    },
    TimerFired {
        timer: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("not found")]
    NotFound,
    #[error("rate limited")]
    RateLimited,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("invalid url")]
    InvalidUrl,
    #[error("timeout")]
    Timeout,
    #[error("malformed page")]
    Decode,
    #[error("network error")]
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
}
