use std::fmt;

use crate::ActionFailure;

/// Handle of a relation-graph member. Compared exactly as returned upstream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Access token for authenticated requests. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Trims the raw input; blank input means no credential.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEntry {
    pub identity: Identity,
    pub display_name: String,
    pub profile_url: String,
    pub avatar_url: String,
}

impl RelationEntry {
    /// Entry whose display name is the handle itself.
    pub fn new(
        identity: impl Into<Identity>,
        profile_url: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        let identity = identity.into();
        Self {
            display_name: identity.as_str().to_string(),
            identity,
            profile_url: profile_url.into(),
            avatar_url: avatar_url.into(),
        }
    }
}

/// Both relation lists in upstream page order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationSnapshot {
    pub followers: Vec<RelationEntry>,
    pub following: Vec<RelationEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedSets {
    /// In `following` but not in `followers`.
    pub not_following_back: Vec<RelationEntry>,
    /// In `followers` but not in `following`.
    pub not_following: Vec<RelationEntry>,
}

impl DerivedSets {
    pub fn list(&self, kind: ListKind) -> &[RelationEntry] {
        match kind {
            ListKind::NotFollowingBack => &self.not_following_back,
            ListKind::NotFollowing => &self.not_following,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub followers: usize,
    pub following: usize,
    pub not_following_back: usize,
    pub not_following: usize,
}

/// The two derived lists a user can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    NotFollowingBack,
    NotFollowing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Follow,
    Unfollow,
}

impl ActionKind {
    /// The derived list an action of this kind operates on.
    pub fn source_list(self) -> ListKind {
        match self {
            ActionKind::Follow => ListKind::NotFollowing,
            ActionKind::Unfollow => ListKind::NotFollowingBack,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Follow => write!(f, "follow"),
            ActionKind::Unfollow => write!(f, "unfollow"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(ActionFailure),
}
