use std::collections::HashSet;

use crate::{DerivedSets, RelationEntry};

/// Computes both asymmetric differences by identity, keeping input order.
pub fn reconcile(followers: &[RelationEntry], following: &[RelationEntry]) -> DerivedSets {
    let follower_ids: HashSet<&str> = followers.iter().map(|e| e.identity.as_str()).collect();
    let following_ids: HashSet<&str> = following.iter().map(|e| e.identity.as_str()).collect();

    let not_following_back = following
        .iter()
        .filter(|entry| !follower_ids.contains(entry.identity.as_str()))
        .cloned()
        .collect();
    let not_following = followers
        .iter()
        .filter(|entry| !following_ids.contains(entry.identity.as_str()))
        .cloned()
        .collect();

    DerivedSets {
        not_following_back,
        not_following,
    }
}
