use std::collections::HashMap;

use crate::{
    error::Result,
    gateway::{Gateway, RecordId},
    model::{FollowTarget, FollowedUser},
    service::followed_user::{find_followed_user, follow_user, unfollow_user},
};

use super::SliceStatus;

/// Usernames the current user follows, each at most once
#[derive(Debug, Clone, Default)]
pub struct FollowState {
    followed: Vec<String>,
    records: HashMap<String, RecordId>,
    pub status: SliceStatus,
}

impl FollowState {
    pub fn followed(&self) -> &[String] {
        &self.followed
    }
    pub fn is_following(&self, username: &str) -> bool {
        self.followed.iter().any(|followed| followed == username)
    }
    pub fn record_id(&self, username: &str) -> Option<RecordId> {
        self.records.get(username).copied()
    }

    pub fn follow(&mut self, username: &str) {
        if !self.is_following(username) {
            self.followed.push(username.to_string());
        }
    }

    pub fn unfollow(&mut self, username: &str) {
        self.followed.retain(|followed| followed != username);
        self.records.remove(username);
    }

    /// Flip membership; returns whether `username` is now followed
    pub fn toggle(&mut self, username: &str) -> bool {
        if self.is_following(username) {
            self.unfollow(username);
            false
        } else {
            self.follow(username);
            true
        }
    }

    pub fn pending(&mut self) {
        self.status.pending();
    }

    pub fn loaded(&mut self, users: Vec<FollowedUser>) {
        self.followed.clear();
        self.records.clear();
        for user in users {
            self.follow(&user.username);
            self.records.insert(user.username, user.id);
        }
        self.status.fulfilled();
    }

    pub fn followed_remote(&mut self, user: FollowedUser) {
        self.follow(&user.username);
        self.records.insert(user.username, user.id);
        self.status.fulfilled();
    }

    pub fn unfollowed_remote(&mut self, username: &str) {
        self.unfollow(username);
        self.status.fulfilled();
    }
}

/// Create or delete the follow record behind a toggle.
///
/// Returns the new record when following, `None` when unfollowing.
pub(super) async fn toggle_remote(
    gateway: &impl Gateway,
    owner: Option<&str>,
    target: FollowTarget,
    following: bool,
    known: Option<RecordId>,
) -> Result<Option<FollowedUser>> {
    if !following {
        return follow_user(gateway, target).await.map(Some);
    }

    let id = match known {
        Some(id) => Some(id),
        None => find_followed_user(gateway, owner, &target.username)
            .await?
            .map(|user| user.id),
    };
    if let Some(id) = id {
        unfollow_user(gateway, id).await?;
    }
    Ok(None)
}
