//! Follow graph service

use std::sync::Arc;

use crate::{
    db::repositories::{FollowStore, UserStore},
    error::{AppError, AppResult},
};

/// Policy for the directed follow graph.
///
/// Both operations are idempotent at the storage layer: re-following an
/// already-followed user and unfollowing without an edge both succeed.
pub struct FollowService {
    follows: Arc<dyn FollowStore>,
    users: Arc<dyn UserStore>,
}

impl FollowService {
    pub fn new(follows: Arc<dyn FollowStore>, users: Arc<dyn UserStore>) -> Self {
        Self { follows, users }
    }

    /// Record that `follower_id` follows `followee_id`
    pub async fn follow(&self, follower_id: i64, followee_id: i64) -> AppResult<()> {
        if follower_id == followee_id {
            return Err(AppError::Validation("Cannot follow yourself".to_string()));
        }

        if !self.users.exists(followee_id).await? {
            return Err(AppError::NotFound("User to follow not found".to_string()));
        }

        self.follows.create(follower_id, followee_id).await
    }

    /// Remove the follow edge from `follower_id` to `followee_id`
    pub async fn unfollow(&self, follower_id: i64, followee_id: i64) -> AppResult<()> {
        if follower_id == followee_id {
            return Err(AppError::Validation("Cannot unfollow yourself".to_string()));
        }

        if !self.users.exists(followee_id).await? {
            return Err(AppError::NotFound("User to unfollow not found".to_string()));
        }

        self.follows.delete(follower_id, followee_id).await
    }
}
