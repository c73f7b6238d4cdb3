//! Follow service.

use chatter_common::{AppError, AppResult, IdGenerator};
use chatter_db::{
    entities::{follow, user},
    repositories::{FollowRepository, UserRepository},
};
use sea_orm::Set;

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub fn new(follow_repo: FollowRepository, user_repo: UserRepository) -> Self {
        Self {
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Follow a user. Returns the followed user for the response message.
    ///
    /// Following yourself fails before any edge lookup; following a user
    /// twice is a conflict, not a no-op.
    pub async fn follow(&self, follower_id: &str, target_id: &str) -> AppResult<user::Model> {
        let target = self.user_repo.get_by_id(target_id).await?;

        if follower_id == target.id {
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }

        if self.follow_repo.is_following(follower_id, &target.id).await? {
            return Err(AppError::Conflict("Already following".to_string()));
        }

        let model = follow::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower_id.to_string()),
            following_id: Set(target.id.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };

        // A lost duplicate-create race surfaces as the same conflict
        self.follow_repo.create(model).await?;

        Ok(target)
    }

    /// Unfollow a user. Returns the unfollowed user for the response
    /// message. Unfollowing a user who was never followed succeeds silently.
    pub async fn unfollow(&self, follower_id: &str, target_id: &str) -> AppResult<user::Model> {
        let target = self.user_repo.get_by_id(target_id).await?;

        self.follow_repo
            .delete_by_pair(follower_id, &target.id)
            .await?;

        Ok(target)
    }

    /// Check if a user is following another.
    pub async fn is_following(&self, follower_id: &str, target_id: &str) -> AppResult<bool> {
        self.follow_repo.is_following(follower_id, target_id).await
    }
}
