//! Comment like repository.

use std::sync::Arc;

use crate::entities::{CommentLike, comment_like};
use chatter_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, SqlErr,
};

/// Comment like repository for database operations.
#[derive(Clone)]
pub struct CommentLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentLikeRepository {
    /// Create a new comment like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment like by user and comment.
    pub async fn find_by_pair(
        &self,
        user_id: &str,
        comment_id: &str,
    ) -> AppResult<Option<comment_like::Model>> {
        CommentLike::find()
            .filter(comment_like::Column::UserId.eq(user_id))
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has liked a comment.
    pub async fn has_liked(&self, user_id: &str, comment_id: &str) -> AppResult<bool> {
        Ok(self.find_by_pair(user_id, comment_id).await?.is_some())
    }

    /// Create a new comment like.
    ///
    /// A concurrent duplicate create loses the race against the
    /// (`user_id`, `comment_id`) unique index and is reported as the same
    /// conflict the existence pre-check produces.
    pub async fn create(&self, model: comment_like::ActiveModel) -> AppResult<comment_like::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("Already liked".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Delete a comment like by user and comment.
    /// Deleting an absent like is a no-op.
    pub async fn delete_by_pair(&self, user_id: &str, comment_id: &str) -> AppResult<()> {
        let like = self.find_by_pair(user_id, comment_id).await?;
        if let Some(l) = like {
            l.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Count likes on a comment.
    pub async fn count_by_comment(&self, comment_id: &str) -> AppResult<u64> {
        CommentLike::find()
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_comment_like(id: &str, user_id: &str, comment_id: &str) -> comment_like::Model {
        comment_like::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            comment_id: comment_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_pair_found() {
        let like = create_test_comment_like("cl1", "u1", "c1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .into_connection(),
        );

        let repo = CommentLikeRepository::new(db);
        let result = repo.find_by_pair("u1", "c1").await.unwrap();

        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_has_liked_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment_like::Model>::new()])
                .into_connection(),
        );

        let repo = CommentLikeRepository::new(db);
        assert!(!repo.has_liked("u1", "c2").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_by_pair_absent_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment_like::Model>::new()])
                .into_connection(),
        );

        let repo = CommentLikeRepository::new(db);
        repo.delete_by_pair("u1", "c1").await.unwrap();
    }
}
