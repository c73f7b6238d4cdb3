//! Like service.

use chatter_common::{AppError, AppResult, IdGenerator};
use chatter_db::{
    entities::{comment_like, like},
    repositories::{CommentLikeRepository, CommentRepository, LikeRepository, PostRepository},
};
use sea_orm::Set;

/// Like service for business logic on post and comment likes.
#[derive(Clone)]
pub struct LikeService {
    like_repo: LikeRepository,
    comment_like_repo: CommentLikeRepository,
    post_repo: PostRepository,
    comment_repo: CommentRepository,
    id_gen: IdGenerator,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub fn new(
        like_repo: LikeRepository,
        comment_like_repo: CommentLikeRepository,
        post_repo: PostRepository,
        comment_repo: CommentRepository,
    ) -> Self {
        Self {
            like_repo,
            comment_like_repo,
            post_repo,
            comment_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Like a post. Liking a post twice is a conflict, not a no-op.
    pub async fn like_post(&self, user_id: &str, post_id: &str) -> AppResult<like::Model> {
        let post = self.post_repo.get_by_id(post_id).await?;

        if self.like_repo.has_liked(user_id, &post.id).await? {
            return Err(AppError::Conflict("Already liked".to_string()));
        }

        let model = like::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            post_id: Set(post.id),
            created_at: Set(chrono::Utc::now().into()),
        };

        // A lost duplicate-create race surfaces as the same conflict
        self.like_repo.create(model).await
    }

    /// Unlike a post. Unliking a post that was never liked succeeds silently.
    pub async fn unlike_post(&self, user_id: &str, post_id: &str) -> AppResult<()> {
        let post = self.post_repo.get_by_id(post_id).await?;
        self.like_repo.delete_by_pair(user_id, &post.id).await
    }

    /// Like a comment. Liking a comment twice is a conflict, not a no-op.
    pub async fn like_comment(
        &self,
        user_id: &str,
        comment_id: &str,
    ) -> AppResult<comment_like::Model> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;

        if self
            .comment_like_repo
            .has_liked(user_id, &comment.id)
            .await?
        {
            return Err(AppError::Conflict("Already liked".to_string()));
        }

        let model = comment_like::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            comment_id: Set(comment.id),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.comment_like_repo.create(model).await
    }

    /// Unlike a comment. Unliking a comment that was never liked succeeds
    /// silently.
    pub async fn unlike_comment(&self, user_id: &str, comment_id: &str) -> AppResult<()> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        self.comment_like_repo
            .delete_by_pair(user_id, &comment.id)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chatter_db::entities::{comment, post};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_post(id: &str, user_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            content: "hello".to_string(),
            image: None,
            video: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_comment(id: &str, user_id: &str, post_id: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            content: "Nice post".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_like(id: &str, user_id: &str, post_id: &str) -> like::Model {
        like::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_service(
        like_db: Arc<sea_orm::DatabaseConnection>,
        comment_like_db: Arc<sea_orm::DatabaseConnection>,
        post_db: Arc<sea_orm::DatabaseConnection>,
        comment_db: Arc<sea_orm::DatabaseConnection>,
    ) -> LikeService {
        LikeService::new(
            LikeRepository::new(like_db),
            CommentLikeRepository::new(comment_like_db),
            PostRepository::new(post_db),
            CommentRepository::new(comment_db),
        )
    }

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[tokio::test]
    async fn test_like_post_not_found() {
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(empty_db(), empty_db(), post_db, empty_db());

        let result = service.like_post("u1", "nonexistent").await;
        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected PostNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_like_post_twice_is_conflict() {
        let post = create_test_post("p1", "author1");
        let existing = create_test_like("l1", "u1", "p1");

        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = create_test_service(like_db, empty_db(), post_db, empty_db());

        let result = service.like_post("u1", "p1").await;
        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Already liked"),
            _ => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_unlike_post_never_liked_is_noop() {
        let post = create_test_post("p1", "author1");

        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(like_db, empty_db(), post_db, empty_db());

        service.unlike_post("u1", "p1").await.unwrap();
    }

    #[tokio::test]
    async fn test_like_comment_twice_is_conflict() {
        let comment = create_test_comment("c1", "author1", "p1");
        let existing = comment_like::Model {
            id: "cl1".to_string(),
            user_id: "u1".to_string(),
            comment_id: "c1".to_string(),
            created_at: Utc::now().into(),
        };

        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[comment]])
                .into_connection(),
        );
        let comment_like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = create_test_service(empty_db(), comment_like_db, empty_db(), comment_db);

        let result = service.like_comment("u1", "c1").await;
        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Already liked"),
            _ => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_like_comment_not_found() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(empty_db(), empty_db(), empty_db(), comment_db);

        let result = service.like_comment("u1", "nonexistent").await;
        match result {
            Err(AppError::CommentNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected CommentNotFound error"),
        }
    }
}
