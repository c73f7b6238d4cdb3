//! Comment service.

use std::collections::HashMap;

use chatter_common::{AppError, AppResult, IdGenerator};
use chatter_db::{
    entities::{comment, user},
    repositories::{CommentLikeRepository, CommentRepository, PostRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    comment_like_repo: CommentLikeRepository,
    post_repo: PostRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentInput {
    #[validate(length(min = 1, max = 5000, message = "Content must not be empty."))]
    pub content: String,
}

/// Input for updating a comment.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCommentInput {
    #[validate(length(min = 1, max = 5000, message = "Content must not be empty."))]
    pub content: Option<String>,
}

/// A comment annotated for a specific viewer.
#[derive(Debug, Clone)]
pub struct CommentWithMeta {
    pub comment: comment::Model,
    pub author: user::Model,
    pub likes_count: u64,
    pub has_liked: bool,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(
        comment_repo: CommentRepository,
        comment_like_repo: CommentLikeRepository,
        post_repo: PostRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            comment_repo,
            comment_like_repo,
            post_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List a post's comments, oldest first, annotated for the viewer.
    pub async fn list_for_post(
        &self,
        post_id: &str,
        viewer: Option<&str>,
    ) -> AppResult<Vec<CommentWithMeta>> {
        let comments = self.comment_repo.find_by_post(post_id).await?;
        self.annotate_all(comments, viewer).await
    }

    /// Create a comment on a post. The post must exist.
    pub async fn create(
        &self,
        user_id: &str,
        post_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<CommentWithMeta> {
        input.validate()?;

        // Resolve the post first so a comment on a missing post is a 404
        let post = self.post_repo.get_by_id(post_id).await?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            post_id: Set(post.id),
            content: Set(input.content),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let comment = self.comment_repo.create(model).await?;
        let author = self.user_repo.get_by_id(user_id).await?;

        Ok(CommentWithMeta {
            comment,
            author,
            likes_count: 0,
            has_liked: false,
        })
    }

    /// Get a comment by ID, annotated for the viewer.
    pub async fn get_annotated(
        &self,
        id: &str,
        viewer: Option<&str>,
    ) -> AppResult<CommentWithMeta> {
        let comment = self.comment_repo.get_by_id(id).await?;
        self.annotate(comment, viewer).await
    }

    /// Update a comment. Only the owner may update.
    pub async fn update(
        &self,
        id: &str,
        caller_id: &str,
        input: UpdateCommentInput,
    ) -> AppResult<CommentWithMeta> {
        input.validate()?;

        let comment = self.comment_repo.get_by_id(id).await?;
        if comment.user_id != caller_id {
            return Err(AppError::Forbidden(
                "You can only edit your own comments".to_string(),
            ));
        }

        let mut active: comment::ActiveModel = comment.into();
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.comment_repo.update(active).await?;
        self.annotate(updated, Some(caller_id)).await
    }

    /// Delete a comment. Only the owner may delete; an absent comment
    /// is a no-op.
    pub async fn delete(&self, id: &str, caller_id: &str) -> AppResult<()> {
        let Some(comment) = self.comment_repo.find_by_id(id).await? else {
            return Ok(());
        };

        if comment.user_id != caller_id {
            return Err(AppError::Forbidden(
                "You can only delete your own comments".to_string(),
            ));
        }

        self.comment_repo.delete(id).await
    }

    /// Annotate a comment with its author, like count, and the viewer's
    /// like state.
    async fn annotate(
        &self,
        comment: comment::Model,
        viewer: Option<&str>,
    ) -> AppResult<CommentWithMeta> {
        let author = self.user_repo.get_by_id(&comment.user_id).await?;
        let likes_count = self.comment_like_repo.count_by_comment(&comment.id).await?;
        let has_liked = match viewer {
            Some(user_id) => {
                self.comment_like_repo
                    .has_liked(user_id, &comment.id)
                    .await?
            }
            None => false,
        };

        Ok(CommentWithMeta {
            comment,
            author,
            likes_count,
            has_liked,
        })
    }

    /// Annotate a batch of comments, fetching each distinct author once.
    async fn annotate_all(
        &self,
        comments: Vec<comment::Model>,
        viewer: Option<&str>,
    ) -> AppResult<Vec<CommentWithMeta>> {
        let mut authors: HashMap<String, user::Model> = HashMap::new();
        let mut result = Vec::with_capacity(comments.len());

        for comment in comments {
            let author = match authors.get(&comment.user_id) {
                Some(author) => author.clone(),
                None => {
                    let author = self.user_repo.get_by_id(&comment.user_id).await?;
                    authors.insert(comment.user_id.clone(), author.clone());
                    author
                }
            };

            let likes_count = self.comment_like_repo.count_by_comment(&comment.id).await?;
            let has_liked = match viewer {
                Some(user_id) => {
                    self.comment_like_repo
                        .has_liked(user_id, &comment.id)
                        .await?
                }
                None => false,
            };

            result.push(CommentWithMeta {
                comment,
                author,
                likes_count,
                has_liked,
            });
        }

        Ok(result)
    }
}
