//! Post service.

use std::collections::HashMap;

use chatter_common::{AppError, AppResult, IdGenerator};
use chatter_db::{
    entities::{post, user},
    repositories::{
        CommentRepository, FollowRepository, LikeRepository, PostRepository, UserRepository,
    },
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    like_repo: LikeRepository,
    comment_repo: CommentRepository,
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostInput {
    #[validate(length(min = 1, max = 10000, message = "Content must not be empty."))]
    pub content: String,

    #[validate(length(max = 1024))]
    pub image: Option<String>,

    #[validate(length(max = 1024))]
    pub video: Option<String>,
}

/// Input for updating a post.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostInput {
    #[validate(length(min = 1, max = 10000, message = "Content must not be empty."))]
    pub content: Option<String>,

    #[validate(length(max = 1024))]
    pub image: Option<String>,

    #[validate(length(max = 1024))]
    pub video: Option<String>,
}

/// A post annotated for a specific viewer.
#[derive(Debug, Clone)]
pub struct PostWithMeta {
    pub post: post::Model,
    pub author: user::Model,
    pub likes_count: u64,
    pub comments_count: u64,
    pub has_liked: bool,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub fn new(
        post_repo: PostRepository,
        like_repo: LikeRepository,
        comment_repo: CommentRepository,
        follow_repo: FollowRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            post_repo,
            like_repo,
            comment_repo,
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new post owned by the given user.
    pub async fn create(&self, user_id: &str, input: CreatePostInput) -> AppResult<PostWithMeta> {
        input.validate()?;

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            content: Set(input.content),
            image: Set(input.image),
            video: Set(input.video),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let post = self.post_repo.create(model).await?;
        let author = self.user_repo.get_by_id(user_id).await?;

        // A fresh post has no likes or comments yet
        Ok(PostWithMeta {
            post,
            author,
            likes_count: 0,
            comments_count: 0,
            has_liked: false,
        })
    }

    /// Get a post by ID, annotated for the viewer.
    pub async fn get_annotated(
        &self,
        id: &str,
        viewer: Option<&str>,
    ) -> AppResult<PostWithMeta> {
        let post = self.post_repo.get_by_id(id).await?;
        self.annotate(post, viewer).await
    }

    /// Update a post. Only the owner may update; ownership never changes.
    pub async fn update(
        &self,
        id: &str,
        caller_id: &str,
        input: UpdatePostInput,
    ) -> AppResult<PostWithMeta> {
        input.validate()?;

        let post = self.post_repo.get_by_id(id).await?;
        if post.user_id != caller_id {
            return Err(AppError::Forbidden(
                "You can only edit your own posts".to_string(),
            ));
        }

        let mut active: post::ActiveModel = post.into();
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(image) = input.image {
            active.image = Set(Some(image));
        }
        if let Some(video) = input.video {
            active.video = Set(Some(video));
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.post_repo.update(active).await?;
        self.annotate(updated, Some(caller_id)).await
    }

    /// Delete a post. Only the owner may delete; an absent post is a no-op.
    pub async fn delete(&self, id: &str, caller_id: &str) -> AppResult<()> {
        let Some(post) = self.post_repo.find_by_id(id).await? else {
            return Ok(());
        };

        if post.user_id != caller_id {
            return Err(AppError::Forbidden(
                "You can only delete your own posts".to_string(),
            ));
        }

        self.post_repo.delete(id).await
    }

    /// The news feed: posts owned by the viewer or anyone the viewer
    /// follows, newest first. Anonymous viewers get an empty feed.
    pub async fn feed(&self, viewer: Option<&str>) -> AppResult<Vec<PostWithMeta>> {
        let Some(user_id) = viewer else {
            return Ok(vec![]);
        };

        let owner_ids = self.feed_owners(user_id).await?;
        let posts = self.post_repo.find_by_owners(&owner_ids).await?;

        self.annotate_all(posts, Some(user_id)).await
    }

    /// The set of user IDs whose posts appear in a user's feed:
    /// everyone the user follows, plus the user themself.
    async fn feed_owners(&self, user_id: &str) -> AppResult<Vec<String>> {
        let mut owner_ids = self.follow_repo.find_following_ids(user_id).await?;
        owner_ids.push(user_id.to_string());
        Ok(owner_ids)
    }

    /// Annotate a post with its author, counts, and the viewer's like state.
    async fn annotate(&self, post: post::Model, viewer: Option<&str>) -> AppResult<PostWithMeta> {
        let author = self.user_repo.get_by_id(&post.user_id).await?;
        let likes_count = self.like_repo.count_by_post(&post.id).await?;
        let comments_count = self.comment_repo.count_by_post(&post.id).await?;
        let has_liked = match viewer {
            Some(user_id) => self.like_repo.has_liked(user_id, &post.id).await?,
            None => false,
        };

        Ok(PostWithMeta {
            post,
            author,
            likes_count,
            comments_count,
            has_liked,
        })
    }

    /// Annotate a batch of posts, fetching each distinct author once.
    async fn annotate_all(
        &self,
        posts: Vec<post::Model>,
        viewer: Option<&str>,
    ) -> AppResult<Vec<PostWithMeta>> {
        let mut authors: HashMap<String, user::Model> = HashMap::new();
        let mut result = Vec::with_capacity(posts.len());

        for post in posts {
            let author = match authors.get(&post.user_id) {
                Some(author) => author.clone(),
                None => {
                    let author = self.user_repo.get_by_id(&post.user_id).await?;
                    authors.insert(post.user_id.clone(), author.clone());
                    author
                }
            };

            let likes_count = self.like_repo.count_by_post(&post.id).await?;
            let comments_count = self.comment_repo.count_by_post(&post.id).await?;
            let has_liked = match viewer {
                Some(user_id) => self.like_repo.has_liked(user_id, &post.id).await?,
                None => false,
            };

            result.push(PostWithMeta {
                post,
                author,
                likes_count,
                comments_count,
                has_liked,
            });
        }

        Ok(result)
    }
}
