//! API response types.

use chatter_core::{CommentWithMeta, PostWithMeta, UserWithStats};
use chatter_db::entities::user;
use serde::Serialize;

/// Simple message response ("Post liked", "Logged out successfully", ...).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full user object with profile statistics.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub posts_count: u64,
    pub followers_count: u64,
    pub following_count: u64,
}

impl From<UserWithStats> for UserResponse {
    fn from(stats: UserWithStats) -> Self {
        let user = stats.user;
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_picture: user.profile_picture,
            bio: user.bio,
            website: user.website,
            location: user.location,
            posts_count: stats.posts_count,
            followers_count: stats.followers_count,
            following_count: stats.following_count,
        }
    }
}

/// Compact author card embedded in posts and comments.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<user::Model> for UserSummary {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_picture: user.profile_picture,
        }
    }
}

/// Post annotated for the requesting viewer.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub user: UserSummary,
    pub content: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub likes_count: u64,
    pub comments_count: u64,
    pub has_liked: bool,
}

impl From<PostWithMeta> for PostResponse {
    fn from(meta: PostWithMeta) -> Self {
        Self {
            id: meta.post.id,
            user: meta.author.into(),
            content: meta.post.content,
            image: meta.post.image,
            video: meta.post.video,
            created_at: meta.post.created_at.to_rfc3339(),
            updated_at: meta.post.updated_at.map(|t| t.to_rfc3339()),
            likes_count: meta.likes_count,
            comments_count: meta.comments_count,
            has_liked: meta.has_liked,
        }
    }
}

/// Comment annotated for the requesting viewer.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub user: UserSummary,
    pub post: String,
    pub content: String,
    pub created_at: String,
    pub likes_count: u64,
    pub has_liked: bool,
}

impl From<CommentWithMeta> for CommentResponse {
    fn from(meta: CommentWithMeta) -> Self {
        Self {
            id: meta.comment.id,
            user: meta.author.into(),
            post: meta.comment.post_id,
            content: meta.comment.content,
            created_at: meta.comment.created_at.to_rfc3339(),
            likes_count: meta.likes_count,
            has_liked: meta.has_liked,
        }
    }
}
