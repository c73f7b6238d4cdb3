//! Business logic services.

#![allow(missing_docs)]

pub mod comments;
pub mod follows;
pub mod likes;
pub mod posts;
pub mod sessions;
pub mod users;

pub use comments::{CommentService, CommentWithMeta, CreateCommentInput, UpdateCommentInput};
pub use follows::FollowService;
pub use likes::LikeService;
pub use posts::{CreatePostInput, PostService, PostWithMeta, UpdatePostInput};
pub use sessions::SessionService;
pub use users::{RegisterUserInput, UpdateProfileInput, UserService, UserWithStats};
