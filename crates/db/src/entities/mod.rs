//! Database entities.

pub mod comment;
pub mod comment_like;
pub mod follow;
pub mod like;
pub mod post;
pub mod session;
pub mod user;

pub use comment::Entity as Comment;
pub use comment_like::Entity as CommentLike;
pub use follow::Entity as Follow;
pub use like::Entity as Like;
pub use post::Entity as Post;
pub use session::Entity as Session;
pub use user::Entity as User;
