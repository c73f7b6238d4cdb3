//! Database repositories.

mod comment;
mod comment_like;
mod follow;
mod like;
mod post;
mod session;
mod user;

pub use comment::CommentRepository;
pub use comment_like::CommentLikeRepository;
pub use follow::FollowRepository;
pub use like::LikeRepository;
pub use post::PostRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
