//! API endpoints.

mod auth;
mod comments;
mod feed;
mod follows;
mod likes;
mod posts;
mod profiles;
mod search;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::json;

use crate::middleware::AppState;

/// API index: a small map of the main endpoints.
async fn api_root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Social Media API",
        "endpoints": {
            "register": "/api/auth/register/",
            "login": "/api/auth/login/",
            "posts": "/api/posts/",
            "feed": "/api/feed/",
            "search": "/api/search/users/",
        }
    }))
}

/// Create the API router.
///
/// One explicit dispatch table: each path maps to per-verb handler
/// functions. Paths keep the trailing slashes of the original API.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_root))
        // Authentication
        .route("/auth/register/", post(auth::register))
        .route("/auth/login/", post(auth::login))
        .route("/auth/logout/", post(auth::logout))
        // Profiles
        .route(
            "/profiles/{id}/",
            get(profiles::show).put(profiles::update),
        )
        // Posts
        .route("/posts/", get(posts::list).post(posts::create))
        .route(
            "/posts/{post_id}/",
            get(posts::show).put(posts::update).delete(posts::destroy),
        )
        // Comments
        .route(
            "/posts/{post_id}/comments/",
            get(comments::list).post(comments::create),
        )
        .route(
            "/comments/{comment_id}/",
            get(comments::show)
                .put(comments::update)
                .delete(comments::destroy),
        )
        // Likes
        .route(
            "/posts/{post_id}/like/",
            post(likes::like_post).delete(likes::unlike_post),
        )
        .route(
            "/comments/{comment_id}/like/",
            post(likes::like_comment).delete(likes::unlike_comment),
        )
        // Follow
        .route(
            "/users/{user_id}/follow/",
            post(follows::follow).delete(follows::unfollow),
        )
        // Search
        .route("/search/users/", get(search::users))
        // News Feed
        .route("/feed/", get(feed::feed))
}
