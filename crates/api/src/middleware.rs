//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use chatter_core::{
    CommentService, FollowService, LikeService, PostService, SessionService, UserService,
};

use crate::extractors::SessionToken;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub session_service: SessionService,
    pub post_service: PostService,
    pub comment_service: CommentService,
    pub like_service: LikeService,
    pub follow_service: FollowService,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to its session user and stores both the user
/// and the token in request extensions. Requests without a valid token
/// pass through unauthenticated; handlers decide whether that is an error.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(str::to_string);

    if let Some(token) = token {
        // Resolve the session to its user
        if let Ok(user) = state.session_service.authenticate_by_token(&token).await {
            req.extensions_mut().insert(user);
            req.extensions_mut().insert(SessionToken(token));
        }
    }

    next.run(req).await
}
