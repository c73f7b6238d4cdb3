//! Like endpoints for posts and comments.
//!
//! Creating a like that already exists is an error; removing a like that
//! does not exist is a silent success. The asymmetry matches the observed
//! behavior of the API this serves.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chatter_common::AppResult;

use crate::{extractors::AuthUser, middleware::AppState, response::MessageResponse};

/// Like a post.
pub async fn like_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.like_service.like_post(&user.id, &post_id).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Post liked"))))
}

/// Unlike a post.
pub async fn unlike_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.like_service.unlike_post(&user.id, &post_id).await?;

    Ok(Json(MessageResponse::new("Post unliked")))
}

/// Like a comment.
pub async fn like_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .like_service
        .like_comment(&user.id, &comment_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Comment liked")),
    ))
}

/// Unlike a comment.
pub async fn unlike_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state
        .like_service
        .unlike_comment(&user.id, &comment_id)
        .await?;

    Ok(Json(MessageResponse::new("Comment unliked")))
}
