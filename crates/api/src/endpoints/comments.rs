//! Comment endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chatter_common::AppResult;
use chatter_core::{CreateCommentInput, UpdateCommentInput};
use serde::Deserialize;

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::CommentResponse,
};

/// List a post's comments.
pub async fn list(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<Json<Vec<CommentResponse>>> {
    let viewer = user.as_ref().map(|u| u.id.as_str());
    let comments = state
        .comment_service
        .list_for_post(&post_id, viewer)
        .await?;

    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// Comment creation request.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Create a comment on a post. The post must exist.
pub async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let input = CreateCommentInput {
        content: req.content,
    };

    let comment = state
        .comment_service
        .create(&user.id, &post_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// Get a comment by ID, annotated for the caller.
pub async fn show(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CommentResponse>> {
    let viewer = user.as_ref().map(|u| u.id.as_str());
    let comment = state.comment_service.get_annotated(&id, viewer).await?;

    Ok(Json(comment.into()))
}

/// Comment update request.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}

/// Update a comment. Only the owner may update it.
pub async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCommentRequest>,
) -> AppResult<Json<CommentResponse>> {
    let input = UpdateCommentInput {
        content: req.content,
    };

    let comment = state.comment_service.update(&id, &user.id, input).await?;

    Ok(Json(comment.into()))
}

/// Delete a comment. Only the owner may delete it.
pub async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.comment_service.delete(&id, &user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
