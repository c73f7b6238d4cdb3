//! Post endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chatter_common::AppResult;
use chatter_core::{CreatePostInput, UpdatePostInput};
use serde::Deserialize;

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::PostResponse,
};

/// List posts visible to the caller: own posts plus posts of followed
/// users. Anonymous callers get an empty list.
pub async fn list(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let viewer = user.as_ref().map(|u| u.id.as_str());
    let posts = state.post_service.feed(viewer).await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// Post creation request.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub image: Option<String>,
    pub video: Option<String>,
}

/// Create a new post owned by the caller.
pub async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let input = CreatePostInput {
        content: req.content,
        image: req.image,
        video: req.video,
    };

    let post = state.post_service.create(&user.id, input).await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Get a post by ID, annotated for the caller.
pub async fn show(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PostResponse>> {
    let viewer = user.as_ref().map(|u| u.id.as_str());
    let post = state.post_service.get_annotated(&id, viewer).await?;

    Ok(Json(post.into()))
}

/// Post update request.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
}

/// Update a post. Only the owner may update it.
pub async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> AppResult<Json<PostResponse>> {
    let input = UpdatePostInput {
        content: req.content,
        image: req.image,
        video: req.video,
    };

    let post = state.post_service.update(&id, &user.id, input).await?;

    Ok(Json(post.into()))
}

/// Delete a post. Only the owner may delete it.
pub async fn destroy(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.post_service.delete(&id, &user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
