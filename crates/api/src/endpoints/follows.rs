//! Follow endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chatter_common::AppResult;

use crate::{extractors::AuthUser, middleware::AppState, response::MessageResponse};

/// Follow a user.
pub async fn follow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let target = state.follow_service.follow(&user.id, &user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "Now following {}",
            target.username
        ))),
    ))
}

/// Unfollow a user. Unfollowing a user who was never followed succeeds.
pub async fn unfollow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let target = state.follow_service.unfollow(&user.id, &user_id).await?;

    Ok(Json(MessageResponse::new(format!(
        "Unfollowed {}",
        target.username
    ))))
}
