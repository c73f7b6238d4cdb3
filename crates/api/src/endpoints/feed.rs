//! News feed endpoint.

use axum::{Json, extract::State};
use chatter_common::AppResult;

use crate::{extractors::MaybeAuthUser, middleware::AppState, response::PostResponse};

/// The news feed: posts by the caller and everyone the caller follows,
/// newest first. Anonymous callers get an empty list.
pub async fn feed(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let viewer = user.as_ref().map(|u| u.id.as_str());
    let posts = state.post_service.feed(viewer).await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}
