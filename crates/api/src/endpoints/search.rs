//! Search endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use chatter_common::AppResult;
use serde::Deserialize;

use crate::{middleware::AppState, response::UserResponse};

/// User search parameters.
#[derive(Debug, Deserialize)]
pub struct SearchUsersParams {
    #[serde(default)]
    pub query: String,
}

/// Search users by username, first name, or last name.
///
/// An empty query returns an empty list, never all users.
pub async fn users(
    State(state): State<AppState>,
    Query(params): Query<SearchUsersParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let matches = state.user_service.search(&params.query).await?;

    let mut results = Vec::with_capacity(matches.len());
    for user in matches {
        let stats = state.user_service.with_stats(user).await?;
        results.push(stats.into());
    }

    Ok(Json(results))
}
