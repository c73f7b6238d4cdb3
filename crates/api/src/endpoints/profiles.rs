//! Profile endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use chatter_common::{AppError, AppResult};
use chatter_core::UpdateProfileInput;
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::UserResponse};

/// Get a user profile with its statistics.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let stats = state.user_service.get_with_stats(&id).await?;
    Ok(Json(stats.into()))
}

/// Profile update request.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,
}

/// Update a user profile. Only the profile owner may update it.
pub async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    if user.id != id {
        return Err(AppError::Forbidden(
            "You can only edit your own profile".to_string(),
        ));
    }

    let input = UpdateProfileInput {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        bio: req.bio,
        website: req.website,
        location: req.location,
        profile_picture: req.profile_picture,
    };

    let updated = state.user_service.update_profile(&id, input).await?;
    let stats = state.user_service.with_stats(updated).await?;

    Ok(Json(stats.into()))
}
