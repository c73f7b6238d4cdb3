//! Authentication endpoints.

use axum::{Json, extract::State, http::StatusCode};
use chatter_common::AppResult;
use chatter_core::RegisterUserInput;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::BearerToken,
    middleware::AppState,
    response::{MessageResponse, UserResponse},
};

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Create a new user account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let input = RegisterUserInput {
        username: req.username,
        email: req.email,
        password: req.password,
        password2: req.password2,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    let user = state.user_service.register(input).await?;
    let stats = state.user_service.with_stats(user).await?;

    Ok((StatusCode::CREATED, Json(stats.into())))
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the user object plus the session's bearer token.
#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
}

/// Sign in with username and password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .user_service
        .authenticate(&req.username, &req.password)
        .await?;

    let session = state.session_service.login(&user.id).await?;
    let stats = state.user_service.with_stats(user).await?;

    Ok(Json(LoginResponse {
        user: stats.into(),
        token: session.token,
    }))
}

/// Sign out, invalidating the presented session token.
pub async fn logout(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    state.session_service.logout(&token).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
