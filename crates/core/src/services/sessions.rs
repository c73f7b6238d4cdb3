//! Session service.

use chatter_common::{AppError, AppResult, IdGenerator};
use chatter_db::{
    entities::{session, user},
    repositories::{SessionRepository, UserRepository},
};
use sea_orm::Set;

/// Session service for login sessions and bearer-token authentication.
#[derive(Clone)]
pub struct SessionService {
    session_repo: SessionRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl SessionService {
    /// Create a new session service.
    #[must_use]
    pub fn new(session_repo: SessionRepository, user_repo: UserRepository) -> Self {
        Self {
            session_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a login session for a user, returning the session with its token.
    pub async fn login(&self, user_id: &str) -> AppResult<session::Model> {
        let model = session::ActiveModel {
            id: Set(self.id_gen.generate()),
            token: Set(self.id_gen.generate_token()),
            user_id: Set(user_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.session_repo.create(model).await
    }

    /// Invalidate a session by token. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.session_repo.delete_by_token(token).await
    }

    /// Resolve a bearer token to its user.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        let session = self
            .session_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        self.user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
