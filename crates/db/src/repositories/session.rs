//! Session repository.

use std::sync::Arc;

use crate::entities::{Session, session};
use chatter_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
};

/// Session repository for database operations.
#[derive(Clone)]
pub struct SessionRepository {
    db: Arc<DatabaseConnection>,
}

impl SessionRepository {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a session by its bearer token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<session::Model>> {
        Session::find()
            .filter(session::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new session.
    pub async fn create(&self, model: session::ActiveModel) -> AppResult<session::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a session by token. Deleting an absent session is a no-op.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<()> {
        let session = self.find_by_token(token).await?;
        if let Some(s) = session {
            s.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_session(id: &str, token: &str, user_id: &str) -> session::Model {
        session::Model {
            id: id.to_string(),
            token: token.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_token_found() {
        let session = create_test_session("s1", "tok123", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[session.clone()]])
                .into_connection(),
        );

        let repo = SessionRepository::new(db);
        let result = repo.find_by_token("tok123").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().user_id, "u1");
    }

    #[tokio::test]
    async fn test_find_by_token_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<session::Model>::new()])
                .into_connection(),
        );

        let repo = SessionRepository::new(db);
        let result = repo.find_by_token("bad").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_by_token_absent_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<session::Model>::new()])
                .into_connection(),
        );

        let repo = SessionRepository::new(db);
        repo.delete_by_token("gone").await.unwrap();
    }
}
