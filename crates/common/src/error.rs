//! Error types for chatter.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request-level rule violation ("Cannot follow yourself" etc.),
    /// surfaced with the bare message the observed API returns.
    #[error("{0}")]
    BadRequest(String),

    /// Field-level validation failures, serialized as a field -> messages map.
    #[error("Validation error: {0}")]
    Validation(serde_json::Value),

    /// The relation being created already exists ("Already liked" etc.).
    /// The observed API reports these as 400, not 409.
    #[error("{0}")]
    Conflict(String),

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a validation error for a single field.
    #[must_use]
    pub fn field_validation(field: &str, message: &str) -> Self {
        Self::Validation(json!({ field: [message] }))
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::NotFound(_)
            | Self::UserNotFound(_)
            | Self::PostNotFound(_)
            | Self::CommentNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidCredentials
            | Self::BadRequest(_)
            | Self::Validation(_)
            | Self::Conflict(_) => StatusCode::BAD_REQUEST,

            // 5xx Server Errors
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if self.is_server_error() {
            tracing::error!(error = %self, "Server error occurred");
        } else {
            tracing::debug!(error = %self, "Client error occurred");
        }

        let body = match self {
            // Validation errors keep their field -> messages shape
            Self::Validation(fields) => Json(fields),
            other => Json(json!({ "error": other.to_string() })),
        };

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, serde_json::Value> = err
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let messages: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or_else(
                            || json!(format!("Invalid value for {field}")),
                            |m| json!(m),
                        )
                    })
                    .collect();
                ((*field).to_string(), json!(messages))
            })
            .collect();

        Self::Validation(serde_json::Value::Object(fields))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_404() {
        assert_eq!(
            AppError::PostNotFound("p1".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_is_400() {
        // "Already liked" / "Already following" are 400 in the observed API
        assert_eq!(
            AppError::Conflict("Already liked".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_invalid_credentials_is_400() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_database_is_server_error() {
        assert!(AppError::Database("oops".to_string()).is_server_error());
        assert!(!AppError::Unauthorized.is_server_error());
    }

    #[test]
    fn test_field_validation_shape() {
        let err = AppError::field_validation("password2", "Passwords don't match");
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields["password2"][0], "Passwords don't match");
            }
            _ => panic!("Expected Validation error"),
        }
    }
}
