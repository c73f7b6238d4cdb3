//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chatter_common::{AppError, AppResult, IdGenerator};
use chatter_db::{
    entities::user,
    repositories::{FollowRepository, PostRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    post_repo: PostRepository,
    follow_repo: FollowRepository,
    id_gen: IdGenerator,
}

/// Input for registering a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserInput {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Username must be between 1 and 150 characters."
    ))]
    pub username: String,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "This password is too short. It must contain at least 8 characters."
    ))]
    pub password: String,

    pub password2: String,

    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,
}

/// Input for updating a user profile.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,

    #[validate(length(max = 2048))]
    pub bio: Option<String>,

    #[validate(length(max = 1024))]
    pub website: Option<String>,

    #[validate(length(max = 256))]
    pub location: Option<String>,

    #[validate(length(max = 1024))]
    pub profile_picture: Option<String>,
}

/// A user together with its profile statistics.
#[derive(Debug, Clone)]
pub struct UserWithStats {
    pub user: user::Model,
    pub posts_count: u64,
    pub followers_count: u64,
    pub following_count: u64,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub fn new(
        user_repo: UserRepository,
        post_repo: PostRepository,
        follow_repo: FollowRepository,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            follow_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user.
    pub async fn register(&self, input: RegisterUserInput) -> AppResult<user::Model> {
        input.validate()?;

        if input.password != input.password2 {
            return Err(AppError::Validation(json!({
                "non_field_errors": ["Passwords don't match"]
            })));
        }

        if input.password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::field_validation(
                "password",
                "This password is entirely numeric.",
            ));
        }

        // Check if username is taken
        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::field_validation(
                "username",
                "A user with that username already exists.",
            ));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username.clone()),
            username_lower: Set(input.username.to_lowercase()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.user_repo.create(model).await
    }

    /// Authenticate a user by username and password.
    ///
    /// Returns the same error for an unknown user and a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Get a user together with its profile statistics.
    pub async fn get_with_stats(&self, id: &str) -> AppResult<UserWithStats> {
        let user = self.user_repo.get_by_id(id).await?;
        self.with_stats(user).await
    }

    /// Attach profile statistics to an already-loaded user.
    pub async fn with_stats(&self, user: user::Model) -> AppResult<UserWithStats> {
        let posts_count = self.post_repo.count_by_user(&user.id).await?;
        let followers_count = self.follow_repo.count_followers(&user.id).await?;
        let following_count = self.follow_repo.count_following(&user.id).await?;

        Ok(UserWithStats {
            user,
            posts_count,
            followers_count,
            following_count,
        })
    }

    /// Update a user's profile.
    pub async fn update_profile(
        &self,
        id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(id).await?;
        let mut active: user::ActiveModel = user.into();

        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(first_name) = input.first_name {
            active.first_name = Set(Some(first_name));
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(Some(last_name));
        }
        if let Some(bio) = input.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(website) = input.website {
            active.website = Set(Some(website));
        }
        if let Some(location) = input.location {
            active.location = Set(Some(location));
        }
        if let Some(profile_picture) = input.profile_picture {
            active.profile_picture = Set(Some(profile_picture));
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Search users by username, first name, or last name.
    ///
    /// An empty query returns no results rather than every user.
    pub async fn search(&self, query: &str) -> AppResult<Vec<user::Model>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(vec![]);
        }

        self.user_repo.search(query).await
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            email: format!("{username}@example.com"),
            password_hash: hash_password("StrongPassword123").unwrap(),
            first_name: None,
            last_name: None,
            bio: None,
            website: None,
            location: None,
            profile_picture: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_service(
        user_db: Arc<sea_orm::DatabaseConnection>,
        post_db: Arc<sea_orm::DatabaseConnection>,
        follow_db: Arc<sea_orm::DatabaseConnection>,
    ) -> UserService {
        UserService::new(
            UserRepository::new(user_db),
            PostRepository::new(post_db),
            FollowRepository::new(follow_db),
        )
    }

    fn register_input(password: &str, password2: &str) -> RegisterUserInput {
        RegisterUserInput {
            username: "yvonne".to_string(),
            email: "yvonne@example.com".to_string(),
            password: password.to_string(),
            password2: password2.to_string(),
            first_name: None,
            last_name: None,
        }
    }

    // Unit tests for password functions
    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "test_password_123";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let password = "same_password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    // Service tests
    #[tokio::test]
    async fn test_register_password_mismatch_creates_no_user() {
        // No query results appended: a mismatch must fail before any DB access
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = create_test_service(user_db, post_db, follow_db);
        let result = service
            .register(register_input("StrongPassword123", "OtherPassword456"))
            .await;

        match result {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields["non_field_errors"][0], "Passwords don't match");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_register_numeric_password_rejected() {
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = create_test_service(user_db, post_db, follow_db);
        let result = service.register(register_input("12345678", "12345678")).await;

        match result {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields["password"][0], "This password is entirely numeric.");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_register_short_password_rejected() {
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = create_test_service(user_db, post_db, follow_db);
        let result = service.register(register_input("short", "short")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_taken_username_rejected() {
        let existing = create_test_user("u1", "yvonne");

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = create_test_service(user_db, post_db, follow_db);
        let result = service
            .register(register_input("StrongPassword123", "StrongPassword123"))
            .await;

        match result {
            Err(AppError::Validation(fields)) => {
                assert_eq!(
                    fields["username"][0],
                    "A user with that username already exists."
                );
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = create_test_service(user_db, post_db, follow_db);
        let result = service.authenticate("nobody", "whatever123").await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let user = create_test_user("u1", "yvonne");

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = create_test_service(user_db, post_db, follow_db);
        let result = service.authenticate("yvonne", "WrongPassword").await;

        // Same error as for an unknown user
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_correct_password() {
        let user = create_test_user("u1", "yvonne");

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = create_test_service(user_db, post_db, follow_db);
        let result = service
            .authenticate("yvonne", "StrongPassword123")
            .await
            .unwrap();

        assert_eq!(result.id, "u1");
    }

    #[tokio::test]
    async fn test_search_empty_query_returns_empty() {
        // No query results appended: an empty query must not hit the DB
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let post_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = create_test_service(user_db, post_db, follow_db);

        assert!(service.search("").await.unwrap().is_empty());
        assert!(service.search("   ").await.unwrap().is_empty());
    }
}
