use async_trait::async_trait;

use crate::auth::application::domain::entities::{NewUser, User};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the account. A concurrent registration of the same email
    /// surfaces as `UserAlreadyExists` through the store's unique index.
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;
}
