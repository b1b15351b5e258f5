use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::domain::entities::{NewUser, UserProfile, UserRole};
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, TokenSubject, UserQuery, UserRepository, UserRepositoryError,
};
use crate::auth::application::use_cases::AuthSession;
use crate::shared::validation::{normalize_email, ValidationErrors};

pub const PASSWORD_MIN_CHARS: usize = 8;
/// bcrypt ignores everything past 72 bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;
pub const NAME_MAX_CHARS: usize = 100;

// ========================= Register Request =========================
/// Validated registration input. Construct through [`RegisterUserRequest::new`].
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl RegisterUserRequest {
    pub fn new(
        email: String,
        password: String,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = normalize_email(&email, &mut errors);
        Self::validate_password(&password, &mut errors);
        let first_name = Self::validate_name("first_name", first_name, &mut errors);
        let last_name = Self::validate_name("last_name", last_name, &mut errors);

        errors.into_result()?;

        Ok(Self {
            email,
            password,
            first_name,
            last_name,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    fn validate_password(password: &str, errors: &mut ValidationErrors) {
        if password.is_empty() {
            errors.add("password", "This field is required");
        } else if password.chars().count() < PASSWORD_MIN_CHARS {
            errors.add(
                "password",
                format!("Value is too short (minimum {} characters)", PASSWORD_MIN_CHARS),
            );
        } else if password.len() > PASSWORD_MAX_BYTES {
            errors.add(
                "password",
                format!("Value is too long (maximum {} bytes)", PASSWORD_MAX_BYTES),
            );
        }
    }

    fn validate_name(
        field: &str,
        value: Option<String>,
        errors: &mut ValidationErrors,
    ) -> String {
        let value = value.unwrap_or_default().trim().to_string();
        if value.chars().count() > NAME_MAX_CHARS {
            errors.add(
                field,
                format!("Value is too long (maximum {} characters)", NAME_MAX_CHARS),
            );
        }
        value
    }
}

// ====================== Register Error =============================
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegisterUserError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ============================ Register User Use Case =============================
#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(&self, request: RegisterUserRequest) -> Result<AuthSession, RegisterUserError>;
}

#[derive(Clone)]
pub struct RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q, R> RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q, R> IRegisterUserUseCase for RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, request: RegisterUserRequest) -> Result<AuthSession, RegisterUserError> {
        let existing = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| RegisterUserError::QueryError(e.to_string()))?;

        if existing.is_some() {
            return Err(RegisterUserError::EmailAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        // The unique index still catches a registration racing past the check above
        let user = self
            .repository
            .create_user(NewUser {
                email: request.email().to_string(),
                password_hash,
                first_name: request.first_name().to_string(),
                last_name: request.last_name().to_string(),
                role: UserRole::Customer,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => RegisterUserError::EmailAlreadyExists,
                UserRepositoryError::DatabaseError(msg) => RegisterUserError::RepositoryError(msg),
            })?;

        let tokens = self
            .token_provider
            .issue_pair(&TokenSubject::from(&user))
            .map_err(|e| RegisterUserError::TokenGenerationFailed(e.to_string()))?;

        Ok(AuthSession::new(UserProfile::from(&user), tokens))
    }
}
