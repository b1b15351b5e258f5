use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{UserProfile, UserRole};
use crate::auth::application::ports::outgoing::{HashError, PasswordHasher};
use crate::auth::application::use_cases::fetch_current_user::{
    FetchUserError, IFetchCurrentUserUseCase,
};
use crate::auth::application::use_cases::login_user::{ILoginUserUseCase, LoginError, LoginRequest};
use crate::auth::application::use_cases::refresh_token::{
    IRefreshTokenUseCase, RefreshTokenError, RefreshTokenRequest,
};
use crate::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterUserError, RegisterUserRequest,
};
use crate::auth::application::use_cases::AuthSession;

// ========================================================================
// Password hashers
// ========================================================================

/// Deterministic, instant "hash" for use case tests.
#[derive(Debug, Default, Clone)]
pub struct StubHasher;

#[async_trait]
impl PasswordHasher for StubHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed::{}", password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed::{}", password))
    }
}

#[derive(Debug, Default, Clone)]
pub struct FailingHasher;

#[async_trait]
impl PasswordHasher for FailingHasher {
    async fn hash_password(&self, _password: &str) -> Result<String, HashError> {
        Err(HashError::HashFailed)
    }

    async fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
        Err(HashError::VerifyFailed)
    }
}

// ========================================================================
// Fixtures
// ========================================================================

pub fn sample_profile() -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role: UserRole::Customer,
        email_verified: false,
    }
}

pub fn sample_session() -> AuthSession {
    AuthSession {
        user: sample_profile(),
        access_token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.access".to_string(),
        refresh_token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.refresh".to_string(),
    }
}

// ========================================================================
// Use case stubs
// ========================================================================

#[derive(Clone)]
pub struct StubRegisterUserUseCase {
    result: Result<AuthSession, RegisterUserError>,
}

impl StubRegisterUserUseCase {
    pub fn success() -> Self {
        Self {
            result: Ok(sample_session()),
        }
    }

    pub fn failing(err: RegisterUserError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl IRegisterUserUseCase for StubRegisterUserUseCase {
    async fn execute(
        &self,
        _request: RegisterUserRequest,
    ) -> Result<AuthSession, RegisterUserError> {
        self.result.clone()
    }
}

#[derive(Clone)]
pub struct StubLoginUserUseCase {
    result: Result<AuthSession, LoginError>,
}

impl StubLoginUserUseCase {
    pub fn success() -> Self {
        Self {
            result: Ok(sample_session()),
        }
    }

    pub fn failing(err: LoginError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<AuthSession, LoginError> {
        self.result.clone()
    }
}

#[derive(Clone)]
pub struct StubRefreshTokenUseCase {
    result: Result<AuthSession, RefreshTokenError>,
}

impl StubRefreshTokenUseCase {
    pub fn success() -> Self {
        Self {
            result: Ok(sample_session()),
        }
    }

    pub fn failing(err: RefreshTokenError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl IRefreshTokenUseCase for StubRefreshTokenUseCase {
    async fn execute(
        &self,
        _request: RefreshTokenRequest,
    ) -> Result<AuthSession, RefreshTokenError> {
        self.result.clone()
    }
}

/// Echoes the requested id back inside a sample profile.
#[derive(Clone)]
pub struct StubFetchCurrentUserUseCase {
    error: Option<FetchUserError>,
}

impl StubFetchCurrentUserUseCase {
    pub fn success() -> Self {
        Self { error: None }
    }

    pub fn failing(err: FetchUserError) -> Self {
        Self { error: Some(err) }
    }
}

#[async_trait]
impl IFetchCurrentUserUseCase for StubFetchCurrentUserUseCase {
    async fn execute(&self, user_id: Uuid) -> Result<UserProfile, FetchUserError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(UserProfile {
                id: user_id,
                ..sample_profile()
            }),
        }
    }
}
