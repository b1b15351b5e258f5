use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::application::domain::entities::UserProfile;
use crate::auth::application::ports::outgoing::{TokenProvider, TokenSubject, UserQuery};
use crate::auth::application::use_cases::AuthSession;
use crate::shared::validation::ValidationErrors;

// ========================= Refresh Request =========================
#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    refresh_token: String,
}

impl RefreshTokenRequest {
    pub fn new(refresh_token: String) -> Result<Self, ValidationErrors> {
        let refresh_token = refresh_token.trim().to_string();

        let mut errors = ValidationErrors::new();
        if refresh_token.is_empty() {
            errors.add("refresh_token", "This field is required");
        }
        errors.into_result()?;

        Ok(Self { refresh_token })
    }

    pub fn token(&self) -> &str {
        &self.refresh_token
    }
}

// ====================== Refresh Error =============================
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Invalid or expired refresh token")]
    InvalidToken,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

// ============================ Refresh Token Use Case =============================
#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(&self, request: RefreshTokenRequest)
        -> Result<AuthSession, RefreshTokenError>;
}

/// Rotates the pair. New tokens carry the account's current email and role,
/// not whatever the presented token claimed.
#[derive(Clone)]
pub struct RefreshTokenUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q> RefreshTokenUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            query,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q> IRefreshTokenUseCase for RefreshTokenUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<AuthSession, RefreshTokenError> {
        let claims = self
            .token_provider
            .verify_refresh_token(request.token())
            .map_err(|e| {
                tracing::debug!(reason = %e, "Refresh token rejected");
                RefreshTokenError::InvalidToken
            })?;

        let user = self
            .query
            .find_by_id(claims.sub)
            .await
            .map_err(|e| RefreshTokenError::QueryError(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(user_id = %claims.sub, "Refresh token for a missing or deleted user");
                RefreshTokenError::InvalidToken
            })?;

        let tokens = self
            .token_provider
            .issue_pair(&TokenSubject::from(&user))
            .map_err(|e| RefreshTokenError::TokenGenerationFailed(e.to_string()))?;

        Ok(AuthSession::new(UserProfile::from(&user), tokens))
    }
}
