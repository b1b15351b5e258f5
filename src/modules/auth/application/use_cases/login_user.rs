use async_trait::async_trait;
use std::sync::{Arc, OnceLock};

use crate::auth::application::domain::entities::UserProfile;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, TokenSubject, UserQuery,
};
use crate::auth::application::use_cases::AuthSession;
use crate::shared::validation::{normalize_email, ValidationErrors};

// ========================= Login Request =========================
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    /// Only presence and email shape are checked here; strength rules belong to registration.
    pub fn new(email: String, password: String) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = normalize_email(&email, &mut errors);
        if password.is_empty() {
            errors.add("password", "This field is required");
        }

        errors.into_result()?;

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ====================== Login Error =============================
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    /// Unknown email, deleted account and wrong password are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

// ============================ Login User Use Case =============================
const TIMING_EQUALIZER_PASSWORD: &str = "timing-equalizer-password";

#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<AuthSession, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
    /// Hashed once on the first miss, then verified against on every unknown email.
    dummy_hash: Arc<OnceLock<String>>,
}

impl<Q> LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(
        query: Q,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Spends one password verification so an unknown email costs about as much as a wrong password.
    async fn equalize_timing(&self, password: &str) {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash.clone(),
            None => match self
                .password_hasher
                .hash_password(TIMING_EQUALIZER_PASSWORD)
                .await
            {
                Ok(hash) => self.dummy_hash.get_or_init(|| hash).clone(),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to prepare timing equalizer hash");
                    return;
                }
            },
        };

        let _ = self.password_hasher.verify_password(password, &hash).await;
    }
}

#[async_trait]
impl<Q> ILoginUserUseCase for LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, request: LoginRequest) -> Result<AuthSession, LoginError> {
        // Soft-deleted accounts never come back from the query
        let user = match self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?
        {
            Some(user) => user,
            None => {
                self.equalize_timing(request.password()).await;
                return Err(LoginError::InvalidCredentials);
            }
        };

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        let tokens = self
            .token_provider
            .issue_pair(&TokenSubject::from(&user))
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(AuthSession::new(UserProfile::from(&user), tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserRole;
    use crate::auth::application::ports::outgoing::user_query::{MockUserQuery, UserQueryError};
    use crate::auth::application::ports::outgoing::{HashError, TokenKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::tests::support::auth_helper::{sample_user, test_jwt_service, test_token_provider};
    use crate::tests::support::stubs::{FailingHasher, StubHasher};

    fn query_with_user(password: &str) -> MockUserQuery {
        let mut user = sample_user("jane@example.com", UserRole::Admin);
        user.password_hash = format!("hashed::{}", password);

        let mut query = MockUserQuery::new();
        query
            .expect_find_by_email()
            .returning(move |email| Ok(Some(user.clone()).filter(|u| u.email == email)));
        query
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest::new(email.to_string(), password.to_string()).unwrap()
    }

    #[test]
    fn test_request_validation() {
        let errors = LoginRequest::new("nope".to_string(), String::new()).unwrap_err();
        assert!(errors.has_field("email"));
        assert!(errors.has_field("password"));

        let request = LoginRequest::new(" JANE@example.com".to_string(), "x".to_string()).unwrap();
        assert_eq!(request.email(), "jane@example.com");
    }

    #[tokio::test]
    async fn test_login_success_issues_tokens_with_role() {
        let use_case = LoginUserUseCase::new(
            query_with_user("longenough1"),
            Arc::new(StubHasher),
            test_token_provider(),
        );

        let session = use_case
            .execute(login("jane@example.com", "longenough1"))
            .await
            .unwrap();

        assert_eq!(session.user.email, "jane@example.com");

        let claims = test_jwt_service()
            .verify_access_token(&session.access_token)
            .unwrap();
        assert_eq!(claims.sub, session.user.id);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.token_type, TokenKind::Access);
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_are_identical() {
        let use_case = LoginUserUseCase::new(
            query_with_user("longenough1"),
            Arc::new(StubHasher),
            test_token_provider(),
        );

        let wrong_password = use_case
            .execute(login("jane@example.com", "not-the-password"))
            .await
            .unwrap_err();
        let unknown_email = use_case
            .execute(login("ghost@example.com", "longenough1"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password, LoginError::InvalidCredentials);
        assert_eq!(unknown_email, wrong_password);
    }

    #[derive(Default)]
    struct CountingHasher {
        hashes: AtomicUsize,
        verifies: AtomicUsize,
    }

    #[async_trait]
    impl PasswordHasher for CountingHasher {
        async fn hash_password(&self, password: &str) -> Result<String, HashError> {
            self.hashes.fetch_add(1, Ordering::SeqCst);
            StubHasher.hash_password(password).await
        }

        async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            StubHasher.verify_password(password, hash).await
        }
    }

    #[tokio::test]
    async fn test_unknown_email_still_verifies_a_password() {
        let hasher = Arc::new(CountingHasher::default());
        let use_case = LoginUserUseCase::new(
            query_with_user("longenough1"),
            hasher.clone(),
            test_token_provider(),
        );

        for _ in 0..2 {
            let result = use_case
                .execute(login("ghost@example.com", "timing-equalizer-password"))
                .await;
            assert_eq!(result.unwrap_err(), LoginError::InvalidCredentials);
        }

        assert_eq!(hasher.verifies.load(Ordering::SeqCst), 2);
        assert_eq!(hasher.hashes.load(Ordering::SeqCst), 1);

        use_case
            .execute(login("jane@example.com", "wrong-password"))
            .await
            .unwrap_err();
        assert_eq!(hasher.verifies.load(Ordering::SeqCst), 3);
        assert_eq!(hasher.hashes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_email_with_failing_hasher_is_still_invalid_credentials() {
        let use_case = LoginUserUseCase::new(
            query_with_user("longenough1"),
            Arc::new(FailingHasher),
            test_token_provider(),
        );

        let result = use_case.execute(login("ghost@example.com", "x")).await;
        assert_eq!(result.unwrap_err(), LoginError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_query_failure() {
        let mut query = MockUserQuery::new();
        query
            .expect_find_by_email()
            .returning(|_| Err(UserQueryError::DatabaseError("down".to_string())));

        let use_case = LoginUserUseCase::new(query, Arc::new(StubHasher), test_token_provider());

        let result = use_case.execute(login("jane@example.com", "x")).await;
        assert!(matches!(result, Err(LoginError::QueryError(_))));
    }

    #[tokio::test]
    async fn test_login_verification_failure() {
        let use_case = LoginUserUseCase::new(
            query_with_user("longenough1"),
            Arc::new(FailingHasher),
            test_token_provider(),
        );

        let result = use_case
            .execute(login("jane@example.com", "longenough1"))
            .await;
        assert!(matches!(
            result,
            Err(LoginError::PasswordVerificationFailed(_))
        ));
    }
}
