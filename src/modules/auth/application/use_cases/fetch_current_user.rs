use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserProfile;
use crate::auth::application::ports::outgoing::UserQuery;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IFetchCurrentUserUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<UserProfile, FetchUserError>;
}

#[derive(Clone)]
pub struct FetchCurrentUserUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> FetchCurrentUserUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IFetchCurrentUserUseCase for FetchCurrentUserUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, user_id: Uuid) -> Result<UserProfile, FetchUserError> {
        self.query
            .find_by_id(user_id)
            .await
            .map_err(|e| FetchUserError::QueryError(e.to_string()))?
            .map(|user| UserProfile::from(&user))
            .ok_or(FetchUserError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserRole;
    use crate::auth::application::ports::outgoing::user_query::{MockUserQuery, UserQueryError};
    use crate::tests::support::auth_helper::sample_user;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_fetch_current_user_success() {
        let user = sample_user("jane@example.com", UserRole::Customer);
        let user_id = user.id;

        let mut query = MockUserQuery::new();
        query
            .expect_find_by_id()
            .with(eq(user_id))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let profile = FetchCurrentUserUseCase::new(query)
            .execute(user_id)
            .await
            .unwrap();

        assert_eq!(profile.id, user_id);
        assert_eq!(profile.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_fetch_current_user_not_found() {
        let mut query = MockUserQuery::new();
        query.expect_find_by_id().returning(|_| Ok(None));

        let result = FetchCurrentUserUseCase::new(query)
            .execute(Uuid::new_v4())
            .await;

        assert_eq!(result.unwrap_err(), FetchUserError::UserNotFound);
    }

    #[tokio::test]
    async fn test_fetch_current_user_query_error() {
        let mut query = MockUserQuery::new();
        query
            .expect_find_by_id()
            .returning(|_| Err(UserQueryError::DatabaseError("down".to_string())));

        let result = FetchCurrentUserUseCase::new(query)
            .execute(Uuid::new_v4())
            .await;

        assert_eq!(
            result.unwrap_err(),
            FetchUserError::QueryError("Database error: down".to_string())
        );
    }
}
