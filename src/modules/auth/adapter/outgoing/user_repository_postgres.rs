use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set, SqlErr};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{NewUser, User};
use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::ActiveModel as UserActiveModel;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn is_unique_violation(err: &DbErr) -> bool {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return true;
        }

        let err_str = err.to_string().to_lowercase();
        err_str.contains("23505")
            || err_str.contains("duplicate key")
            || err_str.contains("unique constraint")
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            role: Set(user.role.as_str().to_string()),
            email_verified: Set(false),
            is_deleted: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            if Self::is_unique_violation(&e) {
                return UserRepositoryError::UserAlreadyExists;
            }
            UserRepositoryError::DatabaseError(e.to_string())
        })?;

        User::try_from(inserted).map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))
    }
}
