use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::auth::application::domain::entities::{NewUser, User};
use crate::auth::application::ports::outgoing::{
    UserQuery, UserQueryError, UserRepository, UserRepositoryError,
};

/// Credential store backed by a vector. Clones share the same rows.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn find_raw(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Applies `change` to every row with this email, deleted or not.
    pub fn update(&self, email: &str, change: impl Fn(&mut User)) {
        for user in self.users.lock().unwrap().iter_mut() {
            if user.email == email {
                change(user);
            }
        }
    }
}

#[async_trait]
impl UserQuery for InMemoryUserStore {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id && !u.is_deleted)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email && !u.is_deleted)
            .cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();

        // Mirrors the partial unique index on (email) WHERE is_deleted = false
        if users
            .iter()
            .any(|u| u.email == new_user.email && !u.is_deleted)
        {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
            email_verified: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());

        Ok(user)
    }
}
