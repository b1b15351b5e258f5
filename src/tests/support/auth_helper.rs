use actix_web::web;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::{User, UserRole};
use crate::auth::application::ports::outgoing::{TokenProvider, TokenSubject};

pub const TEST_ACCESS_SECRET: &str = "test-access-secret-for-testing-only-000";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret-for-testing-only-000";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: TEST_ACCESS_SECRET.to_string(),
        refresh_secret: TEST_REFRESH_SECRET.to_string(),
        issuer: "storefront-test".to_string(),
        access_ttl_seconds: 900,
        refresh_ttl_seconds: 86400,
        leeway_seconds: 0,
    }
}

pub fn test_jwt_service() -> JwtTokenService {
    JwtTokenService::new(test_jwt_config())
}

pub fn test_token_provider() -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(test_jwt_service())
}

/// The shape the request gate looks up in app data.
pub fn token_provider_data(
    provider: Arc<dyn TokenProvider + Send + Sync>,
) -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    web::Data::new(provider)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn access_token_for(user_id: Uuid, email: &str, role: UserRole) -> String {
    test_jwt_service()
        .generate_access_token(&TokenSubject {
            user_id,
            email: email.to_string(),
            role,
        })
        .expect("test token should encode")
}

pub fn sample_user(email: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: "hashed::password".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        role,
        email_verified: false,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}
