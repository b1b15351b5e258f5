use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::application::domain::entities::UserProfile;
use crate::auth::application::use_cases::AuthSession;

/// Public user representation
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    /// User ID (UUID)
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,

    /// Email address, lowercased
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[schema(example = "Jane")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    /// `customer` or `admin`
    #[schema(example = "customer")]
    pub role: String,

    #[schema(example = false)]
    pub email_verified: bool,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role: profile.role.to_string(),
            email_verified: profile.email_verified,
        }
    }
}

/// Returned by register, login and refresh
#[derive(Serialize, ToSchema)]
pub struct AuthSessionResponse {
    pub user: UserResponse,

    /// JWT access token (short-lived)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// JWT refresh token (long-lived)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
}

impl From<AuthSession> for AuthSessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user.into(),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
        }
    }
}
