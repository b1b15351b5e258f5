pub mod fetch_current_user;
pub mod login_user;
pub mod refresh_token;
pub mod register_user;

use serde::Serialize;

use crate::auth::application::domain::entities::UserProfile;
use crate::auth::application::ports::outgoing::TokenPair;

/// What register, login and refresh hand back: the account plus a fresh token pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthSession {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthSession {
    pub fn new(user: UserProfile, tokens: TokenPair) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
