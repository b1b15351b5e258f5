use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token type, expected: {0}")]
    InvalidTokenType(TokenKind),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

/// Identity fields embedded into every issued token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSubject {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Structure for JWT Claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub token_type: TokenKind,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub trait TokenProvider: Send + Sync {
    fn generate_access_token(&self, subject: &TokenSubject) -> Result<String, TokenError>;
    fn generate_refresh_token(&self, subject: &TokenSubject) -> Result<String, TokenError>;
    fn verify_access_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
    fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, TokenError>;

    fn issue_pair(&self, subject: &TokenSubject) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(subject)?,
            refresh_token: self.generate_refresh_token(subject)?,
        })
    }
}
