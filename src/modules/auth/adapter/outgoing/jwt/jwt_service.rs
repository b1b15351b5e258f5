use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;

use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenKind, TokenProvider, TokenSubject,
};

use super::jwt_config::JwtConfig;

#[derive(Clone)]
struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// HS256 tokens. Access and refresh tokens are signed with separate secrets.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    access_keys: KeyPair,
    refresh_keys: KeyPair,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("config", &self.config)
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let access_keys = KeyPair::from_secret(&config.access_secret);
        let refresh_keys = KeyPair::from_secret(&config.refresh_secret);

        Self {
            config,
            access_keys,
            refresh_keys,
        }
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }

    fn ttl_seconds(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.config.access_ttl_seconds,
            TokenKind::Refresh => self.config.refresh_ttl_seconds,
        }
    }

    fn generate_token(&self, subject: &TokenSubject, kind: TokenKind) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = TimeDelta::try_seconds(self.ttl_seconds(kind))
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                TokenError::EncodingError(format!("{} token expiry is out of range", kind))
            })?;

        let claims = TokenClaims {
            sub: subject.user_id,
            email: subject.email.clone(),
            role: subject.role,
            token_type: kind,
            iss: self.config.issuer.clone(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys(kind).encoding,
        )
        .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    fn verify_token(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_seconds;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);

        let decoded = decode::<TokenClaims>(token, &self.keys(kind).decoding, &validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!(token_type = %kind, "Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!(token_type = %kind, "Token verification failed: Token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::warn!(token_type = %kind, "Token verification failed: Invalid signature");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::warn!(token_type = %kind, "Token verification failed: Malformed token or algorithm");
                        TokenError::MalformedToken
                    }
                    ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                        tracing::warn!(token_type = %kind, "Token verification failed: Malformed token");
                        TokenError::MalformedToken
                    }
                    other => {
                        tracing::warn!(token_type = %kind, error = ?other, "Token verification failed");
                        TokenError::MalformedToken
                    }
                }
            })?;

        if decoded.claims.token_type != kind {
            tracing::warn!(
                expected = %kind,
                actual = %decoded.claims.token_type,
                "Token type mismatch"
            );
            return Err(TokenError::InvalidTokenType(kind));
        }

        Ok(decoded.claims)
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.generate_token(subject, TokenKind::Access)
    }

    fn generate_refresh_token(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.generate_token(subject, TokenKind::Refresh)
    }

    fn verify_access_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_token(token, TokenKind::Access)
    }

    fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_token(token, TokenKind::Refresh)
    }
}
