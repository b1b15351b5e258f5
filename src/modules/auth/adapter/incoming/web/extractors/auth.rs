use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    marker::PhantomData,
    ops::Deref,
    sync::Arc,
};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::shared::api::ApiResponse;

/// Identity of the caller, taken from a verified access token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

#[derive(Debug, PartialEq)]
enum BearerError {
    Missing,
    Malformed,
}

/// Accepts exactly `Bearer <token>`: one space, nothing before or after.
fn extract_bearer_token(req: &HttpRequest) -> Result<&str, BearerError> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    if header.is_empty() {
        return Err(BearerError::Missing);
    }

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}

impl AuthenticatedUser {
    fn authenticate(req: &HttpRequest) -> Result<Self, ActixError> {
        let token_provider = req
            .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
            .ok_or_else(|| {
                tracing::error!("Token provider is not registered as app data");
                create_api_error(ApiResponse::internal_error())
            })?;

        let token = extract_bearer_token(req).map_err(|e| match e {
            BearerError::Missing => create_api_error(ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing authorization header",
            )),
            BearerError::Malformed => create_api_error(ApiResponse::unauthorized(
                "INVALID_AUTH_HEADER",
                "Invalid authorization header format",
            )),
        })?;

        let claims = token_provider.verify_access_token(token).map_err(|e| {
            tracing::debug!(reason = %e, path = %req.path(), "Access token rejected");
            create_api_error(ApiResponse::unauthorized(
                "INVALID_TOKEN",
                "Invalid or expired token",
            ))
        })?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req))
    }
}

/// Allow-list used by [`RequireRole`].
pub trait RoleRequirement {
    const ALLOWED: &'static [UserRole];
}

#[derive(Debug, Clone, Copy)]
pub struct AdminOnly;

impl RoleRequirement for AdminOnly {
    const ALLOWED: &'static [UserRole] = &[UserRole::Admin];
}

/// An [`AuthenticatedUser`] whose role is in `R::ALLOWED`; anyone else gets 403.
pub struct RequireRole<R: RoleRequirement> {
    user: AuthenticatedUser,
    _requirement: PhantomData<fn() -> R>,
}

impl<R: RoleRequirement> RequireRole<R> {
    pub fn into_inner(self) -> AuthenticatedUser {
        self.user
    }
}

impl<R: RoleRequirement> Deref for RequireRole<R> {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl<R: RoleRequirement> std::fmt::Debug for RequireRole<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequireRole")
            .field("user", &self.user)
            .field("allowed", &R::ALLOWED)
            .finish()
    }
}

impl<R: RoleRequirement> FromRequest for RequireRole<R> {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = match AuthenticatedUser::authenticate(req) {
            Ok(user) => user,
            Err(e) => return ready(Err(e)),
        };

        if !R::ALLOWED.contains(&user.role) {
            tracing::warn!(
                user_id = %user.user_id,
                role = %user.role,
                path = %req.path(),
                "Role not permitted"
            );
            return ready(Err(create_api_error(ApiResponse::forbidden(
                "FORBIDDEN",
                "Insufficient permissions",
            ))));
        }

        ready(Ok(RequireRole {
            user,
            _requirement: PhantomData,
        }))
    }
}
