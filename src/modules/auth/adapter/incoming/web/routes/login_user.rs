use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::session_response::AuthSessionResponse;

/// Login request from client
#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Email address
    #[schema(example = "jane@example.com")]
    #[serde(default)]
    pub email: String,

    /// Password
    #[schema(example = "longenough1")]
    #[serde(default)]
    pub password: String,
}

/// User login
///
/// Authenticates with email and password, returns JWT access and refresh tokens.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (
            status = 200,
            description = "Login successful",
            body = inline(SuccessResponse<AuthSessionResponse>)
        ),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_CREDENTIALS",
                    "message": "Invalid email or password"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Login attempt");

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(request) => request,
        Err(errors) => {
            warn!(error = %errors, "Login input rejected");
            return ApiResponse::validation_error(&errors);
        }
    };

    match data.login_user_use_case.execute(request).await {
        Ok(session) => {
            info!(
                user_id = %session.user.id,
                email = %session.user.email,
                "User logged in successfully"
            );
            ApiResponse::success(AuthSessionResponse::from(session))
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: Invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(LoginError::PasswordVerificationFailed(ref e)) => {
            error!(error = %e, "Password verification failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::QueryError(ref e)) => {
            error!(error = %e, "Database query failed");
            ApiResponse::internal_error()
        }
    }
}
