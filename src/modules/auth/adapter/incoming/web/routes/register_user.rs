use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::register_user::{RegisterUserError, RegisterUserRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::session_response::AuthSessionResponse;

/// Request body for user registration
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequestDto {
    /// Email address
    #[schema(example = "jane@example.com")]
    #[serde(default)]
    pub email: String,

    /// Password, 8 to 72 bytes
    #[schema(example = "longenough1")]
    #[serde(default)]
    pub password: String,

    #[schema(example = "Jane")]
    #[serde(default)]
    pub first_name: Option<String>,

    #[schema(example = "Doe")]
    #[serde(default)]
    pub last_name: Option<String>,
}

fn map_register_user_error(err: RegisterUserError, email: &str) -> HttpResponse {
    match &err {
        RegisterUserError::EmailAlreadyExists => {
            warn!(email = %email, "Registration rejected: email already exists");
            ApiResponse::conflict("EMAIL_EXISTS", "Email already exists")
        }

        RegisterUserError::HashingFailed(_)
        | RegisterUserError::TokenGenerationFailed(_)
        | RegisterUserError::QueryError(_)
        | RegisterUserError::RepositoryError(_) => {
            error!(email = %email, error = %err, "Registration failed");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new customer account
///
/// Creates the account and signs the caller in, returning both tokens.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUserRequestDto,
    responses(
        (
            status = 201,
            description = "User registered",
            body = inline(SuccessResponse<AuthSessionResponse>)
        ),
        (
            status = 400,
            description = "Validation failed",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "VALIDATION_ERROR",
                    "message": "Validation failed",
                    "details": [
                        { "field": "password", "message": "Value is too short (minimum 8 characters)" }
                    ]
                }
            })
        ),
        (
            status = 409,
            description = "Email already registered",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "EMAIL_EXISTS",
                    "message": "Email already exists"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Registration attempt");

    let request =
        match RegisterUserRequest::new(dto.email, dto.password, dto.first_name, dto.last_name) {
            Ok(request) => request,
            Err(errors) => {
                warn!(error = %errors, "Registration input rejected");
                return ApiResponse::validation_error(&errors);
            }
        };

    let email = request.email().to_string();

    match data.register_user_use_case.execute(request).await {
        Ok(session) => {
            info!(user_id = %session.user.id, email = %session.user.email, "User registered");
            ApiResponse::created(AuthSessionResponse::from(session))
        }
        Err(err) => map_register_user_error(err, &email),
    }
}
