use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::refresh_token::{RefreshTokenError, RefreshTokenRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::session_response::AuthSessionResponse;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenRequestDto {
    /// Refresh token issued by register, login or a previous refresh
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    #[serde(default)]
    pub refresh_token: String,
}

/// Refresh tokens
///
/// Exchanges a valid refresh token for a new access and refresh token pair.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    request_body = RefreshTokenRequestDto,
    responses(
        (
            status = 200,
            description = "Token refreshed",
            body = inline(SuccessResponse<AuthSessionResponse>)
        ),
        (status = 400, description = "Missing refresh token", body = ErrorResponse),
        (
            status = 401,
            description = "Invalid or expired refresh token",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_TOKEN",
                    "message": "Invalid or expired refresh token"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/auth/refresh")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match RefreshTokenRequest::new(req.into_inner().refresh_token) {
        Ok(request) => request,
        Err(errors) => return ApiResponse::validation_error(&errors),
    };

    match data.refresh_token_use_case.execute(request).await {
        Ok(session) => {
            info!(user_id = %session.user.id, "Tokens refreshed");
            ApiResponse::success(AuthSessionResponse::from(session))
        }
        Err(RefreshTokenError::InvalidToken) => {
            warn!("Token refresh rejected");
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired refresh token")
        }
        Err(err) => {
            error!(error = %err, "Token refresh failed");
            ApiResponse::internal_error()
        }
    }
}
