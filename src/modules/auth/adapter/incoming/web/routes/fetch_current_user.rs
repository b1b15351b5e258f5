use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::use_cases::fetch_current_user::FetchUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::{error, info, warn};

use super::session_response::UserResponse;

/// Current user
///
/// Returns the profile of the user identified by the access token.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = inline(SuccessResponse<UserResponse>)),
        (
            status = 401,
            description = "Missing, malformed or invalid access token",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "MISSING_AUTH_HEADER",
                    "message": "Missing authorization header"
                }
            })
        ),
        (
            status = 404,
            description = "User no longer exists",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "USER_NOT_FOUND",
                    "message": "User not found"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[get("/auth/me")]
pub async fn fetch_current_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.fetch_current_user_use_case.execute(user.user_id).await {
        Ok(profile) => {
            info!(user_id = %profile.id, "Current user fetched");
            ApiResponse::success(UserResponse::from(profile))
        }
        Err(FetchUserError::UserNotFound) => {
            warn!(user_id = %user.user_id, "Token subject no longer exists");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(FetchUserError::QueryError(ref e)) => {
            error!(user_id = %user.user_id, error = %e, "Failed to fetch current user");
            ApiResponse::internal_error()
        }
    }
}
