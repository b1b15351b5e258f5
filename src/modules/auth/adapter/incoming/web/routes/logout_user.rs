use crate::api::schemas::SuccessResponse;
use crate::shared::api::ApiResponse;
use actix_web::{post, Responder};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = "Logout successful")]
    pub message: String,
}

/// Logout
///
/// Tokens are stateless and nothing is revoked server-side; clients discard
/// both tokens. Always succeeds.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (
            status = 200,
            description = "Logout acknowledged",
            body = inline(SuccessResponse<LogoutResponse>)
        ),
    )
)]
#[post("/auth/logout")]
pub async fn logout_user_handler() -> impl Responder {
    info!("Logout requested");

    ApiResponse::success(LogoutResponse {
        message: "Logout successful".to_string(),
    })
}
