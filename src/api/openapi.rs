use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use crate::shared::validation::FieldViolation;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::Server;
use utoipa::OpenApi;

// Auth
use crate::auth::adapter::incoming::web::routes::{
    AuthSessionResponse, LoginRequestDto, LogoutResponse, RefreshTokenRequestDto,
    RegisterUserRequestDto, UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "Customer authentication for the storefront backend",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::fetch_current_user_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<AuthSessionResponse>,
            ErrorResponse,
            ErrorDetail,
            FieldViolation,

            // Auth DTOs
            RegisterUserRequestDto,
            LoginRequestDto,
            RefreshTokenRequestDto,
            AuthSessionResponse,
            UserResponse,
            LogoutResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Document paths are relative to the mounted API prefix, published as the server URL.
    pub fn for_prefix(api_prefix: &str) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        doc.servers = Some(vec![Server::new(api_prefix)]);
        doc
    }
}

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from register, login or refresh"))
                        .build(),
                ),
            )
        }
    }
}
