// src/shared/api/json_config.rs
use crate::shared::api::ApiResponse;
use actix_web::web::JsonConfig;

/// Malformed or mistyped JSON bodies get the standard error envelope.
pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        tracing::warn!(error = %err, "Rejected request body");
        actix_web::error::InternalError::from_response(
            err,
            ApiResponse::bad_request("INVALID_REQUEST", "Invalid request body"),
        )
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{post, test, web, App, HttpResponse, Responder};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    #[post("/echo")]
    async fn echo(_body: web::Json<Payload>) -> impl Responder {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_malformed_body_uses_envelope() {
        let app =
            test::init_service(App::new().app_data(custom_json_config()).service(echo)).await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    }
}
