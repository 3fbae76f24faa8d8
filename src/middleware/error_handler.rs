use actix_web::dev::ServiceResponse;
use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use log::warn;
use serde_json::json;

use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;

/// Rejects undecodable bodies (bad JSON, missing `content`) with the error envelope.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    warn!("Rejected payload for {}: {}", req.path(), err);
    CustomError::BadRequestError(format!("Invalid request: {err}")).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Wraps error responses that are not already JSON in the error envelope.
pub fn handle_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let is_json = res
        .response()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status_code = res.response().status();
    let error_message = res
        .response()
        .error()
        .map(|e| e.to_string())
        .unwrap_or_else(|| status_code.canonical_reason().unwrap_or("Unknown error").to_string());

    let new_response = HttpResponse::build(status_code).json(json!({
        "success": false,
        "message": error_message,
        "httpStatusCode": status_code.as_u16(),
        "error": status_code
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_uppercase()
            .replace(' ', "_"),
        "service": service_name(),
    }));

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}
