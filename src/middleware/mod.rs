pub mod error_handler;
pub mod not_found;

use actix_web::http::StatusCode;
use actix_web::middleware::ErrorHandlers;

/// Error envelope for 404s and any non-JSON error response.
pub fn error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .handler(StatusCode::NOT_FOUND, not_found::not_found)
        .default_handler(error_handler::handle_error)
}
