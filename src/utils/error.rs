use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::post::post_store::StoreError;
use crate::ranking::RankingError;
use crate::utils::helpers::service_name;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Bad Request: {0}")]
    BadRequestError(String),

    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl CustomError {
    pub fn error_code(&self) -> &'static str {
        match *self {
            CustomError::BadRequestError(..) => "BAD_REQUEST_ERROR",
            CustomError::ConflictError(..) => "CONFLICT_ERROR",
            CustomError::InternalServerError(..) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<RankingError> for CustomError {
    fn from(err: RankingError) -> Self {
        match err {
            RankingError::InvalidInput(msg) => CustomError::BadRequestError(msg),
            RankingError::Store(StoreError::ConstraintViolation(msg)) => {
                CustomError::ConflictError(msg)
            }
            RankingError::Store(store_err) => {
                error!("Ranking aborted: {store_err}");
                CustomError::InternalServerError(store_err.to_string())
            }
        }
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::BadRequestError(..) => StatusCode::BAD_REQUEST,
            CustomError::ConflictError(..) => StatusCode::CONFLICT,
            CustomError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_message = json!({
            "success": false,
            "message": self.to_string(),
            "httpStatusCode": self.status_code().as_u16(),
            "error": self.error_code(),
            "service": service_name(),
        });

        HttpResponse::build(self.status_code()).json(error_message)
    }
}
