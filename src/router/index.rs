use crate::post::post_index::post_routes;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::utils::helpers::service_name;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the post leaderboard service",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": service_name(),
    }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(post_routes);
    cfg.service(default);
}
