use crate::post::post_model::CreatePostRequest;
use crate::ranking::RankingService;
use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::json;

/// Store a post and return the refreshed leaderboard
/// POST /create-and-fetch
pub async fn create_and_fetch(
    ranking_service: web::Data<RankingService>,
    body: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    let now = Utc::now();
    let outcome = ranking_service.create_and_rank(&body.content, now).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post created successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "post_id": outcome.post_id.to_hex(),
        "top_posts": outcome.top_posts,
    })))
}
