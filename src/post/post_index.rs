use super::post_controller::create_and_fetch;
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/create-and-fetch").route(web::post().to(create_and_fetch)));
}
