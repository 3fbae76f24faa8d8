use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};

use post_leaderboard::config::{AppConfig, StoreBackend};
use post_leaderboard::database::Database;
use post_leaderboard::middleware::error_handler::json_config;
use post_leaderboard::middleware::error_handlers;
use post_leaderboard::post::memory_store::InMemoryPostStore;
use post_leaderboard::post::mongo_store::MongoPostStore;
use post_leaderboard::post::post_store::PostStore;
use post_leaderboard::ranking::{RankingService, ThreadRandomSource};
use post_leaderboard::router::routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let (store, database): (Arc<dyn PostStore>, Option<Database>) = match config.store_backend {
        StoreBackend::Mongo => {
            let database = Database::init(&config).await.map_err(io::Error::other)?;
            let store = MongoPostStore::new(&database);
            store.ensure_indexes().await.map_err(io::Error::other)?;
            (Arc::new(store), Some(database))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory post store; data is lost on shutdown");
            (Arc::new(InMemoryPostStore::new()), None)
        }
    };

    let ranking_service = web::Data::new(RankingService::from_config(
        &config,
        store,
        Arc::new(ThreadRandomSource),
    ));

    info!(
        "Starting server on http://{}:{} (candidate_limit={}, top_k={})",
        config.host, config.port, config.candidate_limit, config.top_k
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(ranking_service.clone())
            .app_data(json_config())
            .configure(routes)
            .wrap(error_handlers())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    if let Some(database) = database {
        database.close().await;
    }

    Ok(())
}
