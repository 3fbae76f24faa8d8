use log::info;
use mongodb::bson::doc;
use mongodb::{Client, options::ClientOptions};

use crate::config::AppConfig;

/// Explicitly owned MongoDB handle; opened once in `main` and closed on shutdown.
pub struct Database {
    pub client: Client,
    pub name: String,
}

impl Database {
    pub async fn init(config: &AppConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
        client_options.app_name = Some(config.service_name.clone());
        client_options.max_pool_size = Some(config.max_pool_size);
        client_options.server_selection_timeout = Some(config.store_timeout);

        let client = Client::with_options(client_options)?;

        // Ping the server to see if you can connect to the cluster
        client
            .database("admin")
            .run_command(doc! {"ping": 1})
            .await?;

        info!(
            "Connected to MongoDB (database={}, max_pool_size={})",
            config.database_name, config.max_pool_size
        );

        Ok(Self {
            client,
            name: config.database_name.clone(),
        })
    }

    pub fn database(&self) -> mongodb::Database {
        self.client.database(&self.name)
    }

    /// Wait for in-flight operations and release pooled connections.
    pub async fn close(self) {
        self.client.shutdown().await;
        info!("MongoDB connection closed");
    }
}
