use dotenv::dotenv;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;

mod api;
mod config;
mod error;
mod models;
mod repositories;
mod services;
#[cfg(test)]
mod test_utils;

use crate::api::AppState;
use crate::config::{Config, SeedLocation, StorageBackend};
use crate::repositories::{InMemoryTransactionStore, MongoTransactionStore, TransactionStore};
use crate::services::dashboard::DashboardService;
use crate::services::database;
use crate::services::seed_feed::{FileSeedFeed, HttpSeedFeed, SeedSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    info!("Starting transaction dashboard");
    let config = Config::from_env()?;

    let seed: Arc<dyn SeedSource> = match &config.seed {
        SeedLocation::Url(url) => Arc::new(HttpSeedFeed::new(
            url,
            config.seed_timeout,
            config.seed_max_retries,
            config.seed_retry_delay,
        )?),
        SeedLocation::File(path) => Arc::new(FileSeedFeed::new(path.clone())),
    };
    info!("Seed source: {}", seed.describe());

    let (store, db) = match &config.storage {
        StorageBackend::Mongo {
            uri,
            db_name,
            collection,
        } => {
            let db = database::connect_to_database(uri, db_name, config.query_timeout).await?;
            let mongo_store = MongoTransactionStore::new(&db, collection);
            mongo_store.ensure_indexes().await?;
            let store: Arc<dyn TransactionStore> = Arc::new(mongo_store);
            (store, Some(db))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; records are lost on shutdown");
            let store: Arc<dyn TransactionStore> = Arc::new(InMemoryTransactionStore::new());
            (store, None)
        }
    };

    let service = Arc::new(DashboardService::new(store, seed, config.query_timeout));
    let app = api::create_router(AppState { service });

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Server listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        database::close_database(db).await;
    }
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
