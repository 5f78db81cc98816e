use std::sync::Arc;

use mongodb::{options::ClientOptions, Client, Database};
use tracing::info;

use crate::config::{Backend, Config, DatabaseConfig};
use crate::db::{memory_store::MemoryStore, mongo_store::MongoStore, store::Store};
use crate::utils::error::{AppError, AppResult};

pub async fn init_db(config: &DatabaseConfig) -> AppResult<Database> {
    let mut client_options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse MongoDB URI: {e}")))?;

    client_options.app_name = Some("vendorhub".to_string());

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::DatabaseError(format!("Failed to initialize MongoDB client: {e}")))?;

    info!(database = %config.name, "MongoDB client ready");

    Ok(client.database(&config.name))
}

/// Opens the configured backend.
///
/// # Errors
///
/// Fails when MongoDB is unreachable or its indexes cannot be created.
pub async fn open_store(config: &Config) -> AppResult<Arc<dyn Store>> {
    match config.database.backend {
        Backend::Memory => {
            info!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        Backend::Mongo => {
            let store = MongoStore::new(init_db(&config.database).await?);
            store.ensure_indexes().await?;
            Ok(Arc::new(store))
        }
    }
}
