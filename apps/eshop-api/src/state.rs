//! Application state management.
//!
//! This module defines the shared application state passed to all request handlers.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned per handler; the MongoDB handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, released on shutdown
    pub mongo_client: Client,
    /// Database holding the catalogue
    pub db: Database,
}

#[cfg(test)]
impl AppState {
    /// State around a client that is never reachable, for exercising failure paths.
    pub(crate) async fn unreachable() -> Self {
        use crate::config::{Config, Environment};
        use core_config::{app_info, server::ServerConfig};
        use database::mongodb::MongoConfig;
        use domain_products::ListingConfig;

        let url = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200";
        let mongo_client = Client::with_uri_str(url).await.unwrap();
        let db = mongo_client.database("eShopDB");

        Self {
            config: Config {
                app: app_info!(),
                mongodb: MongoConfig::new(url),
                server: ServerConfig::default(),
                environment: Environment::Development,
                listing: ListingConfig::default(),
                products_collection: "products".to_string(),
            },
            mongo_client,
            db,
        }
    }
}
