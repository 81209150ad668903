//! Database library providing the MongoDB connector used by the storefront services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB configuration, connection and health checks
//! - `config` - Load [`mongodb::MongoConfig`] through `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "eShopDB");
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```
//!
//! Connections are attempted exactly once. A store that is unreachable at
//! boot is a startup error for the caller to report.

#[cfg(feature = "mongodb")]
pub mod mongodb;
