use core_config::{
    AppInfo, FromEnv, app_info, env_or_default, env_parse_optional, server::ServerConfig,
};
use database::mongodb::MongoConfig;
use domain_products::{ListingConfig, mongodb::DEFAULT_COLLECTION, query::DEFAULT_LIMIT};
use std::path::{Path, PathBuf};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Page size default and optional cap (`PRODUCTS_MAX_LIMIT`)
    pub listing: ListingConfig,
    /// Collection holding the catalogue (`PRODUCTS_COLLECTION`)
    pub products_collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let listing = ListingConfig {
            default_limit: DEFAULT_LIMIT,
            max_limit: env_parse_optional("PRODUCTS_MAX_LIMIT")?,
        };

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            listing,
            products_collection: env_or_default("PRODUCTS_COLLECTION", DEFAULT_COLLECTION),
        })
    }
}

/// Loads a `.env` file into the process environment.
///
/// Without a path the file is looked up from the working directory upwards.
/// A missing file is not an error. Variables already set in the environment
/// keep their values.
pub fn load_dotenv(path: Option<&Path>) -> eyre::Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}
