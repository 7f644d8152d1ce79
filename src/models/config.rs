use std::env;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_ENVIRONMENT: &str = "development";

/// Configuration options for the catalog server.
///
/// Values are layered: built-in defaults, `config/default.yaml`,
/// `config/{APP_ENVIRONMENT}.yaml`, then `APP_*` environment variables.
/// `database_url` has no default, so a missing store location is fatal.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Deployment name, e.g. `development` or `production`.
    pub environment: String,
    /// How long a request waits for a pooled store connection before the
    /// store is reported unavailable.
    pub db_connection_timeout_secs: u64,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            env::var("APP_ENVIRONMENT").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub(crate) fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("address", "127.0.0.1")?
            .set_default("port", 5000)?
            .set_default("environment", DEFAULT_ENVIRONMENT)?
            .set_default("db_connection_timeout_secs", 5)
    }
}
