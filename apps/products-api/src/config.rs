//! Configuration for Products API

use core_config::{env_parse, messaging::MessagingConfig, server::ServerConfig, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    pub messaging: MessagingConfig,
    /// Create the products table at start-up when it is missing (`DB_ENSURE_SCHEMA`,
    /// on by default in development only)
    pub ensure_schema: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let postgres = PostgresConfig::from_env()?;
        let messaging = MessagingConfig::from_env()?;
        let ensure_schema = env_parse("DB_ENSURE_SCHEMA", environment.is_development())?;

        Ok(Self {
            environment,
            server,
            postgres,
            messaging,
            ensure_schema,
        })
    }
}
