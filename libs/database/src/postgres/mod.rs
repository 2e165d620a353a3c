//! PostgreSQL connection, schema and health helpers

mod config;
mod connector;
mod health;

pub use config::{PostgresConfig, URL_TEMPLATE, expand_placeholders};
pub use connector::{
    connect_from_config, connect_from_config_with_retry, connect_with_options, ensure_table,
};
pub use health::{HealthStatus, check_health, check_health_detailed};

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
