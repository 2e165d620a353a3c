use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Open a pool with the given options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Open a pool from a [`PostgresConfig`], single attempt
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Open a pool, retrying with exponential backoff.
///
/// Without an explicit `retry_config` the config's `connect_retries` is used.
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DatabaseError> {
    let retry_config = retry_config
        .unwrap_or_else(|| RetryConfig::new().with_max_retries(config.connect_retries));
    let options = config.into_connect_options();

    retry_with_backoff(|| connect_with_options(options.clone()), retry_config)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Create the table backing `entity` unless it already exists.
///
/// Only the table is derived from the entity; this does not alter existing tables.
pub async fn ensure_table<C, E>(db: &C, entity: E) -> Result<(), DatabaseError>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut create = Schema::new(backend).create_table_from_entity(entity);
    create.if_not_exists();

    db.execute_raw(backend.build(&create))
        .await
        .map_err(|e| DatabaseError::SchemaError(format!("{}: {e}", entity.table_name())))?;

    info!(table = entity.table_name(), "Table ensured");
    Ok(())
}
