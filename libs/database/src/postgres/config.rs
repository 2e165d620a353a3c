use sea_orm::ConnectOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse, env_required};

/// Connection string used when `DATABASE_URL` is not set. Each `$NAME`
/// placeholder is replaced with the environment variable of the same name.
pub const URL_TEMPLATE: &str =
    "postgres://$POSTGRES_USER:$POSTGRES_PASSWORD@$POSTGRES_HOST:$POSTGRES_PORT/$POSTGRES_DB";

/// PostgreSQL connection pool settings
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    /// Log every statement through sqlx
    pub sqlx_logging: bool,
    /// Start-up connection retries after the first attempt
    pub connect_retries: u32,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging);
        opt
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            sqlx_logging: false,
            connect_retries: 5,
        }
    }
}

/// Replace every `$NAME` in `template` using `lookup`.
///
/// A placeholder name is the longest run of `[A-Za-z0-9_]` after the `$`.
/// Returns the first name `lookup` could not resolve.
pub fn expand_placeholders<F>(template: &str, mut lookup: F) -> Result<String, String>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());

        if len == 0 {
            out.push('$');
        } else {
            let name = &after[..len];
            out.push_str(&lookup(name).ok_or_else(|| name.to_string())?);
        }
        rest = &after[len..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Environment variables:
/// - `DATABASE_URL` - full connection string; when unset the URL is built from
///   [`URL_TEMPLATE`] with `POSTGRES_HOST` (localhost), `POSTGRES_PORT` (5432),
///   `POSTGRES_USER` (postgres), `POSTGRES_DB` (products) and the required
///   `POSTGRES_PASSWORD`
/// - `DB_MAX_CONNECTIONS` (10), `DB_MIN_CONNECTIONS` (1)
/// - `DB_CONNECT_TIMEOUT_SECS` (8), `DB_ACQUIRE_TIMEOUT_SECS` (8)
/// - `DB_SQLX_LOGGING` (false)
/// - `DB_CONNECT_RETRIES` (5)
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = match env_optional("DATABASE_URL") {
            Some(url) => url,
            None => url_from_template()?,
        };
        let defaults = Self::default();

        Ok(Self {
            url,
            max_connections: env_parse("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_parse("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_secs: env_parse(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            acquire_timeout_secs: env_parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
            sqlx_logging: env_parse("DB_SQLX_LOGGING", defaults.sqlx_logging)?,
            connect_retries: env_parse("DB_CONNECT_RETRIES", defaults.connect_retries)?,
        })
    }
}

#[cfg(feature = "config")]
fn url_from_template() -> Result<String, ConfigError> {
    let password = env_required("POSTGRES_PASSWORD")?;

    expand_placeholders(URL_TEMPLATE, |name| match name {
        "POSTGRES_PASSWORD" => Some(password.clone()),
        "POSTGRES_HOST" => Some(env_or_default(name, "localhost")),
        "POSTGRES_PORT" => Some(env_or_default(name, "5432")),
        "POSTGRES_USER" => Some(env_or_default(name, "postgres")),
        "POSTGRES_DB" => Some(env_or_default(name, "products")),
        other => env_optional(other),
    })
    .map_err(|name| ConfigError::MissingEnvVar(name))
}
