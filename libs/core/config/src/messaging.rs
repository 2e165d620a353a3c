use crate::{env_optional, env_or_default, ConfigError, FromEnv};

/// Event bus connection settings.
///
/// `NATS_URL` is optional: without it the service starts with events disabled.
/// `EVENTS_EXCHANGE`, when set, is the subject prefix for every routing key.
#[derive(Clone, Debug)]
pub struct MessagingConfig {
    pub url: Option<String>,
    pub client_name: String,
    pub exchange: Option<String>,
}

impl MessagingConfig {
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}

impl FromEnv for MessagingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_optional("NATS_URL"),
            client_name: env_or_default("NATS_CLIENT_NAME", "products-api"),
            exchange: env_optional("EVENTS_EXCHANGE"),
        })
    }
}
