//! Core NATS publishing.
//!
//! `publish` only enqueues the message on the client's outbound buffer; it
//! never waits for a server acknowledgement. Call [`NatsPublisher::flush`]
//! on shutdown to push out anything still buffered.

use async_nats::Client;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::{PublishError, PublishResult, Publisher};

#[derive(Clone)]
pub struct NatsPublisher {
    client: Client,
    subject_prefix: Option<String>,
}

impl NatsPublisher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            subject_prefix: None,
        }
    }

    /// Connect to `url`, identifying as `client_name`
    pub async fn connect(url: &str, client_name: &str) -> PublishResult<Self> {
        let client = async_nats::ConnectOptions::new()
            .name(client_name)
            .connect(url)
            .await
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        info!(url, client_name, "Connected to NATS");
        Ok(Self::new(client))
    }

    /// Publish every routing key as `<prefix>.<routing key>`
    pub fn with_subject_prefix(mut self, prefix: Option<String>) -> Self {
        self.subject_prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    pub fn subject_for(&self, routing_key: &str) -> String {
        match &self.subject_prefix {
            Some(prefix) => format!("{prefix}.{routing_key}"),
            None => routing_key.to_string(),
        }
    }

    pub async fn flush(&self) -> PublishResult<()> {
        self.client
            .flush()
            .await
            .map_err(|e| PublishError::Connection(e.to_string()))
    }
}

#[async_trait]
impl Publisher for NatsPublisher {
    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> PublishResult<()> {
        let subject = self.subject_for(subject);
        self.client
            .publish(subject.clone(), payload.into())
            .await
            .map_err(|e| PublishError::publish(&subject, e))?;

        debug!(%subject, "Event handed to NATS");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "nats"
    }
}
