use async_trait::async_trait;
use serde::Serialize;
use tracing::trace;

use crate::PublishResult;

/// Sink for outbound events, addressed by routing key (subject).
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Hand `payload` to the backend under `subject`
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> PublishResult<()>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}

/// JSON convenience on top of [`Publisher`]
#[async_trait]
pub trait PublisherExt: Publisher {
    async fn publish_json<T>(&self, subject: &str, event: &T) -> PublishResult<()>
    where
        T: Serialize + Sync,
    {
        let payload = serde_json::to_vec(event)?;
        self.publish(subject, payload).await
    }
}

impl<P: Publisher + ?Sized> PublisherExt for P {}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl Publisher for NoopPublisher {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> PublishResult<()> {
        trace!(subject, bytes = payload.len(), "Event dropped (publishing disabled)");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_noop_accepts_everything() {
        let publisher: Arc<dyn Publisher> = Arc::new(NoopPublisher);
        assert!(publisher.publish("any.subject", b"{}".to_vec()).await.is_ok());
        assert!(publisher
            .publish_json("any.subject", &serde_json::json!({"a": 1}))
            .await
            .is_ok());
        assert_eq!(publisher.backend(), "noop");
    }
}
