use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

use crate::{PublishError, PublishResult, Publisher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub subject: String,
    pub payload: Vec<u8>,
}

impl PublishedMessage {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

/// Keeps every published message in memory. Clones share the same log.
///
/// [`set_failing`](Self::set_failing) makes subsequent publishes return
/// [`PublishError::Publish`], which lets callers exercise their failure paths.
/// Callers that publish from background tasks can block on
/// [`wait_for_messages`](Self::wait_for_messages).
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    messages: Arc<Mutex<Vec<PublishedMessage>>>,
    failing: Arc<AtomicBool>,
    published: Arc<Notify>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.lock().await.clone()
    }

    pub async fn messages_for(&self, subject: &str) -> Vec<PublishedMessage> {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|m| m.subject == subject)
            .cloned()
            .collect()
    }

    /// Wait until `subject` has at least `count` messages or `within` elapses,
    /// then return what was recorded for it.
    pub async fn wait_for_messages(
        &self,
        subject: &str,
        count: usize,
        within: Duration,
    ) -> Vec<PublishedMessage> {
        let _ = tokio::time::timeout(within, async {
            loop {
                let notified = self.published.notified();
                if self.messages_for(subject).await.len() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await;

        self.messages_for(subject).await
    }
}

#[async_trait]
impl Publisher for InMemoryPublisher {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> PublishResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PublishError::publish(subject, "broker unavailable"));
        }

        self.messages.lock().await.push(PublishedMessage {
            subject: subject.to_string(),
            payload,
        });
        self.published.notify_waiters();
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
