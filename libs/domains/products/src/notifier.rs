use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use messaging::{Publisher, PublisherExt};
use tracing::{debug, warn};

use crate::models::ProductNameUpdateMessage;

/// Routing key of the product name change event
pub const PRODUCT_NAME_UPDATED_ROUTING_KEY: &str = "product.update.name";

/// A publish still pending after this long is abandoned
const PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// Outbound product events.
///
/// Delivery is best effort: implementations return without waiting on the
/// broker and never fail the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    async fn publish_name_changed(&self, message: ProductNameUpdateMessage);
}

/// [`ChangeNotifier`] backed by a message [`Publisher`].
///
/// Each event is published from its own task, so a stalled broker only
/// delays the event.
#[derive(Clone)]
pub struct ProductEventNotifier {
    publisher: Arc<dyn Publisher>,
    publish_timeout: Duration,
}

impl ProductEventNotifier {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self {
            publisher,
            publish_timeout: PUBLISH_TIMEOUT,
        }
    }

    pub fn with_publish_timeout(mut self, publish_timeout: Duration) -> Self {
        self.publish_timeout = publish_timeout;
        self
    }
}

#[async_trait]
impl ChangeNotifier for ProductEventNotifier {
    async fn publish_name_changed(&self, message: ProductNameUpdateMessage) {
        let publisher = Arc::clone(&self.publisher);
        let publish_timeout = self.publish_timeout;

        tokio::spawn(async move {
            let backend = publisher.backend();
            let published = tokio::time::timeout(
                publish_timeout,
                publisher.publish_json(PRODUCT_NAME_UPDATED_ROUTING_KEY, &message),
            )
            .await;

            match published {
                Ok(Ok(())) => debug!(
                    product_id = %message.product_id,
                    backend,
                    "Published product name change"
                ),
                Ok(Err(e)) => warn!(
                    product_id = %message.product_id,
                    backend,
                    error = %e,
                    "Failed to publish product name change"
                ),
                Err(_) => warn!(
                    product_id = %message.product_id,
                    backend,
                    timeout = ?publish_timeout,
                    "Timed out publishing product name change"
                ),
            }
        });
    }
}
