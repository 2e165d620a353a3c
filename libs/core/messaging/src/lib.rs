//! Backend-agnostic event publishing.
//!
//! Services depend on the [`Publisher`] trait and receive a concrete backend at
//! start-up:
//!
//! - [`nats::NatsPublisher`] (feature `nats`) - core NATS publish
//! - [`InMemoryPublisher`] - records messages, for tests and local runs
//! - [`NoopPublisher`] - events disabled
//!
//! Publishing is fire-and-forget: a successful call means the message was
//! handed to the backend, not that any consumer received it.
//!
//! ```ignore
//! use messaging::{Publisher, PublisherExt};
//!
//! publisher.publish_json("product.update.name", &event).await?;
//! ```

mod error;
mod memory;
mod publisher;

#[cfg(feature = "nats")]
pub mod nats;

pub use error::{PublishError, PublishResult};
pub use memory::{InMemoryPublisher, PublishedMessage};
pub use publisher::{NoopPublisher, Publisher, PublisherExt};
