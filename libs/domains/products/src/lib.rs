//! Products Domain
//!
//! Product catalog: CRUD over a single `Product` entity with a name-change
//! event published on `product.update.name`.
//!
//! ## Architecture
//!
//! ```text
//! handlers -> ProductService -> validation -> mapper -> ProductRepository
//!                             \-> ChangeNotifier (name changes only)
//! ```
//!
//! - **models**: request, entity and response shapes
//! - **validation**: per-field rules, errors keyed by public field name
//! - **mapper**: request/entity/response conversions
//! - **repository**: `ProductRepository` trait, named query criteria, in-memory store
//! - **postgres**: sea-orm implementation of the repository
//! - **notifier**: `ChangeNotifier` trait and the publisher-backed implementation
//! - **service**: use-case orchestration
//! - **handlers**: axum routes and OpenAPI docs

pub mod entity;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod notifier;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{ProductError, ProductResult};
pub use handlers::{router, ApiDoc};
pub use models::{
    Product, ProductAddRequest, ProductCategory, ProductNameUpdateMessage, ProductResponse,
    ProductUpdateRequest,
};
pub use notifier::{ChangeNotifier, ProductEventNotifier, PRODUCT_NAME_UPDATED_ROUTING_KEY};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductCriterion, ProductQuery, ProductRepository};
pub use service::ProductService;
