//! Products API routes

use std::sync::Arc;

use axum::Router;
use domain_products::{handlers, PgProductRepository, ProductEventNotifier, ProductService};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let notifier = ProductEventNotifier::new(state.publisher.clone());
    let service = ProductService::new(repository, Arc::new(notifier));
    handlers::router(service)
}

/// Create the products table if it is missing
pub async fn ensure_schema(state: &AppState) -> eyre::Result<()> {
    PgProductRepository::new(state.db.clone())
        .ensure_schema()
        .await?;
    Ok(())
}
