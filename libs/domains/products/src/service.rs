//! Product Service - orchestrates validation, mapping, persistence and events

use std::collections::HashSet;
use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::mapper;
use crate::models::{
    ProductAddRequest, ProductNameUpdateMessage, ProductResponse, ProductUpdateRequest,
};
use crate::notifier::ChangeNotifier;
use crate::repository::{ProductQuery, ProductRepository};
use crate::validation;

/// Product use-cases.
///
/// "Not found" is an absent result or `false`, except for updates where a
/// missing target is [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self {
            repository: Arc::new(repository),
            notifier,
        }
    }

    /// All products in repository order
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> ProductResult<Vec<ProductResponse>> {
        let products = self.repository.list().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_condition(
        &self,
        query: ProductQuery,
    ) -> ProductResult<Option<ProductResponse>> {
        let product = self.repository.find_one(query).await?;
        Ok(product.map(ProductResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_condition(
        &self,
        query: ProductQuery,
    ) -> ProductResult<Vec<ProductResponse>> {
        let products = self.repository.find_many(query).await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    /// Products whose name or category contains `text`.
    ///
    /// Name matches come first; a product matching both appears once.
    #[instrument(skip(self))]
    pub async fn search_products(&self, text: &str) -> ProductResult<Vec<ProductResponse>> {
        let by_name = self
            .repository
            .find_many(ProductQuery::name_contains(text))
            .await?;
        let by_category = self
            .repository
            .find_many(ProductQuery::category_contains(text))
            .await?;

        let mut seen = HashSet::new();
        Ok(by_name
            .into_iter()
            .chain(by_category)
            .filter(|p| seen.insert(p.product_id))
            .map(ProductResponse::from)
            .collect())
    }

    #[instrument(skip(self, request))]
    pub async fn add_product(
        &self,
        request: ProductAddRequest,
    ) -> ProductResult<Option<ProductResponse>> {
        validation::validate(&request).map_err(ProductError::Validation)?;

        let product = mapper::product_from_add(request);
        let stored = self.repository.insert(product).await?;
        Ok(stored.map(ProductResponse::from))
    }

    /// Overwrite every mutable field of an existing product.
    ///
    /// A name change is published before the update is persisted.
    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    pub async fn update_product(
        &self,
        request: ProductUpdateRequest,
    ) -> ProductResult<Option<ProductResponse>> {
        let existing = self
            .repository
            .find_one(ProductQuery::by_id(request.product_id))
            .await?
            .ok_or(ProductError::NotFound(request.product_id))?;

        validation::validate(&request).map_err(ProductError::Validation)?;

        let product = mapper::product_from_update(request);
        if product.product_name != existing.product_name {
            self.notifier
                .publish_name_changed(ProductNameUpdateMessage {
                    product_id: product.product_id,
                    new_name: product.product_name.clone(),
                })
                .await;
        }

        let updated = self.repository.update(product).await?;
        Ok(updated.map(ProductResponse::from))
    }

    /// `false` when no product has this identifier
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<bool> {
        let existing = self.repository.find_one(ProductQuery::by_id(id)).await?;
        if existing.is_none() {
            return Ok(false);
        }

        self.repository.delete(id).await
    }
}
