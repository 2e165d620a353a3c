use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// A single named filter over products.
///
/// Text criteria are case-insensitive substring matches; the category is
/// matched against its textual name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductCriterion {
    ById(Uuid),
    NameContains(String),
    CategoryContains(String),
}

impl ProductCriterion {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductCriterion::ById(id) => product.product_id == *id,
            ProductCriterion::NameContains(needle) => product
                .product_name
                .as_deref()
                .is_some_and(|name| contains_ignore_case(name, needle)),
            ProductCriterion::CategoryContains(needle) => {
                contains_ignore_case(product.category.as_ref(), needle)
            }
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Conjunction of criteria; an empty query matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub criteria: Vec<ProductCriterion>,
}

impl ProductQuery {
    pub fn all_of(criteria: impl IntoIterator<Item = ProductCriterion>) -> Self {
        Self {
            criteria: criteria.into_iter().collect(),
        }
    }

    pub fn by_id(id: Uuid) -> Self {
        Self::all_of([ProductCriterion::ById(id)])
    }

    pub fn name_contains(text: impl Into<String>) -> Self {
        Self::all_of([ProductCriterion::NameContains(text.into())])
    }

    pub fn category_contains(text: impl Into<String>) -> Self {
        Self::all_of([ProductCriterion::CategoryContains(text.into())])
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.criteria.iter().all(|c| c.matches(product))
    }
}

/// Repository trait for Product persistence
///
/// Not-found is reported as `None` by lookups and updates. `delete` assumes
/// the row exists and fails with [`ProductError::NotFound`] when it does not.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in storage order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// First product matching the query
    async fn find_one(&self, query: ProductQuery) -> ProductResult<Option<Product>>;

    /// Every product matching the query
    async fn find_many(&self, query: ProductQuery) -> ProductResult<Vec<Product>>;

    /// Store a new product. `None` when its identifier is already taken.
    async fn insert(&self, product: Product) -> ProductResult<Option<Product>>;

    /// Overwrite the mutable fields of the product with the same identifier
    async fn update(&self, product: Product) -> ProductResult<Option<Product>>;

    /// Remove a product by identifier
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// Process-local store, used by tests and when running without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_one(&self, query: ProductQuery) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| query.matches(p)).cloned())
    }

    async fn find_many(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| query.matches(p)).cloned().collect())
    }

    async fn insert(&self, mut product: Product) -> ProductResult<Option<Product>> {
        if product.product_id.is_nil() {
            product.product_id = Uuid::now_v7();
        }

        let mut products = self.products.write().await;
        if products.iter().any(|p| p.product_id == product.product_id) {
            return Ok(None);
        }
        products.push(product.clone());
        Ok(Some(product))
    }

    async fn update(&self, product: Product) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(existing) = products
            .iter_mut()
            .find(|p| p.product_id == product.product_id)
        else {
            return Ok(None);
        };

        existing.product_name = product.product_name;
        existing.category = product.category;
        existing.unit_price = product.unit_price;
        existing.quantity_in_stock = product.quantity_in_stock;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let position = products
            .iter()
            .position(|p| p.product_id == id)
            .ok_or(ProductError::NotFound(id))?;
        products.remove(position);
        Ok(true)
    }
}
