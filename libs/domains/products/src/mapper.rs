//! Conversions between request, entity and response shapes.
//!
//! Inputs are expected to have passed [`crate::validation::validate`];
//! missing values fall back to their defaults instead of failing.

use std::str::FromStr;

use uuid::Uuid;

use crate::models::{
    Product, ProductAddRequest, ProductCategory, ProductResponse, ProductUpdateRequest,
};

fn parse_category(category: Option<&str>) -> ProductCategory {
    category
        .and_then(|c| ProductCategory::from_str(c.trim()).ok())
        .unwrap_or_default()
}

/// Build a new product with a freshly generated identifier
pub fn product_from_add(request: ProductAddRequest) -> Product {
    Product {
        product_id: Uuid::now_v7(),
        category: parse_category(request.category.as_deref()),
        product_name: request.product_name,
        unit_price: request.unit_price.unwrap_or_default(),
        quantity_in_stock: request.quantity_in_stock.unwrap_or_default(),
    }
}

/// Every mutable field is taken from the request, there is no partial update.
pub fn product_from_update(request: ProductUpdateRequest) -> Product {
    Product {
        product_id: request.product_id,
        category: parse_category(request.category.as_deref()),
        product_name: request.product_name,
        unit_price: request.unit_price.unwrap_or_default(),
        quantity_in_stock: request.quantity_in_stock.unwrap_or_default(),
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            product_name: product.product_name,
            category: product.category,
            unit_price: product.unit_price,
            quantity_in_stock: product.quantity_in_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn add_request() -> ProductAddRequest {
        ProductAddRequest {
            product_name: Some("Cordless Drill".to_string()),
            category: Some("Hardware".to_string()),
            unit_price: Some(Decimal::new(8999, 2)),
            quantity_in_stock: Some(12),
        }
    }

    #[test]
    fn test_add_copies_fields_and_assigns_id() {
        let product = product_from_add(add_request());

        assert!(!product.product_id.is_nil());
        assert_eq!(product.product_name.as_deref(), Some("Cordless Drill"));
        assert_eq!(product.category, ProductCategory::Hardware);
        assert_eq!(product.unit_price, Decimal::new(8999, 2));
        assert_eq!(product.quantity_in_stock, 12);
    }

    #[test]
    fn test_add_generates_distinct_ids() {
        let first = product_from_add(add_request());
        let second = product_from_add(add_request());
        assert_ne!(first.product_id, second.product_id);
    }

    #[test]
    fn test_update_keeps_request_id() {
        let id = Uuid::now_v7();
        let product = product_from_update(ProductUpdateRequest {
            product_id: id,
            product_name: None,
            category: Some("furniture".to_string()),
            unit_price: Some(Decimal::ONE),
            quantity_in_stock: Some(3),
        });

        assert_eq!(product.product_id, id);
        assert_eq!(product.product_name, None);
        assert_eq!(product.category, ProductCategory::Furniture);
    }

    #[test]
    fn test_response_preserves_every_field() {
        let product = product_from_add(add_request());
        let response = ProductResponse::from(product.clone());

        let back = Product {
            product_id: response.product_id,
            product_name: response.product_name,
            category: response.category,
            unit_price: response.unit_price,
            quantity_in_stock: response.quantity_in_stock,
        };
        assert_eq!(back, product);
    }
}
