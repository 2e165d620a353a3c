use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use crate::error::ProductError;
use crate::models::{Product, ProductCategory};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub product_name: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub unit_price: Decimal,
    pub quantity_in_stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Product {
    type Error = ProductError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let category = ProductCategory::from_str(&model.category).map_err(|_| {
            ProductError::Internal(format!(
                "Unknown category '{}' stored for product {}",
                model.category, model.product_id
            ))
        })?;

        Ok(Self {
            product_id: model.product_id,
            product_name: model.product_name,
            category,
            unit_price: model.unit_price,
            quantity_in_stock: model.quantity_in_stock,
        })
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            product_id: Set(product.product_id),
            product_name: Set(product.product_name),
            category: Set(product.category.to_string()),
            unit_price: Set(product.unit_price),
            quantity_in_stock: Set(product.quantity_in_stock),
        }
    }
}
