use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation;

/// Fixed set of product categories.
///
/// The textual form is the variant name (`"NutsAndBolts"`); parsing ignores
/// ASCII case. Category search matches against this text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum ProductCategory {
    Electronics,
    HomeAppliances,
    Furniture,
    Accessories,
    Hardware,
    NutsAndBolts,
    #[default]
    Others,
}

/// Persisted product.
///
/// `unit_price` and `quantity_in_stock` are always present and positive on a
/// stored product; requests are validated before one of these is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: Uuid,
    pub product_name: Option<String>,
    pub category: ProductCategory,
    pub unit_price: Decimal,
    pub quantity_in_stock: i32,
}

/// Body of `POST /api/products`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductAddRequest {
    #[validate(
        required(message = "Product Name is required"),
        custom(function = "validation::not_blank")
    )]
    #[schema(example = "Hex Bolt M8")]
    pub product_name: Option<String>,

    /// One of the [`ProductCategory`] names
    #[validate(
        required(message = "Category is required"),
        custom(function = "validation::known_category")
    )]
    #[schema(example = "NutsAndBolts")]
    pub category: Option<String>,

    #[validate(
        required(message = "Unit Price is required"),
        custom(function = "validation::unit_price")
    )]
    #[schema(value_type = Option<f64>, example = 0.35)]
    pub unit_price: Option<Decimal>,

    #[validate(
        required(message = "Quantity In Stock is required"),
        custom(function = "validation::quantity_in_stock")
    )]
    #[schema(example = 500)]
    pub quantity_in_stock: Option<i32>,
}

/// Body of `PUT /api/products`. Every field overwrites the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateRequest {
    #[serde(rename = "productID", default)]
    #[validate(custom(function = "validation::not_nil"))]
    pub product_id: Uuid,

    #[validate(
        required(message = "Product Name is required"),
        custom(function = "validation::not_blank")
    )]
    pub product_name: Option<String>,

    #[validate(
        required(message = "Category is required"),
        custom(function = "validation::known_category")
    )]
    pub category: Option<String>,

    #[validate(
        required(message = "Unit Price is required"),
        custom(function = "validation::unit_price")
    )]
    #[schema(value_type = Option<f64>)]
    pub unit_price: Option<Decimal>,

    #[validate(
        required(message = "Quantity In Stock is required"),
        custom(function = "validation::quantity_in_stock")
    )]
    pub quantity_in_stock: Option<i32>,
}

/// Product as returned to API callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "productID")]
    pub product_id: Uuid,
    pub product_name: Option<String>,
    pub category: ProductCategory,
    #[schema(value_type = f64)]
    pub unit_price: Decimal,
    pub quantity_in_stock: i32,
}

/// Payload of the `product.update.name` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductNameUpdateMessage {
    #[serde(rename = "productID")]
    pub product_id: Uuid,
    #[serde(rename = "newName")]
    pub new_name: Option<String>,
}
