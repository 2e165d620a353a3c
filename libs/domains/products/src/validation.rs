//! Rules shared by the add and update requests.
//!
//! The rules are declared on the request types with `validator` derives;
//! this module holds the custom checks and turns `ValidationErrors` into
//! the field-keyed map returned to API callers.

use std::borrow::Cow;
use std::str::FromStr;

use axum_helpers::FieldErrors;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::ProductCategory;

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(failure("required", "Product Name is required"));
    }
    Ok(())
}

pub(crate) fn known_category(category: &str) -> Result<(), ValidationError> {
    ProductCategory::from_str(category.trim())
        .map(|_| ())
        .map_err(|_| failure("unknown_category", "Category is required"))
}

/// Decimal places a stored unit price keeps
pub const UNIT_PRICE_SCALE: u32 = 2;

// A price that rounds to zero at the stored scale is indistinguishable from
// an unset one and fails as missing.
pub(crate) fn unit_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.round_dp(UNIT_PRICE_SCALE).is_zero() {
        return Err(failure("required", "Unit Price is required"));
    }
    if price.is_sign_negative() {
        return Err(failure("negative", "Unit Price can't be negative"));
    }
    if price.normalize().scale() > UNIT_PRICE_SCALE {
        return Err(failure(
            "precision",
            "Unit Price can't have more than 2 decimal places",
        ));
    }
    Ok(())
}

pub(crate) fn quantity_in_stock(quantity: i32) -> Result<(), ValidationError> {
    match quantity {
        0 => Err(failure("required", "Quantity In Stock is required")),
        q if q < 0 => Err(failure("negative", "Quantity In Stock can't be negative")),
        _ => Ok(()),
    }
}

pub(crate) fn not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(failure("required", "Product ID is required"));
    }
    Ok(())
}

/// Public name of a request field in error output
fn field_label(field: &str) -> String {
    match field {
        "product_id" => "ProductID".to_string(),
        "product_name" => "ProductName".to_string(),
        "category" => "Category".to_string(),
        "unit_price" => "UnitPrice".to_string(),
        "quantity_in_stock" => "QuantityInStock".to_string(),
        other => other.to_string(),
    }
}

/// Run the request's rules, returning every failed field with its messages.
pub fn validate<T: Validate>(request: &T) -> Result<(), FieldErrors> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };

    let mut fields = FieldErrors::new();
    for (field, failures) in errors.field_errors() {
        let field: &str = field.as_ref();
        let messages = failures
            .iter()
            .map(|error| match &error.message {
                Some(message) => message.to_string(),
                None => error.code.to_string(),
            })
            .collect();
        fields.insert(field_label(field), messages);
    }
    Err(fields)
}
