use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldErrors};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{}", aggregate(.0))]
    Validation(FieldErrors),

    #[error("Product does not exist")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// All validation messages on one line, in field order
fn aggregate(fields: &FieldErrors) -> String {
    fields
        .values()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(fields) => AppError::Validation(fields),
            ProductError::NotFound(id) => {
                tracing::debug!(product_id = %id, "Product does not exist");
                AppError::NotFound("Product does not exist".to_string())
            }
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal product error");
                AppError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}
