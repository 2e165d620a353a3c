//! Extractors whose rejections are [`AppError`](crate::AppError) JSON bodies
//! instead of axum's plain-text defaults.

pub mod json_body;
pub mod uuid_path;

pub use json_body::JsonBody;
pub use uuid_path::UuidPath;
