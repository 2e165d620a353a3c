//! Application state management

use std::sync::Arc;

use database::postgres::DatabaseConnection;
use messaging::Publisher;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    pub publisher: Arc<dyn Publisher>,
}
