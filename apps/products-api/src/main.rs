//! Products API - REST server for the product catalog

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use messaging::nats::NatsPublisher;
use messaging::{NoopPublisher, Publisher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        max_connections = config.postgres.max_connections,
        "Connecting to PostgreSQL"
    );
    let db = database::postgres::connect_from_config_with_retry(config.postgres.clone(), None)
        .await?;

    // Events are optional; without NATS_URL the service runs with publishing disabled
    let nats = match config.messaging.url.as_deref() {
        Some(url) => Some(
            NatsPublisher::connect(url, &config.messaging.client_name)
                .await?
                .with_subject_prefix(config.messaging.exchange.clone()),
        ),
        None => {
            warn!("NATS_URL not set, product events are disabled");
            None
        }
    };
    let publisher: Arc<dyn Publisher> = match &nats {
        Some(nats) => Arc::new(nats.clone()),
        None => Arc::new(NoopPublisher),
    };

    let state = AppState {
        config,
        db,
        publisher,
    };

    if state.config.ensure_schema {
        api::products::ensure_schema(&state).await?;
    }

    // Build REST router
    let api_routes = api::routes(&state);
    let app = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?
        .merge(health_router("products-api", env!("CARGO_PKG_VERSION")))
        .merge(api::health::router(state.db.clone()));

    info!(
        port = state.config.server.port,
        events = state.publisher.backend(),
        "Starting Products API"
    );

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(nats) = nats {
                if let Err(e) = nats.flush().await {
                    warn!(error = %e, "Failed to flush pending events");
                }
            }
            info!("Shutting down: closing PostgreSQL pool");
            if let Err(e) = db.close().await {
                warn!(error = %e, "Failed to close PostgreSQL pool");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
