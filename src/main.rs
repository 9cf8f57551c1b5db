//! NextBeer analytics server
//!
//! QR scan tracking and dashboard analytics REST API.

use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nextbeer_analytics::{
    api,
    config::{AppConfig, StoreBackend},
    repository::{MemoryScanStore, Repository},
    services::{clock::SystemClock, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("nextbeer_analytics={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting NextBeer analytics server v{}", env!("CARGO_PKG_VERSION"));

    let services = match config.store.backend {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .connect(&config.database.url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&pool).await?;

            tracing::info!("Database migrations completed");

            Services::new(Repository::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory scan store; scans are lost on restart");
            Services::with_store(Arc::new(MemoryScanStore::new()), Arc::new(SystemClock))
        }
    };

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
