//! # pnr-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the Print & Read catalog.
//! Binds to configurable port (default 8080).

use pnr_api::state::{AppConfig, AppState};
use pnr_object_store::ObjectStoreConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(?config, "configuration loaded");

    // Initialize database pool (optional: absent means in-memory only).
    let db_pool = pnr_api::db::init_pool(config.database_url.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    let object_store = pnr_api::object_store::from_config(ObjectStoreConfig::from_env())
        .map_err(|e| {
            tracing::error!("Object store configuration invalid: {e}");
            e
        })?;

    let port = config.port;
    let state = AppState::with_config(config, object_store, db_pool);

    // Hydrate in-memory stores from database (if connected).
    state.hydrate_from_db().await.map_err(|e| {
        tracing::error!("Database hydration failed: {e}");
        e
    })?;

    // Subjects need the year/semester lattice even before any regulation exists.
    let report = pnr_api::catalog::provisioning::ensure_year_semester_lattice(&state).await?;
    tracing::info!(
        years_created = report.years_created,
        semesters_created = report.semesters_created,
        "year/semester lattice ready"
    );

    let app = pnr_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Print & Read API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
