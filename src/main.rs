//!
//! Stay pricing and availability HTTP server.
//! Reads configuration from TOML file (~/.config/stay-engine/config.toml).

use std::sync::Arc;

use tracing::{error, info, warn};

use stay_engine::application::services::{AvailabilityService, CapacityMatcher, RateResolver};
use stay_engine::infrastructure::PropertySnapshot;
use stay_engine::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use stay_engine::{
    create_api_router, default_config_path, AppConfig, AppState, Config,
    InMemoryRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("STAY_ENGINE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Stay Pricing & Availability Engine...");

    let config = Config::from(&app_cfg);

    // ── Property snapshot ──────────────────────────────────────
    let store = match &app_cfg.data_file {
        Some(path) => match PropertySnapshot::from_file(path).and_then(|s| s.into_store()) {
            Ok(store) => {
                info!("Property snapshot loaded from {}", path.display());
                store
            }
            Err(e) => {
                error!("Failed to load property snapshot: {}", e);
                return Err(e.into());
            }
        },
        None => {
            warn!("No data_file configured, starting with an empty property");
            InMemoryRepositoryProvider::new()
        }
    };
    let repos: Arc<dyn stay_engine::domain::RepositoryProvider> = Arc::new(store);

    // ── Services ───────────────────────────────────────────────
    let resolver = Arc::new(
        RateResolver::new(Arc::clone(&repos)).with_tax_percent(app_cfg.pricing.tax_percent),
    );
    if app_cfg.pricing.tax_percent > 0.0 {
        info!("Flat tax rate: {}%", app_cfg.pricing.tax_percent);
    }
    let availability = Arc::new(AvailabilityService::new(Arc::clone(&repos)));
    let matcher = Arc::new(CapacityMatcher::new(
        Arc::clone(&repos),
        Arc::clone(&availability),
        Arc::clone(&resolver),
    ));

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(AppState {
        repos,
        resolver,
        availability,
        matcher,
    });

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            server_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    info!("Stay engine shutdown complete");
    Ok(())
}
