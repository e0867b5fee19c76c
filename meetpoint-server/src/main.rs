use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use meetpoint_server::planner::SearchConfig;
use meetpoint_server::routing::{AnyRoadRouter, HttpRoadRouter, MockRoadRouter, RoutingConfig};
use meetpoint_server::stations::SharedCatalog;
use meetpoint_server::web::{AppState, create_router};

/// How often to reload the station catalog (24 hours).
const CATALOG_RELOAD_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

const DEFAULT_STATIONS_CSV: &str = "data/stations.csv";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Read an optional numeric setting, warning about unparseable values.
fn env_usize(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(name, value = %raw, "Ignoring non-numeric setting");
            None
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| matches!(v.trim(), "1" | "true" | "yes"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("meetpoint_server=info,tower_http=info")),
        )
        .init();

    // Load the station catalog (fail fast if unavailable)
    let csv_path =
        std::env::var("MEETPOINT_STATIONS_CSV").unwrap_or_else(|_| DEFAULT_STATIONS_CSV.to_string());
    let catalog = SharedCatalog::load_csv(&csv_path).expect("Failed to load station catalog");
    info!(path = %csv_path, stations = catalog.len().await, "Loaded station catalog");

    // Create the road router
    let router: AnyRoadRouter = if env_flag("MEETPOINT_ROUTING_MOCK") {
        info!("Using mock road router");
        MockRoadRouter::default().into()
    } else {
        let config = match std::env::var("MEETPOINT_ROUTING_URL") {
            Ok(url) => RoutingConfig::new(url),
            Err(_) => RoutingConfig::default(),
        };
        info!(base_url = %config.base_url, "Using HTTP road router");
        HttpRoadRouter::new(config)
            .expect("Failed to create road router")
            .into()
    };

    // Create search config
    let mut search_config = SearchConfig::default();
    if let Some(n) = env_usize("MEETPOINT_CANDIDATES") {
        search_config = search_config.with_candidate_count(n);
    }
    if let Some(n) = env_usize("MEETPOINT_RESULTS") {
        search_config = search_config.with_result_count(n);
    }
    let search_config = search_config.clamped();

    // Spawn background task to reload the catalog daily
    let catalog_reload = catalog.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CATALOG_RELOAD_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog_reload.reload().await {
                Ok(count) => info!(stations = count, "Reloaded station catalog"),
                Err(e) => error!(error = %e, "Failed to reload station catalog"),
            }
        }
    });

    // Build app state
    let state = AppState::new(catalog, router, search_config);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let bind = std::env::var("MEETPOINT_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let addr: SocketAddr = bind.parse().expect("Invalid MEETPOINT_BIND address");
    info!(%addr, "Meeting-point planner listening");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/stations/nearby  - Stations near a point");
    info!("  POST /api/meeting-point    - Find a meeting station");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
