//! Flight search HTTP server binary.
//!
//! Loads the configuration, optionally starts the canned upstream servers,
//! registers one adapter per configured upstream and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: mock upstreams on 8081-8084, API on 0.0.0.0:8080
//! cargo run --bin flight-search-server
//!
//! # Explicit configuration file
//! FLIGHT_SEARCH_CONFIG=./flight-search.toml cargo run --bin flight-search-server
//! ```
//!
//! # Environment Variables
//!
//! - `FLIGHT_SEARCH_CONFIG`: Path to a TOML configuration file
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use flight_search::config::AppConfig;
use flight_search::http::{create_router, AppState};
use flight_search::mock::{default_port, spawn_mock_upstream};
use flight_search::providers::ProviderKind;
use flight_search::services::FlightSearchService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting flight search server");

    let config = AppConfig::load()?;

    if config.mock_upstreams {
        for kind in ProviderKind::ALL {
            let addr = SocketAddr::from(([127, 0, 0, 1], default_port(kind)));
            spawn_mock_upstream(kind, addr).await?;
        }
    }

    let service = FlightSearchService::from_config(&config)?;
    info!(
        "Registered {} upstream providers (deadline {:?})",
        service.provider_count(),
        service.aggregation_timeout()
    );

    let state = AppState::new(Arc::new(service));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Try: http://{}/search?origin=CGK&destination=DPS&departure_date=2025-06-01", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
