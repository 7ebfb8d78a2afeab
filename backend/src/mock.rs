//! Canned upstream servers.
//!
//! Each server answers `GET /{slug}/search` with a fixed JSON document in the
//! matching upstream's native schema, whatever the query parameters.

use axum::{http::header, routing::get, Router};
use log::{error, info};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::providers::ProviderKind;

/// Fixture body served for an upstream kind.
pub fn fixture(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::AirAsia => include_str!("../fixtures/airasia.json"),
        ProviderKind::Batik => include_str!("../fixtures/batik.json"),
        ProviderKind::Garuda => include_str!("../fixtures/garuda.json"),
        ProviderKind::Lion => include_str!("../fixtures/lion.json"),
    }
}

/// Port used by the default configuration for each upstream kind.
pub fn default_port(kind: ProviderKind) -> u16 {
    match kind {
        ProviderKind::AirAsia => 8081,
        ProviderKind::Batik => 8082,
        ProviderKind::Garuda => 8083,
        ProviderKind::Lion => 8084,
    }
}

pub fn mock_router(kind: ProviderKind) -> Router {
    let path = format!("/{}/search", kind.slug());
    Router::new().route(
        &path,
        get(move || async move { ([(header::CONTENT_TYPE, "application/json")], fixture(kind)) }),
    )
}

/// Bind `addr`, serve the fixture for `kind` in the background and return the
/// bound address. Pass port 0 to let the OS choose.
pub async fn spawn_mock_upstream(kind: ProviderKind, addr: SocketAddr) -> io::Result<SocketAddr> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = mock_router(kind);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Mock {} upstream stopped: {}", kind.slug(), e);
        }
    });

    info!("Mock {} upstream running at http://{}", kind.slug(), local_addr);
    Ok(local_addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_json() {
        for kind in ProviderKind::ALL {
            let value: serde_json::Value = serde_json::from_str(fixture(kind)).unwrap();
            assert!(value.is_object(), "{:?}", kind);
        }
    }

    #[test]
    fn test_default_ports_are_distinct() {
        let ports: std::collections::BTreeSet<u16> =
            ProviderKind::ALL.iter().map(|k| default_port(*k)).collect();
        assert_eq!(ports.len(), ProviderKind::ALL.len());
    }
}
