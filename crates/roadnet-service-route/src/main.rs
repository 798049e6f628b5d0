//! Service entry point.
//!
//! # Configuration
//!
//! - `ROADNET_NODES_PATH` - Path to the node CSV table (default: /data/nodes.csv)
//! - `ROADNET_EDGES_PATH` - Path to the edge CSV table (default: /data/edges.csv)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus exporter settings

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{error, info, warn};

use roadnet_service_route::build_router;
use roadnet_service_shared::{init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional; the service still answers queries without them.
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let nodes_path =
        env::var("ROADNET_NODES_PATH").unwrap_or_else(|_| "/data/nodes.csv".to_string());
    let edges_path =
        env::var("ROADNET_EDGES_PATH").unwrap_or_else(|_| "/data/edges.csv".to_string());
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(nodes = %nodes_path, edges = %edges_path, port, "starting route service");

    // The graph is built exactly once here; every handler shares it
    // read-only for the life of the process.
    let state = AppState::load(&nodes_path, &edges_path).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(
        nodes = state.graph().node_count(),
        edges = state.graph().edge_count(),
        dropped_rows = state.load_report().dropped_rows(),
        "application state loaded",
    );

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app).await.context("server exited")?;

    Ok(())
}
