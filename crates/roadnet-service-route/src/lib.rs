//! Road-network shortest-path query HTTP service.
//!
//! Serves deterministic shortest-path, connectivity, and geometry-export
//! queries over a graph loaded once at startup.
//!
//! # Endpoints
//!
//! - `GET /api/v1/stats` - Node/edge/component counts
//! - `GET /api/v1/shortest-path` - Node-id sequence between two nodes
//! - `GET /api/v1/shortest-path/detail` - Per-segment names, weights, totals
//! - `GET /api/v1/path-geometry` - Path with per-node coordinates
//! - `GET /api/v1/graph-geometry` - Every edge as a drawable line segment
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

#![deny(warnings)]

mod handlers;

pub use handlers::build_router;
