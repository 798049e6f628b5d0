//! Roadnet library entry points.
//!
//! This crate loads a municipal road-network dataset into an immutable
//! in-memory graph and answers shortest-path, connectivity, and
//! geometry-export queries over it. Higher-level consumers (the HTTP
//! service) should only depend on the functions exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod components;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod graph;
pub mod path;
pub mod route;
pub mod tables;

pub use components::{connected_components, graph_stats, GraphStats};
pub use error::{Error, Result};
pub use geo::{
    graph_geometry, path_geometry, GraphGeometry, MapCenter, NodePoint, PathGeometry,
    SegmentGeometry,
};
pub use geometry::decode_point;
pub use graph::{EdgeAttributes, GraphStore, LoadReport, Node, NodeIdx};
pub use path::{shortest_path_bfs, shortest_path_dijkstra};
pub use route::{shortest_path, PathResult, PathSegment};
pub use tables::{load_edge_records, load_node_records, EdgeRecord, NodeRecord};
