//! Geometry exports for map rendering.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::GraphStore;
use crate::route::{shortest_path, PathResult};

/// How many nodes, in load order, contribute to the computed map center.
/// Averaging the whole table would be wasted work for a value that only has
/// to land somewhere sensible on the map.
const CENTER_SAMPLE_LIMIT: usize = 200;

/// Fallback center when no node has coordinates (downtown San Francisco,
/// matching the source dataset's city).
const DEFAULT_CENTER: MapCenter = MapCenter {
    lon: -122.4194,
    lat: 37.7749,
};

/// A node with resolved coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePoint {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
}

/// A shortest path enriched with per-node coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathGeometry {
    /// Path nodes with coordinates, for markers.
    pub nodes: Vec<NodePoint>,
    /// `[lon, lat]` polyline for drawing the path.
    pub line: Vec<[f64; 2]>,
    pub weighted_used: bool,
}

/// One edge rendered as a coordinate-pair line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentGeometry {
    pub lon1: f64,
    pub lat1: f64,
    pub lon2: f64,
    pub lat2: f64,
}

/// Map center as `(lon, lat)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub lon: f64,
    pub lat: f64,
}

/// Every edge of the graph as line segments, bucketed by provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphGeometry {
    pub real: Vec<SegmentGeometry>,
    pub synthetic: Vec<SegmentGeometry>,
    pub center: MapCenter,
}

/// Compute a shortest path and resolve coordinates for every node on it.
///
/// A node without coordinates yields [`Error::MissingGeometry`] naming that
/// node: the route exists, it just cannot be drawn, which callers must be
/// able to tell apart from [`Error::NoPath`].
pub fn path_geometry(
    graph: &GraphStore,
    source: &str,
    target: &str,
    use_weight: bool,
) -> Result<PathGeometry> {
    let path = shortest_path(graph, source, target, use_weight)?;
    path_result_geometry(graph, &path)
}

/// Resolve coordinates for an already-computed path.
pub fn path_result_geometry(graph: &GraphStore, path: &PathResult) -> Result<PathGeometry> {
    let mut nodes = Vec::with_capacity(path.nodes.len());
    let mut line = Vec::with_capacity(path.nodes.len());

    for id in &path.nodes {
        let node = graph.node(id).ok_or_else(|| Error::UnknownNode {
            id: id.clone(),
        })?;
        let Some((lon, lat)) = node.coords() else {
            return Err(Error::MissingGeometry { id: id.clone() });
        };
        nodes.push(NodePoint {
            id: id.clone(),
            lon,
            lat,
        });
        line.push([lon, lat]);
    }

    Ok(PathGeometry {
        nodes,
        line,
        weighted_used: path.weighted_used,
    })
}

/// Export every edge as a line segment, split into real and synthetic
/// buckets. Edges with an uncoordinated endpoint are silently omitted; the
/// export degrades to the default center when nothing is drawable.
pub fn graph_geometry(graph: &GraphStore) -> GraphGeometry {
    let mut real = Vec::new();
    let mut synthetic = Vec::new();

    for (a, b, attrs) in graph.edges() {
        let (Some((lon1, lat1)), Some((lon2, lat2))) = (a.coords(), b.coords()) else {
            continue;
        };
        let segment = SegmentGeometry {
            lon1,
            lat1,
            lon2,
            lat2,
        };
        if attrs.real {
            real.push(segment);
        } else {
            synthetic.push(segment);
        }
    }

    GraphGeometry {
        real,
        synthetic,
        center: computed_center(graph),
    }
}

fn computed_center(graph: &GraphStore) -> MapCenter {
    let mut count = 0usize;
    let mut lon_sum = 0.0f64;
    let mut lat_sum = 0.0f64;

    for node in graph.nodes().take(CENTER_SAMPLE_LIMIT) {
        if let Some((lon, lat)) = node.coords() {
            lon_sum += lon;
            lat_sum += lat;
            count += 1;
        }
    }

    if count == 0 {
        return DEFAULT_CENTER;
    }

    MapCenter {
        lon: lon_sum / count as f64,
        lat: lat_sum / count as f64,
    }
}
