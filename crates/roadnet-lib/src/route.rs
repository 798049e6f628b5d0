//! High-level shortest-path queries by node identifier.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{GraphStore, NodeIdx};
use crate::path::{shortest_path_bfs, shortest_path_dijkstra};

/// Detail for one traversed segment along a computed path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSegment {
    pub from: String,
    pub to: String,
    pub name: Option<String>,
    pub weight: Option<f64>,
}

/// A computed shortest path, source to target inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Ordered node identifiers along the path.
    pub nodes: Vec<String>,
    /// Ordered traversed segments; empty for the trivial self-path.
    pub segments: Vec<PathSegment>,
    pub total_hops: usize,
    /// Sum of segment weights. Absent when any traversed edge lacks one
    /// (never a zero or partial sum), and absent for the trivial self-path
    /// unless weighted search was in effect.
    pub total_weight: Option<f64>,
    /// Whether weighted search was actually used, after the
    /// weight-availability fallback. May differ from what the caller asked.
    pub weighted_used: bool,
}

/// Compute the shortest path between two node identifiers.
///
/// `use_weight` requests weighted search, but weighted search only runs when
/// every edge in the entire graph carries a weight
/// ([`GraphStore::all_edges_weighted`]); otherwise the request silently
/// degrades to hop-count BFS and the result's `weighted_used` reports the
/// fallback. The check is graph-global rather than path-local so the search
/// never discovers mid-run that a required edge cannot be priced.
///
/// Source and target existence are checked independently, so the error names
/// whichever identifier is unknown.
pub fn shortest_path(
    graph: &GraphStore,
    source: &str,
    target: &str,
    use_weight: bool,
) -> Result<PathResult> {
    let source_idx = graph.index_of(source).ok_or_else(|| Error::UnknownNode {
        id: source.to_string(),
    })?;
    let target_idx = graph.index_of(target).ok_or_else(|| Error::UnknownNode {
        id: target.to_string(),
    })?;

    let weighted_used = use_weight && graph.all_edges_weighted();

    if source_idx == target_idx {
        return Ok(PathResult {
            nodes: vec![graph.node_at(source_idx).id.clone()],
            segments: Vec::new(),
            total_hops: 0,
            total_weight: weighted_used.then_some(0.0),
            weighted_used,
        });
    }

    let indices = if weighted_used {
        shortest_path_dijkstra(graph, source_idx, target_idx)
    } else {
        shortest_path_bfs(graph, source_idx, target_idx)
    };

    let Some(indices) = indices else {
        return Err(Error::NoPath {
            origin: source.to_string(),
            target: target.to_string(),
        });
    };

    build_result(graph, &indices, weighted_used)
}

fn build_result(graph: &GraphStore, indices: &[NodeIdx], weighted_used: bool) -> Result<PathResult> {
    let nodes: Vec<String> = indices
        .iter()
        .map(|&idx| graph.node_at(idx).id.clone())
        .collect();

    let mut segments = Vec::with_capacity(indices.len().saturating_sub(1));
    let mut total_weight = Some(0.0f64);

    for pair in indices.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let attrs = graph
            .edge_between(a, b)
            .ok_or_else(|| Error::DataIntegrity {
                message: format!(
                    "path references missing edge {}-{}",
                    graph.node_at(a).id,
                    graph.node_at(b).id
                ),
            })?;

        total_weight = match (total_weight, attrs.weight) {
            (Some(sum), Some(weight)) => Some(sum + weight),
            _ => None,
        };

        segments.push(PathSegment {
            from: graph.node_at(a).id.clone(),
            to: graph.node_at(b).id.clone(),
            name: attrs.name.clone(),
            weight: attrs.weight,
        });
    }

    Ok(PathResult {
        total_hops: segments.len(),
        nodes,
        segments,
        total_weight,
        weighted_used,
    })
}
