//! Immutable in-memory graph of intersections and street segments.
//!
//! A [`GraphStore`] is built exactly once from the node/edge tables and is
//! read-only afterwards, so it can be shared across concurrent queries
//! without locking. Node identifiers are interned to dense indices at build
//! time; the search algorithms in [`crate::path`] operate on those `Copy`
//! indices while the public surface speaks string identifiers.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geometry::decode_point;
use crate::tables::{load_edge_records, load_node_records, EdgeRecord, NodeRecord};

/// Dense index assigned to each node in load order.
pub type NodeIdx = usize;

/// An intersection. Coordinates are optional: a node without them still
/// participates in routing but cannot appear in geometry exports.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub street: Option<String>,
    pub street_type: Option<String>,
}

impl Node {
    /// Both coordinates, as `(lon, lat)`, when present.
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.lon, self.lat) {
            (Some(lon), Some(lat)) => Some((lon, lat)),
            _ => None,
        }
    }
}

/// Attributes attached to an undirected street segment.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttributes {
    /// Physical length (or other non-negative cost) of the segment.
    pub weight: Option<f64>,
    /// Display name of the street the segment belongs to.
    pub name: Option<String>,
    /// `true` for segments derived from source geometry, `false` for
    /// inferred (synthetic) connections.
    pub real: bool,
}

/// Counters for rows dropped during a build. Dropped rows are a data-quality
/// signal, never a build failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes_loaded: usize,
    pub edges_loaded: usize,
    pub missing_node_ids: usize,
    pub duplicate_node_ids: usize,
    pub undecodable_geometry: usize,
    pub orphaned_edges: usize,
    pub duplicate_edges: usize,
    pub self_loop_edges: usize,
    pub invalid_weights: usize,
}

impl LoadReport {
    /// Total number of rows dropped for any reason.
    pub fn dropped_rows(&self) -> usize {
        self.missing_node_ids
            + self.duplicate_node_ids
            + self.orphaned_edges
            + self.duplicate_edges
            + self.self_loop_edges
    }
}

#[derive(Debug, Clone)]
struct StoredEdge {
    // Normalized so a <= b; the graph is undirected.
    a: NodeIdx,
    b: NodeIdx,
    attrs: EdgeAttributes,
}

/// The full node set, edge set, and adjacency, frozen after build.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    id_to_idx: HashMap<String, NodeIdx>,
    edges: Vec<StoredEdge>,
    edge_by_pair: HashMap<(NodeIdx, NodeIdx), usize>,
    adjacency: Vec<Vec<(NodeIdx, usize)>>,
    all_weighted: bool,
}

impl GraphStore {
    /// Build a graph from raw table records.
    ///
    /// Deduplication is first-wins and deterministic given a fixed input
    /// order: the first row for a node identifier or unordered edge pair is
    /// kept, later rows are counted in the [`LoadReport`] and dropped. Edges
    /// whose endpoints are unknown are skipped, not stored.
    ///
    /// Fails with [`Error::DataIntegrity`] only when node rows were supplied
    /// but not a single one carried a usable identifier.
    pub fn build(
        node_rows: Vec<NodeRecord>,
        edge_rows: Vec<EdgeRecord>,
    ) -> Result<(Self, LoadReport)> {
        let mut report = LoadReport::default();

        let mut nodes: Vec<Node> = Vec::new();
        let mut id_to_idx: HashMap<String, NodeIdx> = HashMap::new();

        let had_node_rows = !node_rows.is_empty();
        for row in node_rows {
            let id = row.id.trim().to_string();
            if id.is_empty() {
                report.missing_node_ids += 1;
                continue;
            }
            if id_to_idx.contains_key(&id) {
                report.duplicate_node_ids += 1;
                continue;
            }

            let (lon, lat) = resolve_coordinates(&row, &mut report);
            let node = Node {
                id: id.clone(),
                lon,
                lat,
                street: row.street.map(|s| s.trim().to_uppercase()),
                street_type: row.street_type.map(|s| s.trim().to_uppercase()),
            };

            id_to_idx.insert(id, nodes.len());
            nodes.push(node);
        }
        report.nodes_loaded = nodes.len();

        if had_node_rows && nodes.is_empty() {
            return Err(Error::DataIntegrity {
                message: "node table has no usable identifiers".to_string(),
            });
        }

        let mut edges: Vec<StoredEdge> = Vec::new();
        let mut edge_by_pair: HashMap<(NodeIdx, NodeIdx), usize> = HashMap::new();
        let mut adjacency: Vec<Vec<(NodeIdx, usize)>> = vec![Vec::new(); nodes.len()];

        for row in edge_rows {
            let (Some(&u), Some(&v)) = (
                id_to_idx.get(row.u.trim()),
                id_to_idx.get(row.v.trim()),
            ) else {
                report.orphaned_edges += 1;
                continue;
            };

            if u == v {
                report.self_loop_edges += 1;
                continue;
            }

            let pair = if u < v { (u, v) } else { (v, u) };
            if edge_by_pair.contains_key(&pair) {
                report.duplicate_edges += 1;
                continue;
            }

            let weight = match row.weight {
                Some(value) if value < 0.0 || !value.is_finite() => {
                    report.invalid_weights += 1;
                    None
                }
                other => other,
            };

            let real = row.is_real();
            let edge_index = edges.len();
            edges.push(StoredEdge {
                a: pair.0,
                b: pair.1,
                attrs: EdgeAttributes {
                    weight,
                    name: row.name,
                    real,
                },
            });
            edge_by_pair.insert(pair, edge_index);
            adjacency[pair.0].push((pair.1, edge_index));
            adjacency[pair.1].push((pair.0, edge_index));
        }
        report.edges_loaded = edges.len();

        // Fixed neighbour order makes BFS tie-breaking deterministic.
        for neighbours in &mut adjacency {
            neighbours.sort_unstable();
        }

        let all_weighted = edges.iter().all(|edge| edge.attrs.weight.is_some());

        if report.dropped_rows() > 0 {
            warn!(
                missing_node_ids = report.missing_node_ids,
                duplicate_node_ids = report.duplicate_node_ids,
                orphaned_edges = report.orphaned_edges,
                duplicate_edges = report.duplicate_edges,
                self_loop_edges = report.self_loop_edges,
                "dropped rows while building graph",
            );
        }
        debug!(
            nodes = report.nodes_loaded,
            edges = report.edges_loaded,
            all_weighted,
            "graph built",
        );

        Ok((
            Self {
                nodes,
                id_to_idx,
                edges,
                edge_by_pair,
                adjacency,
                all_weighted,
            },
            report,
        ))
    }

    /// Load node/edge CSV tables and build the graph in one step.
    pub fn load_from_csv(nodes_path: &Path, edges_path: &Path) -> Result<(Self, LoadReport)> {
        let node_rows = load_node_records(nodes_path)?;
        let edge_rows = load_edge_records(edges_path)?;
        Self::build(node_rows, edge_rows)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.id_to_idx.contains_key(id)
    }

    /// Resolve an identifier to its dense index.
    pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
        self.id_to_idx.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    /// Node for a dense index. Indices come from this store, so the lookup
    /// is infallible for any index it handed out.
    pub fn node_at(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx]
    }

    /// Neighbour links for a dense index, sorted by neighbour index.
    pub fn neighbor_indices(&self, idx: NodeIdx) -> &[(NodeIdx, usize)] {
        self.adjacency.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Neighbours of a node with the attributes of the connecting segment.
    pub fn neighbors<'a>(
        &'a self,
        id: &str,
    ) -> Option<impl Iterator<Item = (&'a Node, &'a EdgeAttributes)>> {
        let idx = self.index_of(id)?;
        Some(
            self.neighbor_indices(idx)
                .iter()
                .map(|&(neighbor, edge)| (&self.nodes[neighbor], &self.edges[edge].attrs)),
        )
    }

    /// Attributes of a stored edge by its index in load order.
    pub(crate) fn edge_attrs(&self, index: usize) -> &EdgeAttributes {
        &self.edges[index].attrs
    }

    /// Attributes of the segment between two identifiers, in either order.
    pub fn edge(&self, u: &str, v: &str) -> Option<&EdgeAttributes> {
        let a = self.index_of(u)?;
        let b = self.index_of(v)?;
        self.edge_between(a, b)
    }

    /// Attributes of the segment between two dense indices, in either order.
    pub fn edge_between(&self, a: NodeIdx, b: NodeIdx) -> Option<&EdgeAttributes> {
        let pair = if a < b { (a, b) } else { (b, a) };
        self.edge_by_pair
            .get(&pair)
            .map(|&index| &self.edges[index].attrs)
    }

    /// All nodes in load order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All edges in load order as `(endpoint, endpoint, attributes)`.
    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node, &EdgeAttributes)> {
        self.edges
            .iter()
            .map(|edge| (&self.nodes[edge.a], &self.nodes[edge.b], &edge.attrs))
    }

    /// Whether every edge in the graph carries a weight.
    ///
    /// Weighted search is only attempted when this holds for the entire
    /// graph, not just the edges on a candidate path; a single unweighted
    /// edge anywhere degrades every weighted request to hop-count search.
    /// See [`crate::route::shortest_path`].
    pub fn all_edges_weighted(&self) -> bool {
        self.all_weighted
    }
}

fn resolve_coordinates(row: &NodeRecord, report: &mut LoadReport) -> (Option<f64>, Option<f64>) {
    if let (Some(lon), Some(lat)) = (row.lon, row.lat) {
        return (Some(lon), Some(lat));
    }

    if let Some(geom) = row.geom.as_deref() {
        match decode_point(geom) {
            Some((lat, lon)) => return (Some(lon), Some(lat)),
            None => {
                report.undecodable_geometry += 1;
                warn!(id = %row.id, "undecodable node geometry");
            }
        }
    }

    (row.lon, row.lat)
}
