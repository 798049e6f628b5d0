//! Connectivity queries over the undirected graph.

use std::collections::VecDeque;

use serde::Serialize;

use crate::graph::GraphStore;

/// Aggregate counts reported by the stats endpoint. Component figures are
/// derived on demand rather than cached; the graph is static per process, so
/// the cost is bounded and recomputation keeps the store free of caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub largest_component_size: usize,
}

/// Enumerate connected components via repeated breadth-first search.
///
/// Every node appears in exactly one component, isolated nodes as
/// singletons. Components are ordered by first-seen node (load order) and
/// members within a component are sorted by identifier.
pub fn connected_components(graph: &GraphStore) -> Vec<Vec<String>> {
    let node_count = graph.node_count();
    let mut visited = vec![false; node_count];
    let mut components = Vec::new();

    for seed in 0..node_count {
        if visited[seed] {
            continue;
        }

        let mut members = Vec::new();
        let mut queue = VecDeque::new();
        visited[seed] = true;
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            members.push(graph.node_at(current).id.clone());
            for &(next, _) in graph.neighbor_indices(current) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    components
}

/// Compute the aggregate stats for a graph.
pub fn graph_stats(graph: &GraphStore) -> GraphStats {
    let components = connected_components(graph);
    GraphStats {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        component_count: components.len(),
        largest_component_size: components.iter().map(Vec::len).max().unwrap_or(0),
    }
}
