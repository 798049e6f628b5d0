//! Shortest-path search over a [`GraphStore`].
//!
//! Two algorithms are provided: breadth-first search over hop count and
//! Dijkstra over edge weights. Both operate on dense node indices and return
//! the index sequence from start to goal inclusive, or `None` when the goal
//! is unreachable.
//!
//! Tie-breaking: among equal-hop paths, BFS returns whichever path it
//! discovers first under the store's fixed neighbour order, so the result is
//! deterministic for a given build but callers must only rely on the hop
//! count being minimal. Dijkstra breaks ties by heap discovery order, which
//! is unspecified among equal-cost paths.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use crate::graph::{GraphStore, NodeIdx};

/// Breadth-first search over hop count.
pub fn shortest_path_bfs(graph: &GraphStore, start: NodeIdx, goal: NodeIdx) -> Option<Vec<NodeIdx>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: HashMap<NodeIdx, Option<NodeIdx>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &(next, _) in graph.neighbor_indices(current) {
            if parents.contains_key(&next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Dijkstra's algorithm over non-negative edge weights.
///
/// Intended for graphs where every edge carries a weight (see
/// [`GraphStore::all_edges_weighted`]); an edge without one cannot be priced
/// and is not traversed.
pub fn shortest_path_dijkstra(
    graph: &GraphStore,
    start: NodeIdx,
    goal: NodeIdx,
) -> Option<Vec<NodeIdx>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut distances: HashMap<NodeIdx, f64> = HashMap::new();
    let mut parents: HashMap<NodeIdx, Option<NodeIdx>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        // Stale heap entry for a node already settled with a lower cost.
        let best = *distances.get(&entry.node).unwrap_or(&f64::INFINITY);
        if entry.cost.0 > best {
            continue;
        }

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        for &(next, edge) in graph.neighbor_indices(entry.node) {
            let Some(weight) = graph.edge_attrs(edge).weight else {
                continue;
            };

            let next_cost = entry.cost.0 + weight;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &HashMap<NodeIdx, Option<NodeIdx>>,
    start: NodeIdx,
    goal: NodeIdx,
) -> Vec<NodeIdx> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeIdx,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeIdx, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
