//! Common fixture helpers for integration tests.

use roadnet_lib::{EdgeRecord, GraphStore, LoadReport, NodeRecord};

#[allow(dead_code)]
pub fn node(id: &str, lon: f64, lat: f64) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        lon: Some(lon),
        lat: Some(lat),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn bare_node(id: &str) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn edge(u: &str, v: &str, weight: Option<f64>) -> EdgeRecord {
    EdgeRecord {
        u: u.to_string(),
        v: v.to_string(),
        weight,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn build(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> (GraphStore, LoadReport) {
    GraphStore::build(nodes, edges).expect("fixture builds")
}

/// A - B - C chain with weights 5 and 3, every edge weighted.
#[allow(dead_code)]
pub fn abc_chain() -> GraphStore {
    let (graph, _) = build(
        vec![
            node("A", -122.42, 37.77),
            node("B", -122.41, 37.78),
            node("C", -122.40, 37.79),
        ],
        vec![edge("A", "B", Some(5.0)), edge("B", "C", Some(3.0))],
    );
    graph
}

/// Two disjoint pairs: {A, B} and {X, Y}.
#[allow(dead_code)]
pub fn two_islands() -> GraphStore {
    let (graph, _) = build(
        vec![
            node("A", 0.0, 0.0),
            node("B", 1.0, 0.0),
            node("X", 10.0, 10.0),
            node("Y", 11.0, 10.0),
        ],
        vec![edge("A", "B", Some(1.0)), edge("X", "Y", Some(1.0))],
    );
    graph
}
