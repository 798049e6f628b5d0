mod common;

use common::{abc_chain, bare_node, build, edge, node};
use roadnet_lib::{graph_geometry, path_geometry, Error};

#[test]
fn self_path_geometry_is_a_single_point() {
    let graph = abc_chain();
    let geometry = path_geometry(&graph, "A", "A", false).expect("trivial path");

    assert_eq!(geometry.nodes.len(), 1);
    assert_eq!(geometry.nodes[0].id, "A");
    assert_eq!(geometry.line, vec![[-122.42, 37.77]]);
    assert!(!geometry.weighted_used);
}

#[test]
fn path_geometry_lists_coordinates_in_path_order() {
    let graph = abc_chain();
    let geometry = path_geometry(&graph, "A", "C", false).expect("path exists");

    let ids: Vec<&str> = geometry.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(geometry.line.len(), 3);
    // Polyline points are [lon, lat].
    assert_eq!(geometry.line[0], [-122.42, 37.77]);
}

#[test]
fn uncoordinated_path_node_is_a_geometry_error_not_a_routing_error() {
    let (graph, _) = build(
        vec![node("A", 0.0, 0.0), bare_node("MID"), node("C", 2.0, 0.0)],
        vec![edge("A", "MID", None), edge("MID", "C", None)],
    );

    let error = path_geometry(&graph, "A", "C", false).unwrap_err();
    match error {
        Error::MissingGeometry { id } => assert_eq!(id, "MID"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unreachable_target_is_still_a_routing_error() {
    let (graph, _) = build(
        vec![node("A", 0.0, 0.0), node("B", 1.0, 0.0)],
        vec![],
    );

    assert!(matches!(
        path_geometry(&graph, "A", "B", false),
        Err(Error::NoPath { .. })
    ));
}

#[test]
fn graph_geometry_buckets_real_and_synthetic_edges() {
    let (graph, _) = build(
        vec![node("A", 0.0, 0.0), node("B", 1.0, 1.0), node("C", 2.0, 2.0)],
        vec![
            {
                let mut record = edge("A", "B", None);
                record.real = Some("1".to_string());
                record
            },
            {
                let mut record = edge("B", "C", None);
                record.real = Some("0".to_string());
                record
            },
        ],
    );

    let geometry = graph_geometry(&graph);
    assert_eq!(geometry.real.len(), 1);
    assert_eq!(geometry.synthetic.len(), 1);

    let segment = geometry.real[0];
    assert_eq!((segment.lon1, segment.lat1), (0.0, 0.0));
    assert_eq!((segment.lon2, segment.lat2), (1.0, 1.0));
}

#[test]
fn edges_with_uncoordinated_endpoints_are_omitted() {
    let (graph, _) = build(
        vec![node("A", 0.0, 0.0), bare_node("B"), node("C", 2.0, 2.0)],
        vec![edge("A", "B", None), edge("A", "C", None)],
    );

    let geometry = graph_geometry(&graph);
    assert_eq!(geometry.real.len(), 1, "only the fully-coordinated edge");
}

#[test]
fn center_is_the_mean_of_coordinated_nodes() {
    let (graph, _) = build(
        vec![node("A", -122.0, 37.0), node("B", -124.0, 39.0), bare_node("C")],
        vec![],
    );

    let center = graph_geometry(&graph).center;
    assert!((center.lon - -123.0).abs() < 1e-9);
    assert!((center.lat - 38.0).abs() < 1e-9);
}

#[test]
fn center_falls_back_to_default_when_nothing_has_coordinates() {
    let (graph, _) = build(vec![bare_node("A"), bare_node("B")], vec![]);

    let center = graph_geometry(&graph).center;
    assert!((center.lon - -122.4194).abs() < 1e-9);
    assert!((center.lat - 37.7749).abs() < 1e-9);
}

#[test]
fn geometry_serializes_with_lon_lat_pairs() {
    let graph = abc_chain();
    let geometry = path_geometry(&graph, "A", "B", false).expect("path exists");
    let json = serde_json::to_value(&geometry).expect("serializes");

    assert_eq!(json["nodes"][0]["id"], "A");
    assert_eq!(json["line"][0][0], -122.42);
    assert_eq!(json["line"][0][1], 37.77);
    assert_eq!(json["weighted_used"], false);
}
