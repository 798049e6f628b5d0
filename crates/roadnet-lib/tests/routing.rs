mod common;

use common::{abc_chain, build, edge, node, two_islands};
use roadnet_lib::{shortest_path, Error};

#[test]
fn weighted_chain_sums_segment_weights() {
    let graph = abc_chain();
    let result = shortest_path(&graph, "A", "C", true).expect("path exists");

    assert_eq!(result.nodes, vec!["A", "B", "C"]);
    assert_eq!(result.total_hops, 2);
    assert_eq!(result.total_weight, Some(8.0));
    assert!(result.weighted_used);
}

#[test]
fn unknown_target_is_reported_as_such() {
    let graph = abc_chain();
    let error = shortest_path(&graph, "A", "D", false).unwrap_err();

    match error {
        Error::UnknownNode { id } => assert_eq!(id, "D"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_source_is_reported_independently() {
    let graph = abc_chain();
    let error = shortest_path(&graph, "Z", "C", false).unwrap_err();

    match error {
        Error::UnknownNode { id } => assert_eq!(id, "Z"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn disconnected_pair_has_no_path() {
    let graph = two_islands();
    let error = shortest_path(&graph, "A", "X", false).unwrap_err();

    match error {
        Error::NoPath { origin, target } => {
            assert_eq!(origin, "A");
            assert_eq!(target, "X");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Weighted mode degrades or routes the same way; still no path.
    assert!(matches!(
        shortest_path(&graph, "A", "X", true),
        Err(Error::NoPath { .. })
    ));
}

#[test]
fn trivial_self_path_skips_search() {
    let graph = abc_chain();

    let unweighted = shortest_path(&graph, "B", "B", false).expect("trivial path");
    assert_eq!(unweighted.nodes, vec!["B"]);
    assert!(unweighted.segments.is_empty());
    assert_eq!(unweighted.total_hops, 0);
    assert_eq!(unweighted.total_weight, None);
    assert!(!unweighted.weighted_used);

    let weighted = shortest_path(&graph, "B", "B", true).expect("trivial path");
    assert_eq!(weighted.total_weight, Some(0.0));
    assert!(weighted.weighted_used);
}

#[test]
fn adjacent_nodes_are_one_hop_apart() {
    let graph = abc_chain();
    for (u, v, _) in graph.edges() {
        let result = shortest_path(&graph, &u.id, &v.id, false).expect("edge endpoints connect");
        assert_eq!(result.total_hops, 1, "{} - {}", u.id, v.id);
    }
}

#[test]
fn dijkstra_prefers_cheaper_longer_route() {
    // Direct A-C costs 10; the detour through B costs 8.
    let (graph, _) = build(
        vec![node("A", 0.0, 0.0), node("B", 1.0, 0.0), node("C", 2.0, 0.0)],
        vec![
            edge("A", "B", Some(5.0)),
            edge("B", "C", Some(3.0)),
            edge("A", "C", Some(10.0)),
        ],
    );

    let weighted = shortest_path(&graph, "A", "C", true).expect("path exists");
    assert_eq!(weighted.nodes, vec!["A", "B", "C"]);
    assert_eq!(weighted.total_weight, Some(8.0));

    let unweighted = shortest_path(&graph, "A", "C", false).expect("path exists");
    assert_eq!(unweighted.nodes, vec!["A", "C"]);
    assert_eq!(unweighted.total_hops, 1);
}

#[test]
fn single_unweighted_edge_disables_weighted_search_everywhere() {
    // Same topology as above, plus an unrelated unweighted edge. The
    // weight-availability check is graph-global, so the weighted request
    // must degrade to hop-count search even though every edge between A and
    // C carries a weight.
    let (graph, _) = build(
        vec![
            node("A", 0.0, 0.0),
            node("B", 1.0, 0.0),
            node("C", 2.0, 0.0),
            node("D", 3.0, 0.0),
            node("E", 4.0, 0.0),
        ],
        vec![
            edge("A", "B", Some(5.0)),
            edge("B", "C", Some(3.0)),
            edge("A", "C", Some(10.0)),
            edge("D", "E", None),
        ],
    );

    let requested_weighted = shortest_path(&graph, "A", "C", true).expect("path exists");
    let unweighted = shortest_path(&graph, "A", "C", false).expect("path exists");

    assert!(!requested_weighted.weighted_used);
    assert_eq!(requested_weighted.nodes, unweighted.nodes);
    assert_eq!(requested_weighted.nodes, vec!["A", "C"]);
}

#[test]
fn total_weight_is_absent_when_any_segment_lacks_one() {
    let (graph, _) = build(
        vec![node("A", 0.0, 0.0), node("B", 1.0, 0.0), node("C", 2.0, 0.0)],
        vec![edge("A", "B", Some(5.0)), edge("B", "C", None)],
    );

    let result = shortest_path(&graph, "A", "C", false).expect("path exists");
    assert_eq!(result.total_hops, 2);
    assert_eq!(result.total_weight, None, "no partial sums");
    assert_eq!(result.segments[0].weight, Some(5.0));
    assert_eq!(result.segments[1].weight, None);
}

#[test]
fn segments_carry_street_names() {
    let (graph, _) = build(
        vec![node("A", 0.0, 0.0), node("B", 1.0, 0.0)],
        vec![{
            let mut record = edge("A", "B", Some(2.0));
            record.name = Some("Market Street".to_string());
            record
        }],
    );

    let result = shortest_path(&graph, "A", "B", false).expect("path exists");
    assert_eq!(result.segments.len(), 1);
    let segment = &result.segments[0];
    assert_eq!(segment.from, "A");
    assert_eq!(segment.to, "B");
    assert_eq!(segment.name.as_deref(), Some("Market Street"));
    assert_eq!(segment.weight, Some(2.0));
}

#[test]
fn bfs_result_has_minimum_hop_count() {
    // Grid with two equal-hop routes from A to D; whichever is returned
    // must have exactly two hops.
    let (graph, _) = build(
        vec![
            node("A", 0.0, 0.0),
            node("B", 1.0, 0.0),
            node("C", 0.0, 1.0),
            node("D", 1.0, 1.0),
        ],
        vec![
            edge("A", "B", None),
            edge("A", "C", None),
            edge("B", "D", None),
            edge("C", "D", None),
        ],
    );

    let result = shortest_path(&graph, "A", "D", false).expect("path exists");
    assert_eq!(result.total_hops, 2);
    assert_eq!(result.nodes.first().map(String::as_str), Some("A"));
    assert_eq!(result.nodes.last().map(String::as_str), Some("D"));
}
