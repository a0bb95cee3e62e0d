use sparse_graph::{
    approx_equal, Edge, EdgeParams, GraphEdge, GraphError, GraphNode, NavGraphNode, NodeIndex, NodeParams,
    Position, RecordingSink, SparseDigraph, SparseGraph, Traversable, DEFAULT_EDGE_COST, EDGE_COST_EPSILON,
};
use std::sync::Arc;

fn n(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

#[test]
fn removal_never_renumbers_later_nodes() {
    let mut graph: SparseDigraph = SparseDigraph::new();
    let ids: Vec<_> = (0..5)
        .map(|i| graph.add_node(NodeParams::new(n(i))).unwrap())
        .collect();

    graph.remove_node(ids[1]).unwrap();
    graph.remove_node(ids[3]).unwrap();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.active_node_count(), 3);
    assert_eq!(graph.inactive_node_count(), 2);
    for &id in &[ids[0], ids[2], ids[4]] {
        assert_eq!(graph.get_node(id).map(GraphNode::id), Some(id));
    }
    assert!(graph.get_node(ids[1]).is_none());
    assert_eq!(graph.next_free_index(), n(5));
}

#[test]
fn reactivation_restores_counts_without_growing() {
    let mut graph: SparseGraph = SparseGraph::new();
    for i in 0..4 {
        graph.add_node(NodeParams::new(n(i))).unwrap();
    }
    let active_before = graph.active_node_count();

    graph.remove_node(n(2)).unwrap();
    assert_eq!(graph.active_node_count(), active_before - 1);

    assert_eq!(graph.add_node(NodeParams::new(n(2))), Ok(n(2)));
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.active_node_count(), active_before);
    assert_eq!(graph.next_free_index(), n(4));
}

#[test]
fn rejected_operations_are_no_ops() {
    let sink = Arc::new(RecordingSink::new());
    let mut graph: SparseGraph = SparseGraph::with_sink(sink.clone()).attributed("lifecycle-test");
    for i in 0..3 {
        graph.add_node(NodeParams::new(n(i))).unwrap();
    }
    graph.add_edge((0, 1)).unwrap();
    graph.remove_node(n(2)).unwrap();

    assert_eq!(
        graph.add_node(NodeParams::new(NodeIndex::INVALID)),
        Err(GraphError::InvalidIndex {
            index: NodeIndex::INVALID
        })
    );
    assert_eq!(
        graph.add_node(NodeParams::new(n(0))),
        Err(GraphError::DuplicateId { index: n(0) })
    );
    assert_eq!(
        graph.add_edge((0, 2)),
        Err(GraphError::InactiveEndpoint { from: n(0), to: n(2) })
    );
    assert_eq!(
        graph.add_edge((1, 0)),
        Err(GraphError::DuplicateEdge { from: n(0), to: n(1) })
    );
    assert_eq!(
        graph.remove_edge(n(0), n(7)),
        Err(GraphError::InvalidIndex { index: n(7) })
    );
    assert_eq!(graph.remove_node(n(9)), Err(GraphError::InvalidIndex { index: n(9) }));

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 1);

    let entries = sink.entries();
    assert_eq!(entries.len(), 6);
    assert!(entries.iter().all(|d| d.component == "SparseGraph"));
    assert!(entries.iter().all(|d| d.attribution == Some("lifecycle-test")));
    assert_eq!(entries[2].operation, "add_edge");
    assert_eq!(
        entries[3].to_string(),
        "SparseGraph::add_edge: edge 0 -> 1 already exists (by lifecycle-test)"
    );
}

#[test]
fn directed_removal_scans_every_bucket() {
    let mut graph: SparseDigraph = SparseDigraph::new();
    for i in 0..4 {
        graph.add_node(NodeParams::new(n(i))).unwrap();
    }
    for pair in [(0, 2), (1, 2), (2, 3), (3, 0), (3, 1)] {
        graph.add_edge(pair).unwrap();
    }

    graph.remove_node(n(2)).unwrap();

    let remaining: Vec<_> = graph.edges().map(Edge::endpoints).collect();
    assert_eq!(remaining, vec![(n(3), n(0)), (n(3), n(1))]);
    assert!(graph.leading_edges(n(2)).is_empty());
}

#[test]
fn undirected_leading_edges_are_symmetric() {
    let mut graph: SparseGraph = SparseGraph::new();
    for i in 0..4 {
        graph.add_node(NodeParams::new(n(i))).unwrap();
    }
    for pair in [(3, 0), (1, 3), (2, 1)] {
        graph.add_edge(pair).unwrap();
    }

    for edge in graph.edges() {
        let (a, b) = edge.endpoints();
        assert!(a.index() <= b.index());
        assert!(graph.is_edge_present(a, b));
        assert!(graph.is_edge_present(b, a));
        assert!(graph.leading_edges(a).iter().any(|e| e.to_node() == b));
        assert!(graph.leading_edges(b).iter().any(|e| e.to_node() == a));
    }
}

#[test]
fn edge_params_and_default_cost() {
    let mut graph: SparseDigraph = SparseDigraph::new();
    for i in 0..3 {
        graph.add_node(NodeParams::new(n(i))).unwrap();
    }
    graph.add_edge(EdgeParams::new(n(0), n(1))).unwrap();
    graph.add_edge(EdgeParams::new(n(1), n(2)).with_cost(0.25)).unwrap();

    assert_eq!(graph.get_edge(n(0), n(1)).map(GraphEdge::cost), Some(DEFAULT_EDGE_COST));
    let cost = graph.get_edge(n(1), n(2)).map(GraphEdge::cost).unwrap();
    assert!(approx_equal(cost, 0.25, EDGE_COST_EPSILON));

    graph.set_edge_cost(n(1), n(2), 0.25 + EDGE_COST_EPSILON / 2.0).unwrap();
    let updated = *graph.get_edge(n(1), n(2)).unwrap();
    assert!(updated.approx_eq(&Edge::with_cost(n(1), n(2), 0.25)));
    assert!(!updated.approx_eq(&Edge::with_cost(n(1), n(2), 0.5)));
}

#[test]
fn nav_nodes_keep_their_position_across_reactivation() {
    let mut graph: SparseGraph<NavGraphNode> = SparseGraph::new();
    let a = graph
        .add_node(NodeParams::with_payload(n(0), Position::new(1.0, 2.0)))
        .unwrap();
    let b = graph
        .add_node(NodeParams::with_payload(n(1), Position::new(-3.0, 4.5)))
        .unwrap();
    graph.add_edge((a, b)).unwrap();

    if let Some(node) = graph.get_node_mut(b) {
        node.set_position(Position::new(0.0, 0.0));
    }
    assert_eq!(graph.get_node(b).map(NavGraphNode::position), Some(Position::new(0.0, 0.0)));

    graph.remove_node(a).unwrap();
    assert_eq!(graph.edge_count(), 0);
    graph
        .add_node(NodeParams::with_payload(a, Position::new(5.0, 5.0)))
        .unwrap();
    assert_eq!(graph.get_node(a).map(NavGraphNode::position), Some(Position::new(5.0, 5.0)));
}

#[test]
fn clear_restarts_from_zero() {
    let mut graph: SparseGraph = SparseGraph::new();
    for i in 0..3 {
        graph.add_node(NodeParams::new(n(i))).unwrap();
    }
    graph.add_edge((0, 2)).unwrap();

    graph.clear();
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.next_free_index(), n(0));
    assert_eq!(graph.add_node(NodeParams::new(n(5))), Ok(n(0)));
    assert!(graph.neighbors(n(0)).is_empty());
}
