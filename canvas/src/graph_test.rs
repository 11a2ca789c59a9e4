use super::*;

fn p(id: &str) -> ItemRef {
    ItemRef::photo(id)
}

// =============================================================
// Toggle
// =============================================================

#[test]
fn toggle_on_empty_graph_adds_edge() {
    let mut graph = ConnectionGraph::new();
    let Toggle::Added(edge) = graph.toggle(&p("p1"), &p("p2")) else {
        panic!("expected an added edge");
    };
    assert_eq!(graph.len(), 1);
    assert_eq!(edge.from_item_id, "p1");
    assert_eq!(edge.to_item_id, "p2");
    assert_eq!(edge.from_item_type, ItemKind::Photo);
    assert_eq!(edge.color, "#e53e3e");
    assert!(edge.id.starts_with("connection-"));
}

#[test]
fn toggle_twice_restores_graph() {
    let mut graph = ConnectionGraph::new();
    graph.toggle(&p("a"), &p("b"));
    let before = graph.clone();

    assert!(matches!(graph.toggle(&p("p1"), &p("p2")), Toggle::Added(_)));
    assert!(matches!(graph.toggle(&p("p1"), &p("p2")), Toggle::Removed(_)));
    assert_eq!(graph, before);
}

#[test]
fn toggle_is_undirected() {
    let mut graph = ConnectionGraph::new();
    graph.toggle(&p("p1"), &ItemRef::note("n1"));
    let removed = graph.toggle(&ItemRef::note("n1"), &p("p1"));
    assert!(matches!(removed, Toggle::Removed(_)));
    assert!(graph.is_empty());
}

#[test]
fn toggle_rejects_self_loop() {
    let mut graph = ConnectionGraph::new();
    assert_eq!(graph.toggle(&p("p1"), &p("p1")), Toggle::SelfLoop);
    assert!(graph.is_empty());
}

#[test]
fn toggle_with_color_uses_given_color() {
    let mut graph = ConnectionGraph::new();
    let Toggle::Added(edge) = graph.toggle_with_color(&p("a"), &ItemRef::paper("b"), "#123456") else {
        panic!("expected an added edge");
    };
    assert_eq!(edge.color, "#123456");
    assert_eq!(edge.to_item_type, ItemKind::Paper);
}

#[test]
fn at_most_one_edge_per_pair() {
    let mut graph = ConnectionGraph::new();
    for _ in 0..5 {
        graph.toggle(&p("a"), &p("b"));
        graph.toggle(&p("b"), &p("a"));
    }
    graph.toggle(&p("a"), &p("b"));
    assert_eq!(graph.len(), 1);
}

// =============================================================
// Queries
// =============================================================

#[test]
fn are_connected_checks_both_directions() {
    let mut graph = ConnectionGraph::new();
    graph.toggle(&p("x"), &p("y"));
    assert!(graph.are_connected("x", "y"));
    assert!(graph.are_connected("y", "x"));
    assert!(!graph.are_connected("x", "z"));
}

#[test]
fn neighbors_and_degree() {
    let mut graph = ConnectionGraph::new();
    graph.toggle(&p("hub"), &p("a"));
    graph.toggle(&ItemRef::wanted("w"), &p("hub"));
    graph.toggle(&p("a"), &p("b"));

    let neighbors = graph.neighbors("hub");
    assert_eq!(neighbors, [p("a"), ItemRef::wanted("w")]);
    assert_eq!(graph.degree("hub"), 2);
    assert_eq!(graph.degree("b"), 1);
    assert_eq!(graph.degree("nobody"), 0);
}

#[test]
fn other_end_of_non_endpoint_is_none() {
    let mut graph = ConnectionGraph::new();
    graph.toggle(&p("a"), &p("b"));
    let edge = graph.find("a", "b").unwrap();
    assert_eq!(edge.other_end("a"), Some(p("b")));
    assert_eq!(edge.other_end("c"), None);
}

// =============================================================
// Removal
// =============================================================

#[test]
fn remove_referencing_removes_exactly_touching_edges() {
    let mut graph = ConnectionGraph::new();
    graph.toggle(&p("p1"), &p("p2"));
    graph.toggle(&p("p3"), &p("p1"));
    graph.toggle(&p("p2"), &p("p3"));

    let removed = graph.remove_referencing("p1");
    assert_eq!(removed.len(), 2);
    assert!(removed.iter().all(|e| e.touches("p1")));
    assert_eq!(graph.len(), 1);
    assert!(graph.are_connected("p2", "p3"));
}

#[test]
fn graph_serializes_as_array_of_connections() {
    let mut graph = ConnectionGraph::new();
    graph.toggle(&p("a"), &ItemRef::note("b"));
    let value = serde_json::to_value(&graph).unwrap();
    let edge = &value[0];
    assert_eq!(edge["fromItemId"], "a");
    assert_eq!(edge["toItemType"], "note");
}
