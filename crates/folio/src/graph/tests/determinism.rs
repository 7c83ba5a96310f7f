use super::*;
use crate::graph::export::{edge_to_string, node_to_string};

/// Build a deck multiple times and assert identical output.
fn assert_deterministic(deck: &Deck, strategy: LayoutStrategy, iterations: usize) {
    let cfg = LayoutConfig::default();
    let reference = build_graph(deck, &cfg, strategy).unwrap();

    for i in 1..iterations {
        let graph = build_graph(deck, &cfg, strategy).unwrap();
        assert_eq!(reference, graph, "Non-deterministic result on iteration {}", i);
    }
}

#[test]
fn chain_deterministic() {
    assert_deterministic(&chain(), LayoutStrategy::Grid, 20);
}

#[test]
fn portfolio_deterministic() {
    let d = crate::deck::builtin::portfolio().unwrap();
    assert_deterministic(&d, LayoutStrategy::Grid, 20);
    assert_deterministic(&d, LayoutStrategy::Traversal, 20);
}

#[test]
fn placement_ignores_declaration_order() {
    let forward = chain();
    let mut reversed = chain();
    // Re-inserting in reverse order must not move anything.
    let entries: Vec<_> = reversed.slides.clone().into_iter().rev().collect();
    reversed.slides.clear();
    for (id, spec) in entries {
        reversed.slides.insert(id, spec);
    }

    let a = build(&forward);
    let b = build(&reversed);
    let mut a_nodes: Vec<_> = a.nodes.iter().map(node_to_string).collect();
    let mut b_nodes: Vec<_> = b.nodes.iter().map(node_to_string).collect();
    a_nodes.sort();
    b_nodes.sort();
    assert_eq!(a_nodes, b_nodes);

    let mut a_edges: Vec<_> = a.edges.iter().map(edge_to_string).collect();
    let mut b_edges: Vec<_> = b.edges.iter().map(edge_to_string).collect();
    a_edges.sort();
    b_edges.sort();
    assert_eq!(a_edges, b_edges);
}

#[test]
fn grid_and_traversal_agree_on_tree_decks() {
    let d = chain();
    let cfg = LayoutConfig::default();
    let grid = build_graph(&d, &cfg, LayoutStrategy::Grid).unwrap();
    let walk = build_graph(&d, &cfg, LayoutStrategy::Traversal).unwrap();
    for node in &grid.nodes {
        assert_eq!(Some(node.position), walk.node(&node.id).map(|n| n.position));
    }
}
