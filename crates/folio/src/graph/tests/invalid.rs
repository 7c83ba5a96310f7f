use super::*;
use crate::deck::DeckError;
use crate::graph::GraphError;

#[test]
fn dangling_pointer_aborts_build() {
    let d = deck(
        "A",
        &["A"],
        vec![slide("A", 0, 0, &[(Direction::Right, "ghost")])],
    );
    let err = build_graph(&d, &LayoutConfig::default(), LayoutStrategy::Grid).unwrap_err();
    match err {
        GraphError::Deck(DeckError::DanglingNeighbor {
            node,
            direction,
            target,
        }) => {
            assert_eq!(node, "A");
            assert_eq!(direction, Direction::Right);
            assert_eq!(target, "ghost");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn dangling_pointer_message_names_pair() {
    let d = deck(
        "A",
        &["A"],
        vec![slide("A", 0, 0, &[(Direction::Down, "ghost")])],
    );
    let err = build_graph(&d, &LayoutConfig::default(), LayoutStrategy::Grid).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'A'"), "{message}");
    assert!(message.contains("'ghost'"), "{message}");
}

#[test]
fn dangling_pointer_fails_traversal_too() {
    let d = deck(
        "A",
        &["A"],
        vec![slide("A", 0, 0, &[(Direction::Left, "ghost")])],
    );
    assert!(build_graph(&d, &LayoutConfig::default(), LayoutStrategy::Traversal).is_err());
}

#[test]
fn missing_cell_fails_grid_build() {
    let (id, mut spec) = slide("B", 0, 0, &[]);
    spec.grid = None;
    let d = deck("A", &["A"], vec![slide("A", 0, 0, &[]), (id, spec)]);
    let err = build_graph(&d, &LayoutConfig::default(), LayoutStrategy::Grid).unwrap_err();
    assert!(matches!(err, GraphError::MissingGridCoordinate(id) if id == "B"));
}

#[test]
fn missing_cell_is_fine_for_traversal() {
    let (id, mut spec) = slide("B", 0, 0, &[]);
    spec.grid = None;
    let d = deck(
        "A",
        &["A"],
        vec![slide("A", 0, 0, &[(Direction::Right, "B")]), (id, spec)],
    );
    let graph = build_graph(&d, &LayoutConfig::default(), LayoutStrategy::Traversal).unwrap();
    assert_eq!(graph.nodes.len(), 2);
}

#[test]
fn shared_cell_is_rejected() {
    let d = deck(
        "A",
        &["A"],
        vec![slide("A", 0, 0, &[]), slide("B", 0, 0, &[])],
    );
    let err = build_graph(&d, &LayoutConfig::default(), LayoutStrategy::Grid).unwrap_err();
    match err {
        GraphError::OverlappingCells { first, second, cell } => {
            assert_eq!(first, "A");
            assert_eq!(second, "B");
            assert_eq!(cell, GridCoord::new(0, 0));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn empty_satellite_group_is_rejected() {
    let mut d = chain();
    d.satellites.push(SatelliteGroup {
        hub: "B".into(),
        arrangement: Arrangement::Split,
        items: Vec::new(),
    });
    let err = build_graph(&d, &LayoutConfig::default(), LayoutStrategy::Grid).unwrap_err();
    assert!(matches!(err, GraphError::Deck(DeckError::EmptySatelliteGroup(_))));
}

#[test]
fn second_orbit_around_one_hub_is_rejected() {
    let mut d = chain();
    d.satellites.push(satellites("B", Arrangement::Ellipse, 2));
    let mut again = satellites("B", Arrangement::Split, 2);
    for item in &mut again.items {
        item.id = format!("{}-again", item.id);
    }
    d.satellites.push(again);

    for strategy in [LayoutStrategy::Grid, LayoutStrategy::Traversal] {
        let err = build_graph(&d, &LayoutConfig::default(), strategy).unwrap_err();
        assert!(matches!(
            &err,
            GraphError::Deck(DeckError::DuplicateSatelliteHub(hub)) if hub == "B"
        ));
    }
}
