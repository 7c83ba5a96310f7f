mod determinism;
mod invalid;

use std::collections::BTreeMap;

use super::{GraphEdge, GraphError, LayoutStrategy, SlideGraph, build_graph};
use crate::deck::{Deck, SatelliteGroup, SatelliteItem, SlideKind, SlideSpec};
use crate::layout::{Arrangement, Direction, GridCoord, LayoutConfig, Neighbors};

/// Helper to create a primary slide at a grid cell with the given pointers.
fn slide(id: &str, col: i32, row: i32, links: &[(Direction, &str)]) -> (String, SlideSpec) {
    let mut neighbors = Neighbors::default();
    for (dir, target) in links {
        neighbors.set(*dir, *target);
    }
    (
        id.to_string(),
        SlideSpec {
            kind: SlideKind::Slide,
            grid: Some(GridCoord::new(col, row)),
            title: format!("Slide {id}"),
            neighbors,
            ..Default::default()
        },
    )
}

/// Helper to create a detail card.
fn card(id: &str, col: i32, row: i32, links: &[(Direction, &str)], hub: &str) -> (String, SlideSpec) {
    let (id, mut spec) = slide(id, col, row, links);
    spec.kind = SlideKind::Card;
    spec.hub = Some(hub.to_string());
    (id, spec)
}

/// Helper to create a deck starting at `start`.
fn deck(start: &str, main: &[&str], slides: Vec<(String, SlideSpec)>) -> Deck {
    Deck {
        title: None,
        start: start.to_string(),
        main_sequence: main.iter().map(|s| s.to_string()).collect(),
        slides: slides.into_iter().collect::<BTreeMap<_, _>>(),
        satellites: Vec::new(),
    }
}

/// Helper to create a satellite group.
fn satellites(hub: &str, arrangement: Arrangement, count: usize) -> SatelliteGroup {
    SatelliteGroup {
        hub: hub.to_string(),
        arrangement,
        items: (0..count)
            .map(|i| SatelliteItem {
                id: format!("{hub}-icon{i}"),
                name: format!("Icon {i}"),
                icon: None,
            })
            .collect(),
    }
}

/// The three-slide chain A <-> B <-> C.
fn chain() -> Deck {
    deck(
        "A",
        &["A", "B", "C"],
        vec![
            slide("A", 0, 0, &[(Direction::Right, "B")]),
            slide("B", 1, 0, &[(Direction::Left, "A"), (Direction::Right, "C")]),
            slide("C", 2, 0, &[(Direction::Left, "B")]),
        ],
    )
}

fn build(deck: &Deck) -> SlideGraph {
    build_graph(deck, &LayoutConfig::default(), LayoutStrategy::Grid)
        .unwrap_or_else(|e| panic!("graph build failed: {e}"))
}

/// Find the edge with the given id.
fn edge<'a>(graph: &'a SlideGraph, id: &str) -> &'a GraphEdge {
    graph
        .edges
        .iter()
        .find(|e| e.id == id)
        .unwrap_or_else(|| panic!("edge {id} missing"))
}
