pub mod export;

#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::deck::{Block, Deck, DeckError, NodeId, SlideKind, SlideSpec};
use crate::layout::satellite::place_satellite;
use crate::layout::traversal::place_by_traversal;
use crate::layout::{Anchor, Direction, GridCoord, LayoutConfig, LayoutError, Neighbors, Point, Size};

/// Errors raised while turning a deck into a positioned graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("slide '{0}' has no grid coordinate")]
    MissingGridCoordinate(NodeId),

    #[error("slides '{first}' and '{second}' both occupy cell {cell}")]
    OverlappingCells {
        first: NodeId,
        second: NodeId,
        cell: GridCoord,
    },

    #[error("'{node}' links to '{target}', which was not placed")]
    UnplacedReference { node: NodeId, target: NodeId },
}

/// How directional nodes get their positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Positions come from each slide's declared grid cell.
    #[default]
    Grid,
    /// Positions are derived by walking the deck from its start node.
    Traversal,
}

impl LayoutStrategy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "grid" => Some(Self::Grid),
            "traversal" => Some(Self::Traversal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Traversal => "traversal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Slide,
    Satellite,
    Card,
}

impl From<SlideKind> for NodeKind {
    fn from(kind: SlideKind) -> Self {
        match kind {
            SlideKind::Slide => NodeKind::Slide,
            SlideKind::Card => NodeKind::Card,
        }
    }
}

/// Where a satellite sits in its hub's orbit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Orbit {
    pub hub: NodeId,
    pub index: usize,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A positioned node, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Point,
    pub size: Size,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Neighbors::is_empty")]
    pub neighbors: Neighbors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbit: Option<Orbit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Block>,
}

impl GraphNode {
    fn directional(id: &str, spec: &SlideSpec, position: Point, size: Size) -> Self {
        Self {
            id: id.to_string(),
            kind: spec.kind.into(),
            position,
            size,
            title: spec.title.clone(),
            subtitle: spec.subtitle.clone(),
            neighbors: spec.neighbors.clone(),
            hub: spec.hub.clone(),
            fit_padding: spec.fit_padding,
            orbit: None,
            content: spec.content.clone(),
        }
    }

    pub fn center(&self) -> Point {
        self.position
            .offset(self.size.width / 2.0, self.size.height / 2.0)
    }
}

/// A connector drawn for one neighbor pointer.
///
/// The id carries the direction, so two pointers from one source to the same
/// target still get distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub direction: Direction,
    pub source_anchor: Anchor,
    pub target_anchor: Anchor,
}

impl GraphEdge {
    pub fn new(source: &str, direction: Direction, target: &str) -> Self {
        Self {
            id: format!("{source}-{direction}->{target}"),
            source: source.to_string(),
            target: target.to_string(),
            direction,
            source_anchor: direction.anchor(),
            target_anchor: direction.opposite().anchor(),
        }
    }
}

/// Node and edge collections handed to the rendering side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlideGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl SlideGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Satellites orbiting `hub`, in orbit order.
    pub fn satellites_of<'a>(&'a self, hub: &'a str) -> impl Iterator<Item = &'a GraphNode> + 'a {
        self.nodes
            .iter()
            .filter(move |n| n.orbit.as_ref().is_some_and(|o| o.hub == hub))
    }
}

/// Build the positioned graph for a deck.
///
/// The deck is validated first, so a dangling pointer aborts the build
/// instead of producing a partial graph. Every populated neighbor pointer
/// yields one edge; reverse pointers are kept as separate edges. Satellites
/// get positions around their hub but no edges. A graph in which an edge or a
/// hub link points at a node that was never placed is rejected.
pub fn build_graph(
    deck: &Deck,
    config: &LayoutConfig,
    strategy: LayoutStrategy,
) -> Result<SlideGraph, GraphError> {
    deck.validate()?;

    let mut graph = match strategy {
        LayoutStrategy::Grid => build_grid(deck, config)?,
        LayoutStrategy::Traversal => build_traversal(deck, config)?,
    };

    add_satellites(deck, config, &mut graph)?;
    check_placed(&graph)?;

    log::debug!(
        "built {} graph: {} nodes, {} edges",
        strategy.as_str(),
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(graph)
}

fn build_grid(deck: &Deck, config: &LayoutConfig) -> Result<SlideGraph, GraphError> {
    let mut occupied: HashMap<GridCoord, &str> = HashMap::new();
    let mut graph = SlideGraph::default();

    for (id, spec) in &deck.slides {
        let cell = spec
            .grid
            .ok_or_else(|| GraphError::MissingGridCoordinate(id.clone()))?;
        if let Some(first) = occupied.insert(cell, id) {
            return Err(GraphError::OverlappingCells {
                first: first.to_string(),
                second: id.clone(),
                cell,
            });
        }

        let position = config.grid_position(cell);
        graph
            .nodes
            .push(GraphNode::directional(id, spec, position, config.slide_size()));

        for (direction, target) in spec.neighbors.iter() {
            graph.edges.push(GraphEdge::new(id, direction, target));
        }
    }

    Ok(graph)
}

fn build_traversal(deck: &Deck, config: &LayoutConfig) -> Result<SlideGraph, GraphError> {
    // Satellites are leaves for the walk; they are positioned by their orbit.
    let leaf = Neighbors::default();
    let satellites = deck
        .satellites
        .iter()
        .flat_map(|g| &g.items)
        .map(|item| (item.id.as_str(), &leaf));
    let adjacency: HashMap<&str, &Neighbors> = deck
        .slides
        .iter()
        .map(|(id, spec)| (id.as_str(), &spec.neighbors))
        .chain(satellites)
        .collect();

    let walk = place_by_traversal(&deck.start, &adjacency, config)?;

    let mut graph = SlideGraph::default();
    for (id, position) in &walk.placements {
        if let Some(spec) = deck.slide(id) {
            graph
                .nodes
                .push(GraphNode::directional(id, spec, *position, config.slide_size()));
        }
    }
    graph.edges = walk
        .discoveries
        .iter()
        .map(|d| GraphEdge::new(&d.source, d.direction, &d.target))
        .collect();

    let unplaced = deck.slides.len().saturating_sub(graph.nodes.len());
    if unplaced > 0 {
        log::warn!("{unplaced} slide(s) are unreachable from '{}' and were not placed", deck.start);
    }
    Ok(graph)
}

fn add_satellites(
    deck: &Deck,
    config: &LayoutConfig,
    graph: &mut SlideGraph,
) -> Result<(), GraphError> {
    for group in &deck.satellites {
        let Some(hub) = graph.node(&group.hub) else {
            log::debug!("hub '{}' was not placed, skipping its satellites", group.hub);
            continue;
        };
        let hub_center = hub.center();
        let count = group.items.len();

        for (index, item) in group.items.iter().enumerate() {
            let position = place_satellite(config, hub_center, group.arrangement, index, count)?;
            graph.nodes.push(GraphNode {
                id: item.id.clone(),
                kind: NodeKind::Satellite,
                position,
                size: config.satellite_box(),
                title: item.name.clone(),
                subtitle: None,
                neighbors: Neighbors::default(),
                hub: Some(group.hub.clone()),
                fit_padding: None,
                orbit: Some(Orbit {
                    hub: group.hub.clone(),
                    index,
                    count,
                    icon: item.icon.clone(),
                }),
                content: Vec::new(),
            });
        }
    }
    Ok(())
}

/// Every edge target and hub link must name a node of the graph.
fn check_placed(graph: &SlideGraph) -> Result<(), GraphError> {
    let placed: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let links = graph
        .edges
        .iter()
        .map(|e| (&e.source, &e.target))
        .chain(graph.nodes.iter().filter_map(|n| Some((&n.id, n.hub.as_ref()?))));

    for (node, target) in links {
        if !placed.contains(target.as_str()) {
            return Err(GraphError::UnplacedReference {
                node: node.clone(),
                target: target.clone(),
            });
        }
    }
    Ok(())
}
