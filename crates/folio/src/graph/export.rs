use std::fmt::Write;

use super::{GraphEdge, GraphNode, NodeKind, SlideGraph};

/// Format an edge as `source -direction-> target`.
///
/// Example: `01 -right-> 02`
pub fn edge_to_string(edge: &GraphEdge) -> String {
    format!("{} -{}-> {}", edge.source, edge.direction, edge.target)
}

/// Format a node as `id kind (x, y)`, with orbit details for satellites.
pub fn node_to_string(node: &GraphNode) -> String {
    let kind = match node.kind {
        NodeKind::Slide => "slide",
        NodeKind::Card => "card",
        NodeKind::Satellite => "satellite",
    };
    let mut line = format!(
        "{} {} ({}, {})",
        node.id,
        kind,
        node.position.x.round(),
        node.position.y.round()
    );
    if let Some(orbit) = &node.orbit {
        let _ = write!(line, " around {} [{}/{}]", orbit.hub, orbit.index + 1, orbit.count);
    }
    line
}

impl SlideGraph {
    /// JSON interchange consumed by external renderers.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Human-readable listing of nodes and edges, one per line.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "nodes ({}):", self.nodes.len());
        for node in &self.nodes {
            let _ = writeln!(out, "  {}", node_to_string(node));
        }
        let _ = writeln!(out, "edges ({}):", self.edges.len());
        for edge in &self.edges {
            let _ = writeln!(out, "  {}", edge_to_string(edge));
        }
        out
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::layout::{Direction, Neighbors, Point, Size};

    fn node(id: &str, x: f64, y: f64) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            kind: NodeKind::Slide,
            position: Point::new(x, y),
            size: Size {
                width: 10.0,
                height: 10.0,
            },
            title: id.to_uppercase(),
            subtitle: None,
            neighbors: Neighbors::default(),
            hub: None,
            fit_padding: None,
            orbit: None,
            content: Vec::new(),
        }
    }

    #[test]
    fn edge_format() {
        let e = GraphEdge::new("01", Direction::Right, "02");
        assert_eq!(edge_to_string(&e), "01 -right-> 02");
    }

    #[test]
    fn node_format_rounds_coordinates() {
        assert_eq!(node_to_string(&node("a", 2320.4, 0.4)), "a slide (2320, 0)");
    }

    #[test]
    fn json_uses_renderer_field_names() {
        let graph = SlideGraph {
            nodes: vec![node("a", 0.0, 0.0)],
            edges: vec![GraphEdge::new("a", Direction::Down, "b")],
        };
        let value: serde_json::Value = serde_json::from_str(&graph.to_json(false).unwrap()).unwrap();
        assert_eq!(value["nodes"][0]["id"], "a");
        assert_eq!(value["nodes"][0]["kind"], "slide");
        assert_eq!(value["nodes"][0]["position"]["x"], 0.0);
        assert!(value["nodes"][0].get("orbit").is_none());
        assert_eq!(value["edges"][0]["id"], "a-down->b");
        assert_eq!(value["edges"][0]["source_anchor"], "bottom");
        assert_eq!(value["edges"][0]["target_anchor"], "top");
    }

    #[test]
    fn summary_lists_everything() {
        let graph = SlideGraph {
            nodes: vec![node("a", 0.0, 0.0), node("b", 1.0, 0.0)],
            edges: vec![GraphEdge::new("a", Direction::Right, "b")],
        };
        let text = graph.summary();
        assert!(text.contains("nodes (2):"));
        assert!(text.contains("  a -right-> b"));
    }
}
