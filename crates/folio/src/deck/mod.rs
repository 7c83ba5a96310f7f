pub mod builtin;
pub mod content;
mod validate;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::layout::{Arrangement, Direction, GridCoord, Neighbors};

pub use content::Block;

/// Author-assigned identifier of a slide, card or satellite.
pub type NodeId = String;

/// Problems with a deck file or with the references inside it.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("slide '{node}' points {direction} to unknown node '{target}'")]
    DanglingNeighbor {
        node: NodeId,
        direction: Direction,
        target: NodeId,
    },

    #[error("slide '{node}' names unknown hub '{target}'")]
    DanglingHub { node: NodeId, target: NodeId },

    #[error("start node '{0}' is not a slide in this deck")]
    UnknownStart(NodeId),

    #[error("main sequence entry '{0}' is not a slide in this deck")]
    UnknownMainSequenceEntry(NodeId),

    #[error("main sequence lists '{0}' more than once")]
    DuplicateMainSequenceEntry(NodeId),

    #[error("satellite group refers to unknown hub '{0}'")]
    UnknownSatelliteHub(NodeId),

    #[error("satellite group around '{0}' has no items")]
    EmptySatelliteGroup(NodeId),

    #[error("hub '{0}' has more than one satellite group")]
    DuplicateSatelliteHub(NodeId),

    #[error("id '{0}' is used by more than one node")]
    DuplicateId(NodeId),

    #[error("invalid deck file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Whether a directional node is part of the backbone or a branch off it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    #[default]
    Slide,
    /// Detail card branching off a hub slide.
    Card,
}

/// One directional node of the deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    #[serde(default)]
    pub kind: SlideKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridCoord>,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Neighbors::is_empty")]
    pub neighbors: Neighbors,

    /// Navigation target of a "back to hub" button. Draws no edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub: Option<NodeId>,

    /// Viewport padding requested when this node is re-centered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_padding: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Block>,
}

/// Icons orbiting one hub slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteGroup {
    pub hub: NodeId,
    #[serde(default)]
    pub arrangement: Arrangement,
    pub items: Vec<SatelliteItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteItem {
    pub id: NodeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// The slide registry: every node of the deck and how they point at each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Node focused when a session starts.
    pub start: NodeId,

    /// Backbone used for progress, in reading order.
    #[serde(default)]
    pub main_sequence: Vec<NodeId>,

    pub slides: BTreeMap<NodeId, SlideSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub satellites: Vec<SatelliteGroup>,
}

impl Deck {
    /// Parse and validate a deck from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_yaml::from_str(source)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Read, parse and validate a deck file.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let source = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let deck = Self::from_yaml(&source)?;
        log::debug!(
            "loaded deck from {} ({} slides)",
            path.display(),
            deck.slides.len()
        );
        Ok(deck)
    }

    pub fn slide(&self, id: &str) -> Option<&SlideSpec> {
        self.slides.get(id)
    }

    pub fn satellite(&self, id: &str) -> Option<(&SatelliteGroup, usize)> {
        self.satellites.iter().find_map(|group| {
            group
                .items
                .iter()
                .position(|item| item.id == id)
                .map(|index| (group, index))
        })
    }

    /// Whether `id` names any node, directional or satellite.
    pub fn contains(&self, id: &str) -> bool {
        self.slides.contains_key(id) || self.satellite(id).is_some()
    }

    /// Total number of nodes, satellites included.
    pub fn node_count(&self) -> usize {
        self.slides.len() + self.satellites.iter().map(|g| g.items.len()).sum::<usize>()
    }

    /// Satellite groups orbiting `hub`.
    pub fn satellites_of<'a>(&'a self, hub: &'a str) -> impl Iterator<Item = &'a SatelliteGroup> + 'a {
        self.satellites.iter().filter(move |g| g.hub == hub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
title: Small
start: a
main_sequence: [a, b]
slides:
  a:
    grid: [0, 0]
    title: A
    neighbors: { right: b }
  b:
    grid: [1, 0]
    title: B
    neighbors: { left: a, down: c }
    content:
      - type: paragraph
        text: hello
  c:
    kind: card
    grid: [1, 1]
    title: C
    neighbors: { up: b }
    hub: b
satellites:
  - hub: a
    arrangement: split
    items:
      - { id: s1, name: One }
"#;

    #[test]
    fn parses_small_deck() {
        let deck = Deck::from_yaml(SMALL).unwrap();
        assert_eq!(deck.title.as_deref(), Some("Small"));
        assert_eq!(deck.slides.len(), 3);
        assert_eq!(deck.node_count(), 4);
        let c = deck.slide("c").unwrap();
        assert_eq!(c.kind, SlideKind::Card);
        assert_eq!(c.grid, Some(GridCoord::new(1, 1)));
        assert_eq!(c.hub.as_deref(), Some("b"));
        assert_eq!(deck.satellites[0].arrangement, Arrangement::Split);
    }

    #[test]
    fn satellites_are_looked_up_by_id() {
        let deck = Deck::from_yaml(SMALL).unwrap();
        let (group, index) = deck.satellite("s1").unwrap();
        assert_eq!(group.hub, "a");
        assert_eq!(index, 0);
        assert!(deck.contains("s1"));
        assert!(!deck.contains("s2"));
        assert_eq!(deck.satellites_of("a").count(), 1);
        assert_eq!(deck.satellites_of("b").count(), 0);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Deck::from_yaml("start: [unterminated").unwrap_err();
        assert!(matches!(err, DeckError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Deck::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
