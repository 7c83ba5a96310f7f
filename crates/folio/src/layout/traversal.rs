//! Legacy placement that derives positions by walking the adjacency graph.
//!
//! Each node is placed one grid unit away from the node that discovered it,
//! in the direction of the discovering pointer. This only works well for
//! tree-shaped decks: when two paths converge on one node (a diamond), the
//! node ends up wherever the most recently enqueued discovery puts it. Decks
//! should prefer declared grid coordinates.

use std::collections::{HashMap, HashSet};

use super::{Direction, LayoutConfig, LayoutError, Neighbors, Point};

/// A directed pointer discovered during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub source: String,
    pub target: String,
    pub direction: Direction,
}

/// Result of a traversal: nodes in the order they were placed, and the
/// pointers that led to not-yet-visited nodes.
#[derive(Debug, Clone, Default)]
pub struct Traversal {
    pub placements: Vec<(String, Point)>,
    pub discoveries: Vec<Discovery>,
}

impl Traversal {
    pub fn position_of(&self, id: &str) -> Option<Point> {
        self.placements
            .iter()
            .find(|(placed, _)| placed == id)
            .map(|(_, p)| *p)
    }
}

/// Depth-first placement from `start`, which lands at the origin.
///
/// A neighbor is enqueued only if it has not been visited at enqueue time, so
/// the walk terminates on cyclic decks. A node enqueued more than once before
/// being visited is placed by the entry popped first (the most recent one);
/// later entries for it are dropped. Nodes unreachable from `start` are not
/// placed.
pub fn place_by_traversal(
    start: &str,
    adjacency: &HashMap<&str, &Neighbors>,
    config: &LayoutConfig,
) -> Result<Traversal, LayoutError> {
    if !adjacency.contains_key(start) {
        return Err(LayoutError::UnknownStart(start.to_string()));
    }

    let mut stack: Vec<(&str, Point)> = vec![(start, Point::ORIGIN)];
    let mut visited: HashSet<&str> = HashSet::new();
    let mut out = Traversal::default();

    while let Some((id, position)) = stack.pop() {
        if visited.contains(id) {
            log::trace!("traversal: '{id}' already placed, dropping stale entry");
            continue;
        }

        let neighbors = adjacency
            .get(id)
            .ok_or_else(|| LayoutError::UnknownStart(id.to_string()))?;

        for (dir, target) in neighbors.iter() {
            let Some((&target, _)) = adjacency.get_key_value(target) else {
                return Err(LayoutError::DanglingReference {
                    node: id.to_string(),
                    direction: dir,
                    target: target.to_string(),
                });
            };
            if visited.contains(target) {
                continue;
            }
            stack.push((target, config.step(position, dir)));
            out.discoveries.push(Discovery {
                source: id.to_string(),
                target: target.to_string(),
                direction: dir,
            });
        }

        out.placements.push((id.to_string(), position));
        visited.insert(id);
    }

    Ok(out)
}
