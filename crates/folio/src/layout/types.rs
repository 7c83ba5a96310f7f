use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Author-declared grid cell of a slide.
///
/// Written as a two-element sequence `[col, row]` in deck files. Rows grow
/// downwards, columns grow to the right.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

impl GridCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Step one cell in the given direction.
    pub fn step(self, dir: Direction) -> Self {
        match dir {
            Direction::Left => Self::new(self.col - 1, self.row),
            Direction::Up => Self::new(self.col, self.row - 1),
            Direction::Down => Self::new(self.col, self.row + 1),
            Direction::Right => Self::new(self.col + 1, self.row),
        }
    }
}

impl From<[i32; 2]> for GridCoord {
    fn from([col, row]: [i32; 2]) -> Self {
        Self { col, row }
    }
}

impl From<GridCoord> for [i32; 2] {
    fn from(coord: GridCoord) -> Self {
        [coord.col, coord.row]
    }
}

impl Ord for GridCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for GridCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Pixel coordinate on the canvas. Positions of nodes are their top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rendered box dimensions of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Direction of a neighbor pointer.
///
/// Declaration order is the order in which neighbors are visited everywhere:
/// left, up, down, right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Up,
    Down,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Down,
        Direction::Right,
    ];

    /// The opposite direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Connection handle a renderer attaches an edge to when leaving in this direction.
    pub fn anchor(self) -> Anchor {
        match self {
            Direction::Left => Anchor::Left,
            Direction::Up => Anchor::Top,
            Direction::Down => Anchor::Bottom,
            Direction::Right => Anchor::Right,
        }
    }

    /// Button caption for moving in this direction.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Left => "\u{2190} Back",
            Direction::Up => "\u{2191} Up",
            Direction::Down => "\u{2193} Down",
            Direction::Right => "Next \u{2192}",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of a node box where an edge attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Right,
    Bottom,
    Left,
}

/// Partial mapping from direction to the id of the neighbor in that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

impl Neighbors {
    pub fn get(&self, dir: Direction) -> Option<&str> {
        match dir {
            Direction::Left => self.left.as_deref(),
            Direction::Up => self.up.as_deref(),
            Direction::Down => self.down.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }

    pub fn set(&mut self, dir: Direction, id: impl Into<String>) {
        let slot = match dir {
            Direction::Left => &mut self.left,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Right => &mut self.right,
        };
        *slot = Some(id.into());
    }

    /// Builder-style variant of [`Neighbors::set`].
    pub fn with(mut self, dir: Direction, id: impl Into<String>) -> Self {
        self.set(dir, id);
        self
    }

    /// Populated directions in left, up, down, right order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &str)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.get(dir).map(|id| (dir, id)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn anchors_match_handle_names() {
        assert_eq!(Direction::Up.anchor(), Anchor::Top);
        assert_eq!(Direction::Down.anchor(), Anchor::Bottom);
        assert_eq!(Direction::Left.opposite().anchor(), Anchor::Right);
    }

    #[test]
    fn grid_step_moves_one_cell() {
        let c = GridCoord::new(2, 3);
        assert_eq!(c.step(Direction::Left), GridCoord::new(1, 3));
        assert_eq!(c.step(Direction::Up), GridCoord::new(2, 2));
        assert_eq!(c.step(Direction::Down), GridCoord::new(2, 4));
        assert_eq!(c.step(Direction::Right), GridCoord::new(3, 3));
    }

    #[test]
    fn neighbors_iterate_in_declaration_order() {
        let n = Neighbors::default()
            .with(Direction::Right, "b")
            .with(Direction::Left, "a")
            .with(Direction::Down, "c");
        let dirs: Vec<_> = n.iter().collect();
        assert_eq!(
            dirs,
            vec![
                (Direction::Left, "a"),
                (Direction::Down, "c"),
                (Direction::Right, "b"),
            ]
        );
    }

    #[test]
    fn grid_coord_reads_from_pair() {
        let c: GridCoord = serde_yaml::from_str("[1, -2]").unwrap();
        assert_eq!(c, GridCoord::new(1, -2));
        assert_eq!(format!("{c}"), "(1,-2)");
    }

    #[test]
    fn empty_neighbors() {
        assert!(Neighbors::default().is_empty());
        assert!(!Neighbors::default().with(Direction::Up, "x").is_empty());
    }
}
