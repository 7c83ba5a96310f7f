pub mod satellite;
pub mod traversal;
pub mod types;

use serde::{Deserialize, Serialize};

pub use satellite::Arrangement;
pub use types::{Anchor, Direction, GridCoord, Neighbors, Point, Size};

/// Errors raised while assigning positions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("satellite placement needs at least one sibling")]
    NoSiblings,

    #[error("satellite index {index} is out of range for {count} siblings")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("traversal start '{0}' is not a known node")]
    UnknownStart(String),

    #[error("node '{node}' points {direction} to unknown node '{target}'")]
    DanglingReference {
        node: String,
        direction: Direction,
        target: String,
    },
}

/// Fixed dimensions used to turn grid cells into pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rendered width of a slide.
    pub unit_width: f64,
    /// Rendered height of a slide.
    pub unit_height: f64,
    /// Spacing between adjacent grid cells.
    pub gap: f64,
    /// Edge length of the square box of a satellite icon.
    pub satellite_size: f64,
    /// Distance between the hub's edge and the orbit of its satellites.
    pub orbit_margin: f64,
    /// Angular offset (radians) applied to full-ellipse satellite placement.
    pub phase: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unit_width: 1920.0,
            unit_height: 1080.0,
            gap: 400.0,
            satellite_size: 160.0,
            orbit_margin: 240.0,
            phase: 0.0,
        }
    }
}

impl LayoutConfig {
    /// Horizontal distance between the origins of two adjacent cells.
    pub fn column_pitch(&self) -> f64 {
        self.unit_width + self.gap
    }

    /// Vertical distance between the origins of two adjacent cells.
    pub fn row_pitch(&self) -> f64 {
        self.unit_height + self.gap
    }

    /// Top-left pixel position of a grid cell.
    ///
    /// Depends only on the coordinate itself, so placement is independent of
    /// the order in which nodes are visited.
    pub fn grid_position(&self, coord: GridCoord) -> Point {
        Point::new(
            coord.col as f64 * self.column_pitch(),
            coord.row as f64 * self.row_pitch(),
        )
    }

    /// The pixel position one cell away from `from` in `dir`.
    pub fn step(&self, from: Point, dir: Direction) -> Point {
        match dir {
            Direction::Left => from.offset(-self.column_pitch(), 0.0),
            Direction::Right => from.offset(self.column_pitch(), 0.0),
            Direction::Up => from.offset(0.0, -self.row_pitch()),
            Direction::Down => from.offset(0.0, self.row_pitch()),
        }
    }

    pub fn slide_size(&self) -> Size {
        Size {
            width: self.unit_width,
            height: self.unit_height,
        }
    }

    pub fn satellite_box(&self) -> Size {
        Size {
            width: self.satellite_size,
            height: self.satellite_size,
        }
    }

    /// Horizontal and vertical radius of the orbit around a hub slide.
    pub fn orbit_radii(&self) -> (f64, f64) {
        (
            self.unit_width / 2.0 + self.orbit_margin,
            self.unit_height / 2.0 + self.orbit_margin,
        )
    }
}
