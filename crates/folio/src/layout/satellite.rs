//! Placement of satellite icons around a hub slide.
//!
//! Satellites sit on an ellipse centered on the hub rather than on the grid.
//! Angles follow screen coordinates: 0 points right and angles grow clockwise,
//! because the y axis points down.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::{LayoutConfig, LayoutError, Point};

/// Right arc of the split arrangement, in degrees.
const RIGHT_ARC: (f64, f64) = (-60.0, 60.0);
/// Left arc of the split arrangement, in degrees.
const LEFT_ARC: (f64, f64) = (120.0, 240.0);

/// How the siblings of one hub are distributed around it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arrangement {
    /// Evenly spaced around the full ellipse.
    #[default]
    Ellipse,
    /// Two arcs on the left and right of the hub, keeping its top and bottom clear.
    Split,
}

fn check_slot(index: usize, count: usize) -> Result<(), LayoutError> {
    if count == 0 {
        return Err(LayoutError::NoSiblings);
    }
    if index >= count {
        return Err(LayoutError::IndexOutOfRange { index, count });
    }
    Ok(())
}

/// Angle of sibling `index` out of `count` on the full ellipse: `i / n * 2π + phase`.
pub fn ellipse_angle(index: usize, count: usize, phase: f64) -> Result<f64, LayoutError> {
    check_slot(index, count)?;
    Ok(index as f64 / count as f64 * TAU + phase)
}

/// Angle of sibling `index` out of `count` in the split arrangement.
///
/// The right arc takes `ceil(n / 2)` siblings and the left arc the remaining
/// `floor(n / 2)`. Siblings are spread evenly from the start to the end of
/// their arc; a side holding a single sibling puts it at the arc midpoint.
pub fn split_angle(index: usize, count: usize) -> Result<f64, LayoutError> {
    check_slot(index, count)?;

    let right = count.div_ceil(2);
    let (slot, side_count, (start, end)) = if index < right {
        (index, right, RIGHT_ARC)
    } else {
        (index - right, count - right, LEFT_ARC)
    };

    let degrees = if side_count == 1 {
        (start + end) / 2.0
    } else {
        start + (end - start) * slot as f64 / (side_count - 1) as f64
    };
    Ok(degrees.to_radians())
}

/// Angle for a sibling under the given arrangement.
pub fn angle_for(
    arrangement: Arrangement,
    index: usize,
    count: usize,
    phase: f64,
) -> Result<f64, LayoutError> {
    match arrangement {
        Arrangement::Ellipse => ellipse_angle(index, count, phase),
        Arrangement::Split => split_angle(index, count),
    }
}

/// Point on the ellipse with the given radii at `angle` around `center`.
pub fn orbit_point(center: Point, radii: (f64, f64), angle: f64) -> Point {
    center.offset(angle.cos() * radii.0, angle.sin() * radii.1)
}

/// Top-left position of a satellite box orbiting a hub centered at `hub_center`.
pub fn place_satellite(
    config: &LayoutConfig,
    hub_center: Point,
    arrangement: Arrangement,
    index: usize,
    count: usize,
) -> Result<Point, LayoutError> {
    let angle = angle_for(arrangement, index, count, config.phase)?;
    let center = orbit_point(hub_center, config.orbit_radii(), angle);
    let half = config.satellite_size / 2.0;
    Ok(center.offset(-half, -half))
}

/// Normalize an angle into `[0, 2π)`.
pub fn normalize(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 { a + TAU } else { a }
}
