//! Geometric helpers for footprints, overlap checks and bounds clamping on the deck.
//!
//! All functions are pure and total over well-formed input.

use crate::model::PlacedItem;
use crate::types::Vec2;

/// Returns the footprint (length, width) of a placed item after rotation.
///
/// A rotated item is turned a quarter on the deck, so its length runs across
/// the surface and its width along it.
///
/// # Examples
/// ```
/// use load_layout::geometry::effective_dimensions;
/// use load_layout::model::{CargoItem, Dimensions, PlacedItem};
///
/// let item = CargoItem::new("a", "", "", "", Dimensions::new(2.48, 1.22, 2.3), 3200.0).unwrap();
/// let mut placed = PlacedItem::new(item, 0.0, 0.0);
/// placed.rotated = true;
/// assert_eq!(effective_dimensions(&placed), (1.22, 2.48));
/// ```
pub fn effective_dimensions(placed: &PlacedItem) -> (f64, f64) {
    let dims = &placed.item.dimensions;
    if placed.rotated {
        (dims.width, dims.length)
    } else {
        (dims.length, dims.width)
    }
}

/// Calculates the overlap of two intervals in one dimension.
///
/// # Returns
/// Length of the overlap, at least 0.0
pub fn overlap_1d(a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    (a2.min(b2) - a1.max(b1)).max(0.0)
}

/// Checks whether two placed items overlap on the deck.
///
/// Uses strict inequalities on both axes with the effective footprints, so
/// items that merely touch along an edge do not collide.
pub fn intersects(a: &PlacedItem, b: &PlacedItem) -> bool {
    let x_overlap = a.position_x < b.end_x() && a.end_x() > b.position_x;
    let y_overlap = a.position_y < b.end_y() && a.end_y() > b.position_y;
    x_overlap && y_overlap
}

/// Clamps one coordinate so that `[value, value + extent]` lies within `[0, limit]`.
///
/// If the extent exceeds the limit the coordinate is pinned to 0.
pub fn clamp_axis(value: f64, extent: f64, limit: f64) -> f64 {
    let max = (limit - extent).max(0.0);
    value.clamp(0.0, max)
}

/// Clamps a position so a footprint of the given size lies inside the bounds.
pub fn clamp_into(position: Vec2, footprint: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(
        clamp_axis(position.x, footprint.x, bounds.x),
        clamp_axis(position.y, footprint.y, bounds.y),
    )
}

/// Checks if a point lies inside the footprint of a placed item (edges included).
pub fn point_inside(point: Vec2, placed: &PlacedItem) -> bool {
    point.x >= placed.position_x
        && point.x <= placed.end_x()
        && point.y >= placed.position_y
        && point.y <= placed.end_y()
}
