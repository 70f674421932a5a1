//! Common types and traits for surface-space geometry.
//!
//! Everything in here works in meters on the 2D load surface. The X axis runs
//! along the surface length, the Y axis across its width, with the origin at
//! the near-left corner of the deck.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Global numerical tolerance for floating-point comparisons.
///
/// Used when comparing measured extents against surface limits so that an
/// item sitting exactly on the boundary is not reported as exceeding it.
pub const EPSILON_GENERAL: f64 = 1e-6;

/// A 2D vector or point on the load surface.
///
/// # Examples
/// ```
/// use load_layout::types::Vec2;
///
/// let position = Vec2::new(1.0, 0.5);
/// let footprint = Vec2::new(2.48, 1.22);
/// let center = position + footprint * 0.5;
/// assert!((center.x - 2.24).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Creates a new vector.
    ///
    /// # Parameters
    /// * `x` - Component along the surface length
    /// * `y` - Component across the surface width
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a zero vector (surface origin).
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Returns the vector with both components swapped.
    ///
    /// A quarter turn on the deck exchanges length and width.
    #[inline]
    pub const fn swapped(&self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Returns the midpoint between the origin and this point.
    #[inline]
    pub fn center(&self) -> Self {
        Self::new(self.x / 2.0, self.y / 2.0)
    }

    /// Checks if both components are positive and finite.
    #[inline]
    pub fn is_valid_dimension(&self) -> bool {
        self.x > 0.0 && self.y > 0.0 && self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl From<(f64, f64)> for Vec2 {
    #[inline]
    fn from(tuple: (f64, f64)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}

/// Trait for objects occupying a rectangular footprint on the surface.
pub trait Footprint {
    /// Returns the footprint as (length, width) in meters.
    fn footprint(&self) -> Vec2;
}

/// Trait for objects with a position on the surface.
pub trait Positioned {
    /// Returns the position of the near-left corner.
    fn position(&self) -> Vec2;
}

/// Trait for objects with weight.
pub trait Weighted {
    /// Returns the weight in kg.
    fn weight_kg(&self) -> f64;
}

/// An axis-aligned rectangle on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Near-left corner (position)
    pub min: Vec2,
    /// Far-right corner (position + footprint)
    pub max: Vec2,
}

impl Rect {
    /// Creates a rectangle from a position and a footprint.
    #[inline]
    pub fn from_position_and_footprint(position: Vec2, footprint: Vec2) -> Self {
        Self {
            min: position,
            max: position + footprint,
        }
    }

    /// Checks if the interiors of two rectangles overlap.
    ///
    /// Rectangles that only share an edge or a corner do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Returns the center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Returns the extent (length, width).
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Center of mass calculation helper.
///
/// Accumulates weighted positions for center of gravity calculation.
#[derive(Clone, Debug, Default)]
pub struct CenterOfMassCalculator {
    weighted_x: f64,
    weighted_y: f64,
    total_weight: f64,
}

impl CenterOfMassCalculator {
    /// Creates a new calculator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a weighted point.
    ///
    /// # Parameters
    /// * `point` - Position of the mass
    /// * `weight` - Weight of the mass
    pub fn add_point(&mut self, point: Vec2, weight: f64) {
        self.weighted_x += point.x * weight;
        self.weighted_y += point.y * weight;
        self.total_weight += weight;
    }

    /// Total weight accumulated so far.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Calculates the center of mass.
    ///
    /// # Returns
    /// `Some(point)` for a valid center of mass, `None` if no weight is present
    pub fn compute(&self) -> Option<Vec2> {
        if self.total_weight <= 0.0 {
            None
        } else {
            Some(Vec2::new(
                self.weighted_x / self.total_weight,
                self.weighted_y / self.total_weight,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 5.0);

        assert_eq!(a + b, Vec2::new(5.0, 7.0));
        assert_eq!(b - a, Vec2::new(3.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(a.swapped(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_vec2_valid_dimension() {
        assert!(Vec2::new(2.48, 1.22).is_valid_dimension());
        assert!(!Vec2::new(0.0, 1.22).is_valid_dimension());
        assert!(!Vec2::new(f64::NAN, 1.0).is_valid_dimension());
        assert!(!Vec2::new(1.0, f64::INFINITY).is_valid_dimension());
    }

    #[test]
    fn test_rect_intersects_strictly() {
        let a = Rect::from_position_and_footprint(Vec2::zero(), Vec2::new(2.0, 2.0));
        let b = Rect::from_position_and_footprint(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0));
        let touching = Rect::from_position_and_footprint(Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_rect_center_and_extent() {
        let r = Rect::from_position_and_footprint(Vec2::new(0.1, 0.69), Vec2::new(2.48, 1.22));
        let center = r.center();
        assert!((center.x - 1.34).abs() < EPSILON_GENERAL);
        assert!((center.y - 1.30).abs() < EPSILON_GENERAL);
        assert!((r.extent().x - 2.48).abs() < EPSILON_GENERAL);
    }

    #[test]
    fn test_center_of_mass_calculator() {
        let mut calc = CenterOfMassCalculator::new();
        calc.add_point(Vec2::new(0.0, 0.0), 10.0);
        calc.add_point(Vec2::new(10.0, 0.0), 10.0);

        let center = calc.compute().unwrap();
        assert!((center.x - 5.0).abs() < EPSILON_GENERAL);
        assert!((center.y - 0.0).abs() < EPSILON_GENERAL);
        assert!((calc.total_weight() - 20.0).abs() < EPSILON_GENERAL);
    }

    #[test]
    fn test_center_of_mass_without_weight() {
        assert!(CenterOfMassCalculator::new().compute().is_none());
    }
}
