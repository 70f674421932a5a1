//! Data models for the load layout engine.
//!
//! This module defines the fundamental data structures of a loading session:
//! - `LoadSurface`: The transport deck with its dimensions and weight capacity
//! - `CargoItem`: A piece of equipment with dimensions and weight
//! - `PlacedItem`: A cargo item with its position and rotation on the deck
//!
//! All lengths are meters, weights on items are kg and capacities are metric tons.

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::geometry::effective_dimensions;
use crate::types::{Footprint, Positioned, Rect, Vec2, Weighted};

/// Validation error for surface and cargo data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}

fn validate_dimension(value: f64, name: &str) -> Result<(), ValidationError> {
    if value <= 0.0 || !value.is_finite() {
        return Err(ValidationError::InvalidDimension(format!(
            "{} must be positive, got: {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_weight_value(value: f64) -> Result<(), ValidationError> {
    if value <= 0.0 || !value.is_finite() {
        return Err(ValidationError::InvalidWeight(format!(
            "Weight must be positive, got: {}",
            value
        )));
    }
    Ok(())
}

/// Physical dimensions of a cargo item in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "length": 2.48, "width": 1.22, "height": 2.3 }))]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_dimension(self.length, "Length")?;
        validate_dimension(self.width, "Width")?;
        validate_dimension(self.height, "Height")?;
        Ok(())
    }
}

/// The transport deck cargo is placed on.
///
/// Either the integral roll-off platform of a unit or a removable lowboy
/// attachment. A `capacity_tons` of zero means the capacity is unknown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "length": 12.0, "width": 2.6, "capacityTons": 40.0, "name": "Roll-off 12 m" }))]
pub struct LoadSurface {
    pub length: f64,
    pub width: f64,
    #[serde(default)]
    pub capacity_tons: f64,
    #[serde(default)]
    pub name: String,
}

impl LoadSurface {
    /// Creates a new surface with validation.
    ///
    /// # Parameters
    /// * `length` - Deck length in m
    /// * `width` - Deck width in m
    /// * `capacity_tons` - Weight capacity in t, 0 if unknown
    /// * `name` - Display label
    ///
    /// # Examples
    /// ```
    /// use load_layout::model::LoadSurface;
    ///
    /// assert!(LoadSurface::new(12.0, 2.6, 40.0, "Roll-off").is_ok());
    /// assert!(LoadSurface::new(0.0, 2.6, 40.0, "Roll-off").is_err());
    /// ```
    pub fn new(
        length: f64,
        width: f64,
        capacity_tons: f64,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let surface = Self {
            length,
            width,
            capacity_tons,
            name: name.into(),
        };
        surface.validated()
    }

    /// Re-checks a surface built elsewhere (e.g. deserialized from a request).
    pub fn validated(self) -> Result<Self, ValidationError> {
        validate_dimension(self.length, "Surface length")?;
        validate_dimension(self.width, "Surface width")?;
        if self.capacity_tons < 0.0 || !self.capacity_tons.is_finite() {
            return Err(ValidationError::InvalidCapacity(format!(
                "Capacity must not be negative, got: {}",
                self.capacity_tons
            )));
        }
        Ok(self)
    }

    /// Whether a weight capacity is known for this surface.
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.capacity_tons > 0.0
    }

    /// Geometric center of the deck.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.dims().center()
    }

    /// Deck dimensions as (length, width).
    #[inline]
    pub fn dims(&self) -> Vec2 {
        Vec2::new(self.length, self.width)
    }
}

impl Footprint for LoadSurface {
    fn footprint(&self) -> Vec2 {
        self.dims()
    }
}

/// A piece of equipment to be transported.
///
/// Sourced from the equipment catalog or entered manually. Immutable once
/// added to a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "eq-1",
    "brand": "Genie",
    "model": "GS-3246",
    "category": "scissor",
    "dimensions": { "length": 2.48, "width": 1.22, "height": 2.3 },
    "weight": 3200.0
}))]
pub struct CargoItem {
    pub id: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub category: String,
    pub dimensions: Dimensions,
    /// Weight in kg
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_number: Option<String>,
}

impl CargoItem {
    /// Creates a new cargo item with validation.
    ///
    /// # Parameters
    /// * `id` - Unique, caller-assigned identifier
    /// * `brand` - Manufacturer
    /// * `model` - Model designation
    /// * `category` - Equipment category (scissor, boom, telehandler, ...)
    /// * `dimensions` - Length, width and height in m
    /// * `weight` - Weight in kg
    ///
    /// # Returns
    /// `Ok(CargoItem)` for valid values, otherwise `Err(ValidationError)`
    ///
    /// # Examples
    /// ```
    /// use load_layout::model::{CargoItem, Dimensions};
    ///
    /// let ok = CargoItem::new("a", "Genie", "GS-3246", "scissor", Dimensions::new(2.48, 1.22, 2.3), 3200.0);
    /// assert!(ok.is_ok());
    ///
    /// let invalid = CargoItem::new("a", "Genie", "GS-3246", "scissor", Dimensions::new(-2.48, 1.22, 2.3), 3200.0);
    /// assert!(invalid.is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        category: impl Into<String>,
        dimensions: Dimensions,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            category: category.into(),
            dimensions,
            weight,
            serial_number: None,
            economic_number: None,
        };
        item.validated()
    }

    /// Re-checks an item built elsewhere (e.g. deserialized from a request).
    pub fn validated(self) -> Result<Self, ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::InvalidId(
                "Cargo item id must not be empty".to_string(),
            ));
        }
        self.dimensions.validate()?;
        validate_weight_value(self.weight)?;
        Ok(self)
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    pub fn with_economic_number(mut self, economic_number: impl Into<String>) -> Self {
        self.economic_number = Some(economic_number.into());
        self
    }

    /// Human readable label, e.g. "Genie GS-3246".
    pub fn label(&self) -> String {
        let label = format!("{} {}", self.brand, self.model);
        let label = label.trim();
        if label.is_empty() {
            self.id.clone()
        } else {
            label.to_string()
        }
    }
}

impl Footprint for CargoItem {
    fn footprint(&self) -> Vec2 {
        Vec2::new(self.dimensions.length, self.dimensions.width)
    }
}

impl Weighted for CargoItem {
    fn weight_kg(&self) -> f64 {
        self.weight
    }
}

/// A cargo item with its position and rotation on the deck.
///
/// # Fields
/// * `item` - The original cargo item
/// * `position_x` - Distance of the near-left corner from the deck origin along the length
/// * `position_y` - Distance of the near-left corner from the deck origin across the width
/// * `rotated` - Whether the item is turned a quarter so length and width swap
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    #[serde(flatten)]
    pub item: CargoItem,
    pub position_x: f64,
    pub position_y: f64,
    #[serde(default)]
    pub rotated: bool,
}

impl PlacedItem {
    /// Places an item unrotated at the given position.
    pub fn new(item: CargoItem, position_x: f64, position_y: f64) -> Self {
        Self {
            item,
            position_x,
            position_y,
            rotated: false,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Footprint length along the deck after rotation.
    #[inline]
    pub fn effective_length(&self) -> f64 {
        effective_dimensions(self).0
    }

    /// Footprint width across the deck after rotation.
    #[inline]
    pub fn effective_width(&self) -> f64 {
        effective_dimensions(self).1
    }

    /// Far end of the item along the deck length.
    #[inline]
    pub fn end_x(&self) -> f64 {
        self.position_x + self.effective_length()
    }

    /// Far end of the item across the deck width.
    #[inline]
    pub fn end_y(&self) -> f64 {
        self.position_y + self.effective_width()
    }

    /// Occupied rectangle on the deck.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_position_and_footprint(Positioned::position(self), Footprint::footprint(self))
    }

    /// Center of the occupied rectangle, used as the item's center of mass.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

impl Positioned for PlacedItem {
    fn position(&self) -> Vec2 {
        Vec2::new(self.position_x, self.position_y)
    }
}

impl Footprint for PlacedItem {
    fn footprint(&self) -> Vec2 {
        Vec2::from(effective_dimensions(self))
    }
}

impl Weighted for PlacedItem {
    fn weight_kg(&self) -> f64 {
        self.item.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scissor() -> CargoItem {
        CargoItem::new(
            "a",
            "Genie",
            "GS-3246",
            "scissor",
            Dimensions::new(2.48, 1.22, 2.3),
            3200.0,
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let err = CargoItem::new("x", "", "", "", Dimensions::new(1.0, 0.0, 1.0), 10.0);
        assert!(matches!(err, Err(ValidationError::InvalidDimension(_))));
    }

    #[test]
    fn rejects_non_positive_weight() {
        let err = CargoItem::new("x", "", "", "", Dimensions::new(1.0, 1.0, 1.0), 0.0);
        assert!(matches!(err, Err(ValidationError::InvalidWeight(_))));
    }

    #[test]
    fn rejects_empty_id() {
        let err = CargoItem::new("  ", "", "", "", Dimensions::new(1.0, 1.0, 1.0), 1.0);
        assert!(matches!(err, Err(ValidationError::InvalidId(_))));
    }

    #[test]
    fn surface_accepts_unknown_capacity_but_not_negative() {
        let surface = LoadSurface::new(12.0, 2.6, 0.0, "Lowboy").unwrap();
        assert!(!surface.has_capacity());
        assert!(matches!(
            LoadSurface::new(12.0, 2.6, -1.0, "Lowboy"),
            Err(ValidationError::InvalidCapacity(_))
        ));
    }

    #[test]
    fn placed_item_footprint_follows_rotation() {
        let mut placed = PlacedItem::new(scissor(), 0.1, 0.69);
        assert!((placed.effective_length() - 2.48).abs() < 1e-9);
        assert!((placed.end_x() - 2.58).abs() < 1e-9);

        placed.rotated = true;
        assert!((placed.effective_length() - 1.22).abs() < 1e-9);
        assert!((placed.effective_width() - 2.48).abs() < 1e-9);
    }

    #[test]
    fn placed_item_serializes_flat_camel_case() {
        let placed = PlacedItem::new(scissor().with_serial_number("SN-1"), 0.1, 0.69);
        let value = serde_json::to_value(&placed).unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(value["serialNumber"], "SN-1");
        assert_eq!(value["positionX"], 0.1);
        assert_eq!(value["rotated"], false);
        assert!(value.get("economicNumber").is_none());

        let back: PlacedItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, placed);
    }

    #[test]
    fn catalog_numbers_are_kept() {
        let item = scissor()
            .with_serial_number("SN-1")
            .with_economic_number("ECO-42");
        assert_eq!(item.economic_number.as_deref(), Some("ECO-42"));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["economicNumber"], "ECO-42");
        assert_eq!(value["serialNumber"], "SN-1");
    }

    #[test]
    fn label_falls_back_to_id() {
        let item = CargoItem::new("eq-7", "", "", "", Dimensions::new(1.0, 1.0, 1.0), 1.0).unwrap();
        assert_eq!(item.label(), "eq-7");
        assert_eq!(scissor().label(), "Genie GS-3246");
    }
}
