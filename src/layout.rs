//! Placement logic for cargo on the load surface.
//!
//! This module implements the two placement rules of a loading session:
//! - sequential placement in input order along the deck length
//! - auto-arrange, which puts the heaviest equipment first and then places
//!   sequentially
//!
//! Neither rule clamps positions into the deck. An arrangement that runs past
//! the end of the surface is kept as is so that validation can report it.

use std::cmp::Ordering;

use crate::model::{CargoItem, LoadSurface, PlacedItem};

/// Configuration for placement and the limits applied during validation.
///
/// Contains the spacing, near-limit thresholds and tolerances steering the engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Gap in m kept before the first item and between consecutive items
    pub spacing: f64,
    /// Share of the weight capacity above which a warning is raised (0.0 to 1.0)
    pub weight_warn_ratio: f64,
    /// Share of deck length/width above which a warning is raised (0.0 to 1.0)
    pub dimension_warn_ratio: f64,
    /// Maximum center of gravity offset from the deck center, in percent of the half-dimension
    pub balance_threshold_percent: f64,
    /// General numerical tolerance
    pub general_epsilon: f64,
}

impl LayoutConfig {
    pub const DEFAULT_SPACING: f64 = 0.1;
    pub const DEFAULT_WEIGHT_WARN_RATIO: f64 = 0.9;
    pub const DEFAULT_DIMENSION_WARN_RATIO: f64 = 0.95;
    pub const DEFAULT_BALANCE_THRESHOLD_PERCENT: f64 = 20.0;
    pub const DEFAULT_GENERAL_EPSILON: f64 = crate::types::EPSILON_GENERAL;

    /// Creates a builder for a custom configuration.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: Self::DEFAULT_SPACING,
            weight_warn_ratio: Self::DEFAULT_WEIGHT_WARN_RATIO,
            dimension_warn_ratio: Self::DEFAULT_DIMENSION_WARN_RATIO,
            balance_threshold_percent: Self::DEFAULT_BALANCE_THRESHOLD_PERCENT,
            general_epsilon: Self::DEFAULT_GENERAL_EPSILON,
        }
    }
}

/// Builder for `LayoutConfig`.
#[derive(Clone, Debug, Default)]
pub struct LayoutConfigBuilder {
    config: LayoutConfig,
}

impl LayoutConfigBuilder {
    /// Sets the gap between items.
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.config.spacing = spacing;
        self
    }

    /// Sets the weight near-limit ratio.
    pub fn weight_warn_ratio(mut self, ratio: f64) -> Self {
        self.config.weight_warn_ratio = ratio;
        self
    }

    /// Sets the length/width near-limit ratio.
    pub fn dimension_warn_ratio(mut self, ratio: f64) -> Self {
        self.config.dimension_warn_ratio = ratio;
        self
    }

    /// Sets the balance threshold in percent.
    pub fn balance_threshold_percent(mut self, percent: f64) -> Self {
        self.config.balance_threshold_percent = percent;
        self
    }

    pub fn general_epsilon(mut self, epsilon: f64) -> Self {
        self.config.general_epsilon = epsilon;
        self
    }

    pub fn build(self) -> LayoutConfig {
        self.config
    }
}

/// Places items one after another along the deck length.
///
/// The first item starts at `config.spacing`; each following item starts
/// `config.spacing` after the end of its predecessor. Every item is centered
/// across the deck width and unrotated.
///
/// # Parameters
/// * `items` - Cargo in loading order
/// * `surface` - The deck
/// * `config` - Placement configuration
///
/// # Returns
/// One `PlacedItem` per input item, in input order
pub fn place_sequentially(
    items: &[CargoItem],
    surface: &LoadSurface,
    config: &LayoutConfig,
) -> Vec<PlacedItem> {
    let mut placed: Vec<PlacedItem> = Vec::with_capacity(items.len());
    let mut next_x = config.spacing;

    for item in items {
        let position_y = (surface.width - item.dimensions.width) / 2.0;
        let entry = PlacedItem::new(item.clone(), next_x, position_y);
        next_x = entry.end_x() + config.spacing;
        placed.push(entry);
    }

    if let Some(last) = placed.last() {
        if last.end_x() > surface.length + config.general_epsilon {
            log::debug!(
                "sequential placement runs {:.2} m past the deck end of {}",
                last.end_x() - surface.length,
                surface.name
            );
        }
    }

    placed
}

/// Rearranges the current placement with the heaviest items first.
///
/// Sorts by descending weight (ties keep their current order), then reruns
/// the sequential rule. Rotation is reset for all items.
pub fn auto_arrange(
    placed: &[PlacedItem],
    surface: &LoadSurface,
    config: &LayoutConfig,
) -> Vec<PlacedItem> {
    let mut items: Vec<CargoItem> = placed.iter().map(|p| p.item.clone()).collect();
    sort_by_weight_desc(&mut items);
    place_sequentially(&items, surface, config)
}

/// Sorting: heavy items first (stable).
fn sort_by_weight_desc(items: &mut [CargoItem]) {
    items.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
}
