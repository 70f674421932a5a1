//! Combined evaluation of one arrangement.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::balance::{BalanceReport, calculate_balance};
use crate::capacity::CapacityResolution;
use crate::collision::{CollisionPair, colliding_ids, detect_collisions};
use crate::layout::LayoutConfig;
use crate::model::{LoadSurface, PlacedItem};
use crate::validation::{ValidationReport, validate};

/// Validation, collisions and balance, recomputed from scratch.
///
/// The three parts are independent: collisions never change the validation
/// status and an unbalanced load is not a validation error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub validation: ValidationReport,
    pub collisions: Vec<CollisionPair>,
    pub colliding_ids: Vec<String>,
    pub balance: BalanceReport,
}

impl LayoutReport {
    /// Evaluates an arrangement.
    ///
    /// # Parameters
    /// * `items` - Current arrangement
    /// * `capacity` - Deck limits used for validation
    /// * `surface` - Deck used for the balance reference point
    /// * `config` - Thresholds
    pub fn compute(
        items: &[PlacedItem],
        capacity: &CapacityResolution,
        surface: &LoadSurface,
        config: &LayoutConfig,
    ) -> Self {
        let collisions = detect_collisions(items);
        let colliding_ids = colliding_ids(&collisions).into_iter().collect();
        Self {
            validation: validate(items, capacity, config),
            collisions,
            colliding_ids,
            balance: calculate_balance(items, surface, config),
        }
    }

    /// Evaluates an arrangement against the limits of its own deck.
    pub fn for_surface(items: &[PlacedItem], surface: &LoadSurface, config: &LayoutConfig) -> Self {
        Self::compute(items, &CapacityResolution::from(surface), surface, config)
    }

    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}
