//! Load balance: weighted center of gravity relative to the deck center.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::layout::LayoutConfig;
use crate::model::{LoadSurface, PlacedItem};
use crate::types::{CenterOfMassCalculator, Vec2, Weighted};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Balanced,
    Unbalanced,
}

/// Center of gravity and its offset from the deck center.
///
/// Offsets are percentages of the half length / half width, so 100 % means
/// the center of gravity sits on the deck edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub center_of_gravity: Vec2,
    pub offset_x_percent: f64,
    pub offset_y_percent: f64,
    pub status: BalanceStatus,
}

impl BalanceReport {
    pub fn is_balanced(&self) -> bool {
        self.status == BalanceStatus::Balanced
    }

    /// Directional detail for display, e.g. "X:34% Y:5%".
    pub fn summary(&self) -> String {
        format!(
            "X:{:.0}% Y:{:.0}%",
            self.offset_x_percent, self.offset_y_percent
        )
    }
}

/// Weighted center of gravity of the arrangement.
///
/// Falls back to the deck center when nothing is loaded.
pub fn center_of_gravity(items: &[PlacedItem], surface: &LoadSurface) -> Vec2 {
    let mut calc = CenterOfMassCalculator::new();
    for placed in items {
        calc.add_point(placed.center(), placed.weight_kg());
    }
    calc.compute().unwrap_or_else(|| surface.center())
}

/// Computes the balance of an arrangement.
pub fn calculate_balance(
    items: &[PlacedItem],
    surface: &LoadSurface,
    config: &LayoutConfig,
) -> BalanceReport {
    let cog = center_of_gravity(items, surface);
    let half = surface.center();

    let offset_x_percent = (cog.x - half.x).abs() / half.x * 100.0;
    let offset_y_percent = (cog.y - half.y).abs() / half.y * 100.0;

    let status = if offset_x_percent < config.balance_threshold_percent
        && offset_y_percent < config.balance_threshold_percent
    {
        BalanceStatus::Balanced
    } else {
        BalanceStatus::Unbalanced
    };

    BalanceReport {
        center_of_gravity: cog,
        offset_x_percent,
        offset_y_percent,
        status,
    }
}
