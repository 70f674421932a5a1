//! Capacity resolution for the selected transport configuration.
//!
//! A transport unit either carries an integral roll-off platform or needs a
//! removable attachment (e.g. a lowboy) to carry cargo. The resolver turns the
//! current selection into the deck limits the validation engine checks
//! against, or reports explicitly why no limits are available.

use std::fmt;

use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

use crate::model::{LoadSurface, ValidationError};
use crate::types::Vec2;

/// Deck data of an integral platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSpec {
    #[serde(default)]
    pub capacity_tons: f64,
    pub length: f64,
    pub width: f64,
}

/// A vehicle from the fleet catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Roll-off 07",
    "platform": { "capacityTons": 40.0, "length": 12.0, "width": 2.6 }
}))]
pub struct TransportUnit {
    pub name: String,
    #[serde(default)]
    pub platform: Option<PlatformSpec>,
    #[serde(default)]
    pub requires_attachment: bool,
}

/// A removable deck that can be mounted on a unit without a platform.
///
/// Catalog entries may lack dimension data; such an attachment cannot be
/// used for validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub capacity_tons: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
}

/// Limits of the deck the cargo is validated against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCapacity {
    /// Capacity in t, 0 if the catalog does not state one
    pub capacity_tons: f64,
    pub length: f64,
    pub width: f64,
    pub transport_label: String,
}

impl ResolvedCapacity {
    /// Builds the load surface for a layout session.
    pub fn to_surface(&self) -> Result<LoadSurface, ValidationError> {
        LoadSurface::new(
            self.length,
            self.width,
            self.capacity_tons,
            self.transport_label.clone(),
        )
    }

    /// Whether a weight capacity is known.
    pub fn has_capacity(&self) -> bool {
        self.capacity_tons > 0.0
    }
}

impl From<&LoadSurface> for ResolvedCapacity {
    fn from(surface: &LoadSurface) -> Self {
        Self {
            capacity_tons: surface.capacity_tons,
            length: surface.length,
            width: surface.width,
            transport_label: surface.name.clone(),
        }
    }
}

/// Why no deck limits could be determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    NoTransportSelected,
    NoPlatform,
    MissingPlatformData,
    AttachmentRequired,
    MissingAttachmentData,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NoTransportSelected => write!(f, "No transport unit selected"),
            UnresolvedReason::NoPlatform => {
                write!(f, "Transport unit has no platform and takes no attachment")
            }
            UnresolvedReason::MissingPlatformData => {
                write!(f, "Platform of the transport unit has no length/width data")
            }
            UnresolvedReason::AttachmentRequired => {
                write!(f, "Transport unit requires an attachment, none selected")
            }
            UnresolvedReason::MissingAttachmentData => {
                write!(f, "Selected attachment has no length/width data")
            }
        }
    }
}

/// Outcome of resolving the active deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapacityResolution {
    Resolved(ResolvedCapacity),
    Unresolved { reason: UnresolvedReason },
}

impl CapacityResolution {
    pub fn unresolved(reason: UnresolvedReason) -> Self {
        CapacityResolution::Unresolved { reason }
    }

    pub fn resolved(&self) -> Option<&ResolvedCapacity> {
        match self {
            CapacityResolution::Resolved(capacity) => Some(capacity),
            CapacityResolution::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved().is_some()
    }

    /// Load surface for the resolved deck, if any.
    pub fn surface(&self) -> Option<LoadSurface> {
        self.resolved()
            .and_then(|capacity| capacity.to_surface().ok())
    }
}

impl From<&LoadSurface> for CapacityResolution {
    fn from(surface: &LoadSurface) -> Self {
        CapacityResolution::Resolved(ResolvedCapacity::from(surface))
    }
}

/// Resolves the deck limits for the selected unit and attachments.
///
/// Rules, in order:
/// 1. A unit with an integral platform uses the platform data.
/// 2. A unit requiring an attachment uses the first selected attachment.
/// 3. Everything else is unresolved; callers must show a neutral
///    "missing capacity data" status instead of a pass or fail.
///
/// # Parameters
/// * `unit` - The selected transport unit, if any
/// * `attachments` - Selected attachments in selection order
pub fn resolve_capacity(
    unit: Option<&TransportUnit>,
    attachments: &[Attachment],
) -> CapacityResolution {
    let Some(unit) = unit else {
        return CapacityResolution::unresolved(UnresolvedReason::NoTransportSelected);
    };

    if let Some(platform) = &unit.platform {
        if !has_deck_dimensions(platform.length, platform.width) {
            return CapacityResolution::unresolved(UnresolvedReason::MissingPlatformData);
        }
        return CapacityResolution::Resolved(ResolvedCapacity {
            capacity_tons: platform.capacity_tons.max(0.0),
            length: platform.length,
            width: platform.width,
            transport_label: unit.name.clone(),
        });
    }

    if !unit.requires_attachment {
        return CapacityResolution::unresolved(UnresolvedReason::NoPlatform);
    }

    let Some(attachment) = attachments.first() else {
        return CapacityResolution::unresolved(UnresolvedReason::AttachmentRequired);
    };

    match (attachment.length, attachment.width) {
        (Some(length), Some(width)) if has_deck_dimensions(length, width) => {
            CapacityResolution::Resolved(ResolvedCapacity {
                capacity_tons: attachment.capacity_tons.unwrap_or(0.0).max(0.0),
                length,
                width,
                transport_label: format!("{} + {}", unit.name, attachment.name),
            })
        }
        _ => CapacityResolution::unresolved(UnresolvedReason::MissingAttachmentData),
    }
}

fn has_deck_dimensions(length: f64, width: f64) -> bool {
    Vec2::new(length, width).is_valid_dimension()
}
