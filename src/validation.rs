//! Capacity validation of an arrangement.
//!
//! Weight, occupied length and occupied width are compared against the deck
//! limits. The result is always data: a status plus one detail line per
//! triggered condition, each carrying the two compared values.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::capacity::{CapacityResolution, ResolvedCapacity};
use crate::layout::LayoutConfig;
use crate::model::PlacedItem;

/// Aggregate result of a validation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Nothing loaded, nothing to validate.
    Neutral,
    Ok,
    Warning,
    Error,
}

/// Severity of a single detail line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Which measure a detail line is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    Weight,
    Length,
    Width,
    MissingCapacity,
    Summary,
    Empty,
}

/// One human-readable line of a validation report.
///
/// `measured` and `limit` are in t for weight lines and in m for length and
/// width lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationDetail {
    pub kind: DetailKind,
    pub severity: Severity,
    pub measured: f64,
    pub limit: f64,
    pub message: String,
}

impl ValidationDetail {
    fn new(
        kind: DetailKind,
        severity: Severity,
        measured: f64,
        limit: f64,
        message: String,
    ) -> Self {
        Self {
            kind,
            severity,
            measured,
            limit,
            message,
        }
    }
}

/// Result of validating one arrangement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub total_weight_tons: f64,
    pub occupied_length: f64,
    pub occupied_width: f64,
    pub details: Vec<ValidationDetail>,
}

impl ValidationReport {
    pub fn is_error(&self) -> bool {
        self.status == ValidationStatus::Error
    }
}

/// Total cargo weight in metric tons.
pub fn total_weight_tons(items: &[PlacedItem]) -> f64 {
    items.iter().map(|p| p.item.weight).sum::<f64>() / 1000.0
}

/// Furthest extent of any item along the deck length, 0 if empty.
pub fn occupied_length(items: &[PlacedItem]) -> f64 {
    items.iter().map(PlacedItem::end_x).fold(0.0, f64::max)
}

/// Occupied width across the deck.
///
/// Items standing side by side across the deck add up, items queued along the
/// deck do not. The deck length is cut at every item start and end; for each
/// slice the items covering its midpoint contribute the span from the lowest
/// near edge to the highest far edge. The widest slice wins.
pub fn occupied_width(items: &[PlacedItem]) -> f64 {
    let mut breakpoints: Vec<f64> = items
        .iter()
        .flat_map(|p| [p.position_x, p.end_x()])
        .collect();
    breakpoints.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    breakpoints.dedup();

    let mut widest: f64 = 0.0;
    for pair in breakpoints.windows(2) {
        let mid = (pair[0] + pair[1]) / 2.0;
        let mut covering = items
            .iter()
            .filter(|p| p.position_x < mid && mid < p.end_x())
            .peekable();
        if covering.peek().is_none() {
            continue;
        }

        let (min_y, max_y) = covering.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.position_y), hi.max(p.end_y()))
        });
        widest = widest.max(max_y - min_y);
    }
    widest
}

/// Validates an arrangement against the resolved deck limits.
///
/// # Parameters
/// * `items` - Current arrangement
/// * `capacity` - Resolved deck limits, or why they are missing
/// * `config` - Near-limit thresholds and tolerance
///
/// # Returns
/// `ValidationReport` with status `error` if any limit is exceeded, `warning`
/// if any measure is near its limit or capacity data is missing, `ok`
/// otherwise. An empty arrangement is always `neutral`.
pub fn validate(
    items: &[PlacedItem],
    capacity: &CapacityResolution,
    config: &LayoutConfig,
) -> ValidationReport {
    let total_weight = total_weight_tons(items);
    let length = occupied_length(items);
    let width = occupied_width(items);

    let mut report = ValidationReport {
        status: ValidationStatus::Neutral,
        total_weight_tons: total_weight,
        occupied_length: length,
        occupied_width: width,
        details: Vec::new(),
    };

    if items.is_empty() {
        report.details.push(ValidationDetail::new(
            DetailKind::Empty,
            Severity::Info,
            0.0,
            0.0,
            "No cargo to validate".to_string(),
        ));
        return report;
    }

    let limits = match capacity {
        CapacityResolution::Resolved(limits) => limits,
        CapacityResolution::Unresolved { reason } => {
            report.status = ValidationStatus::Warning;
            report.details.push(ValidationDetail::new(
                DetailKind::MissingCapacity,
                Severity::Warning,
                total_weight,
                0.0,
                format!(
                    "Missing capacity data ({}): {:.1} t loaded cannot be checked",
                    reason, total_weight
                ),
            ));
            return report;
        }
    };

    check_weight(&mut report, limits, config);
    check_dimension(
        &mut report,
        DetailKind::Length,
        "Occupied length",
        length,
        limits.length,
        config,
    );
    check_dimension(
        &mut report,
        DetailKind::Width,
        "Occupied width",
        width,
        limits.width,
        config,
    );

    report.status = aggregate_status(&report.details);
    if report.status == ValidationStatus::Ok {
        report.details.push(ValidationDetail::new(
            DetailKind::Summary,
            Severity::Info,
            total_weight,
            limits.capacity_tons,
            format!(
                "Load OK: {:.1} t / {} t, footprint {:.2} × {:.2} m on {} × {} m",
                total_weight, limits.capacity_tons, length, width, limits.length, limits.width
            ),
        ));
    }

    log::debug!(
        "validated {} items on {}: {:?}",
        items.len(),
        limits.transport_label,
        report.status
    );
    report
}

fn check_weight(report: &mut ValidationReport, limits: &ResolvedCapacity, config: &LayoutConfig) {
    let total = report.total_weight_tons;
    let capacity = limits.capacity_tons;

    if !limits.has_capacity() {
        report.details.push(ValidationDetail::new(
            DetailKind::MissingCapacity,
            Severity::Warning,
            total,
            capacity,
            format!(
                "Missing capacity data for {}: {:.1} t loaded cannot be checked",
                limits.transport_label, total
            ),
        ));
        return;
    }

    if total > capacity + config.general_epsilon {
        report.details.push(ValidationDetail::new(
            DetailKind::Weight,
            Severity::Error,
            total,
            capacity,
            format!("Weight exceeds capacity: {:.1} t > {} t", total, capacity),
        ));
    } else if total > capacity * config.weight_warn_ratio + config.general_epsilon {
        report.details.push(ValidationDetail::new(
            DetailKind::Weight,
            Severity::Warning,
            total,
            capacity,
            format!(
                "Weight near capacity: {:.1} t of {} t ({:.0}%)",
                total,
                capacity,
                total / capacity * 100.0
            ),
        ));
    }
}

fn check_dimension(
    report: &mut ValidationReport,
    kind: DetailKind,
    label: &str,
    measured: f64,
    limit: f64,
    config: &LayoutConfig,
) {
    if measured > limit + config.general_epsilon {
        report.details.push(ValidationDetail::new(
            kind,
            Severity::Error,
            measured,
            limit,
            format!("{} exceeds deck: {:.2} m > {} m", label, measured, limit),
        ));
    } else if measured > limit * config.dimension_warn_ratio + config.general_epsilon {
        report.details.push(ValidationDetail::new(
            kind,
            Severity::Warning,
            measured,
            limit,
            format!("{} near deck limit: {:.2} m of {} m", label, measured, limit),
        ));
    }
}

fn aggregate_status(details: &[ValidationDetail]) -> ValidationStatus {
    if details.iter().any(|d| d.severity == Severity::Error) {
        ValidationStatus::Error
    } else if details.iter().any(|d| d.severity == Severity::Warning) {
        ValidationStatus::Warning
    } else {
        ValidationStatus::Ok
    }
}
