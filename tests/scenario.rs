//! End-to-end walk through a typical loading session on a 12 m roll-off.

use load_layout::capacity::{
    Attachment, CapacityResolution, TransportUnit, UnresolvedReason, resolve_capacity,
};
use load_layout::layout::LayoutConfig;
use load_layout::model::{CargoItem, Dimensions, LoadSurface};
use load_layout::session::{Gesture, LayoutSession, SessionOptions};
use load_layout::types::Positioned;
use load_layout::validation::{DetailKind, Severity, ValidationStatus};

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

fn roll_off() -> LoadSurface {
    LoadSurface::new(12.0, 2.6, 40.0, "Roll-off 07").unwrap()
}

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

fn boom() -> CargoItem {
    CargoItem::new(
        "b",
        "JLG",
        "450AJ",
        "boom",
        Dimensions::new(3.07, 1.75, 2.0),
        8165.0,
    )
    .unwrap()
}

fn telehandler() -> CargoItem {
    CargoItem::new(
        "c",
        "JCB",
        "540-170",
        "telehandler",
        Dimensions::new(4.0, 2.4, 2.5),
        29635.0,
    )
    .unwrap()
}

#[test]
fn roll_off_loading_session() {
    let options = SessionOptions {
        allow_y_axis: true,
        allow_rotation: true,
        read_only: false,
    };
    let mut session =
        LayoutSession::with_config(roll_off(), vec![scissor()], options, LayoutConfig::default());

    // Single item: placed after the spacing and centered across the deck.
    let a = session.item("a").unwrap();
    assert_close(a.position_x, 0.10);
    assert_close(a.position_y, 0.69);
    let report = session.report();
    assert_close(report.validation.occupied_length, 2.58);
    assert_eq!(report.validation.status, ValidationStatus::Ok);

    // Second item is appended after the first.
    session.set_items(&[scissor(), boom()]);
    let b = session.item("b").unwrap();
    assert_close(b.position_x, 2.68);
    assert_close(b.position_y, 0.425);
    let report = session.report();
    assert_close(report.validation.occupied_length, 5.75);
    assert_close(report.validation.total_weight_tons, 11.365);
    assert_eq!(report.validation.status, ValidationStatus::Ok);

    // Auto-arrange puts the heavier boom first.
    let commit = session.auto_arrange();
    assert_eq!(commit.gesture, Gesture::AutoArrange);
    let order: Vec<&str> = commit.items.iter().map(|p| p.id()).collect();
    assert_eq!(order, vec!["b", "a"]);
    assert_close(session.item("b").unwrap().position_x, 0.10);
    assert_close(session.item("a").unwrap().position_x, 3.27);
    assert_close(session.report().validation.occupied_length, 5.75);

    // Rotating the scissor lift pushes it back inside the deck width.
    let commit = session.toggle_rotation("a").unwrap();
    assert_eq!(commit.gesture, Gesture::Rotation);
    let a = session.item("a").unwrap();
    assert!(a.rotated);
    assert_close(a.effective_width(), 2.48);
    assert_close(a.position_y, 0.12);

    // Turn it back and drop it right on top of the boom.
    session.toggle_rotation("a").unwrap();
    let grip = session.item("a").unwrap().position();
    let target = session.item("b").unwrap().position();
    session.begin_drag("a", grip).unwrap();
    session.drag_to(target).unwrap();
    let commit = session.end_drag().unwrap();
    assert_eq!(commit.gesture, Gesture::DragRelease);

    let report = session.report();
    assert_eq!(report.collisions.len(), 1);
    assert!(report.collisions[0].matches("a", "b"));
    assert_eq!(report.colliding_ids, vec!["a", "b"]);
    assert_eq!(report.validation.status, ValidationStatus::Ok);

    // A third item takes the load to 41 t.
    session.set_items(&[scissor(), boom(), telehandler()]);
    let report = session.report();
    assert_eq!(report.validation.status, ValidationStatus::Error);
    let weight = report
        .validation
        .details
        .iter()
        .find(|d| d.kind == DetailKind::Weight)
        .unwrap();
    assert_eq!(weight.severity, Severity::Error);
    assert!(weight.message.contains("41.0 t > 40 t"), "{}", weight.message);
}

#[test]
fn revisions_increase_with_every_commit() {
    let options = SessionOptions {
        allow_rotation: true,
        ..SessionOptions::default()
    };
    let mut session = LayoutSession::with_config(
        roll_off(),
        vec![scissor(), boom()],
        options,
        LayoutConfig::default(),
    );
    let first = session.auto_arrange();
    let second = session.toggle_rotation("a").unwrap();
    assert_eq!(second.revision, first.revision + 1);
    assert_eq!(session.revision(), second.revision);
}

#[test]
fn lowboy_attachment_limits_validate_the_load() {
    let tractor = TransportUnit {
        name: "Tractor 03".to_string(),
        platform: None,
        requires_attachment: true,
    };
    let lowboy = Attachment {
        name: "Lowboy 2".to_string(),
        capacity_tons: Some(10.0),
        length: Some(8.0),
        width: Some(2.6),
    };

    let missing = resolve_capacity(Some(&tractor), &[]);
    assert!(!missing.is_resolved());

    let resolution = resolve_capacity(Some(&tractor), &[lowboy]);
    let surface = resolution.surface().unwrap();
    let session = LayoutSession::new(surface, vec![scissor(), boom()]);

    let report = session.report_against(&resolution);
    assert_eq!(report.validation.status, ValidationStatus::Error);

    let report = session.report_against(&CapacityResolution::unresolved(
        UnresolvedReason::AttachmentRequired,
    ));
    assert_eq!(report.validation.status, ValidationStatus::Warning);
}
