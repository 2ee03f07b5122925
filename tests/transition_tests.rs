use std::time::Duration;

use graph_rs::core::{Orientation, PlotArea};
use graph_rs::error::GraphError;
use graph_rs::layout::{
    BarSegment, BarShape, Lifecycle, PieShape, Rect, ShapeGeometry, ShapeRecord, Wedge,
};
use graph_rs::transition::{
    CollapseTarget, ExitScheduler, IdentityRegistry, TransitionContext, classify, collapsed,
};
use indexmap::IndexMap;

fn ctx() -> TransitionContext {
    TransitionContext {
        collapse: CollapseTarget {
            orientation: Orientation::Vertical,
            plot: PlotArea {
                width: 100.0,
                height: 100.0,
            },
        },
        duration: Duration::from_millis(1000),
    }
}

fn bar(identity: &str, height: f64) -> ShapeRecord {
    ShapeRecord::new(
        identity,
        ShapeGeometry::Bar(BarShape {
            offset: (10.0, 0.0),
            segments: vec![BarSegment {
                key: "a".to_owned(),
                series_index: 0,
                value: height,
                color: "#8dd3c7".to_owned(),
                rect: Rect::new(0.0, 100.0 - height, 20.0, height),
            }],
        }),
        None,
    )
}

fn pie(identity: &str, radius: f64) -> ShapeRecord {
    ShapeRecord::new(
        identity,
        ShapeGeometry::Pie(PieShape {
            center: (50.0, 50.0),
            radius,
            cell_size: 100.0,
            total: 1.0,
            wedges: vec![Wedge {
                key: "a".to_owned(),
                series_index: 0,
                value: 1.0,
                color: "#8dd3c7".to_owned(),
                start_angle: 0.0,
                end_angle: std::f64::consts::TAU,
                pad_angle: 0.0,
            }],
            color_map: IndexMap::new(),
        }),
        None,
    )
}

fn lifecycle(registry: &IdentityRegistry, identity: &str) -> Option<Lifecycle> {
    registry.get(identity).map(|shape| shape.lifecycle)
}

#[test]
fn first_frame_enters_every_shape_from_collapsed_geometry() {
    let mut registry = IdentityRegistry::new();
    let out = classify(vec![bar("A", 40.0), bar("B", 60.0)], &mut registry, &ctx())
        .expect("classify");

    assert_eq!(out.count(Lifecycle::Entering), 2);
    assert_eq!(out.transitions.len(), 2);
    assert!(out.exiting.is_empty());
    let t = &out.transitions[0];
    assert_eq!(t.lifecycle, Lifecycle::Entering);
    let ShapeGeometry::Bar(from) = &t.from else {
        panic!("bar geometry");
    };
    assert_eq!(from.segments[0].rect.height, 0.0);
    assert_eq!(from.segments[0].rect.y, 100.0);
    assert_eq!(registry.len(), 2);
}

#[test]
fn unchanged_frame_updates_without_transitions() {
    let mut registry = IdentityRegistry::new();
    classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("first frame");
    let out = classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("second frame");

    assert_eq!(out.count(Lifecycle::Updating), 1);
    assert!(out.transitions.is_empty());
    assert_eq!(lifecycle(&registry, "A"), Some(Lifecycle::Updating));
}

#[test]
fn changed_geometry_transitions_from_the_previous_frame() {
    let mut registry = IdentityRegistry::new();
    classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("first frame");
    let out = classify(vec![bar("A", 80.0)], &mut registry, &ctx()).expect("second frame");

    assert_eq!(out.transitions.len(), 1);
    let t = &out.transitions[0];
    assert_eq!(t.lifecycle, Lifecycle::Updating);
    assert_eq!(t.from, bar("A", 40.0).geometry);
    assert_eq!(t.to, bar("A", 80.0).geometry);
}

#[test]
fn removed_identity_exits_and_stays_drawn() {
    let mut registry = IdentityRegistry::new();
    classify(vec![bar("A", 40.0), bar("B", 60.0)], &mut registry, &ctx())
        .expect("first frame");
    let out = classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("second frame");

    assert_eq!(out.newly_exiting, vec!["B".to_owned()]);
    assert_eq!(out.exiting.len(), 1);
    assert_eq!(out.shapes().len(), 2);
    assert_eq!(out.shapes()[1].identity, "B");
    assert_eq!(out.transitions.len(), 1);
    assert_eq!(out.transitions[0].lifecycle, Lifecycle::Exiting);
    assert_eq!(lifecycle(&registry, "B"), Some(Lifecycle::Exiting));
    assert_eq!(registry.exiting_identities(), vec!["B".to_owned()]);
}

#[test]
fn already_exiting_identity_is_not_re_animated() {
    let mut registry = IdentityRegistry::new();
    classify(vec![pie("A", 30.0), pie("B", 30.0)], &mut registry, &ctx())
        .expect("first frame");
    classify(vec![pie("A", 30.0)], &mut registry, &ctx()).expect("second frame");
    let out = classify(vec![pie("A", 30.0)], &mut registry, &ctx()).expect("third frame");

    assert!(out.newly_exiting.is_empty());
    assert!(out.transitions.is_empty());
    assert_eq!(out.exiting.len(), 1);
    assert_eq!(lifecycle(&registry, "B"), Some(Lifecycle::Exiting));
}

#[test]
fn returning_identity_is_revived_as_updating() {
    let mut registry = IdentityRegistry::new();
    classify(vec![pie("A", 30.0), pie("B", 30.0)], &mut registry, &ctx())
        .expect("first frame");
    classify(vec![pie("A", 30.0)], &mut registry, &ctx()).expect("second frame");
    let out = classify(vec![pie("A", 30.0), pie("B", 40.0)], &mut registry, &ctx())
        .expect("third frame");

    assert_eq!(out.revived, vec!["B".to_owned()]);
    assert!(out.exiting.is_empty());
    assert_eq!(lifecycle(&registry, "B"), Some(Lifecycle::Updating));
    let t = out
        .transitions
        .iter()
        .find(|t| t.identity == "B")
        .expect("B transition");
    assert_eq!(t.lifecycle, Lifecycle::Updating);
    let ShapeGeometry::Pie(from) = &t.from else {
        panic!("pie geometry");
    };
    assert_eq!(from.radius, 30.0);
}

#[test]
fn duplicate_identities_fail_without_touching_the_registry() {
    let mut registry = IdentityRegistry::new();
    classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("first frame");
    let err = classify(vec![bar("B", 1.0), bar("B", 2.0)], &mut registry, &ctx())
        .expect_err("duplicate identity");

    assert_eq!(
        err,
        GraphError::DuplicateIdentity {
            identity: "B".to_owned(),
        }
    );
    assert_eq!(registry.len(), 1);
    assert_eq!(lifecycle(&registry, "A"), Some(Lifecycle::Entering));
}

#[test]
fn revival_cancels_the_pending_prune() {
    let mut registry = IdentityRegistry::new();
    let mut exits = ExitScheduler::new();
    let delay = Duration::from_millis(1050);

    classify(vec![bar("A", 40.0), bar("B", 60.0)], &mut registry, &ctx())
        .expect("first frame");
    let out = classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("exit B");
    exits.schedule(out.newly_exiting, Duration::ZERO, delay);

    let out = classify(vec![bar("A", 40.0), bar("B", 60.0)], &mut registry, &ctx())
        .expect("revive B");
    for identity in &out.revived {
        exits.revive(identity);
    }
    assert_eq!(exits.pending(), 0);

    let due = exits.take_due(Duration::from_millis(2000));
    assert!(registry.prune(&due).is_empty());
    assert_eq!(lifecycle(&registry, "B"), Some(Lifecycle::Updating));
}

#[test]
fn stale_prune_never_removes_a_live_identity() {
    let mut registry = IdentityRegistry::new();
    classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("first frame");
    let removed = registry.prune(&["A".to_owned(), "ghost".to_owned()]);
    assert!(removed.is_empty());
    assert!(registry.contains("A"));
}

#[test]
fn exit_then_revive_then_exit_again_prunes_once_on_the_later_deadline() {
    let mut registry = IdentityRegistry::new();
    let mut exits = ExitScheduler::new();
    let delay = Duration::from_millis(1050);

    classify(vec![bar("A", 40.0), bar("B", 60.0)], &mut registry, &ctx())
        .expect("t=0");
    let out = classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("t=0 exit");
    exits.schedule(out.newly_exiting, Duration::ZERO, delay);

    let out = classify(vec![bar("A", 40.0), bar("B", 60.0)], &mut registry, &ctx())
        .expect("t=500 revive");
    for identity in &out.revived {
        exits.revive(identity);
    }

    let out = classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("t=800 exit");
    exits.schedule(out.newly_exiting, Duration::from_millis(800), delay);

    let due = exits.take_due(Duration::from_millis(1100));
    assert!(due.is_empty());
    assert!(registry.contains("B"));

    let due = exits.take_due(Duration::from_millis(1850));
    assert_eq!(registry.prune(&due), vec!["B".to_owned()]);
    assert!(!registry.contains("B"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn collapsed_pie_keeps_angles_and_shrinks_the_radius() {
    let shape = pie("A", 30.0);
    let ShapeGeometry::Pie(flat) = collapsed(&shape.geometry, ctx().collapse) else {
        panic!("pie geometry");
    };
    assert_eq!(flat.radius, 1.0);
    assert_eq!(flat.wedges.len(), 1);
    assert_eq!(flat.center, (50.0, 50.0));
}

#[test]
fn transition_sampling_eases_between_geometries() {
    let mut registry = IdentityRegistry::new();
    classify(vec![bar("A", 40.0)], &mut registry, &ctx()).expect("first frame");
    let out = classify(vec![bar("A", 80.0)], &mut registry, &ctx()).expect("second frame");
    let t = &out.transitions[0];

    let ShapeGeometry::Bar(mid) = t.sample_at(Duration::from_millis(500)) else {
        panic!("bar geometry");
    };
    assert!((mid.segments[0].rect.height - 60.0).abs() <= 1e-9);
    assert!((mid.segments[0].rect.y - 40.0).abs() <= 1e-9);
    assert!(t.is_finished(Duration::from_millis(1000)));
    assert_eq!(t.sample_at(Duration::from_secs(5)), t.to);
}
