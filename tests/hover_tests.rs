use std::time::Duration;

use graph_rs::interaction::{HoverRegistry, HoveredDatum, PointerEvent};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn datum(identity: &str) -> HoveredDatum {
    HoveredDatum::new(identity)
        .with_key("a")
        .with_value(Some(1.0))
        .with_color("#8dd3c7")
}

#[test]
fn first_move_applies_immediately_relative_to_the_origin() {
    let mut hover = HoverRegistry::default();
    let changed = hover.on_pointer_move(PointerEvent::new(120.0, 80.0), (20.0, 30.0), datum("r1"), ms(0));

    assert!(changed);
    let state = hover.state();
    assert!(state.visible);
    assert_eq!(state.position, (100.0, 50.0));
    assert_eq!(state.datum.as_ref().map(|d| d.identity.as_str()), Some("r1"));
}

#[test]
fn moves_inside_the_window_are_deferred_and_the_latest_wins() {
    let mut hover = HoverRegistry::default();
    hover.on_pointer_move(PointerEvent::new(0.0, 0.0), (0.0, 0.0), datum("r1"), ms(0));

    assert!(!hover.on_pointer_move(PointerEvent::new(5.0, 5.0), (0.0, 0.0), datum("r2"), ms(10)));
    assert!(!hover.on_pointer_move(PointerEvent::new(9.0, 9.0), (0.0, 0.0), datum("r3"), ms(20)));
    assert!(hover.has_pending());
    assert_eq!(hover.state().position, (0.0, 0.0));

    assert!(!hover.flush(ms(24)));
    assert!(hover.flush(ms(25)));
    assert!(!hover.has_pending());
    assert_eq!(hover.state().position, (9.0, 9.0));
    assert_eq!(
        hover.state().datum.as_ref().map(|d| d.identity.as_str()),
        Some("r3")
    );
}

#[test]
fn move_after_the_window_applies_immediately() {
    let mut hover = HoverRegistry::new(ms(25));
    hover.on_pointer_move(PointerEvent::new(0.0, 0.0), (0.0, 0.0), datum("r1"), ms(0));
    assert!(hover.on_pointer_move(PointerEvent::new(1.0, 1.0), (0.0, 0.0), datum("r2"), ms(30)));
    assert!(!hover.has_pending());
}

#[test]
fn leave_hides_at_once_and_drops_the_deferred_move() {
    let mut hover = HoverRegistry::default();
    hover.on_pointer_move(PointerEvent::new(0.0, 0.0), (0.0, 0.0), datum("r1"), ms(0));
    hover.on_pointer_move(PointerEvent::new(5.0, 5.0), (0.0, 0.0), datum("r2"), ms(5));

    assert!(hover.on_pointer_leave());
    assert!(!hover.state().visible);
    assert!(!hover.has_pending());
    assert!(!hover.flush(ms(100)));
    assert!(!hover.state().visible);
    assert!(!hover.on_pointer_leave());
}

#[test]
fn clear_resets_the_throttle_window() {
    let mut hover = HoverRegistry::default();
    hover.on_pointer_move(PointerEvent::new(0.0, 0.0), (0.0, 0.0), datum("r1"), ms(0));
    hover.clear();
    assert!(!hover.state().visible);
    assert!(hover.on_pointer_move(PointerEvent::new(1.0, 1.0), (0.0, 0.0), datum("r2"), ms(1)));
}
