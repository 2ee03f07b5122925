use std::f64::consts::TAU;

use crate::interaction::hover::HoveredDatum;
use crate::layout::{LayoutExtras, Rect, ShapeGeometry, ShapeRecord};

fn contains(rect: Rect, offset: (f64, f64), x: f64, y: f64) -> bool {
    let left = offset.0 + rect.x;
    let top = offset.1 + rect.y;
    x >= left && x < left + rect.width && y >= top && y < top + rect.height
}

/// Angle of `(dx, dy)` measured clockwise from 12 o'clock, in `[0, 2π)`.
fn arc_angle(dx: f64, dy: f64) -> f64 {
    dx.atan2(-dy).rem_euclid(TAU)
}

/// Finds the datum under plot-space point `(x, y)`.
///
/// Exiting shapes are ignored. Lines are hit through their slice bands, so
/// any y inside the plot hovers the whole slice.
#[must_use]
pub fn hit_test(
    shapes: &[ShapeRecord],
    extras: &LayoutExtras,
    plot_height: f64,
    x: f64,
    y: f64,
) -> Option<HoveredDatum> {
    if let LayoutExtras::Line(line) = extras {
        if !(0.0..=plot_height).contains(&y) {
            return None;
        }
        return line
            .slices
            .iter()
            .find(|slice| x >= slice.left && x < slice.left + slice.width)
            .map(|slice| HoveredDatum::new(slice.index.clone()));
    }

    shapes
        .iter()
        .filter(|shape| !shape.is_exiting())
        .find_map(|shape| hit_shape(shape, x, y))
}

fn hit_shape(shape: &ShapeRecord, x: f64, y: f64) -> Option<HoveredDatum> {
    let datum = |key: &str, value: Option<f64>, color: &str| {
        HoveredDatum::new(shape.identity.clone())
            .with_key(key)
            .with_value(value)
            .with_color(color)
            .with_record(shape.record.clone())
    };

    match &shape.geometry {
        ShapeGeometry::Bar(bar) => bar
            .segments
            .iter()
            .find(|s| contains(s.rect, bar.offset, x, y))
            .map(|s| datum(&s.key, Some(s.value), &s.color)),
        ShapeGeometry::Grid(row) => row
            .cells
            .iter()
            .find(|c| contains(c.rect, row.offset, x, y))
            .map(|c| datum(&c.key, c.value, &c.color)),
        ShapeGeometry::Pie(pie) => {
            let dx = x - pie.center.0;
            let dy = y - pie.center.1;
            if dx.hypot(dy) > pie.radius {
                return None;
            }
            let angle = arc_angle(dx, dy);
            pie.wedges
                .iter()
                .find(|w| {
                    let (lo, hi) = if w.start_angle <= w.end_angle {
                        (w.start_angle, w.end_angle)
                    } else {
                        (w.end_angle, w.start_angle)
                    };
                    (angle - lo).rem_euclid(TAU) < hi - lo
                })
                .map(|w| datum(&w.key, Some(w.value), &w.color))
        }
        ShapeGeometry::Line(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_angle_starts_at_twelve_and_runs_clockwise() {
        assert!(arc_angle(0.0, -1.0).abs() <= 1e-12);
        assert!((arc_angle(1.0, 0.0) - TAU / 4.0).abs() <= 1e-12);
        assert!((arc_angle(0.0, 1.0) - TAU / 2.0).abs() <= 1e-12);
        assert!((arc_angle(-1.0, 0.0) - 3.0 * TAU / 4.0).abs() <= 1e-12);
    }
}
