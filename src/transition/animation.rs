use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Orientation, PlotArea};
use crate::layout::{
    BarSegment, BarShape, GridCell, GridRow, Lifecycle, LineShape, PieShape, Rect,
    ShapeGeometry, Wedge, catmull_rom_path,
};

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(1000);
/// Slightly longer than the animation so exit tweens finish before the prune.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(1050);

/// Radius of the degenerate arc pies grow from and shrink to.
const ZERO_ARC_RADIUS: f64 = 1.0;

/// Where collapsed geometry lives for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapseTarget {
    pub orientation: Orientation,
    pub plot: PlotArea,
}

/// Geometry a shape grows out of when entering, and shrinks into when exiting.
///
/// Bars flatten onto the value baseline, grid cells onto the start of the
/// column axis, lines onto their baseline path and pie wedges onto a
/// radius-1 arc.
#[must_use]
pub fn collapsed(geometry: &ShapeGeometry, target: CollapseTarget) -> ShapeGeometry {
    match geometry {
        ShapeGeometry::Bar(bar) => {
            let segments = bar
                .segments
                .iter()
                .map(|segment| {
                    let r = segment.rect;
                    let rect = match target.orientation {
                        Orientation::Vertical => Rect::new(r.x, target.plot.height, r.width, 0.0),
                        Orientation::Horizontal => Rect::new(0.0, r.y, 0.0, r.height),
                    };
                    BarSegment {
                        rect,
                        ..segment.clone()
                    }
                })
                .collect();
            ShapeGeometry::Bar(BarShape {
                offset: bar.offset,
                segments,
            })
        }
        ShapeGeometry::Grid(row) => ShapeGeometry::Grid(GridRow {
            cells: row
                .cells
                .iter()
                .map(|cell| {
                    let r = cell.rect;
                    let rect = match target.orientation {
                        Orientation::Vertical => Rect::new(0.0, r.y, 0.0, r.height),
                        Orientation::Horizontal => Rect::new(r.x, 0.0, r.width, 0.0),
                    };
                    GridCell {
                        rect,
                        ..cell.clone()
                    }
                })
                .collect(),
            ..row.clone()
        }),
        ShapeGeometry::Line(line) => ShapeGeometry::Line(LineShape {
            points: line.baseline.clone(),
            path: line.baseline_path.clone(),
            ..line.clone()
        }),
        ShapeGeometry::Pie(pie) => ShapeGeometry::Pie(PieShape {
            radius: ZERO_ARC_RADIUS,
            ..pie.clone()
        }),
    }
}

/// Cubic in-out easing on `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_point(a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
    (lerp(a.0, b.0, t), lerp(a.1, b.1, t))
}

fn lerp_rect(a: Rect, b: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(a.x, b.x, t),
        lerp(a.y, b.y, t),
        lerp(a.width, b.width, t),
        lerp(a.height, b.height, t),
    )
}

/// Animated move of one shape between two geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTransition {
    pub identity: String,
    pub lifecycle: Lifecycle,
    pub from: ShapeGeometry,
    pub to: ShapeGeometry,
    pub duration: Duration,
}

impl ShapeTransition {
    /// Linear progress after `elapsed`, in `[0, 1]`. Zero duration is instant.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Geometry at linear progress `t`, eased with cubic in-out.
    ///
    /// Parts present on both ends are interpolated; parts present only in
    /// `to` (a new series key, a new point) snap to their target. Colors
    /// always take the target value.
    #[must_use]
    pub fn sample(&self, t: f64) -> ShapeGeometry {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.to.clone();
        }
        let e = ease_cubic_in_out(t);
        match (&self.from, &self.to) {
            (ShapeGeometry::Bar(a), ShapeGeometry::Bar(b)) => ShapeGeometry::Bar(BarShape {
                offset: lerp_point(a.offset, b.offset, e),
                segments: b
                    .segments
                    .iter()
                    .map(|target| {
                        let rect = a
                            .segments
                            .iter()
                            .find(|s| s.key == target.key)
                            .map_or(target.rect, |s| lerp_rect(s.rect, target.rect, e));
                        BarSegment {
                            rect,
                            ..target.clone()
                        }
                    })
                    .collect(),
            }),
            (ShapeGeometry::Grid(a), ShapeGeometry::Grid(b)) => ShapeGeometry::Grid(GridRow {
                offset: lerp_point(a.offset, b.offset, e),
                extent: lerp(a.extent, b.extent, e),
                cells: b
                    .cells
                    .iter()
                    .map(|target| {
                        let rect = a
                            .cells
                            .iter()
                            .find(|c| c.key == target.key)
                            .map_or(target.rect, |c| lerp_rect(c.rect, target.rect, e));
                        GridCell {
                            rect,
                            ..target.clone()
                        }
                    })
                    .collect(),
            }),
            (ShapeGeometry::Line(a), ShapeGeometry::Line(b)) => {
                let points: Vec<(f64, f64)> = b
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| a.points.get(i).map_or(p, |&q| lerp_point(q, p, e)))
                    .collect();
                ShapeGeometry::Line(LineShape {
                    path: catmull_rom_path(&points),
                    points,
                    ..b.clone()
                })
            }
            (ShapeGeometry::Pie(a), ShapeGeometry::Pie(b)) => ShapeGeometry::Pie(PieShape {
                center: lerp_point(a.center, b.center, e),
                radius: lerp(a.radius, b.radius, e),
                cell_size: lerp(a.cell_size, b.cell_size, e),
                total: b.total,
                wedges: b
                    .wedges
                    .iter()
                    .map(|target| match a.wedges.iter().find(|w| w.key == target.key) {
                        Some(w) => Wedge {
                            start_angle: lerp(w.start_angle, target.start_angle, e),
                            end_angle: lerp(w.end_angle, target.end_angle, e),
                            ..target.clone()
                        },
                        None => target.clone(),
                    })
                    .collect(),
                color_map: b.color_map.clone(),
            }),
            _ => self.to.clone(),
        }
    }

    /// Geometry after `elapsed` since the transition started.
    #[must_use]
    pub fn sample_at(&self, elapsed: Duration) -> ShapeGeometry {
        self.sample(self.progress(elapsed))
    }
}
