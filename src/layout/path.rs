use std::fmt::Write as _;

use crate::layout::shape::PathCommand;

const EPSILON: f64 = 1e-12;

/// Centripetal Catmull-Rom (`alpha = 0.5`) spline through `points`, emitted
/// as cubic Bézier commands.
///
/// Two points produce a straight `LineTo`; a single point only a `MoveTo`.
#[must_use]
pub fn catmull_rom_path(points: &[(f64, f64)]) -> Vec<PathCommand> {
    let mut curve = CatmullRom::new(0.5, points.len());
    for &(x, y) in points {
        curve.point(x, y);
    }
    curve.finish()
}

/// SVG `d` attribute for a command list.
#[must_use]
pub fn path_to_svg(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for command in commands {
        // Writing into a String cannot fail.
        let _ = match *command {
            PathCommand::MoveTo(x, y) => write!(out, "M{x},{y}"),
            PathCommand::LineTo(x, y) => write!(out, "L{x},{y}"),
            PathCommand::CubicTo { c1, c2, to } => write!(
                out,
                "C{},{},{},{},{},{}",
                c1.0, c1.1, c2.0, c2.1, to.0, to.1
            ),
        };
    }
    out
}

struct CatmullRom {
    alpha: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    l01_a: f64,
    l12_a: f64,
    l23_a: f64,
    l01_2a: f64,
    l12_2a: f64,
    l23_2a: f64,
    seen: u8,
    out: Vec<PathCommand>,
}

impl CatmullRom {
    fn new(alpha: f64, capacity: usize) -> Self {
        Self {
            alpha,
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
            x2: f64::NAN,
            y2: f64::NAN,
            l01_a: 0.0,
            l12_a: 0.0,
            l23_a: 0.0,
            l01_2a: 0.0,
            l12_2a: 0.0,
            l23_2a: 0.0,
            seen: 0,
            out: Vec::with_capacity(capacity),
        }
    }

    fn point(&mut self, x: f64, y: f64) {
        if self.seen > 0 {
            let x23 = self.x2 - x;
            let y23 = self.y2 - y;
            self.l23_2a = (x23 * x23 + y23 * y23).powf(self.alpha);
            self.l23_a = self.l23_2a.sqrt();
        }

        match self.seen {
            0 => {
                self.seen = 1;
                self.out.push(PathCommand::MoveTo(x, y));
            }
            1 => self.seen = 2,
            2 => {
                self.seen = 3;
                self.bezier_to(x, y);
            }
            _ => self.bezier_to(x, y),
        }

        self.l01_a = self.l12_a;
        self.l12_a = self.l23_a;
        self.l01_2a = self.l12_2a;
        self.l12_2a = self.l23_2a;
        self.x0 = self.x1;
        self.x1 = self.x2;
        self.x2 = x;
        self.y0 = self.y1;
        self.y1 = self.y2;
        self.y2 = y;
    }

    /// Emits the segment ending at the current `(x2, y2)`, using `(x, y)` as
    /// the look-ahead control point.
    fn bezier_to(&mut self, x: f64, y: f64) {
        let (mut c1x, mut c1y) = (self.x1, self.y1);
        let (mut c2x, mut c2y) = (self.x2, self.y2);

        if self.l01_a > EPSILON {
            let a = 2.0 * self.l01_2a + 3.0 * self.l01_a * self.l12_a + self.l12_2a;
            let n = 3.0 * self.l01_a * (self.l01_a + self.l12_a);
            c1x = (c1x * a - self.x0 * self.l12_2a + self.x2 * self.l01_2a) / n;
            c1y = (c1y * a - self.y0 * self.l12_2a + self.y2 * self.l01_2a) / n;
        }

        if self.l23_a > EPSILON {
            let b = 2.0 * self.l23_2a + 3.0 * self.l23_a * self.l12_a + self.l12_2a;
            let m = 3.0 * self.l23_a * (self.l23_a + self.l12_a);
            c2x = (c2x * b + self.x1 * self.l23_2a - x * self.l12_2a) / m;
            c2y = (c2y * b + self.y1 * self.l23_2a - y * self.l12_2a) / m;
        }

        self.out.push(PathCommand::CubicTo {
            c1: (c1x, c1y),
            c2: (c2x, c2y),
            to: (self.x2, self.y2),
        });
    }

    fn finish(mut self) -> Vec<PathCommand> {
        match self.seen {
            2 => self.out.push(PathCommand::LineTo(self.x2, self.y2)),
            3 => {
                let (x, y) = (self.x2, self.y2);
                self.point(x, y);
            }
            _ => {}
        }
        self.out
    }
}
