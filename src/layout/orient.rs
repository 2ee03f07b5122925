use crate::core::{Orientation, PlotArea};
use crate::layout::shape::Rect;

/// Maps (index axis, value axis) coordinates onto screen (x, y).
///
/// Every bar and grid formula is written once in index/value terms and
/// transposed here, so vertical and horizontal layouts cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AxisFrame {
    orientation: Orientation,
    plot: PlotArea,
}

impl AxisFrame {
    pub(crate) fn new(orientation: Orientation, plot: PlotArea) -> Self {
        Self { orientation, plot }
    }

    /// Pixel length available along the index axis.
    pub(crate) fn index_span(self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.plot.width,
            Orientation::Horizontal => self.plot.height,
        }
    }

    /// Pixel length available along the value axis.
    pub(crate) fn value_span(self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.plot.height,
            Orientation::Horizontal => self.plot.width,
        }
    }

    /// Index-axis range: left-to-right, or bottom-to-top when horizontal so
    /// the first record sits nearest the origin.
    pub(crate) fn index_range(self) -> (f64, f64) {
        match self.orientation {
            Orientation::Vertical => (0.0, self.plot.width),
            Orientation::Horizontal => (self.plot.height, 0.0),
        }
    }

    /// Value-axis range starting at the baseline: values grow upwards
    /// (vertical) or rightwards (horizontal).
    pub(crate) fn value_range(self) -> (f64, f64) {
        match self.orientation {
            Orientation::Vertical => (self.plot.height, 0.0),
            Orientation::Horizontal => (0.0, self.plot.width),
        }
    }

    pub(crate) fn rect(self, index_pos: f64, index_len: f64, value_pos: f64, value_len: f64) -> Rect {
        match self.orientation {
            Orientation::Vertical => Rect::new(index_pos, value_pos, index_len, value_len),
            Orientation::Horizontal => Rect::new(value_pos, index_pos, value_len, index_len),
        }
    }

    pub(crate) fn point(self, index_pos: f64, value_pos: f64) -> (f64, f64) {
        match self.orientation {
            Orientation::Vertical => (index_pos, value_pos),
            Orientation::Horizontal => (value_pos, index_pos),
        }
    }
}

/// Interval along the value axis covering `[acc, acc + extent]` pixels away
/// from `baseline`, in the direction the range grows.
///
/// Returns `(start, length)` with a non-negative length.
pub(crate) fn value_interval(baseline: f64, direction: f64, acc: f64, extent: f64) -> (f64, f64) {
    let a = baseline + direction * acc;
    let b = baseline + direction * (acc + extent);
    (a.min(b), extent)
}

/// Pixel extent of `mapped` away from `baseline` in the growth direction,
/// clamped at zero (negative and NaN values draw nothing).
pub(crate) fn extent_from_baseline(baseline: f64, direction: f64, mapped: f64) -> f64 {
    ((mapped - baseline) * direction).max(0.0)
}

/// `+1` when the range grows towards larger coordinates, `-1` otherwise.
pub(crate) fn direction(range: (f64, f64)) -> f64 {
    if range.1 < range.0 { -1.0 } else { 1.0 }
}
