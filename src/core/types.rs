use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Container size in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pixel insets around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Axis-friendly default used by bar, line and grid graphs.
    #[must_use]
    pub const fn axis_default() -> Self {
        Self::new(70.0, 20.0, 20.0, 30.0)
    }

    /// Tight default used by pie graphs, which draw no axes.
    #[must_use]
    pub const fn pie_default() -> Self {
        Self::new(10.0, 10.0, 10.0, 10.0)
    }

    pub fn validate(self) -> GraphResult<Self> {
        let all = [self.left, self.top, self.right, self.bottom];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(GraphError::config(
                "margin",
                "insets must be finite and >= 0",
            ));
        }
        Ok(self)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::axis_default()
    }
}

/// Drawable area left after removing the margin from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn from_viewport(viewport: Viewport, margin: Margin) -> Self {
        Self {
            width: (f64::from(viewport.width) - (margin.left + margin.right)).max(0.0),
            height: (f64::from(viewport.height) - (margin.top + margin.bottom)).max(0.0),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Which screen axis carries the index (categorical) dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Index along x, values grow upwards.
    #[default]
    Vertical,
    /// Index along y, values grow to the right.
    Horizontal,
}

/// How several series of one record share the record's band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// Values are summed into contiguous segments.
    #[default]
    Stacked,
    /// Values sit side by side, each measured from the baseline.
    Grouped,
}
