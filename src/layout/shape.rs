use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Record;

/// Lifecycle classification of a shape relative to the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Identity was not present in the previous frame.
    #[default]
    Entering,
    /// Identity was present in the previous frame and is still present.
    Updating,
    /// Identity disappeared; the shape is frozen at its last geometry.
    Exiting,
}

/// Axis-aligned rectangle in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// One series slice of a bar. `rect` is relative to the bar's `offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub key: String,
    pub series_index: usize,
    pub value: f64,
    pub color: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarShape {
    /// Translation of the whole bar group (band position on the index axis).
    pub offset: (f64, f64),
    pub segments: Vec<BarSegment>,
}

/// Path command in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CubicTo {
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub series_index: usize,
    pub color: String,
    pub points: Vec<(f64, f64)>,
    /// Same x positions as `points`, every y on the value baseline.
    pub baseline: Vec<(f64, f64)>,
    pub path: Vec<PathCommand>,
    pub baseline_path: Vec<PathCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub key: String,
    pub series_index: usize,
    /// `None` when the record has no numeric value for this column.
    pub value: Option<f64>,
    pub color: String,
    /// Relative to the row's `offset`.
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub offset: (f64, f64),
    /// Row thickness in pixels along the row axis.
    pub extent: f64,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    pub key: String,
    pub series_index: usize,
    pub value: f64,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieShape {
    pub center: (f64, f64),
    pub radius: f64,
    /// Side of the square cell the pie was packed into.
    pub cell_size: f64,
    pub total: f64,
    pub wedges: Vec<Wedge>,
    /// Color of every series key, including keys without a wedge.
    pub color_map: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    Bar(BarShape),
    Line(LineShape),
    Grid(GridRow),
    Pie(PieShape),
}

/// Projected visual unit for one record (or one series, for lines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub identity: String,
    pub lifecycle: Lifecycle,
    pub geometry: ShapeGeometry,
    /// Source row. Line series span many rows and carry `None`.
    pub record: Option<Record>,
}

impl ShapeRecord {
    #[must_use]
    pub fn new(identity: impl Into<String>, geometry: ShapeGeometry, record: Option<Record>) -> Self {
        Self {
            identity: identity.into(),
            lifecycle: Lifecycle::Entering,
            geometry,
            record,
        }
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.lifecycle == Lifecycle::Exiting
    }
}
