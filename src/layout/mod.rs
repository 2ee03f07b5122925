//! Record-to-geometry projection for every graph family.
//!
//! [`project`] is the single entry point: it builds the scales a layout needs,
//! then dispatches on [`LayoutKind`]. All variants emit the same
//! [`ShapeRecord`] contract consumed by the transition classifier.

mod bar;
mod grid;
mod line;
mod orient;
mod path;
mod pie;
pub mod shape;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    BandPadding, ColorResolver, IndexScale, Orientation, PlotArea, Record, ScaleOptions,
    ValueAxis,
};
use crate::error::{GraphError, GraphResult};

pub use bar::{BarScales, bar_scales, project_bars};
pub use grid::{GridExtras, GridIndexEntry, project_grid};
pub use line::{LineExtras, SliceBand, SliceEntry, project_lines};
pub use path::{catmull_rom_path, path_to_svg};
pub use pie::{PieAngles, PieExtras, WedgeAngles, max_square, pie_angles, project_pies};
pub use shape::{
    BarSegment, BarShape, GridCell, GridRow, Lifecycle, LineShape, PathCommand, PieShape, Rect,
    ShapeGeometry, ShapeRecord, Wedge,
};

/// Tagged union over the supported layout families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Stacked,
    Grouped,
    Line,
    Grid,
    Pie,
}

/// Everything a layout needs for one render cycle.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput<'a> {
    pub kind: LayoutKind,
    pub records: &'a [Record],
    pub keys: &'a [String],
    pub index_by: &'a str,
    pub orientation: Orientation,
    pub plot: PlotArea,
    pub padding: BandPadding,
    pub index_scale: &'a ScaleOptions,
    pub value_scale: &'a ScaleOptions,
    pub colors: &'a ColorResolver,
    pub pie: PieAngles,
}

/// Layout-specific side data used by axes and tooltips.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LayoutExtras {
    #[default]
    None,
    Line(LineExtras),
    Grid(GridExtras),
    Pie(PieExtras),
}

/// Output of one projection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub shapes: Vec<ShapeRecord>,
    pub index_scale: Option<IndexScale>,
    pub value_axis: Option<ValueAxis>,
    pub index_domain: Vec<String>,
    pub extras: LayoutExtras,
}

impl Projection {
    fn empty() -> Self {
        Self {
            shapes: Vec::new(),
            index_scale: None,
            value_axis: None,
            index_domain: Vec::new(),
            extras: LayoutExtras::None,
        }
    }
}

/// Builds scales and projects every record for `input.kind`.
pub fn project(input: &ProjectionInput<'_>) -> GraphResult<Projection> {
    if input.plot.is_empty() {
        debug!(kind = ?input.kind, "empty plot area, nothing to project");
        return Ok(Projection::empty());
    }

    let projection = match input.kind {
        LayoutKind::Stacked | LayoutKind::Grouped => {
            let scales = bar_scales(input)?;
            let shapes = project_bars(input, &scales)?;
            Projection {
                shapes,
                index_domain: scales.index.domain(),
                index_scale: Some(scales.index),
                value_axis: Some(scales.value),
                extras: LayoutExtras::None,
            }
        }
        LayoutKind::Line => project_lines(input)?,
        LayoutKind::Grid => project_grid(input)?,
        LayoutKind::Pie => project_pies(input)?,
    };

    debug!(
        kind = ?input.kind,
        shapes = projection.shapes.len(),
        "projected layout"
    );
    Ok(projection)
}

/// Identity of every record, in input order.
pub(crate) fn record_identities(records: &[Record], index_by: &str) -> GraphResult<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            record
                .identity(index_by)
                .ok_or_else(|| GraphError::MissingIdentity {
                    index_by: index_by.to_owned(),
                    row,
                })
        })
        .collect()
}
