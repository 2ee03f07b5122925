use indexmap::IndexMap;
use serde_json::Value;

use crate::core::{
    ColorContext, ContinuousScale, OrdinalScale, Record, ScaleType, build_index_scale,
};
use crate::error::{GraphError, GraphResult};
use crate::layout::orient::AxisFrame;
use crate::layout::shape::{GridCell, GridRow, ShapeGeometry, ShapeRecord};
use crate::layout::{LayoutExtras, Projection, ProjectionInput, record_identities};

/// Rows thinner than this get no axis tick.
const MIN_TICK_ROW_HEIGHT: f64 = 14.0;
const HEIGHT_FIELD: &str = "height";
const MISSING_COLOR: &str = "#000";
const TICK_START: &str = "tick-1";
const TICK_END: &str = "tick-2";

#[derive(Debug, Clone, PartialEq)]
pub struct GridIndexEntry {
    pub value: Option<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridExtras {
    /// Row identities tall enough to carry a tick label.
    pub tick_values: Vec<String>,
    /// Column key → row identity → cell, used by the column tooltip.
    pub index_data: IndexMap<String, IndexMap<String, GridIndexEntry>>,
    /// Row identity → row center, bracketed by `tick-1` (0) and `tick-2` (plot height).
    pub row_scale: OrdinalScale,
}

/// Row weight from the record's `height` field: absent means 1, invalid means 0.
fn row_weight(record: &Record) -> f64 {
    match record.number(HEIGHT_FIELD) {
        None => 1.0,
        Some(h) if h.is_finite() && h > 0.0 => h,
        Some(_) => 0.0,
    }
}

/// Projects one row per record and one cell per column key.
///
/// Columns run along the index axis and rows stack along the value axis, so a
/// vertical grid has horizontal rows and a horizontal grid has vertical ones.
/// Row thickness is the record's weight scaled so all rows fill the value
/// span. Cells without a value (missing or null) are painted `#000`.
pub fn project_grid(input: &ProjectionInput<'_>) -> GraphResult<Projection> {
    if input.index_scale.resolve_type(ScaleType::Band)? != ScaleType::Band {
        return Err(GraphError::config(
            "xScale",
            "grid graphs require a `band` column scale",
        ));
    }

    let frame = AxisFrame::new(input.orientation, input.plot);
    let span = frame.value_span();
    let columns = build_index_scale(
        "xScale",
        input.keys.to_vec(),
        input.index_scale,
        ScaleType::Band,
        input.padding,
        (0.0, frame.index_span()),
    )?;
    let bandwidth = columns.bandwidth();

    let identities = record_identities(input.records, input.index_by)?;
    let total_weight: f64 = input.records.iter().map(row_weight).sum();
    let row_height = ContinuousScale::linear((0.0, total_weight), (0.0, span));

    let mut index_data: IndexMap<String, IndexMap<String, GridIndexEntry>> = input
        .keys
        .iter()
        .map(|key| (key.clone(), IndexMap::with_capacity(input.records.len())))
        .collect();
    let mut tick_values = Vec::new();
    let mut centers = Vec::with_capacity(input.records.len() + 2);
    centers.push(0.0);
    let mut shapes = Vec::with_capacity(input.records.len());
    let mut top = 0.0;

    for (record, identity) in input.records.iter().zip(&identities) {
        let extent = row_height.map(row_weight(record));
        centers.push(top + extent * 0.5);
        if extent >= MIN_TICK_ROW_HEIGHT {
            tick_values.push(identity.clone());
        }

        let cells = input
            .keys
            .iter()
            .enumerate()
            .map(|(series_index, key)| {
                let value = match record.get(key) {
                    None | Some(Value::Null) => None,
                    Some(_) => record.number(key),
                };
                let color = match value {
                    None => MISSING_COLOR.to_owned(),
                    Some(v) => input.colors.resolve(&ColorContext {
                        value: v,
                        series_index,
                        record: Some(record),
                        key,
                    }),
                };
                if let Some(column) = index_data.get_mut(key) {
                    column.insert(
                        identity.clone(),
                        GridIndexEntry {
                            value,
                            color: color.clone(),
                        },
                    );
                }
                let x = columns.map(key).unwrap_or(bandwidth * series_index as f64);
                GridCell {
                    key: key.clone(),
                    series_index,
                    value,
                    color,
                    rect: frame.rect(x, bandwidth, 0.0, extent),
                }
            })
            .collect();

        shapes.push(ShapeRecord::new(
            identity.clone(),
            ShapeGeometry::Grid(GridRow {
                offset: frame.point(0.0, top),
                extent,
                cells,
            }),
            Some(record.clone()),
        ));
        top += extent;
    }
    centers.push(span);

    let row_domain = std::iter::once(TICK_START.to_owned())
        .chain(identities.iter().cloned())
        .chain(std::iter::once(TICK_END.to_owned()));
    let row_scale = OrdinalScale::new(row_domain, centers);

    Ok(Projection {
        shapes,
        index_scale: Some(columns),
        value_axis: None,
        index_domain: identities,
        extras: LayoutExtras::Grid(GridExtras {
            tick_values,
            index_data,
            row_scale,
        }),
    })
}

