use tracing::trace;

use crate::core::{
    ColorContext, GroupMode, IndexScale, ScaleType, ValueAxis, build_index_scale,
    build_value_scale, index_domain,
};
use crate::error::{GraphError, GraphResult};
use crate::layout::orient::{AxisFrame, direction, extent_from_baseline, value_interval};
use crate::layout::shape::{BarSegment, BarShape, ShapeGeometry, ShapeRecord};
use crate::layout::{LayoutKind, ProjectionInput, record_identities};

/// Scales shared by stacked and grouped bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarScales {
    pub index: IndexScale,
    pub value: ValueAxis,
}

fn group_mode(kind: LayoutKind) -> GroupMode {
    match kind {
        LayoutKind::Grouped => GroupMode::Grouped,
        _ => GroupMode::Stacked,
    }
}

/// Band index scale plus stacked-sum or grouped-max value scale.
pub fn bar_scales(input: &ProjectionInput<'_>) -> GraphResult<BarScales> {
    if input.index_scale.resolve_type(ScaleType::Band)? != ScaleType::Band {
        return Err(GraphError::config(
            "xScale",
            "bar graphs require a `band` index scale",
        ));
    }

    let frame = AxisFrame::new(input.orientation, input.plot);
    let domain = index_domain(input.records, input.index_by)?;
    let index = build_index_scale(
        "xScale",
        domain,
        input.index_scale,
        ScaleType::Band,
        input.padding,
        frame.index_range(),
    )?;
    let value = build_value_scale(
        "yScale",
        input.records,
        input.keys,
        group_mode(input.kind),
        input.value_scale,
        frame.value_range(),
    )?;

    Ok(BarScales { index, value })
}

/// Projects one bar per record.
///
/// Stacked segments accumulate away from the baseline in series-key order.
/// Grouped segments split the band evenly and each starts at the baseline.
pub fn project_bars(input: &ProjectionInput<'_>, scales: &BarScales) -> GraphResult<Vec<ShapeRecord>> {
    let frame = AxisFrame::new(input.orientation, input.plot);
    let value_range = frame.value_range();
    let baseline = value_range.0;
    let dir = direction(value_range);
    let bandwidth = scales.index.bandwidth();
    let stacked = group_mode(input.kind) == GroupMode::Stacked;
    let series_width = if input.keys.is_empty() {
        0.0
    } else {
        bandwidth / input.keys.len() as f64
    };

    let identities = record_identities(input.records, input.index_by)?;
    let mut shapes = Vec::with_capacity(input.records.len());

    for (record, identity) in input.records.iter().zip(identities) {
        let Some(index_pos) = scales.index.map(&identity) else {
            trace!(identity = %identity, "record outside explicit index domain");
            continue;
        };

        let mut acc = 0.0;
        let segments = input
            .keys
            .iter()
            .enumerate()
            .map(|(series_index, key)| {
                let value = record.number_or_zero(key);
                let extent = extent_from_baseline(baseline, dir, scales.value.scale.map(value));
                let (index_offset, index_len, from) = if stacked {
                    (0.0, bandwidth, acc)
                } else {
                    (series_width * series_index as f64, series_width, 0.0)
                };
                let (value_pos, value_len) = value_interval(baseline, dir, from, extent);
                if stacked {
                    acc += extent;
                }
                let color = input.colors.resolve(&ColorContext {
                    value,
                    series_index,
                    record: Some(record),
                    key,
                });
                BarSegment {
                    key: key.clone(),
                    series_index,
                    value,
                    color,
                    rect: frame.rect(index_offset, index_len, value_pos, value_len),
                }
            })
            .collect();

        shapes.push(ShapeRecord::new(
            identity,
            ShapeGeometry::Bar(BarShape {
                offset: frame.point(index_pos, 0.0),
                segments,
            }),
            Some(record.clone()),
        ));
    }

    Ok(shapes)
}
