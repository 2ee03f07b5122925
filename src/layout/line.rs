use indexmap::IndexMap;
use tracing::trace;

use crate::core::{
    BandPadding, ColorContext, GroupMode, IndexScale, ScaleType, build_index_scale,
    build_value_scale, index_domain,
};
use crate::error::{GraphError, GraphResult};
use crate::layout::path::catmull_rom_path;
use crate::layout::shape::{LineShape, ShapeGeometry, ShapeRecord};
use crate::layout::{LayoutExtras, Projection, ProjectionInput, record_identities};

const DEFAULT_POINT_PADDING: f64 = 0.5;

/// One series value inside a hover slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceEntry {
    pub key: String,
    pub value: f64,
    pub color: String,
    /// Strictly largest positive value of the slice; ties go to the first series.
    pub is_max: bool,
}

/// Invisible hover target covering one index position.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceBand {
    pub index: String,
    pub left: f64,
    pub width: f64,
    pub entries: Vec<SliceEntry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineExtras {
    pub slices: Vec<SliceBand>,
    /// Sum of every finite value per series key.
    pub totals: IndexMap<String, f64>,
}

/// Projects one line per series key across all records.
pub fn project_lines(input: &ProjectionInput<'_>) -> GraphResult<Projection> {
    match input.index_scale.resolve_type(ScaleType::Point)? {
        ScaleType::Point => {}
        _ => {
            return Err(GraphError::config(
                "xScale",
                "line graphs require a `point` index scale",
            ));
        }
    }

    let width = input.plot.width;
    let height = input.plot.height;
    let domain = index_domain(input.records, input.index_by)?;
    let padding = BandPadding {
        padding: Some(input.padding.padding.unwrap_or(DEFAULT_POINT_PADDING)),
        ..input.padding
    };
    let index = build_index_scale(
        "xScale",
        domain,
        input.index_scale,
        ScaleType::Point,
        padding,
        (0.0, width),
    )?;
    let value = build_value_scale(
        "yScale",
        input.records,
        input.keys,
        GroupMode::Grouped,
        input.value_scale,
        (height, 0.0),
    )?;
    let baseline_y = value.scale.map(value.domain.0);

    let identities = record_identities(input.records, input.index_by)?;
    let xs: Vec<Option<f64>> = identities.iter().map(|id| index.map(id)).collect();

    let mut totals = IndexMap::with_capacity(input.keys.len());
    let mut colors = Vec::with_capacity(input.keys.len());
    let mut shapes = Vec::with_capacity(input.keys.len());

    for (series_index, key) in input.keys.iter().enumerate() {
        let color = input.colors.resolve(&ColorContext {
            value: f64::NAN,
            series_index,
            record: None,
            key,
        });

        let mut total = 0.0;
        let mut points = Vec::with_capacity(input.records.len());
        let mut baseline = Vec::with_capacity(input.records.len());
        for (record, x) in input.records.iter().zip(&xs) {
            let Some(x) = *x else { continue };
            let v = record.number_or_zero(key);
            if v.is_nan() {
                trace!(key = %key, "skipping NaN line point");
                continue;
            }
            total += v;
            points.push((x, value.scale.map(v)));
            baseline.push((x, baseline_y));
        }

        totals.insert(key.clone(), total);
        colors.push(color.clone());
        shapes.push(ShapeRecord::new(
            key.clone(),
            ShapeGeometry::Line(LineShape {
                series_index,
                color,
                path: catmull_rom_path(&points),
                baseline_path: catmull_rom_path(&baseline),
                points,
                baseline,
            }),
            None,
        ));
    }

    let slices = slice_bands(input, &index, &identities, &colors);

    Ok(Projection {
        shapes,
        index_domain: index.domain(),
        index_scale: Some(index),
        value_axis: Some(value),
        extras: LayoutExtras::Line(LineExtras { slices, totals }),
    })
}

fn slice_bands(
    input: &ProjectionInput<'_>,
    index: &IndexScale,
    identities: &[String],
    colors: &[String],
) -> Vec<SliceBand> {
    let step = index.step();
    let padding = match index {
        IndexScale::Point(point) => point.padding(),
        _ => 0.0,
    };
    let offset = padding * step - step * 0.5;

    index
        .domain()
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let mut entries: Vec<SliceEntry> = input
                .records
                .iter()
                .zip(identities)
                .filter(|(_, id)| **id == label)
                .flat_map(|(record, _)| {
                    input.keys.iter().zip(colors).map(move |(key, color)| SliceEntry {
                        key: key.clone(),
                        value: record.number_or_zero(key),
                        color: color.clone(),
                        is_max: false,
                    })
                })
                .collect();

            let mut best = 0.0;
            let mut best_at = None;
            for (at, entry) in entries.iter().enumerate() {
                if entry.value > best {
                    best = entry.value;
                    best_at = Some(at);
                }
            }
            if let Some(at) = best_at {
                entries[at].is_max = true;
            }

            SliceBand {
                left: offset + i as f64 * step,
                width: step,
                index: label,
                entries,
            }
        })
        .collect()
}
