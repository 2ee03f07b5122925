use std::f64::consts::TAU;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ColorContext, ContinuousScale};
use crate::error::GraphResult;
use crate::layout::shape::{PieShape, ShapeGeometry, ShapeRecord, Wedge};
use crate::layout::{LayoutExtras, Projection, ProjectionInput, record_identities};

/// Vertical room reserved under each pie for its label.
const LABEL_PADDING: f64 = 15.0;
const MIN_RADIUS_RATIO: f64 = 0.3;
const MAX_RADIUS_RATIO: f64 = 0.475;

/// Angular extent shared by every pie, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PieAngles {
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
}

impl Default for PieAngles {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: TAU,
            pad_angle: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeAngles {
    pub start: f64,
    pub end: f64,
    pub pad: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PieExtras {
    /// Totals extent the radius scale was built from.
    pub radius_domain: (f64, f64),
    /// Side of the square cell every pie was packed into.
    pub cell_size: f64,
}

/// Splits `[start_angle, end_angle]` proportionally to `values`, in input
/// order. The total sweep is clamped to one full turn; each wedge gets the
/// same padding, capped so padding alone cannot exceed the sweep.
#[must_use]
pub fn pie_angles(values: &[f64], angles: PieAngles) -> Vec<WedgeAngles> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let sum: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let sweep = (angles.end_angle - angles.start_angle).clamp(-TAU, TAU);
    let pad = (sweep.abs() / n as f64).min(angles.pad_angle);
    let signed_pad = pad * sweep.signum();
    let k = if sum > 0.0 {
        (sweep - n as f64 * signed_pad) / sum
    } else {
        0.0
    };

    let mut a0 = angles.start_angle;
    values
        .iter()
        .map(|&v| {
            let a1 = a0 + if v > 0.0 { v * k } else { 0.0 } + signed_pad;
            let wedge = WedgeAngles {
                start: a0,
                end: a1,
                pad,
            };
            a0 = a1;
            wedge
        })
        .collect()
}

/// Largest square side such that `n` squares tile a `width × height` box.
#[must_use]
pub fn max_square(width: f64, height: f64, n: usize) -> f64 {
    if n == 0 || width <= 0.0 || height <= 0.0 {
        return 0.0;
    }
    let n = n as f64;

    let px = (n * width / height).sqrt().ceil();
    let sx = if (px * height / width).floor() * px < n {
        height / (px * height / width).ceil()
    } else {
        width / px
    };

    let py = (n * height / width).sqrt().ceil();
    let sy = if (py * width / height).floor() * py < n {
        width / (py * width / height).ceil()
    } else {
        height / py
    };

    sx.max(sy)
}

/// Projects one pie per record, packed row-major into square cells.
///
/// Wedges exist only for strictly positive values. Radius grows linearly
/// with the record total between 30% and 47.5% of the cell side.
pub fn project_pies(input: &ProjectionInput<'_>) -> GraphResult<Projection> {
    let identities = record_identities(input.records, input.index_by)?;
    let width = input.plot.width;
    let height = input.plot.height;

    let mut pies: Vec<PieShape> = input
        .records
        .iter()
        .map(|record| {
            let mut color_map = IndexMap::with_capacity(input.keys.len());
            let mut parts = Vec::with_capacity(input.keys.len());
            for (series_index, key) in input.keys.iter().enumerate() {
                let value = record.number_or_zero(key);
                let color = input.colors.resolve(&ColorContext {
                    value,
                    series_index,
                    record: Some(record),
                    key,
                });
                color_map.insert(key.clone(), color.clone());
                if value > 0.0 {
                    parts.push((key, series_index, value, color));
                } else {
                    trace!(key = %key, value, "excluding non-positive pie value");
                }
            }

            let values: Vec<f64> = parts.iter().map(|p| p.2).collect();
            let total: f64 = values.iter().sum();
            let wedges = parts
                .into_iter()
                .zip(pie_angles(&values, input.pie))
                .map(|((key, series_index, value, color), angles)| Wedge {
                    key: key.clone(),
                    series_index,
                    value,
                    color,
                    start_angle: angles.start,
                    end_angle: angles.end,
                    pad_angle: angles.pad,
                })
                .collect();

            PieShape {
                center: (0.0, 0.0),
                radius: 0.0,
                cell_size: 0.0,
                total,
                wedges,
                color_map,
            }
        })
        .collect();

    let mut extras = PieExtras::default();
    let n = pies.len();
    if n > 0 {
        let mut cell = max_square(width, height, n);
        let num_cols = if cell > 0.0 {
            ((width / cell).floor() as usize).max(1)
        } else {
            1
        };
        let num_rows = n.div_ceil(num_cols);
        let in_last_row = match n % num_cols {
            0 => num_cols,
            rest => rest,
        };
        let row_height = height / num_rows as f64;
        cell = cell.min(row_height - LABEL_PADDING).max(0.0);
        let diff = row_height - cell;

        let mut domain = pies.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.total), hi.max(p.total))
        });
        if domain.0 == domain.1 {
            domain.0 = 0.0;
        }
        let radius = ContinuousScale::linear(
            domain,
            (MIN_RADIUS_RATIO * cell, MAX_RADIUS_RATIO * cell),
        );

        for (i, pie) in pies.iter_mut().enumerate() {
            let col = i % num_cols;
            let row = i / num_cols;
            let row_len = if row + 1 < num_rows { num_cols } else { in_last_row };
            let cell_width = width / row_len as f64;
            pie.radius = radius.map(pie.total);
            pie.center = (
                cell_width * col as f64 + cell_width * 0.5,
                row_height * row as f64 + (row_height - diff) * 0.5,
            );
            pie.cell_size = cell;
        }

        extras = PieExtras {
            radius_domain: domain,
            cell_size: cell,
        };
    }

    let shapes = input
        .records
        .iter()
        .zip(identities.iter().cloned())
        .zip(pies)
        .map(|((record, identity), pie)| {
            ShapeRecord::new(identity, ShapeGeometry::Pie(pie), Some(record.clone()))
        })
        .collect();

    Ok(Projection {
        shapes,
        index_scale: None,
        value_axis: None,
        index_domain: identities,
        extras: LayoutExtras::Pie(extras),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_square_fits_a_single_cell() {
        assert!((max_square(200.0, 100.0, 1) - 100.0).abs() <= 1e-9);
        assert!((max_square(100.0, 100.0, 4) - 50.0).abs() <= 1e-9);
        assert_eq!(max_square(100.0, 100.0, 0), 0.0);
    }

    #[test]
    fn padded_wedges_leave_gaps_but_fill_the_sweep() {
        let angles = pie_angles(
            &[1.0, 1.0],
            PieAngles {
                pad_angle: 0.1,
                ..PieAngles::default()
            },
        );
        assert_eq!(angles.len(), 2);
        assert!((angles[1].end - TAU).abs() <= 1e-9);
        assert!((angles[0].pad - 0.1).abs() <= 1e-12);
    }
}
