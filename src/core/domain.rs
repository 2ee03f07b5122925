use indexmap::IndexSet;
use tracing::trace;

use crate::core::{GroupMode, Record};
use crate::error::{GraphError, GraphResult};

/// Distinct index values in input order.
///
/// A record without a usable index value is rejected: aliasing such rows
/// onto a shared fallback identity would make them collide across frames.
pub fn index_domain(records: &[Record], index_by: &str) -> GraphResult<Vec<String>> {
    let mut seen = IndexSet::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        let identity = record
            .identity(index_by)
            .ok_or_else(|| GraphError::MissingIdentity {
                index_by: index_by.to_owned(),
                row,
            })?;
        seen.insert(identity);
    }
    Ok(seen.into_iter().collect())
}

/// Per-record aggregate used for the value domain.
///
/// Absent series values count as `0`; a present but non-numeric value
/// poisons the aggregate with `NaN` so the record is skipped by
/// [`value_extent`] rather than silently counted as zero.
#[must_use]
pub fn record_aggregate(record: &Record, keys: &[String], mode: GroupMode) -> f64 {
    match mode {
        GroupMode::Stacked => keys.iter().map(|k| record.number_or_zero(k)).sum(),
        GroupMode::Grouped => keys.iter().fold(0.0, |acc, k| {
            let v = record.number_or_zero(k);
            if acc.is_nan() || v.is_nan() {
                f64::NAN
            } else {
                acc.max(v)
            }
        }),
    }
}

/// Usable (non-NaN) aggregates, in record order.
#[must_use]
pub fn aggregate_samples(records: &[Record], keys: &[String], mode: GroupMode) -> Vec<f64> {
    records
        .iter()
        .map(|r| record_aggregate(r, keys, mode))
        .filter(|v| !v.is_nan())
        .collect()
}

/// Value-axis domain: `[0, max aggregate]`, or `[0, 0]` when nothing positive
/// survives the NaN filter.
#[must_use]
pub fn value_extent(records: &[Record], keys: &[String], mode: GroupMode) -> (f64, f64) {
    let samples = aggregate_samples(records, keys, mode);
    let skipped = records.len() - samples.len();
    if skipped > 0 {
        trace!(skipped, "records excluded from value domain (NaN aggregate)");
    }
    let max = samples
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    (0.0, max)
}
