use std::str::FromStr;

use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Every scale family a graph axis can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Band,
    Point,
    Ordinal,
    Linear,
    Power,
    Log,
    Symlog,
    Quantize,
    Quantile,
}

impl ScaleType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Band => "band",
            Self::Point => "point",
            Self::Ordinal => "ordinal",
            Self::Linear => "linear",
            Self::Power => "power",
            Self::Log => "log",
            Self::Symlog => "symlog",
            Self::Quantize => "quantize",
            Self::Quantile => "quantile",
        }
    }

    /// Discrete families map categorical index values.
    #[must_use]
    pub const fn is_discrete(self) -> bool {
        matches!(self, Self::Band | Self::Point | Self::Ordinal)
    }
}

impl FromStr for ScaleType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "band" => Ok(Self::Band),
            "point" => Ok(Self::Point),
            "ordinal" => Ok(Self::Ordinal),
            "linear" => Ok(Self::Linear),
            "power" | "pow" => Ok(Self::Power),
            "log" => Ok(Self::Log),
            "symlog" => Ok(Self::Symlog),
            "quantize" => Ok(Self::Quantize),
            "quantile" => Ok(Self::Quantile),
            other => Err(GraphError::UnknownScaleType(other.to_owned())),
        }
    }
}

/// Banded categorical scale.
///
/// Layout follows the usual banded-scale convention:
/// `step = span / max(1, n - inner + 2 * outer)`, `bandwidth = step * (1 - inner)`
/// and the bands are centered inside the range. A reversed range
/// (`start > end`) lays the first domain value out at the far end.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    step: f64,
    bandwidth: f64,
    first: f64,
}

impl BandScale {
    #[must_use]
    pub fn new<I, S>(domain: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scale = Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            step: 0.0,
            bandwidth: 0.0,
            first: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Sets inner/outer padding as fractions of the step.
    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self.rescale();
        self
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let span = stop - start;
        self.step = span / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.first = start + (span - self.step * (n - self.padding_inner)) * 0.5;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
    }

    #[must_use]
    pub fn domain(&self) -> impl ExactSizeIterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    #[must_use]
    pub fn padding_outer(&self) -> f64 {
        self.padding_outer
    }

    /// Start coordinate of the band at `position` in domain order.
    #[must_use]
    pub fn position(&self, position: usize) -> Option<f64> {
        let n = self.domain.len();
        if position >= n {
            return None;
        }
        let slot = if self.range.1 < self.range.0 {
            n - 1 - position
        } else {
            position
        };
        Some(self.first + self.step * slot as f64)
    }

    #[must_use]
    pub fn map(&self, value: &str) -> Option<f64> {
        self.position(self.domain.get_index_of(value)?)
    }
}

/// Band scale with zero-width bands; values land on evenly spaced points.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    band: BandScale,
}

impl PointScale {
    #[must_use]
    pub fn new<I, S>(domain: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            band: BandScale::new(domain, range).with_padding(1.0, padding),
        }
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.band.step()
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.band.padding_outer()
    }

    #[must_use]
    pub fn position(&self, position: usize) -> Option<f64> {
        self.band.position(position)
    }

    #[must_use]
    pub fn map(&self, value: &str) -> Option<f64> {
        self.band.map(value)
    }

    #[must_use]
    pub fn domain(&self) -> impl ExactSizeIterator<Item = &str> {
        self.band.domain()
    }
}

/// Explicit categorical lookup: the i-th domain value maps to the i-th range
/// value, cycling when the range is shorter.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: IndexSet<String>,
    range: Vec<f64>,
}

impl OrdinalScale {
    #[must_use]
    pub fn new<I, S>(domain: I, range: Vec<f64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
        }
    }

    #[must_use]
    pub fn map(&self, value: &str) -> Option<f64> {
        if self.range.is_empty() {
            return None;
        }
        let idx = self.domain.get_index_of(value)?;
        Some(self.range[idx % self.range.len()])
    }

    #[must_use]
    pub fn domain(&self) -> impl ExactSizeIterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn range(&self) -> &[f64] {
        &self.range
    }
}

/// Resolved index-axis scale.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexScale {
    Band(BandScale),
    Point(PointScale),
    Ordinal(OrdinalScale),
}

impl IndexScale {
    #[must_use]
    pub fn map(&self, value: &str) -> Option<f64> {
        match self {
            Self::Band(s) => s.map(value),
            Self::Point(s) => s.map(value),
            Self::Ordinal(s) => s.map(value),
        }
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Band(s) => s.bandwidth(),
            Self::Point(_) | Self::Ordinal(_) => 0.0,
        }
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        match self {
            Self::Band(s) => s.step(),
            Self::Point(s) => s.step(),
            Self::Ordinal(_) => 0.0,
        }
    }

    #[must_use]
    pub fn domain(&self) -> Vec<String> {
        match self {
            Self::Band(s) => s.domain().map(str::to_owned).collect(),
            Self::Point(s) => s.domain().map(str::to_owned).collect(),
            Self::Ordinal(s) => s.domain().map(str::to_owned).collect(),
        }
    }
}

/// Transform applied before linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContinuousKind {
    Linear,
    Power { exponent: f64 },
    Log { base: f64 },
    Symlog { constant: f64 },
}

impl ContinuousKind {
    fn transform(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Power { exponent } => {
                if x < 0.0 {
                    -(-x).powf(exponent)
                } else {
                    x.powf(exponent)
                }
            }
            Self::Log { base } => x.ln() / base.ln(),
            Self::Symlog { constant } => x.signum() * (x.abs() / constant).ln_1p(),
        }
    }
}

/// Continuous domain-to-range mapping (linear, power, log, symlog).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScale {
    kind: ContinuousKind,
    domain: (f64, f64),
    range: (f64, f64),
}

impl ContinuousScale {
    #[must_use]
    pub fn new(kind: ContinuousKind, domain: (f64, f64), range: (f64, f64)) -> Self {
        let domain = match kind {
            // A log axis cannot start at zero; start at 1 (or the max when smaller).
            ContinuousKind::Log { .. } if domain.0 <= 0.0 => (domain.1.min(1.0), domain.1),
            _ => domain,
        };
        Self {
            kind,
            domain,
            range,
        }
    }

    #[must_use]
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(ContinuousKind::Linear, domain, range)
    }

    #[must_use]
    pub fn kind(&self) -> ContinuousKind {
        self.kind
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a domain value into range space.
    ///
    /// A zero-width (or non-finite) transformed domain maps everything to the
    /// range start instead of dividing by zero.
    #[must_use]
    pub fn map(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        if matches!(self.kind, ContinuousKind::Log { .. }) && x <= 0.0 {
            return r0;
        }
        let t0 = self.kind.transform(self.domain.0);
        let t1 = self.kind.transform(self.domain.1);
        let denom = t1 - t0;
        if denom == 0.0 || !denom.is_finite() {
            return r0;
        }
        let t = (self.kind.transform(x) - t0) / denom;
        r0 + t * (r1 - r0)
    }
}

/// Evenly spaced output levels across a range, used by the discretizing scales.
fn output_levels(range: (f64, f64), steps: usize) -> Vec<f64> {
    let steps = steps.max(1);
    if steps == 1 {
        return vec![range.0];
    }
    let last = (steps - 1) as f64;
    (0..steps)
        .map(|i| range.0 + (range.1 - range.0) * i as f64 / last)
        .collect()
}

/// Splits a continuous domain into equal segments, one output level each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizeScale {
    domain: (f64, f64),
    outputs: Vec<f64>,
}

impl QuantizeScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64), steps: usize) -> Self {
        Self {
            domain,
            outputs: output_levels(range, steps),
        }
    }

    #[must_use]
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let n = self.outputs.len();
        let span = d1 - d0;
        if span == 0.0 || !x.is_finite() {
            return self.outputs[0];
        }
        let raw = ((x - d0) / span * n as f64).floor();
        let idx = raw.clamp(0.0, (n - 1) as f64) as usize;
        self.outputs[idx]
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }
}

/// Assigns output levels by sample quantiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileScale {
    domain: (f64, f64),
    thresholds: Vec<f64>,
    outputs: Vec<f64>,
}

impl QuantileScale {
    #[must_use]
    pub fn new(samples: &[f64], range: (f64, f64), steps: usize) -> Self {
        let mut sorted: Vec<OrderedFloat<f64>> = samples
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .map(OrderedFloat)
            .collect();
        sorted.sort_unstable();
        let sorted: Vec<f64> = sorted.into_iter().map(|v| v.0).collect();

        let outputs = output_levels(range, steps);
        let n = outputs.len();
        let thresholds = if sorted.is_empty() {
            Vec::new()
        } else {
            (1..n)
                .map(|i| quantile_sorted(&sorted, i as f64 / n as f64))
                .collect()
        };
        let domain = match (sorted.first(), sorted.last()) {
            (Some(lo), Some(hi)) => (*lo, *hi),
            _ => (0.0, 0.0),
        };
        Self {
            domain,
            thresholds,
            outputs,
        }
    }

    #[must_use]
    pub fn map(&self, x: f64) -> f64 {
        let idx = self.thresholds.partition_point(|t| *t <= x);
        self.outputs[idx.min(self.outputs.len() - 1)]
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }
}

fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

/// Resolved value-axis scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueScale {
    Continuous(ContinuousScale),
    Quantize(QuantizeScale),
    Quantile(QuantileScale),
}

impl ValueScale {
    #[must_use]
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Continuous(s) => s.map(x),
            Self::Quantize(s) => s.map(x),
            Self::Quantile(s) => s.map(x),
        }
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Continuous(s) => s.domain(),
            Self::Quantize(s) => s.domain(),
            Self::Quantile(s) => s.domain(),
        }
    }
}

/// Validates a padding fraction option.
pub(crate) fn check_padding(option: &'static str, value: Option<f64>) -> GraphResult<()> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=1.0).contains(&v) => Err(GraphError::config(
            option,
            format!("padding must be within [0, 1], got {v}"),
        )),
        _ => Ok(()),
    }
}
