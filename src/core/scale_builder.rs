use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::domain::{aggregate_samples, value_extent};
use crate::core::record::format_number;
use crate::core::scale::{
    BandScale, ContinuousKind, ContinuousScale, IndexScale, OrdinalScale, PointScale,
    QuantileScale, QuantizeScale, ScaleType, ValueScale, check_padding,
};
use crate::core::{GroupMode, Record};
use crate::error::{GraphError, GraphResult};

const DEFAULT_STEPS: usize = 10;

/// Partial, declarative scale configuration (`xScale` / `yScale`).
///
/// `type` stays a raw string until build time so an unknown name surfaces as
/// [`GraphError::UnknownScaleType`] instead of a generic parse failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleOptions {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_inner: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_outer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

impl ScaleOptions {
    #[must_use]
    pub fn of_type(scale_type: impl Into<String>) -> Self {
        Self {
            scale_type: Some(scale_type.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_domain<V: Into<Value>>(mut self, domain: impl IntoIterator<Item = V>) -> Self {
        self.domain = Some(domain.into_iter().map(Into::into).collect());
        self
    }

    pub fn resolve_type(&self, default: ScaleType) -> GraphResult<ScaleType> {
        self.scale_type
            .as_deref()
            .map_or(Ok(default), str::parse::<ScaleType>)
    }

    /// Checks every option that can be checked without data.
    pub fn validate(&self, option: &'static str) -> GraphResult<()> {
        if let Some(name) = self.scale_type.as_deref() {
            name.parse::<ScaleType>()?;
        }
        check_padding(option, self.padding)?;
        check_padding(option, self.padding_inner)?;
        if let Some(outer) = self.padding_outer {
            if !outer.is_finite() || outer < 0.0 {
                return Err(GraphError::config(option, "paddingOuter must be finite and >= 0"));
            }
        }
        if let Some(exponent) = self.exponent {
            if !exponent.is_finite() || exponent <= 0.0 {
                return Err(GraphError::config(option, "exponent must be finite and > 0"));
            }
        }
        if let Some(base) = self.base {
            if !base.is_finite() || base <= 0.0 || base == 1.0 {
                return Err(GraphError::config(option, "log base must be > 0 and != 1"));
            }
        }
        if let Some(constant) = self.constant {
            if !constant.is_finite() || constant <= 0.0 {
                return Err(GraphError::config(option, "symlog constant must be > 0"));
            }
        }
        if self.steps == Some(0) {
            return Err(GraphError::config(option, "steps must be >= 1"));
        }
        Ok(())
    }

    fn index_domain_override(&self) -> Option<Vec<String>> {
        let domain = self.domain.as_ref().filter(|d| !d.is_empty())?;
        Some(domain.iter().map(value_label).collect())
    }

    fn value_domain_override(&self) -> Option<Vec<f64>> {
        let domain = self.domain.as_ref().filter(|d| d.len() >= 2)?;
        Some(
            domain
                .iter()
                .map(|v| v.as_f64().unwrap_or(f64::NAN))
                .collect(),
        )
    }
}

/// Chart-level band padding, overridden per axis by [`ScaleOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandPadding {
    pub padding: Option<f64>,
    pub inner: f64,
    pub outer: f64,
}

impl BandPadding {
    fn resolve(self, options: &ScaleOptions) -> (f64, f64) {
        let padding = options.padding.or(self.padding);
        let inner = padding.or(options.padding_inner).unwrap_or(self.inner);
        let outer = padding.or(options.padding_outer).unwrap_or(self.outer);
        (inner, outer)
    }
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), format_number),
        other => other.to_string(),
    }
}

/// Builds the index (categorical) axis scale.
///
/// `domain` is the data-derived domain; a non-empty `options.domain` replaces it.
pub fn build_index_scale(
    option: &'static str,
    domain: Vec<String>,
    options: &ScaleOptions,
    default_type: ScaleType,
    padding: BandPadding,
    range: (f64, f64),
) -> GraphResult<IndexScale> {
    let scale_type = options.resolve_type(default_type)?;
    let domain = options.index_domain_override().unwrap_or(domain);
    let (inner, outer) = padding.resolve(options);
    trace!(
        scale = scale_type.as_str(),
        count = domain.len(),
        "build index scale"
    );

    match scale_type {
        ScaleType::Band => Ok(IndexScale::Band(
            BandScale::new(domain, range).with_padding(inner, outer),
        )),
        ScaleType::Point => Ok(IndexScale::Point(PointScale::new(domain, range, outer))),
        ScaleType::Ordinal => {
            let n = domain.len();
            let positions = if n <= 1 {
                vec![range.0]
            } else {
                (0..n)
                    .map(|i| range.0 + (range.1 - range.0) * i as f64 / (n - 1) as f64)
                    .collect()
            };
            Ok(IndexScale::Ordinal(OrdinalScale::new(domain, positions)))
        }
        other => Err(GraphError::config(
            option,
            format!("`{}` is not a categorical scale type", other.as_str()),
        )),
    }
}

/// Resolved value axis: the scale plus the domain it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub scale: ValueScale,
    pub domain: (f64, f64),
}

impl ValueAxis {
    /// Whether the domain collapsed to `[0, 0]`.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }
}

/// Builds the value (quantitative) axis scale.
///
/// The data-derived domain follows the stacked-sum / grouped-max policy from
/// [`value_extent`]. A collapsed `[0, 0]` domain also collapses the output
/// range onto its start, so every value maps to the baseline.
pub fn build_value_scale(
    option: &'static str,
    records: &[Record],
    keys: &[String],
    mode: GroupMode,
    options: &ScaleOptions,
    range: (f64, f64),
) -> GraphResult<ValueAxis> {
    let scale_type = options.resolve_type(ScaleType::Linear)?;
    let override_domain = options.value_domain_override();
    let domain = match override_domain.as_deref() {
        Some([first, .., last]) => (*first, *last),
        _ => value_extent(records, keys, mode),
    };
    let range = if domain.0 == domain.1 {
        (range.0, range.0)
    } else {
        range
    };
    let steps = options.steps.unwrap_or(DEFAULT_STEPS);
    trace!(
        scale = scale_type.as_str(),
        domain_min = domain.0,
        domain_max = domain.1,
        "build value scale"
    );

    let scale = match scale_type {
        ScaleType::Linear => ValueScale::Continuous(ContinuousScale::linear(domain, range)),
        ScaleType::Power => ValueScale::Continuous(ContinuousScale::new(
            ContinuousKind::Power {
                exponent: options.exponent.unwrap_or(1.0),
            },
            domain,
            range,
        )),
        ScaleType::Log => ValueScale::Continuous(ContinuousScale::new(
            ContinuousKind::Log {
                base: options.base.unwrap_or(10.0),
            },
            domain,
            range,
        )),
        ScaleType::Symlog => ValueScale::Continuous(ContinuousScale::new(
            ContinuousKind::Symlog {
                constant: options.constant.unwrap_or(1.0),
            },
            domain,
            range,
        )),
        ScaleType::Quantize => ValueScale::Quantize(QuantizeScale::new(domain, range, steps)),
        ScaleType::Quantile => {
            let samples =
                override_domain.unwrap_or_else(|| aggregate_samples(records, keys, mode));
            ValueScale::Quantile(QuantileScale::new(&samples, range, steps))
        }
        other => {
            return Err(GraphError::config(
                option,
                format!("`{}` is not a quantitative scale type", other.as_str()),
            ));
        }
    };

    Ok(ValueAxis { scale, domain })
}
