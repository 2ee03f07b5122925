use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::record::format_number;
use crate::core::{Margin, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::interaction::hover::HoveredDatum;
use crate::layout::{GridExtras, PieShape, SliceBand};

/// Distance kept between the pointer and the tooltip, and between the
/// tooltip and the plot edges.
pub const TOOLTIP_GAP: f64 = 20.0;
const DEFAULT_PRECISION: usize = 6;
const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// No type character: significant digits, trailing zeros trimmed.
    General,
    Fixed,
    Integer,
    Percent,
    Exponent,
    SiPrefix,
}

/// Number format pattern: `[,][.precision][f|d|%|e|s]`.
///
/// ```
/// use graph_rs::interaction::ValueFormat;
///
/// let fmt: ValueFormat = ",.2f".parse().expect("valid pattern");
/// assert_eq!(fmt.format(1234.5), "1,234.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueFormat {
    grouping: bool,
    precision: Option<usize>,
    kind: FormatKind,
}

impl FromStr for ValueFormat {
    type Err = GraphError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            GraphError::config("hoverComp", format!("invalid format `{pattern}`: {reason}"))
        };

        let (grouping, rest) = match pattern.strip_prefix(',') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let (precision, rest) = match rest.strip_prefix('.') {
            Some(rest) => {
                let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
                if digits == 0 {
                    return Err(invalid("precision needs at least one digit"));
                }
                let precision = rest[..digits]
                    .parse::<usize>()
                    .map_err(|_| invalid("precision out of range"))?;
                (Some(precision), &rest[digits..])
            }
            None => (None, rest),
        };
        let kind = match rest {
            "" => FormatKind::General,
            "f" => FormatKind::Fixed,
            "d" => FormatKind::Integer,
            "%" => FormatKind::Percent,
            "e" => FormatKind::Exponent,
            "s" => FormatKind::SiPrefix,
            _ => return Err(invalid("unsupported type")),
        };

        Ok(Self {
            grouping,
            precision,
            kind,
        })
    }
}

/// Rounds `value` to `digits` significant digits.
fn round_significant(value: f64, digits: usize) -> f64 {
    format!("{:.*e}", digits.saturating_sub(1), value)
        .parse()
        .unwrap_or(value)
}

fn group_thousands(formatted: &str) -> String {
    let (sign, body) = match formatted.strip_prefix('-') {
        Some(body) => ("-", body),
        None => ("", formatted),
    };
    let int_len = body.bytes().take_while(u8::is_ascii_digit).count();
    let (int, tail) = body.split_at(int_len);
    let mut grouped = String::with_capacity(formatted.len() + int_len / 3);
    grouped.push_str(sign);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int_len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(tail);
    grouped
}

impl ValueFormat {
    #[must_use]
    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_owned();
        }
        if value.is_infinite() {
            return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
        }

        let formatted = match self.kind {
            FormatKind::General => match self.precision {
                Some(p) => format_number(round_significant(value, p.max(1))),
                None => format_number(value),
            },
            FormatKind::Fixed => {
                format!("{:.*}", self.precision.unwrap_or(DEFAULT_PRECISION), value)
            }
            FormatKind::Integer => format!("{:.0}", value.round()),
            FormatKind::Percent => format!(
                "{:.*}%",
                self.precision.unwrap_or(DEFAULT_PRECISION),
                value * 100.0
            ),
            FormatKind::Exponent => {
                let raw = format!("{:.*e}", self.precision.unwrap_or(DEFAULT_PRECISION), value);
                match raw.split_once('e') {
                    Some((mantissa, exp)) => match exp.strip_prefix('-') {
                        Some(abs) => format!("{mantissa}e-{abs}"),
                        None => format!("{mantissa}e+{exp}"),
                    },
                    None => raw,
                }
            }
            FormatKind::SiPrefix => self.format_si(value),
        };

        if self.grouping && self.kind != FormatKind::Exponent {
            group_thousands(&formatted)
        } else {
            formatted
        }
    }

    fn format_si(&self, value: f64) -> String {
        let digits = self.precision.unwrap_or(DEFAULT_PRECISION).max(1);
        let rounded = round_significant(value, digits);
        if rounded == 0.0 {
            return format!("{:.*}", digits - 1, 0.0);
        }
        let exp10 = rounded.abs().log10().floor() as i32;
        let k = exp10.div_euclid(3).clamp(-8, 8);
        let scaled = rounded / 1000f64.powi(k);
        let decimals = (digits as i32 - 1 - (exp10 - 3 * k)).max(0) as usize;
        let prefix = SI_PREFIXES[(k + 8) as usize];
        format!("{scaled:.decimals$}{prefix}")
    }
}

type FormatCallback = dyn Fn(&Value) -> String + Send + Sync;

/// Runtime-only formatting closure.
#[derive(Clone)]
pub struct FormatFn(Arc<FormatCallback>);

impl FormatFn {
    pub fn new(f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn call(&self, value: &Value) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for FormatFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FormatFn(..)")
    }
}

impl PartialEq for FormatFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Formatter for one tooltip field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Formatter {
    #[default]
    Identity,
    Pattern(ValueFormat),
    Custom(FormatFn),
}

impl Formatter {
    /// `Identity` for `None`, otherwise a parsed [`ValueFormat`].
    pub fn parse(pattern: Option<&str>) -> GraphResult<Self> {
        pattern.map_or(Ok(Self::Identity), |p| p.parse().map(Self::Pattern))
    }

    /// Formats an index value or series key. Patterns only apply to labels
    /// that read as numbers.
    #[must_use]
    pub fn label(&self, label: &str) -> String {
        match self {
            Self::Identity => label.to_owned(),
            Self::Pattern(format) => label
                .trim()
                .parse::<f64>()
                .map_or_else(|_| label.to_owned(), |v| format.format(v)),
            Self::Custom(f) => f.call(&Value::String(label.to_owned())),
        }
    }

    #[must_use]
    pub fn value(&self, value: f64) -> String {
        match self {
            Self::Identity => format_number(value),
            Self::Pattern(format) => format.format(value),
            Self::Custom(f) => {
                let value = serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number);
                f.call(&value)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipFormatters {
    pub index: Formatter,
    pub key: Formatter,
    pub value: Formatter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
    pub color: Option<String>,
    pub emphasized: bool,
    /// Secondary value shown after the main one (line series totals).
    pub aside: Option<String>,
}

/// Renderer-agnostic tooltip content.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipModel {
    pub title: String,
    pub rows: Vec<TooltipRow>,
    pub total: Option<String>,
}

fn record_value(datum: &HoveredDatum, key: &str) -> f64 {
    datum
        .record
        .as_ref()
        .map_or(0.0, |record| record.number_or_zero(key))
}

/// Bar tooltip: one row per key, top of the stack first.
#[must_use]
pub fn bar_tooltip(
    datum: &HoveredDatum,
    keys: &[String],
    fmt: &TooltipFormatters,
    show_totals: bool,
) -> TooltipModel {
    let hovered = datum.key.as_deref();
    let rows = keys
        .iter()
        .rev()
        .map(|key| {
            let emphasized = hovered == Some(key.as_str());
            TooltipRow {
                label: fmt.key.label(key),
                value: fmt.value.value(record_value(datum, key)),
                color: if emphasized { datum.color.clone() } else { None },
                emphasized,
                aside: None,
            }
        })
        .collect();
    let total = (show_totals && keys.len() > 1)
        .then(|| fmt.value.value(keys.iter().map(|k| record_value(datum, k)).sum()));

    TooltipModel {
        title: fmt.index.label(&datum.identity),
        rows,
        total,
    }
}

/// Grid tooltip: the hovered column across every row.
#[must_use]
pub fn grid_tooltip(
    datum: &HoveredDatum,
    extras: &GridExtras,
    row_ids: &[String],
    fmt: &TooltipFormatters,
) -> TooltipModel {
    let key = datum.key.clone().unwrap_or_default();
    let column = extras.index_data.get(&key);
    let rows = row_ids
        .iter()
        .map(|row| {
            let entry = column.and_then(|c| c.get(row));
            TooltipRow {
                label: fmt.index.label(row),
                value: fmt
                    .value
                    .value(entry.and_then(|e| e.value).unwrap_or(0.0)),
                color: entry.map(|e| e.color.clone()),
                emphasized: *row == datum.identity,
                aside: None,
            }
        })
        .collect();

    TooltipModel {
        title: fmt.key.label(&key),
        rows,
        total: None,
    }
}

/// Line tooltip: every series at the slice, largest series total first.
#[must_use]
pub fn line_tooltip(
    slice: &SliceBand,
    totals: &IndexMap<String, f64>,
    fmt: &TooltipFormatters,
) -> TooltipModel {
    let total_of = |key: &str| totals.get(key).copied().unwrap_or(0.0);
    let mut entries: Vec<_> = slice.entries.iter().collect();
    entries.sort_by_key(|e| std::cmp::Reverse(OrderedFloat(total_of(&e.key))));

    TooltipModel {
        title: fmt.index.label(&slice.index),
        rows: entries
            .into_iter()
            .map(|entry| TooltipRow {
                label: fmt.key.label(&entry.key),
                value: fmt.value.value(entry.value),
                color: Some(entry.color.clone()),
                emphasized: entry.is_max,
                aside: Some(fmt.value.value(total_of(&entry.key))),
            })
            .collect(),
        total: None,
    }
}

/// Pie tooltip: every key with its color, hovered wedge emphasised.
#[must_use]
pub fn pie_tooltip(
    datum: &HoveredDatum,
    pie: &PieShape,
    keys: &[String],
    fmt: &TooltipFormatters,
    show_totals: bool,
) -> TooltipModel {
    let hovered = datum.key.as_deref();
    let rows = keys
        .iter()
        .map(|key| TooltipRow {
            label: fmt.key.label(key),
            value: fmt.value.value(record_value(datum, key)),
            color: pie.color_map.get(key).cloned(),
            emphasized: hovered == Some(key.as_str()),
            aside: None,
        })
        .collect();
    let total = (show_totals && keys.len() > 1).then(|| fmt.value.value(pie.total));

    TooltipModel {
        title: fmt.index.label(&datum.identity),
        rows,
        total,
    }
}

/// Where the tooltip sits relative to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipPlacement {
    /// Beside the pointer, on the side facing the plot center.
    #[default]
    Side,
    /// Centered above the pointer.
    Above,
}

/// Top-left corner of a `size` tooltip for a pointer at `pointer`, both in
/// container coordinates. The tooltip is kept inside the plot margins.
#[must_use]
pub fn place_tooltip(
    placement: TooltipPlacement,
    pointer: (f64, f64),
    size: (f64, f64),
    viewport: Viewport,
    margin: Margin,
) -> (f64, f64) {
    let (x, y) = pointer;
    let (w, h) = size;
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);

    match placement {
        TooltipPlacement::Above => {
            let max_x = width - margin.right;
            let left = (x - w * 0.5)
                .min(max_x - TOOLTIP_GAP - w)
                .max(margin.left + TOOLTIP_GAP);
            (left, y - TOOLTIP_GAP - h)
        }
        TooltipPlacement::Side => {
            let max_y = height - margin.bottom;
            let top = (y - TOOLTIP_GAP)
                .min(max_y - TOOLTIP_GAP - h)
                .max(margin.top + TOOLTIP_GAP);
            let plot_mid = margin.left + (width - margin.left - margin.right) * 0.5;
            let left = if x < plot_mid {
                x + TOOLTIP_GAP
            } else {
                x - TOOLTIP_GAP - w
            };
            (left, top)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(pattern: &str) -> ValueFormat {
        pattern.parse().expect("valid pattern")
    }

    #[test]
    fn fixed_and_grouped_formats() {
        assert_eq!(fmt(".2f").format(3.14159), "3.14");
        assert_eq!(fmt(",.0f").format(1234567.0), "1,234,567");
        assert_eq!(fmt(",d").format(-9876.4), "-9,876");
        assert_eq!(fmt(".1%").format(0.256), "25.6%");
    }

    #[test]
    fn exponent_and_si_formats() {
        assert_eq!(fmt(".2e").format(12345.0), "1.23e+4");
        assert_eq!(fmt(".2e").format(0.00012), "1.20e-4");
        assert_eq!(fmt(".3s").format(1234.0), "1.23k");
        assert_eq!(fmt(".3s").format(1_500_000.0), "1.50M");
        assert_eq!(fmt(".2s").format(0.0), "0.0");
    }

    #[test]
    fn general_format_trims_trailing_zeros() {
        assert_eq!(fmt(".3").format(2.5), "2.5");
        assert_eq!(fmt(".2").format(1234.0), "1200");
        assert_eq!(fmt("").format(7.0), "7");
    }

    #[test]
    fn invalid_patterns_are_configuration_errors() {
        for pattern in [".f", "x", ".2q", ",,d"] {
            let err = pattern.parse::<ValueFormat>().expect_err("must be rejected");
            assert!(err.is_configuration_error(), "{pattern}");
        }
    }

    #[test]
    fn side_placement_flips_past_the_plot_center() {
        let viewport = Viewport::new(400, 300);
        let margin = Margin::new(20.0, 20.0, 20.0, 20.0);
        let left = place_tooltip(TooltipPlacement::Side, (100.0, 150.0), (80.0, 40.0), viewport, margin);
        assert_eq!(left, (120.0, 130.0));
        let right = place_tooltip(TooltipPlacement::Side, (300.0, 150.0), (80.0, 40.0), viewport, margin);
        assert_eq!(right, (200.0, 130.0));
    }

    #[test]
    fn above_placement_is_clamped_to_the_margins() {
        let viewport = Viewport::new(400, 300);
        let margin = Margin::new(20.0, 20.0, 20.0, 20.0);
        let placed = place_tooltip(TooltipPlacement::Above, (10.0, 100.0), (80.0, 40.0), viewport, margin);
        assert_eq!(placed, (40.0, 40.0));
    }
}
