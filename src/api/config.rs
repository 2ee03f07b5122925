use serde::{Deserialize, Serialize};

use crate::core::scale::check_padding;
use crate::core::{
    BandPadding, ColorResolver, ColorSpec, GroupMode, Margin, Orientation, Record, ScaleOptions,
};
use crate::error::{GraphError, GraphResult};
use crate::interaction::{FormatFn, Formatter, TooltipFormatters, TooltipPlacement};
use crate::layout::{LayoutKind, PieAngles};

use super::update_guard::WATCHABLE_FIELDS;

/// Graph family rendered by an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    #[default]
    Bar,
    Line,
    Grid,
    Pie,
}

/// Tooltip configuration.
///
/// Format strings follow the `[,][.precision][f|d|%|e|s]` pattern. A closure
/// set at runtime takes precedence over the matching format string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverCompConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    #[serde(default)]
    pub position: TooltipPlacement,
    #[serde(default = "default_show_totals")]
    pub show_totals: bool,
    #[serde(skip)]
    pub index_fn: Option<FormatFn>,
    #[serde(skip)]
    pub key_fn: Option<FormatFn>,
    #[serde(skip)]
    pub value_fn: Option<FormatFn>,
}

impl Default for HoverCompConfig {
    fn default() -> Self {
        Self {
            index_format: None,
            key_format: None,
            value_format: None,
            position: TooltipPlacement::default(),
            show_totals: default_show_totals(),
            index_fn: None,
            key_fn: None,
            value_fn: None,
        }
    }
}

impl HoverCompConfig {
    /// Resolves the three tooltip formatters.
    pub fn formatters(&self) -> GraphResult<TooltipFormatters> {
        let pick = |f: &Option<FormatFn>, pattern: &Option<String>| match f {
            Some(f) => Ok(Formatter::Custom(f.clone())),
            None => Formatter::parse(pattern.as_deref()),
        };
        Ok(TooltipFormatters {
            index: pick(&self.index_fn, &self.index_format)?,
            key: pick(&self.key_fn, &self.key_format)?,
            value: pick(&self.value_fn, &self.value_format)?,
        })
    }
}

/// Declarative description of one graph.
///
/// This type is serializable so host applications can persist or ship chart
/// setup as JSON; runtime closures (custom colors, formatters) are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfig {
    #[serde(default)]
    pub kind: GraphKind,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default = "default_index_by")]
    pub index_by: String,
    #[serde(default)]
    pub group_mode: GroupMode,
    #[serde(default)]
    pub orientation: Orientation,
    /// Defaults depend on the graph kind, see [`GraphConfig::resolved_margin`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default)]
    pub padding_inner: f64,
    #[serde(default)]
    pub padding_outer: f64,
    #[serde(default)]
    pub x_scale: ScaleOptions,
    #[serde(default)]
    pub y_scale: ScaleOptions,
    #[serde(default, skip_serializing_if = "is_runtime_only")]
    pub colors: Option<ColorSpec>,
    #[serde(default = "default_show_animations")]
    pub show_animations: bool,
    #[serde(default)]
    pub hover_comp: HoverCompConfig,
    #[serde(flatten)]
    pub angles: PieAngles,
    /// Config fields (camelCase names) whose change triggers a recompute.
    /// Empty means every change does.
    #[serde(default)]
    pub should_update_on: Vec<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new(GraphKind::default())
    }
}

impl GraphConfig {
    #[must_use]
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            data: Vec::new(),
            keys: Vec::new(),
            index_by: default_index_by(),
            group_mode: GroupMode::default(),
            orientation: Orientation::default(),
            margin: None,
            padding: None,
            padding_inner: 0.0,
            padding_outer: 0.0,
            x_scale: ScaleOptions::default(),
            y_scale: ScaleOptions::default(),
            colors: None,
            show_animations: default_show_animations(),
            hover_comp: HoverCompConfig::default(),
            angles: PieAngles::default(),
            should_update_on: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<Record>) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_index_by(mut self, index_by: impl Into<String>) -> Self {
        self.index_by = index_by.into();
        self
    }

    #[must_use]
    pub fn with_group_mode(mut self, mode: GroupMode) -> Self {
        self.group_mode = mode;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorSpec) -> Self {
        self.colors = Some(colors);
        self
    }

    #[must_use]
    pub fn with_show_animations(mut self, show: bool) -> Self {
        self.show_animations = show;
        self
    }

    #[must_use]
    pub fn with_should_update_on<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.should_update_on = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidData(format!("failed to parse graph config: {e}")))
    }

    pub fn to_json_string(&self) -> GraphResult<String> {
        serde_json::to_string(self)
            .map_err(|e| GraphError::InvalidData(format!("failed to serialize graph config: {e}")))
    }

    /// Explicit margin, or the kind's default (pies draw no axes).
    #[must_use]
    pub fn resolved_margin(&self) -> Margin {
        self.margin.unwrap_or(match self.kind {
            GraphKind::Pie => Margin::pie_default(),
            _ => Margin::axis_default(),
        })
    }

    #[must_use]
    pub fn layout_kind(&self) -> LayoutKind {
        match (self.kind, self.group_mode) {
            (GraphKind::Bar, GroupMode::Stacked) => LayoutKind::Stacked,
            (GraphKind::Bar, GroupMode::Grouped) => LayoutKind::Grouped,
            (GraphKind::Line, _) => LayoutKind::Line,
            (GraphKind::Grid, _) => LayoutKind::Grid,
            (GraphKind::Pie, _) => LayoutKind::Pie,
        }
    }

    #[must_use]
    pub fn band_padding(&self) -> BandPadding {
        BandPadding {
            padding: self.padding,
            inner: self.padding_inner,
            outer: self.padding_outer,
        }
    }

    /// Checks everything that can be checked without running a cycle.
    ///
    /// Returns the color resolver and tooltip formatters on success so the
    /// render cycle does not parse them twice.
    pub fn validate(&self) -> GraphResult<(ColorResolver, TooltipFormatters)> {
        self.resolved_margin().validate()?;
        if self.index_by.is_empty() {
            return Err(GraphError::config("indexBy", "must not be empty"));
        }
        check_padding("padding", self.padding)?;
        check_padding("paddingInner", Some(self.padding_inner))?;
        if !self.padding_outer.is_finite() || self.padding_outer < 0.0 {
            return Err(GraphError::config("paddingOuter", "must be finite and >= 0"));
        }
        self.x_scale.validate("xScale")?;
        self.y_scale.validate("yScale")?;

        let PieAngles {
            start_angle,
            end_angle,
            pad_angle,
        } = self.angles;
        if !(start_angle.is_finite() && end_angle.is_finite()) {
            return Err(GraphError::config("startAngle", "angles must be finite"));
        }
        if !pad_angle.is_finite() || pad_angle < 0.0 {
            return Err(GraphError::config("padAngle", "must be finite and >= 0"));
        }

        if let Some(field) = self
            .should_update_on
            .iter()
            .find(|f| !WATCHABLE_FIELDS.contains(&f.as_str()))
        {
            return Err(GraphError::config(
                "shouldUpdateOn",
                format!("unknown config field `{field}`"),
            ));
        }

        let colors = ColorResolver::new(self.colors.as_ref())?;
        let formatters = self.hover_comp.formatters()?;
        Ok((colors, formatters))
    }
}

/// Custom color closures cannot be written out.
fn is_runtime_only(colors: &Option<ColorSpec>) -> bool {
    matches!(colors, None | Some(ColorSpec::Custom(_)))
}

fn default_index_by() -> String {
    "index".to_owned()
}

fn default_show_animations() -> bool {
    true
}

fn default_show_totals() -> bool {
    true
}
