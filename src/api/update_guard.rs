use tracing::warn;

use crate::core::Viewport;

use super::GraphConfig;

/// Config field names accepted in `shouldUpdateOn`.
pub const WATCHABLE_FIELDS: [&str; 19] = [
    "kind",
    "data",
    "keys",
    "indexBy",
    "groupMode",
    "orientation",
    "margin",
    "padding",
    "paddingInner",
    "paddingOuter",
    "xScale",
    "yScale",
    "colors",
    "showAnimations",
    "hoverComp",
    "startAngle",
    "endAngle",
    "padAngle",
    "shouldUpdateOn",
];

/// What a render cycle was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSnapshot {
    pub viewport: Viewport,
    pub config: GraphConfig,
}

impl UpdateSnapshot {
    #[must_use]
    pub fn capture(viewport: Viewport, config: &GraphConfig) -> Self {
        Self {
            viewport,
            config: config.clone(),
        }
    }
}

/// Whether `next` needs a new cycle after `prev`.
///
/// Always true for the first cycle and after a viewport change. Otherwise
/// only the fields listed in `next.config.should_update_on` are compared;
/// an empty list recomputes every time.
#[must_use]
pub fn should_recompute(prev: Option<&UpdateSnapshot>, next: &UpdateSnapshot) -> bool {
    let Some(prev) = prev else {
        return true;
    };
    if prev.viewport != next.viewport {
        return true;
    }
    let watched = &next.config.should_update_on;
    if watched.is_empty() {
        return true;
    }
    watched
        .iter()
        .any(|field| field_changed(&prev.config, &next.config, field))
}

fn field_changed(a: &GraphConfig, b: &GraphConfig, field: &str) -> bool {
    match field {
        "kind" => a.kind != b.kind,
        "data" => a.data != b.data,
        "keys" => a.keys != b.keys,
        "indexBy" => a.index_by != b.index_by,
        "groupMode" => a.group_mode != b.group_mode,
        "orientation" => a.orientation != b.orientation,
        "margin" => a.margin != b.margin,
        "padding" => a.padding != b.padding,
        "paddingInner" => a.padding_inner != b.padding_inner,
        "paddingOuter" => a.padding_outer != b.padding_outer,
        "xScale" => a.x_scale != b.x_scale,
        "yScale" => a.y_scale != b.y_scale,
        "colors" => a.colors != b.colors,
        "showAnimations" => a.show_animations != b.show_animations,
        "hoverComp" => a.hover_comp != b.hover_comp,
        "startAngle" => a.angles.start_angle != b.angles.start_angle,
        "endAngle" => a.angles.end_angle != b.angles.end_angle,
        "padAngle" => a.angles.pad_angle != b.angles.pad_angle,
        "shouldUpdateOn" => a.should_update_on != b.should_update_on,
        other => {
            warn!(field = other, "unknown shouldUpdateOn field, treating as changed");
            true
        }
    }
}
