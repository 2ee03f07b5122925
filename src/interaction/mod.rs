//! Pointer-driven hover state and tooltip content.

mod hit_test;
mod hover;
mod tooltip;

pub use hit_test::hit_test;
pub use hover::{DEFAULT_HOVER_THROTTLE, HoverRegistry, HoverState, HoveredDatum, PointerEvent};
pub use tooltip::{
    FormatFn, FormatKind, Formatter, TOOLTIP_GAP, TooltipFormatters, TooltipModel,
    TooltipPlacement, TooltipRow, ValueFormat, bar_tooltip, grid_tooltip, line_tooltip,
    pie_tooltip, place_tooltip,
};
