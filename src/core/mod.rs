pub mod color;
pub mod domain;
pub mod record;
pub mod scale;
pub mod scale_builder;
pub mod types;

pub use color::{ColorContext, ColorFn, ColorResolver, ColorSpec};
pub use domain::{index_domain, record_aggregate, value_extent};
pub use record::Record;
pub use scale::{
    BandScale, ContinuousKind, ContinuousScale, IndexScale, OrdinalScale, PointScale,
    QuantileScale, QuantizeScale, ScaleType, ValueScale,
};
pub use scale_builder::{BandPadding, ScaleOptions, ValueAxis, build_index_scale, build_value_scale};
pub use types::{GroupMode, Margin, Orientation, PlotArea, Viewport};
