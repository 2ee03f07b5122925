mod frame;
mod null_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;

use crate::error::GraphResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from data binding and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()>;
}
