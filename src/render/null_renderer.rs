use crate::error::GraphResult;
use crate::layout::Lifecycle;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_shape_count: usize,
    pub last_exiting_count: usize,
    pub last_transition_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_shape_count = frame.shapes.len();
        self.last_exiting_count = frame.count(Lifecycle::Exiting);
        self.last_transition_count = frame.transitions.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
