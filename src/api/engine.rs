use tracing::debug;

use crate::core::Viewport;
use crate::error::{GraphError, GraphResult};
use crate::interaction::{HoverRegistry, TooltipFormatters};
use crate::render::{RenderFrame, Renderer};
use crate::transition::{ExitScheduler, IdentityRegistry};

use super::{GraphConfig, UpdateSnapshot};

/// Main orchestration facade consumed by host applications.
///
/// `GraphEngine` owns one chart instance: its configuration, the identity
/// registry carried across cycles, pending exit prunes and hover state.
/// Time is always passed in by the host as a `Duration` since an arbitrary
/// origin, which keeps every timer deterministic.
pub struct GraphEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) config: GraphConfig,
    pub(super) registry: IdentityRegistry,
    pub(super) exits: ExitScheduler,
    pub(super) hover: HoverRegistry,
    pub(super) formatters: TooltipFormatters,
    pub(super) last_snapshot: Option<UpdateSnapshot>,
    pub(super) frame: RenderFrame,
    pub(super) cycles: u64,
    pub(super) disposed: bool,
}

impl<R: Renderer> GraphEngine<R> {
    pub fn new(renderer: R, viewport: Viewport, config: GraphConfig) -> GraphResult<Self> {
        if !viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let frame = RenderFrame::new(viewport, config.resolved_margin());

        Ok(Self {
            renderer,
            viewport,
            config,
            registry: IdentityRegistry::new(),
            exits: ExitScheduler::new(),
            hover: HoverRegistry::default(),
            formatters: TooltipFormatters::default(),
            last_snapshot: None,
            frame,
            cycles: 0,
            disposed: false,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frame produced by the latest cycle, prune or hover change.
    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    /// Number of completed render cycles.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Tears the instance down: cancels every pending prune, clears hover and
    /// empties the identity registry.
    ///
    /// Later timer and pointer callbacks are no-ops; [`GraphEngine::update`]
    /// returns [`GraphError::Disposed`].
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let registered = self.registry.len();
        self.exits.cancel_all();
        self.hover.clear();
        self.registry.clear();
        self.disposed = true;
        debug!(registered, "graph engine disposed");
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
