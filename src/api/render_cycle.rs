use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::core::{ColorResolver, Margin, PlotArea};
use crate::error::{GraphError, GraphResult};
use crate::layout::{Projection, ProjectionInput, project};
use crate::render::{RenderFrame, Renderer};
use crate::transition::{
    CollapseTarget, DEFAULT_ANIMATION_DURATION, DEFAULT_EXIT_DELAY, TransitionContext, classify,
};

use super::{GraphEngine, UpdateSnapshot, should_recompute};

impl<R: Renderer> GraphEngine<R> {
    /// Runs one render cycle if the update guard asks for it.
    ///
    /// Pipeline: scales, projection, classification, exit scheduling, then
    /// the frame goes to the renderer. Returns whether a cycle ran. A
    /// configuration error renders an empty frame carrying the error and is
    /// returned to the caller.
    pub fn update(&mut self, now: Duration) -> GraphResult<bool> {
        if self.disposed {
            warn!("update called on a disposed graph engine");
            return Err(GraphError::Disposed);
        }

        let snapshot = UpdateSnapshot::capture(self.viewport, &self.config);
        if !should_recompute(self.last_snapshot.as_ref(), &snapshot) {
            trace!("watched config unchanged, skipping cycle");
            return Ok(false);
        }

        let margin = self.config.resolved_margin();
        let plot = PlotArea::from_viewport(self.viewport, margin);
        if plot.is_empty() {
            debug!(
                width = self.viewport.width,
                height = self.viewport.height,
                "plot area is empty, skipping cycle"
            );
            return Ok(false);
        }

        debug!(
            cycle = self.cycles + 1,
            kind = ?self.config.kind,
            records = self.config.data.len(),
            "render cycle start"
        );

        match self.run_cycle(now, margin, plot) {
            Ok(frame) => {
                self.renderer.render(&frame)?;
                self.frame = frame;
                self.last_snapshot = Some(snapshot);
                self.cycles += 1;
                Ok(true)
            }
            Err(err) if err.is_configuration_error() => {
                warn!(error = %err, "render cycle rejected configuration");
                self.frame = RenderFrame::new(self.viewport, margin).with_error(err.clone());
                self.frame.hover = self.hover.state().clone();
                self.renderer.render(&self.frame)?;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn run_cycle(
        &mut self,
        now: Duration,
        margin: Margin,
        plot: PlotArea,
    ) -> GraphResult<RenderFrame> {
        let (colors, formatters) = self.config.validate()?;
        let projection = self.project(plot, &colors)?;

        let (duration, exit_delay) = if self.config.show_animations {
            (DEFAULT_ANIMATION_DURATION, DEFAULT_EXIT_DELAY)
        } else {
            (Duration::ZERO, Duration::ZERO)
        };
        let ctx = TransitionContext {
            collapse: CollapseTarget {
                orientation: self.config.orientation,
                plot,
            },
            duration,
        };
        let classification = classify(projection.shapes, &mut self.registry, &ctx)?;

        for identity in &classification.revived {
            self.exits.revive(identity);
        }
        self.exits
            .schedule(classification.newly_exiting.iter().cloned(), now, exit_delay);
        self.formatters = formatters;

        let mut frame = RenderFrame::new(self.viewport, margin);
        frame.shapes = classification.shapes();
        frame.transitions = classification.transitions;
        frame.index_domain = projection.index_domain;
        frame.index_scale = projection.index_scale;
        if let Some(axis) = projection.value_axis {
            frame.value_domain = Some(axis.domain);
            frame.value_scale = Some(axis.scale);
        }
        frame.extras = projection.extras;
        frame.hover = self.hover.state().clone();
        Ok(frame)
    }

    fn project(
        &self,
        plot: PlotArea,
        colors: &ColorResolver,
    ) -> GraphResult<Projection> {
        let config = &self.config;
        project(&ProjectionInput {
            kind: config.layout_kind(),
            records: &config.data,
            keys: &config.keys,
            index_by: &config.index_by,
            orientation: config.orientation,
            plot,
            padding: config.band_padding(),
            index_scale: &config.x_scale,
            value_scale: &config.y_scale,
            colors,
            pie: config.angles,
        })
    }
}
