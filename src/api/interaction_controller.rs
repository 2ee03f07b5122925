use std::time::Duration;

use tracing::trace;

use crate::error::GraphResult;
use crate::interaction::{
    HoverState, HoveredDatum, PointerEvent, TooltipModel, bar_tooltip, grid_tooltip, hit_test,
    line_tooltip, pie_tooltip, place_tooltip,
};
use crate::layout::{LayoutExtras, ShapeGeometry};
use crate::render::Renderer;

use super::{GraphEngine, GraphKind};

impl<R: Renderer> GraphEngine<R> {
    #[must_use]
    pub fn hover_state(&self) -> &HoverState {
        self.hover.state()
    }

    /// Pointer move at client coordinates over a container whose top-left
    /// corner is at `origin`. The hovered datum is found by hit-testing the
    /// current frame; missing everything counts as leaving.
    pub fn pointer_move(
        &mut self,
        event: PointerEvent,
        origin: (f64, f64),
        now: Duration,
    ) -> GraphResult<bool> {
        if self.disposed {
            trace!("pointer move ignored, graph engine disposed");
            return Ok(false);
        }
        let (x, y) = event.relative_to(origin);
        let margin = self.frame.margin;
        let hit = hit_test(
            &self.frame.shapes,
            &self.frame.extras,
            self.frame.plot.height,
            x - margin.left,
            y - margin.top,
        );
        match hit {
            Some(datum) => self.pointer_move_over(event, origin, datum, now),
            None => self.pointer_leave(),
        }
    }

    /// Pointer move over a datum the host resolved itself.
    pub fn pointer_move_over(
        &mut self,
        event: PointerEvent,
        origin: (f64, f64),
        datum: HoveredDatum,
        now: Duration,
    ) -> GraphResult<bool> {
        if self.disposed {
            trace!("pointer move ignored, graph engine disposed");
            return Ok(false);
        }
        if !self.hover.on_pointer_move(event, origin, datum, now) {
            return Ok(false);
        }
        self.frame.hover = self.hover.state().clone();
        self.renderer.render(&self.frame)?;
        Ok(true)
    }

    pub fn pointer_leave(&mut self) -> GraphResult<bool> {
        if self.disposed {
            trace!("pointer leave ignored, graph engine disposed");
            return Ok(false);
        }
        if !self.hover.on_pointer_leave() {
            return Ok(false);
        }
        self.frame.hover = self.hover.state().clone();
        self.renderer.render(&self.frame)?;
        Ok(true)
    }

    /// Tooltip content for the current hover, if visible.
    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipModel> {
        let state = self.hover.state();
        let datum = state.datum.as_ref().filter(|_| state.visible)?;
        let fmt = &self.formatters;
        let show_totals = self.config.hover_comp.show_totals;

        match (&self.frame.extras, self.config.kind) {
            (LayoutExtras::Line(line), GraphKind::Line) => line
                .slices
                .iter()
                .find(|slice| slice.index == datum.identity)
                .map(|slice| line_tooltip(slice, &line.totals, fmt)),
            (LayoutExtras::Grid(grid), GraphKind::Grid) => {
                Some(grid_tooltip(datum, grid, &self.frame.index_domain, fmt))
            }
            (LayoutExtras::Pie(_), GraphKind::Pie) => {
                let shape = self.frame.shape(&datum.identity)?;
                match &shape.geometry {
                    ShapeGeometry::Pie(pie) => {
                        Some(pie_tooltip(datum, pie, &self.config.keys, fmt, show_totals))
                    }
                    _ => None,
                }
            }
            (_, GraphKind::Bar) => Some(bar_tooltip(datum, &self.config.keys, fmt, show_totals)),
            _ => None,
        }
    }

    /// Top-left corner, in container coordinates, for a tooltip of `size`.
    #[must_use]
    pub fn tooltip_position(&self, size: (f64, f64)) -> Option<(f64, f64)> {
        let state = self.hover.state();
        state.visible.then(|| {
            place_tooltip(
                self.config.hover_comp.position,
                state.position,
                size,
                self.viewport,
                self.frame.margin,
            )
        })
    }
}
