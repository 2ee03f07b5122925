use std::time::Duration;

use tracing::{debug, trace};

use crate::error::GraphResult;
use crate::render::Renderer;

use super::GraphEngine;

impl<R: Renderer> GraphEngine<R> {
    /// Timer callback: fires due exit prunes and applies a deferred hover move.
    ///
    /// Re-renders the current frame (without replaying transitions) when
    /// anything changed. Returns whether it did. A no-op once disposed.
    pub fn tick(&mut self, now: Duration) -> GraphResult<bool> {
        if self.disposed {
            trace!("tick ignored, graph engine disposed");
            return Ok(false);
        }

        let mut changed = false;
        let due = self.exits.take_due(now);
        if !due.is_empty() {
            let pruned = self.registry.prune(&due);
            debug!(due = due.len(), pruned = pruned.len(), "exit prune fired");
            // An error frame stays empty until a cycle succeeds again.
            if !pruned.is_empty() && self.frame.error.is_none() {
                self.frame.shapes = self.registry.shapes();
                self.frame.transitions.clear();
                changed = true;
            }
        }

        if self.hover.flush(now) {
            self.frame.hover = self.hover.state().clone();
            changed = true;
        }

        if changed {
            self.renderer.render(&self.frame)?;
        }
        Ok(changed)
    }

    /// Earliest time `tick` has work to do, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.exits.next_due()
    }

    /// Number of scheduled, not yet fired exit prunes.
    #[must_use]
    pub fn pending_exits(&self) -> usize {
        self.exits.pending()
    }
}
