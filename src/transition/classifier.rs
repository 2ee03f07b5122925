use std::time::Duration;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::layout::{Lifecycle, ShapeRecord};
use crate::transition::animation::{CollapseTarget, ShapeTransition, collapsed};
use crate::transition::registry::IdentityRegistry;

/// Per-cycle context the classifier needs to build transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionContext {
    pub collapse: CollapseTarget,
    pub duration: Duration,
}

/// Result of diffing a freshly projected frame against the registry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    /// The new frame in projection order, tagged `Entering` or `Updating`.
    pub current: Vec<ShapeRecord>,
    /// Shapes frozen at their last geometry, waiting for their exit prune.
    pub exiting: Vec<ShapeRecord>,
    /// One transition per shape whose lifecycle or geometry changed this cycle.
    pub transitions: Vec<ShapeTransition>,
    /// Identities that disappeared this cycle and need an exit prune scheduled.
    pub newly_exiting: Vec<String>,
    /// Identities that were exiting and came back; their pending prune must
    /// be cancelled.
    pub revived: Vec<String>,
}

impl Classification {
    /// Everything to draw this cycle: `current` first, then `exiting`.
    #[must_use]
    pub fn shapes(&self) -> Vec<ShapeRecord> {
        self.current.iter().chain(&self.exiting).cloned().collect()
    }

    #[must_use]
    pub fn count(&self, lifecycle: Lifecycle) -> usize {
        self.current
            .iter()
            .chain(&self.exiting)
            .filter(|shape| shape.lifecycle == lifecycle)
            .count()
    }
}

/// Classifies `new_shapes` against `registry` and replaces the registry
/// content with the result.
///
/// - identity absent from the registry: `Entering`
/// - identity present (live or exiting): `Updating`
/// - registry identity absent from `new_shapes`: `Exiting`, frozen at its
///   last geometry. Shapes that were already exiting keep their state and get
///   no new transition.
///
/// Fails with [`GraphError::DuplicateIdentity`] before touching the registry
/// when two new shapes share an identity.
pub fn classify(
    new_shapes: Vec<ShapeRecord>,
    registry: &mut IdentityRegistry,
    ctx: &TransitionContext,
) -> GraphResult<Classification> {
    let mut seen = IndexSet::with_capacity(new_shapes.len());
    for shape in &new_shapes {
        if !seen.insert(shape.identity.as_str()) {
            return Err(GraphError::DuplicateIdentity {
                identity: shape.identity.clone(),
            });
        }
    }

    let mut previous = registry.take_all();
    let mut next: IndexMap<String, ShapeRecord> =
        IndexMap::with_capacity(new_shapes.len() + previous.len());
    let mut out = Classification::default();

    for mut shape in new_shapes {
        let from = match previous.shift_remove(&shape.identity) {
            Some(prev) => {
                if prev.is_exiting() {
                    out.revived.push(shape.identity.clone());
                }
                shape.lifecycle = Lifecycle::Updating;
                prev.geometry
            }
            None => {
                shape.lifecycle = Lifecycle::Entering;
                collapsed(&shape.geometry, ctx.collapse)
            }
        };
        if from != shape.geometry {
            out.transitions.push(ShapeTransition {
                identity: shape.identity.clone(),
                lifecycle: shape.lifecycle,
                from,
                to: shape.geometry.clone(),
                duration: ctx.duration,
            });
        }
        out.current.push(shape.clone());
        next.insert(shape.identity.clone(), shape);
    }

    for (identity, mut shape) in previous {
        if !shape.is_exiting() {
            shape.lifecycle = Lifecycle::Exiting;
            out.newly_exiting.push(identity.clone());
            out.transitions.push(ShapeTransition {
                identity: identity.clone(),
                lifecycle: Lifecycle::Exiting,
                from: shape.geometry.clone(),
                to: collapsed(&shape.geometry, ctx.collapse),
                duration: ctx.duration,
            });
        }
        out.exiting.push(shape.clone());
        next.insert(identity, shape);
    }

    registry.replace_all(next);

    debug!(
        entering = out.count(Lifecycle::Entering),
        updating = out.count(Lifecycle::Updating),
        exiting = out.count(Lifecycle::Exiting),
        newly_exiting = out.newly_exiting.len(),
        revived = out.revived.len(),
        "classified frame"
    );
    Ok(out)
}
