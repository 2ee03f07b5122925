//! Enter / update / exit choreography across render cycles.

mod animation;
mod classifier;
mod exit_scheduler;
mod registry;

pub use animation::{
    CollapseTarget, DEFAULT_ANIMATION_DURATION, DEFAULT_EXIT_DELAY, ShapeTransition, collapsed,
    ease_cubic_in_out, lerp,
};
pub use classifier::{Classification, TransitionContext, classify};
pub use exit_scheduler::{ExitScheduler, ExitToken};
pub use registry::IdentityRegistry;

pub use crate::layout::Lifecycle;
