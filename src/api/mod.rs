mod config;
mod data_controller;
mod engine;
mod exit_controller;
mod interaction_controller;
mod render_cycle;
mod update_guard;

pub use config::{GraphConfig, GraphKind, HoverCompConfig};
pub use engine::GraphEngine;
pub use update_guard::{UpdateSnapshot, WATCHABLE_FIELDS, should_recompute};
