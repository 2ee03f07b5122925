//! graph-rs: data-binding engine for animated bar, line, grid and pie graphs.
//!
//! Each render cycle turns records plus a declarative [`GraphConfig`] into
//! scales and per-record shapes, diffs those shapes against the previous
//! cycle by identity (entering / updating / exiting) and schedules the
//! delayed removal of exited shapes. Drawing is left to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod telemetry;
pub mod transition;

pub use api::{GraphConfig, GraphEngine, GraphKind};
pub use error::{GraphError, GraphResult};
