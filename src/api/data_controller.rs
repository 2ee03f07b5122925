use tracing::debug;

use crate::core::{Record, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::render::Renderer;

use super::{GraphConfig, GraphEngine};

impl<R: Renderer> GraphEngine<R> {
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Replaces the whole configuration. Takes effect on the next `update`.
    pub fn set_config(&mut self, config: GraphConfig) {
        debug!(kind = ?config.kind, records = config.data.len(), "set graph config");
        self.config = config;
    }

    #[must_use]
    pub fn data(&self) -> &[Record] {
        &self.config.data
    }

    /// Replaces the records. Takes effect on the next `update`.
    pub fn set_data(&mut self, data: Vec<Record>) {
        debug!(records = data.len(), "set graph data");
        self.config.data = data;
    }

    /// Replaces the series keys. Takes effect on the next `update`.
    pub fn set_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.keys = keys.into_iter().map(Into::into).collect();
        debug!(keys = self.config.keys.len(), "set graph keys");
    }

    /// Resizes the container. Takes effect on the next `update`.
    pub fn set_viewport(&mut self, viewport: Viewport) -> GraphResult<()> {
        if !viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }
}
