use indexmap::IndexMap;
use tracing::trace;

use crate::layout::{Lifecycle, ShapeRecord};

/// Last classified shape per identity, persisted across render cycles.
///
/// Insertion order is render order: live shapes of the latest frame first,
/// then shapes still waiting for their exit prune.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityRegistry {
    shapes: IndexMap<String, ShapeRecord>,
}

impl IdentityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn get(&self, identity: &str) -> Option<&ShapeRecord> {
        self.shapes.get(identity)
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.shapes.contains_key(identity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.shapes.values()
    }

    /// Snapshot of every registered shape in render order.
    #[must_use]
    pub fn shapes(&self) -> Vec<ShapeRecord> {
        self.shapes.values().cloned().collect()
    }

    #[must_use]
    pub fn exiting_identities(&self) -> Vec<String> {
        self.shapes
            .values()
            .filter(|shape| shape.is_exiting())
            .map(|shape| shape.identity.clone())
            .collect()
    }

    pub(crate) fn replace_all(&mut self, shapes: IndexMap<String, ShapeRecord>) {
        self.shapes = shapes;
    }

    pub(crate) fn take_all(&mut self) -> IndexMap<String, ShapeRecord> {
        std::mem::take(&mut self.shapes)
    }

    /// Removes the given identities, but only those still marked exiting.
    ///
    /// An identity that came back since its prune was scheduled is left alone.
    /// Returns the identities actually removed.
    pub fn prune(&mut self, identities: &[String]) -> Vec<String> {
        let mut removed = Vec::with_capacity(identities.len());
        for identity in identities {
            match self.shapes.get(identity).map(|shape| shape.lifecycle) {
                Some(Lifecycle::Exiting) => {
                    self.shapes.shift_remove(identity);
                    removed.push(identity.clone());
                }
                Some(_) => trace!(identity = %identity, "prune skipped, identity is live again"),
                None => trace!(identity = %identity, "prune skipped, identity already gone"),
            }
        }
        removed
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}
