//! B-Tree based exact-match property index

use crate::graph::{NodeId, PropertyValue};
use std::collections::{BTreeMap, BTreeSet};

/// Index for a specific property on a specific label
#[derive(Debug, Clone, Default)]
pub struct PropertyIndex {
    /// Value -> set of NodeIds, ordered so lookups return ids in creation order
    index: BTreeMap<PropertyValue, BTreeSet<NodeId>>,
}

impl PropertyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: PropertyValue, node_id: NodeId) {
        self.index.entry(value).or_default().insert(node_id);
    }

    pub fn remove(&mut self, value: &PropertyValue, node_id: NodeId) {
        if let Some(nodes) = self.index.get_mut(value) {
            nodes.remove(&node_id);
            if nodes.is_empty() {
                self.index.remove(value);
            }
        }
    }

    pub fn get(&self, value: &PropertyValue) -> Vec<NodeId> {
        self.index
            .get(value)
            .map(|nodes| nodes.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of indexed (value, node) entries
    pub fn len(&self) -> usize {
        self.index.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
