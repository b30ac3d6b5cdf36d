//! Manager for property indices
//!
//! Handles creation, population, lookup and deletion of property indices.
//! Indices only accelerate lookups; a store without them answers the same
//! queries by scanning.

use super::property_index::PropertyIndex;
use crate::graph::{Label, NodeId, PropertyValue};
use rustc_hash::FxHashMap;

/// Key for identifying a property index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyIndexKey {
    pub label: Label,
    pub property: String,
}

impl PropertyIndexKey {
    pub fn new(label: &Label, property: &str) -> Self {
        Self {
            label: label.clone(),
            property: property.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct IndexEntry {
    index: PropertyIndex,
    populated: usize,
    total: usize,
}

/// Manager for all property indices of one store
#[derive(Debug, Clone, Default)]
pub struct IndexManager {
    indices: FxHashMap<PropertyIndexKey, IndexEntry>,
}

impl IndexManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index for a label and property and backfill it from `existing`.
    ///
    /// Returns `false` if the index already existed, in which case nothing changes.
    pub fn create_index(
        &mut self,
        label: &Label,
        property: &str,
        existing: Vec<(PropertyValue, NodeId)>,
    ) -> bool {
        let key = PropertyIndexKey::new(label, property);
        if self.indices.contains_key(&key) {
            return false;
        }

        let entry = self.indices.entry(key).or_insert(IndexEntry {
            index: PropertyIndex::new(),
            populated: 0,
            total: existing.len(),
        });
        for (value, node_id) in existing {
            entry.index.insert(value, node_id);
            entry.populated += 1;
        }
        true
    }

    /// Drop an index, returning whether it existed
    pub fn drop_index(&mut self, label: &Label, property: &str) -> bool {
        self.indices
            .remove(&PropertyIndexKey::new(label, property))
            .is_some()
    }

    /// Update index when a node property is set
    pub fn index_insert(&mut self, label: &Label, property: &str, value: PropertyValue, node_id: NodeId) {
        if let Some(entry) = self.indices.get_mut(&PropertyIndexKey::new(label, property)) {
            entry.index.insert(value, node_id);
        }
    }

    /// Update index when a node property is removed or its old value replaced
    pub fn index_remove(&mut self, label: &Label, property: &str, value: &PropertyValue, node_id: NodeId) {
        if let Some(entry) = self.indices.get_mut(&PropertyIndexKey::new(label, property)) {
            entry.index.remove(value, node_id);
        }
    }

    /// Check if an index exists
    pub fn has_index(&self, label: &Label, property: &str) -> bool {
        self.indices.contains_key(&PropertyIndexKey::new(label, property))
    }

    /// Population progress in percent (0.0 to 100.0)
    pub fn progress(&self, label: &Label, property: &str) -> Option<f64> {
        self.indices
            .get(&PropertyIndexKey::new(label, property))
            .map(|entry| {
                if entry.total == 0 {
                    100.0
                } else {
                    entry.populated as f64 * 100.0 / entry.total as f64
                }
            })
    }

    /// Look up nodes through an index; `None` when the property is not indexed
    pub fn lookup(&self, label: &Label, property: &str, value: &PropertyValue) -> Option<Vec<NodeId>> {
        self.indices
            .get(&PropertyIndexKey::new(label, property))
            .map(|entry| entry.index.get(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_index_backfills() {
        let mut manager = IndexManager::new();
        let job = Label::new("Job");
        let existing = vec![
            (PropertyValue::from("Boeing: IT"), NodeId::new(1)),
            (PropertyValue::from("Google: IT"), NodeId::new(2)),
        ];

        assert!(manager.create_index(&job, "jobId", existing));
        assert!(!manager.create_index(&job, "jobId", Vec::new()));
        assert!(manager.has_index(&job, "jobId"));
        assert_eq!(manager.progress(&job, "jobId"), Some(100.0));
        assert_eq!(
            manager.lookup(&job, "jobId", &PropertyValue::from("Google: IT")),
            Some(vec![NodeId::new(2)])
        );
    }

    #[test]
    fn test_insert_remove_and_drop() {
        let mut manager = IndexManager::new();
        let job = Label::new("Job");
        manager.create_index(&job, "company", Vec::new());

        let google = PropertyValue::from("Google");
        manager.index_insert(&job, "company", google.clone(), NodeId::new(5));
        assert_eq!(manager.lookup(&job, "company", &google), Some(vec![NodeId::new(5)]));

        manager.index_remove(&job, "company", &google, NodeId::new(5));
        assert_eq!(manager.lookup(&job, "company", &google), Some(vec![]));

        assert!(manager.drop_index(&job, "company"));
        assert!(!manager.has_index(&job, "company"));
        assert_eq!(manager.lookup(&job, "company", &google), None);
    }

    #[test]
    fn test_empty_index_progress() {
        let mut manager = IndexManager::new();
        let job = Label::new("Job");
        assert_eq!(manager.progress(&job, "weight"), None);
        manager.create_index(&job, "weight", Vec::new());
        assert_eq!(manager.progress(&job, "weight"), Some(100.0));
    }
}
