//! Relationship record held by the in-memory store
//!
//! Relationships are stored with an ordered pair of endpoints but are read
//! symmetrically: both endpoints list the relationship as incident, and
//! `other_endpoint` resolves the opposite node from either side.

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, NodeId};
use serde::{Deserialize, Serialize};

/// A relationship between two distinct nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this relationship
    pub id: EdgeId,

    /// Endpoint the relationship was created from
    pub start: NodeId,

    /// Endpoint the relationship was created to
    pub end: NodeId,

    /// Type of relationship (e.g. "LIKE")
    pub edge_type: EdgeType,

    /// Properties associated with this relationship
    pub properties: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Edge {
    /// Create a new relationship with properties
    pub fn new(
        id: EdgeId,
        start: NodeId,
        end: NodeId,
        edge_type: impl Into<EdgeType>,
        properties: PropertyMap,
    ) -> Self {
        Edge {
            id,
            start,
            end,
            edge_type: edge_type.into(),
            properties,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Set a property value, returning the previous one
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    /// Remove a property, returning its value
    pub fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Check if this relationship connects two specific nodes (in either order)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.start == node1 && self.end == node2) || (self.start == node2 && self.end == node1)
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint
    pub fn other_endpoint(&self, node: NodeId) -> Option<NodeId> {
        if self.start == node {
            Some(self.end)
        } else if self.end == node {
            Some(self.start)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn like(id: u64, start: u64, end: u64, weight: f64) -> Edge {
        let mut props = PropertyMap::new();
        props.insert("weight".to_string(), weight.into());
        Edge::new(EdgeId::new(id), NodeId::new(start), NodeId::new(end), "LIKE", props)
    }

    #[test]
    fn test_create_edge() {
        let edge = like(1, 1, 2, 0.8);
        assert_eq!(edge.id, EdgeId::new(1));
        assert_eq!(edge.edge_type.as_str(), "LIKE");
        assert_eq!(edge.get_property("weight").and_then(|v| v.as_float()), Some(0.8));
    }

    #[test]
    fn test_edge_is_symmetric() {
        let edge = like(2, 10, 20, 0.25);

        assert!(edge.connects(NodeId::new(10), NodeId::new(20)));
        assert!(edge.connects(NodeId::new(20), NodeId::new(10)));
        assert!(!edge.connects(NodeId::new(10), NodeId::new(30)));

        assert_eq!(edge.other_endpoint(NodeId::new(10)), Some(NodeId::new(20)));
        assert_eq!(edge.other_endpoint(NodeId::new(20)), Some(NodeId::new(10)));
        assert_eq!(edge.other_endpoint(NodeId::new(30)), None);
    }

    #[test]
    fn test_set_property() {
        let mut edge = like(3, 1, 2, 0.0);
        let old = edge.set_property("weight", 0.25);
        assert_eq!(old, Some(PropertyValue::Float(0.0)));
        assert_eq!(edge.get_property("weight"), Some(&PropertyValue::Float(0.25)));
    }
}
