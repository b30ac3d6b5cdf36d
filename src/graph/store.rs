//! Graph store contract
//!
//! The job engine never touches storage directly; it talks to a `GraphStore`
//! and scopes every mutation inside a unit of work. Any backend that honours
//! the commit/rollback contract below can sit behind the engine.

use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, Label, NodeId, UnitOfWork};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid relationship endpoint: node {0} does not exist")]
    InvalidEndpoint(NodeId),

    #[error("Relationship endpoints must be distinct nodes, got {0} twice")]
    SelfRelationship(NodeId),

    #[error("Node {node} not an endpoint of {edge}")]
    NotAnEndpoint { edge: EdgeId, node: NodeId },

    #[error("Node {node} still has {count} relationship(s)")]
    NodeHasRelationships { node: NodeId, count: usize },

    #[error("No unit of work is active")]
    NoActiveUnitOfWork,

    #[error("{0} is already active")]
    UnitOfWorkActive(UnitOfWork),

    #[error("{0} is not the active unit of work")]
    UnitOfWorkMismatch(UnitOfWork),

    #[error("No index on :{label}({property})")]
    IndexNotFound { label: Label, property: String },

    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Storage collaborator used by the job engine.
///
/// Mutating calls must happen between `begin_unit_of_work` and `commit` /
/// `rollback`; stores reject them otherwise with `NoActiveUnitOfWork`.
/// Read calls may happen at any time. Relationships are undirected from the
/// caller's point of view: `relationships_of` lists a relationship for both
/// of its endpoints.
pub trait GraphStore {
    /// Open an atomic scope. Only one unit of work may be active at a time.
    fn begin_unit_of_work(&mut self) -> GraphResult<UnitOfWork>;

    /// Make every mutation since `begin_unit_of_work` permanent
    fn commit(&mut self, uow: UnitOfWork) -> GraphResult<()>;

    /// Discard every mutation since `begin_unit_of_work`
    fn rollback(&mut self, uow: UnitOfWork) -> GraphResult<()>;

    fn create_node(&mut self, labels: Vec<Label>, properties: PropertyMap) -> GraphResult<NodeId>;

    fn create_relationship(
        &mut self,
        a: NodeId,
        b: NodeId,
        edge_type: EdgeType,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId>;

    /// All nodes carrying `label`, in store iteration order
    fn find_nodes_by_label(&self, label: &Label) -> GraphResult<Vec<NodeId>>;

    /// Nodes carrying `label` whose `key` property equals `value`
    fn find_nodes_by_property(
        &self,
        label: &Label,
        key: &str,
        value: &PropertyValue,
    ) -> GraphResult<Vec<NodeId>>;

    fn all_relationships(&self) -> GraphResult<Vec<EdgeId>>;

    fn relationships_of(&self, node: NodeId) -> GraphResult<Vec<EdgeId>>;

    fn other_endpoint(&self, rel: EdgeId, node: NodeId) -> GraphResult<NodeId>;

    /// Snapshot of a node with all of its labels and properties
    fn node(&self, id: NodeId) -> GraphResult<Node>;

    fn node_property(&self, node: NodeId, key: &str) -> GraphResult<Option<PropertyValue>>;

    /// Set a node property, returning the previous value
    fn set_node_property(
        &mut self,
        node: NodeId,
        key: &str,
        value: PropertyValue,
    ) -> GraphResult<Option<PropertyValue>>;

    fn relationship_property(&self, rel: EdgeId, key: &str) -> GraphResult<Option<PropertyValue>>;

    /// Set a relationship property, returning the previous value
    fn set_relationship_property(
        &mut self,
        rel: EdgeId,
        key: &str,
        value: PropertyValue,
    ) -> GraphResult<Option<PropertyValue>>;

    /// Delete a node. Fails with `NodeHasRelationships` while any relationship
    /// still references it.
    fn delete_node(&mut self, node: NodeId) -> GraphResult<()>;

    fn delete_relationship(&mut self, rel: EdgeId) -> GraphResult<()>;

    fn node_count(&self) -> usize;

    fn relationship_count(&self) -> usize;

    /// Create an exact-match index. Returns `false` if it already existed.
    fn create_index(&mut self, _label: &Label, _property: &str) -> GraphResult<bool> {
        Ok(false)
    }

    fn await_index_online(&self, _label: &Label, _property: &str, _timeout: Duration) -> GraphResult<()> {
        Ok(())
    }

    /// Population progress of an index in percent
    fn index_population_progress(&self, _label: &Label, _property: &str) -> GraphResult<f64> {
        Ok(100.0)
    }

    /// Drop an index. Returns `false` if there was none.
    fn drop_index(&mut self, _label: &Label, _property: &str) -> GraphResult<bool> {
        Ok(false)
    }
}

/// Run `f` inside a unit of work on `store`.
///
/// Commits when `f` succeeds and rolls back when it fails; the error from `f`
/// is returned unchanged. A failing rollback is only logged; the error from
/// `f` wins.
pub fn with_unit_of_work<S, T, E, F>(store: &mut S, f: F) -> Result<T, E>
where
    S: GraphStore + ?Sized,
    E: From<GraphError>,
    F: FnOnce(&mut S) -> Result<T, E>,
{
    let uow = store.begin_unit_of_work()?;
    match f(store) {
        Ok(value) => {
            store.commit(uow)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = store.rollback(uow) {
                warn!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
