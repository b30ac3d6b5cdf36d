//! In-memory graph store
//!
//! Nodes and relationships are keyed by monotonically assigned ids in ordered
//! maps, so iteration order is creation order and survives deletes and
//! restores. A unit of work keeps an undo log: every mutation records how to
//! reverse itself, rollback replays the log backwards and commit drops it.
//! The cost of a unit of work is therefore proportional to what it changes,
//! not to the size of the graph.

use super::edge::Edge;
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::store::{GraphError, GraphResult, GraphStore};
use super::types::{EdgeId, EdgeType, Label, NodeId, UnitOfWork};
use crate::index::IndexManager;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct GraphState {
    /// Node arena in creation order
    nodes: BTreeMap<NodeId, Node>,

    /// Relationship arena in creation order
    edges: BTreeMap<EdgeId, Edge>,

    /// Incident relationships per node, both endpoints
    adjacency: FxHashMap<NodeId, BTreeSet<EdgeId>>,

    /// Label index for fast lookups
    label_index: FxHashMap<Label, BTreeSet<NodeId>>,

    /// Exact-match property indices
    property_index: IndexManager,
}

impl GraphState {
    /// Insert a node and register it with the label and property indices
    fn attach_node(&mut self, node: Node) {
        for label in &node.labels {
            self.label_index
                .entry(label.clone())
                .or_default()
                .insert(node.id);
            for (key, value) in &node.properties {
                self.property_index
                    .index_insert(label, key, value.clone(), node.id);
            }
        }
        self.adjacency.entry(node.id).or_default();
        self.nodes.insert(node.id, node);
    }

    fn detach_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        self.adjacency.remove(&id);
        for label in &node.labels {
            if let Some(ids) = self.label_index.get_mut(label) {
                ids.remove(&id);
            }
            for (key, value) in &node.properties {
                self.property_index.index_remove(label, key, value, id);
            }
        }
        Some(node)
    }

    fn attach_edge(&mut self, edge: Edge) {
        for endpoint in [edge.start, edge.end] {
            self.adjacency.entry(endpoint).or_default().insert(edge.id);
        }
        self.edges.insert(edge.id, edge);
    }

    fn detach_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        for endpoint in [edge.start, edge.end] {
            if let Some(adj) = self.adjacency.get_mut(&endpoint) {
                adj.remove(&id);
            }
        }
        Some(edge)
    }

    /// Set (`Some`) or clear (`None`) a node property, keeping indices in
    /// step. Returns the previous value; a missing node is left alone.
    fn write_node_property(
        &mut self,
        id: NodeId,
        key: &str,
        value: Option<PropertyValue>,
    ) -> Option<PropertyValue> {
        let GraphState {
            nodes,
            property_index,
            ..
        } = self;
        let node = nodes.get_mut(&id)?;

        let previous = match &value {
            Some(value) => node.set_property(key, value.clone()),
            None => node.remove_property(key),
        };
        for label in &node.labels {
            if let Some(old) = &previous {
                property_index.index_remove(label, key, old, id);
            }
            if let Some(new) = &value {
                property_index.index_insert(label, key, new.clone(), id);
            }
        }
        previous
    }

    fn write_edge_property(
        &mut self,
        id: EdgeId,
        key: &str,
        value: Option<PropertyValue>,
    ) -> Option<PropertyValue> {
        let edge = self.edges.get_mut(&id)?;
        match value {
            Some(value) => edge.set_property(key, value),
            None => edge.remove_property(key),
        }
    }
}

/// How to reverse one mutation
#[derive(Debug)]
enum Undo {
    CreateNode(NodeId),
    CreateRelationship(EdgeId),
    SetNodeProperty {
        node: NodeId,
        key: String,
        previous: Option<PropertyValue>,
    },
    SetRelationshipProperty {
        rel: EdgeId,
        key: String,
        previous: Option<PropertyValue>,
    },
    DeleteNode(Node),
    DeleteRelationship(Edge),
}

#[derive(Debug)]
struct ActiveUnit {
    id: u64,
    log: Vec<Undo>,
    next_node_id: u64,
    next_edge_id: u64,
}

/// `GraphStore` backed by process memory
#[derive(Debug)]
pub struct InMemoryGraphStore {
    state: GraphState,
    active: Option<ActiveUnit>,
    next_node_id: u64,
    next_edge_id: u64,
    next_uow_id: u64,
}

impl InMemoryGraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        InMemoryGraphStore {
            state: GraphState::default(),
            active: None,
            next_node_id: 1,
            next_edge_id: 1,
            next_uow_id: 1,
        }
    }

    /// Whether a unit of work is currently open
    pub fn in_unit_of_work(&self) -> bool {
        self.active.is_some()
    }

    /// Borrow a node without cloning it
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.state.nodes.get(&id)
    }

    /// Borrow a relationship without cloning it
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.state.edges.get(&id)
    }

    /// Relationship connecting two nodes, if any
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.state
            .adjacency
            .get(&a)?
            .iter()
            .filter_map(|id| self.state.edges.get(id))
            .find(|edge| edge.connects(a, b))
    }

    /// Undo log of the open unit of work
    fn log(&mut self) -> GraphResult<&mut Vec<Undo>> {
        self.active
            .as_mut()
            .map(|active| &mut active.log)
            .ok_or(GraphError::NoActiveUnitOfWork)
    }

    fn require_unit_of_work(&self) -> GraphResult<()> {
        if self.active.is_some() {
            Ok(())
        } else {
            Err(GraphError::NoActiveUnitOfWork)
        }
    }

    fn close_unit(&mut self, uow: &UnitOfWork) -> GraphResult<ActiveUnit> {
        match self.active.take() {
            Some(active) if active.id == uow.as_u64() => Ok(active),
            Some(active) => {
                self.active = Some(active);
                Err(GraphError::UnitOfWorkMismatch(UnitOfWork::new(uow.as_u64())))
            }
            None => Err(GraphError::NoActiveUnitOfWork),
        }
    }

    fn undo(&mut self, op: Undo) {
        let state = &mut self.state;
        match op {
            Undo::CreateNode(id) => {
                state.detach_node(id);
            }
            Undo::CreateRelationship(id) => {
                state.detach_edge(id);
            }
            Undo::SetNodeProperty { node, key, previous } => {
                state.write_node_property(node, &key, previous);
            }
            Undo::SetRelationshipProperty { rel, key, previous } => {
                state.write_edge_property(rel, &key, previous);
            }
            Undo::DeleteNode(node) => state.attach_node(node),
            Undo::DeleteRelationship(edge) => state.attach_edge(edge),
        }
    }
}

impl Default for InMemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for InMemoryGraphStore {
    fn begin_unit_of_work(&mut self) -> GraphResult<UnitOfWork> {
        if let Some(active) = &self.active {
            return Err(GraphError::UnitOfWorkActive(UnitOfWork::new(active.id)));
        }
        let id = self.next_uow_id;
        self.next_uow_id += 1;
        self.active = Some(ActiveUnit {
            id,
            log: Vec::new(),
            next_node_id: self.next_node_id,
            next_edge_id: self.next_edge_id,
        });
        debug!("Began unit of work {}", id);
        Ok(UnitOfWork::new(id))
    }

    fn commit(&mut self, uow: UnitOfWork) -> GraphResult<()> {
        let active = self.close_unit(&uow)?;
        debug!("Committed {} ({} change(s))", uow, active.log.len());
        Ok(())
    }

    fn rollback(&mut self, uow: UnitOfWork) -> GraphResult<()> {
        let active = self.close_unit(&uow)?;
        let changes = active.log.len();
        for op in active.log.into_iter().rev() {
            self.undo(op);
        }
        self.next_node_id = active.next_node_id;
        self.next_edge_id = active.next_edge_id;
        debug!("Rolled back {} ({} change(s))", uow, changes);
        Ok(())
    }

    fn create_node(&mut self, labels: Vec<Label>, properties: PropertyMap) -> GraphResult<NodeId> {
        self.require_unit_of_work()?;
        let node_id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;

        self.state
            .attach_node(Node::new(node_id, labels, properties));
        self.log()?.push(Undo::CreateNode(node_id));
        Ok(node_id)
    }

    fn create_relationship(
        &mut self,
        a: NodeId,
        b: NodeId,
        edge_type: EdgeType,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId> {
        self.require_unit_of_work()?;
        if a == b {
            return Err(GraphError::SelfRelationship(a));
        }
        for endpoint in [a, b] {
            if !self.state.nodes.contains_key(&endpoint) {
                return Err(GraphError::InvalidEndpoint(endpoint));
            }
        }

        let edge_id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        self.state
            .attach_edge(Edge::new(edge_id, a, b, edge_type, properties));
        self.log()?.push(Undo::CreateRelationship(edge_id));
        Ok(edge_id)
    }

    fn find_nodes_by_label(&self, label: &Label) -> GraphResult<Vec<NodeId>> {
        Ok(self
            .state
            .label_index
            .get(label)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }

    fn find_nodes_by_property(
        &self,
        label: &Label,
        key: &str,
        value: &PropertyValue,
    ) -> GraphResult<Vec<NodeId>> {
        if let Some(ids) = self.state.property_index.lookup(label, key, value) {
            return Ok(ids);
        }

        Ok(self
            .find_nodes_by_label(label)?
            .into_iter()
            .filter(|id| {
                self.state
                    .nodes
                    .get(id)
                    .and_then(|node| node.get_property(key))
                    == Some(value)
            })
            .collect())
    }

    fn all_relationships(&self) -> GraphResult<Vec<EdgeId>> {
        Ok(self.state.edges.keys().copied().collect())
    }

    fn relationships_of(&self, node: NodeId) -> GraphResult<Vec<EdgeId>> {
        self.state
            .adjacency
            .get(&node)
            .map(|rels| rels.iter().copied().collect())
            .ok_or(GraphError::NodeNotFound(node))
    }

    fn other_endpoint(&self, rel: EdgeId, node: NodeId) -> GraphResult<NodeId> {
        let edge = self
            .state
            .edges
            .get(&rel)
            .ok_or(GraphError::EdgeNotFound(rel))?;
        edge.other_endpoint(node)
            .ok_or(GraphError::NotAnEndpoint { edge: rel, node })
    }

    fn node(&self, id: NodeId) -> GraphResult<Node> {
        self.state
            .nodes
            .get(&id)
            .cloned()
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn node_property(&self, node: NodeId, key: &str) -> GraphResult<Option<PropertyValue>> {
        let node = self
            .state
            .nodes
            .get(&node)
            .ok_or(GraphError::NodeNotFound(node))?;
        Ok(node.get_property(key).cloned())
    }

    fn set_node_property(
        &mut self,
        node: NodeId,
        key: &str,
        value: PropertyValue,
    ) -> GraphResult<Option<PropertyValue>> {
        self.require_unit_of_work()?;
        if !self.state.nodes.contains_key(&node) {
            return Err(GraphError::NodeNotFound(node));
        }

        let previous = self.state.write_node_property(node, key, Some(value));
        self.log()?.push(Undo::SetNodeProperty {
            node,
            key: key.to_string(),
            previous: previous.clone(),
        });
        Ok(previous)
    }

    fn relationship_property(&self, rel: EdgeId, key: &str) -> GraphResult<Option<PropertyValue>> {
        let edge = self
            .state
            .edges
            .get(&rel)
            .ok_or(GraphError::EdgeNotFound(rel))?;
        Ok(edge.get_property(key).cloned())
    }

    fn set_relationship_property(
        &mut self,
        rel: EdgeId,
        key: &str,
        value: PropertyValue,
    ) -> GraphResult<Option<PropertyValue>> {
        self.require_unit_of_work()?;
        if !self.state.edges.contains_key(&rel) {
            return Err(GraphError::EdgeNotFound(rel));
        }

        let previous = self.state.write_edge_property(rel, key, Some(value));
        self.log()?.push(Undo::SetRelationshipProperty {
            rel,
            key: key.to_string(),
            previous: previous.clone(),
        });
        Ok(previous)
    }

    fn delete_node(&mut self, node_id: NodeId) -> GraphResult<()> {
        self.require_unit_of_work()?;

        let count = self
            .state
            .adjacency
            .get(&node_id)
            .map(BTreeSet::len)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        if count > 0 {
            return Err(GraphError::NodeHasRelationships {
                node: node_id,
                count,
            });
        }

        let node = self
            .state
            .detach_node(node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        self.log()?.push(Undo::DeleteNode(node));
        Ok(())
    }

    fn delete_relationship(&mut self, rel: EdgeId) -> GraphResult<()> {
        self.require_unit_of_work()?;

        let edge = self
            .state
            .detach_edge(rel)
            .ok_or(GraphError::EdgeNotFound(rel))?;
        self.log()?.push(Undo::DeleteRelationship(edge));
        Ok(())
    }

    fn node_count(&self) -> usize {
        self.state.nodes.len()
    }

    fn relationship_count(&self) -> usize {
        self.state.edges.len()
    }

    /// Index definitions sit outside units of work; index contents follow
    /// every committed or rolled-back node change.
    fn create_index(&mut self, label: &Label, property: &str) -> GraphResult<bool> {
        let existing: Vec<(PropertyValue, NodeId)> = self
            .find_nodes_by_label(label)?
            .into_iter()
            .filter_map(|id| {
                let value = self.state.nodes.get(&id)?.get_property(property)?;
                Some((value.clone(), id))
            })
            .collect();
        let populated = existing.len();

        let created = self
            .state
            .property_index
            .create_index(label, property, existing);
        if created {
            info!("Created index on :{}({}) over {} node(s)", label, property, populated);
        }
        Ok(created)
    }

    /// Indices are populated synchronously by `create_index`, so an existing
    /// index is always online.
    fn await_index_online(&self, label: &Label, property: &str, _timeout: Duration) -> GraphResult<()> {
        if self.state.property_index.has_index(label, property) {
            Ok(())
        } else {
            Err(GraphError::IndexNotFound {
                label: label.clone(),
                property: property.to_string(),
            })
        }
    }

    fn index_population_progress(&self, label: &Label, property: &str) -> GraphResult<f64> {
        self.state
            .property_index
            .progress(label, property)
            .ok_or_else(|| GraphError::IndexNotFound {
                label: label.clone(),
                property: property.to_string(),
            })
    }

    fn drop_index(&mut self, label: &Label, property: &str) -> GraphResult<bool> {
        Ok(self.state.property_index.drop_index(label, property))
    }
}
