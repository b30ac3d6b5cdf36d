//! One-hop weight propagation
//!
//! An increment lands in full on the seed node and, scaled by each
//! relationship's similarity weight, on every direct neighbour. Neighbours of
//! neighbours are untouched.

use super::model::WEIGHT;
use super::{JobGraph, JobGraphError, JobResult};
use crate::graph::{with_unit_of_work, GraphStore, NodeId};
use serde::Serialize;
use tracing::debug;

/// Weight change applied to one neighbour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighbourUpdate {
    pub node_id: NodeId,
    pub relationship_weight: f64,
    pub delta: f64,
    pub new_weight: f64,
}

/// Everything a propagation changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropagationReport {
    pub seed: NodeId,
    pub increment: f64,
    pub seed_weight: f64,
    /// Neighbours reached through non-zero relationships
    pub neighbours: Vec<NeighbourUpdate>,
}

impl JobGraph {
    /// Add `increment` to `node` and diffuse it one hop, atomically
    pub fn propagate<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        node: NodeId,
        increment: f64,
    ) -> JobResult<PropagationReport> {
        with_unit_of_work(store, |store| self.propagate_within(store, node, increment))
    }

    /// Propagation body; the caller owns the unit of work
    pub(crate) fn propagate_within<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        node: NodeId,
        increment: f64,
    ) -> JobResult<PropagationReport> {
        let seed_weight = self.weight_of(store, node)? + increment;
        store.set_node_property(node, WEIGHT, seed_weight.into())?;

        let mut neighbours = Vec::new();
        for rel in store.relationships_of(node)? {
            let relationship_weight = store
                .relationship_property(rel, WEIGHT)?
                .and_then(|w| w.as_float())
                .ok_or(JobGraphError::MalformedRelationship { edge: rel })?;
            if relationship_weight == 0.0 {
                continue;
            }

            let other = store.other_endpoint(rel, node)?;
            let delta = increment * relationship_weight;
            let new_weight = self.weight_of(store, other)? + delta;
            store.set_node_property(other, WEIGHT, new_weight.into())?;

            neighbours.push(NeighbourUpdate {
                node_id: other,
                relationship_weight,
                delta,
                new_weight,
            });
        }

        debug!(
            "Propagated {} from {} to {} neighbour(s)",
            increment,
            node,
            neighbours.len()
        );
        Ok(PropagationReport {
            seed: node,
            increment,
            seed_weight,
            neighbours,
        })
    }

    fn weight_of<S: GraphStore + ?Sized>(&self, store: &S, node: NodeId) -> JobResult<f64> {
        store
            .node_property(node, WEIGHT)?
            .and_then(|w| w.as_float())
            .ok_or(JobGraphError::MalformedNode { node, property: WEIGHT })
    }
}
