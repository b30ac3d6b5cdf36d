//! Ranking by relevance weight

use super::model::JobNode;
use super::{JobGraph, JobResult};
use crate::graph::GraphStore;
use serde::Serialize;
use std::fmt;

/// Jobs ordered by weight, heaviest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    pub entries: Vec<JobNode>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobNode> {
        self.entries.iter()
    }

    /// Insert `job` before the first entry that is not strictly heavier.
    ///
    /// Equal weights therefore put the most recently inserted job first.
    pub fn insert(&mut self, job: JobNode) {
        let pos = self
            .entries
            .iter()
            .position(|existing| existing.weight <= job.weight)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, job);
    }
}

impl IntoIterator for Ranking {
    type Item = JobNode;
    type IntoIter = std::vec::IntoIter<JobNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------ALL NODE WEIGHTS----------")?;
        for job in &self.entries {
            writeln!(f, "{:?} - {}", job.weight, job.id)?;
        }
        Ok(())
    }
}

impl JobGraph {
    /// Every job sorted by weight, descending. An empty graph gives an empty ranking.
    pub fn rank_by_weight<S: GraphStore + ?Sized>(&self, store: &S) -> JobResult<Ranking> {
        let mut ranking = Ranking::default();
        for node in store.find_nodes_by_label(&self.label)? {
            ranking.insert(self.load(store, node)?);
        }
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{InMemoryGraphStore, NodeId};

    fn job(n: u64, weight: f64) -> JobNode {
        JobNode {
            node_id: NodeId::new(n),
            id: format!("Co{}: Title", n),
            company: format!("Co{}", n),
            job_title: "Title".into(),
            weight,
        }
    }

    #[test]
    fn test_insert_orders_descending() {
        let mut ranking = Ranking::default();
        for (n, w) in [(1, 5.0), (2, 20.0), (3, -1.0), (4, 12.5)] {
            ranking.insert(job(n, w));
        }
        let weights: Vec<f64> = ranking.iter().map(|j| j.weight).collect();
        assert_eq!(weights, vec![20.0, 12.5, 5.0, -1.0]);
    }

    #[test]
    fn test_ties_put_later_first() {
        let mut ranking = Ranking::default();
        ranking.insert(job(1, 10.0));
        ranking.insert(job(2, 11.0));
        ranking.insert(job(3, 10.0));
        ranking.insert(job(4, 10.0));

        let order: Vec<u64> = ranking.iter().map(|j| j.node_id.as_u64()).collect();
        assert_eq!(order, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_empty_graph_ranks_empty() {
        let graph = JobGraph::default();
        let store = InMemoryGraphStore::new();
        let ranking = graph.rank_by_weight(&store).unwrap();
        assert!(ranking.is_empty());
        assert_eq!(ranking.to_string(), "----------ALL NODE WEIGHTS----------\n");
    }

    #[test]
    fn test_report_format() {
        let mut ranking = Ranking::default();
        ranking.insert(job(1, 12.5));
        ranking.insert(job(2, 20.0));
        assert_eq!(
            ranking.to_string(),
            "----------ALL NODE WEIGHTS----------\n20.0 - Co2: Title\n12.5 - Co1: Title\n"
        );
    }

    #[test]
    fn test_rank_fresh_graph_reverses_insertion_order() {
        let graph = JobGraph::default();
        let mut store = InMemoryGraphStore::new();
        graph.add_job(&mut store, "Boeing", "IT").unwrap();
        graph.add_job(&mut store, "Google", "IT").unwrap();
        graph.add_job(&mut store, "Amazon", "IT").unwrap();

        let ids: Vec<String> = graph
            .rank_by_weight(&store)
            .unwrap()
            .into_iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec!["Amazon: IT", "Google: IT", "Boeing: IT"]);
    }
}
