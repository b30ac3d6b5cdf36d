//! Job ingestion
//!
//! A new job is wired to every job already in the graph, one relationship per
//! pair, so the n-th insertion costs O(n) and the graph stays complete.

use super::model::{composite_id, JobKey, JobNode, COMPANY, JOB_ID, JOB_TITLE, WEIGHT};
use super::similarity::Similarity;
use super::{JobGraph, JobGraphError, JobResult};
use crate::graph::{with_unit_of_work, GraphStore, PropertyMap};
use tracing::{debug, info};

impl JobGraph {
    /// Add a job and connect it to every existing job.
    ///
    /// Fails with `DuplicateJob` if the company/title pair is already present.
    /// The node and all of its relationships are created in one unit of work.
    pub fn add_job<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        company: &str,
        job_title: &str,
    ) -> JobResult<JobNode> {
        let id = composite_id(company, job_title);

        with_unit_of_work(store, |store| -> JobResult<JobNode> {
            if self.lookup(store, &id)?.is_some() {
                return Err(JobGraphError::DuplicateJob(id.clone()));
            }

            // Snapshot before the new node exists, so it is never paired with itself
            let existing = store.find_nodes_by_label(&self.label)?;

            let mut properties = PropertyMap::new();
            properties.insert(JOB_ID.to_string(), id.as_str().into());
            properties.insert(COMPANY.to_string(), company.into());
            properties.insert(JOB_TITLE.to_string(), job_title.into());
            properties.insert(WEIGHT.to_string(), self.config.default_node_weight.into());
            let node_id = store.create_node(vec![self.label.clone()], properties)?;

            let key = JobKey::new(company, job_title);
            for other in &existing {
                let other_job = self.load(store, *other)?;
                let kind = Similarity::classify(key, other_job.key());
                let weight = kind.weight(&self.config.similarity);

                let mut rel_props = PropertyMap::new();
                rel_props.insert(WEIGHT.to_string(), weight.into());
                store.create_relationship(node_id, *other, self.relationship_type.clone(), rel_props)?;
                debug!("{} -[{} {}]- {}", id, kind, weight, other_job.id);
            }

            info!("Added job {} with {} relationship(s)", id, existing.len());
            Ok(JobNode {
                node_id,
                id: id.clone(),
                company: company.to_string(),
                job_title: job_title.to_string(),
                weight: self.config.default_node_weight,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InMemoryGraphStore;

    fn weight_between(store: &InMemoryGraphStore, a: &JobNode, b: &JobNode) -> f64 {
        store
            .edge_between(a.node_id, b.node_id)
            .and_then(|edge| edge.get_property(WEIGHT))
            .and_then(|w| w.as_float())
            .unwrap()
    }

    #[test]
    fn test_add_job_wires_every_pair() {
        let graph = JobGraph::default();
        let mut store = InMemoryGraphStore::new();

        let boeing_it = graph.add_job(&mut store, "Boeing", "IT").unwrap();
        let google_it = graph.add_job(&mut store, "Google", "IT").unwrap();
        let google_sa = graph.add_job(&mut store, "Google", "Systems Analyst").unwrap();

        assert_eq!(store.node_count(), 3);
        assert_eq!(store.relationship_count(), 3);
        assert_eq!(boeing_it.weight, 10.0);
        assert_eq!(google_sa.id, "Google: Systems Analyst");

        assert_eq!(weight_between(&store, &boeing_it, &google_it), 0.8);
        assert_eq!(weight_between(&store, &google_it, &google_sa), 0.25);
        assert_eq!(weight_between(&store, &boeing_it, &google_sa), 0.0);
    }

    #[test]
    fn test_relationship_count_is_complete_graph() {
        let graph = JobGraph::default();
        let mut store = InMemoryGraphStore::new();
        for (company, title) in crate::catalog::DEMO_JOBS.iter().take(12) {
            graph.add_job(&mut store, company, title).unwrap();
        }
        assert_eq!(store.relationship_count(), 12 * 11 / 2);
    }

    #[test]
    fn test_duplicate_is_rejected_without_side_effects() {
        let graph = JobGraph::default();
        let mut store = InMemoryGraphStore::new();
        graph.add_job(&mut store, "Boeing", "IT").unwrap();
        graph.add_job(&mut store, "Google", "IT").unwrap();

        let err = graph.add_job(&mut store, "Boeing", "IT").unwrap_err();
        assert_eq!(err, JobGraphError::DuplicateJob("Boeing: IT".into()));
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.relationship_count(), 1);
        assert!(!store.in_unit_of_work());
    }

    #[test]
    fn test_default_weight_from_config() {
        let mut config = crate::config::JobGraphConfig::default();
        config.default_node_weight = 3.5;
        let graph = JobGraph::new(config);
        let mut store = InMemoryGraphStore::new();

        let job = graph.add_job(&mut store, "KPMG", "IT Project Manager").unwrap();
        assert_eq!(job.weight, 3.5);
        assert_eq!(graph.load(&store, job.node_id).unwrap().weight, 3.5);
    }
}
