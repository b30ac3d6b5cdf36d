//! Graph maintenance: reset and company rename

use super::model::{composite_id, JobNode, COMPANY, JOB_ID};
use super::{JobGraph, JobGraphError, JobResult};
use crate::graph::{with_unit_of_work, GraphStore, PropertyValue};
use serde::Serialize;
use tracing::info;

/// What a reset removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub relationships_deleted: usize,
    pub nodes_deleted: usize,
}

impl JobGraph {
    /// Delete every relationship, then every job titled `job_title`
    pub fn reset<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        job_title: &str,
    ) -> JobResult<ResetReport> {
        self.reset_where(store, |job| job.job_title == job_title)
    }

    /// Delete every relationship, then every job matching `predicate`.
    ///
    /// Relationships go first so node deletion never trips over attached edges.
    pub fn reset_where<S, P>(&self, store: &mut S, mut predicate: P) -> JobResult<ResetReport>
    where
        S: GraphStore + ?Sized,
        P: FnMut(&JobNode) -> bool,
    {
        with_unit_of_work(store, |store| -> JobResult<ResetReport> {
            let mut report = ResetReport::default();

            for rel in store.all_relationships()? {
                store.delete_relationship(rel)?;
                report.relationships_deleted += 1;
            }

            for node in store.find_nodes_by_label(&self.label)? {
                let job = self.load(store, node)?;
                if predicate(&job) {
                    store.delete_node(node)?;
                    report.nodes_deleted += 1;
                }
            }

            info!(
                "Reset removed {} relationship(s) and {} job(s)",
                report.relationships_deleted, report.nodes_deleted
            );
            Ok(report)
        })
    }

    /// Move every job of company `from` to company `to`, returning how many moved.
    ///
    /// Relationship weights keep the values they were created with. A rewritten
    /// id that collides with another job aborts the whole rename.
    pub fn rename_company<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        from: &str,
        to: &str,
    ) -> JobResult<usize> {
        if from == to {
            return Ok(0);
        }

        with_unit_of_work(store, |store| -> JobResult<usize> {
            let nodes = store.find_nodes_by_property(&self.label, COMPANY, &PropertyValue::from(from))?;

            for node in &nodes {
                let job = self.load(store, *node)?;
                let new_id = composite_id(to, &job.job_title);
                if self.lookup(store, &new_id)?.is_some() {
                    return Err(JobGraphError::DuplicateJob(new_id));
                }
                store.set_node_property(*node, COMPANY, to.into())?;
                store.set_node_property(*node, JOB_ID, new_id.into())?;
            }

            info!("Renamed {} job(s) from {} to {}", nodes.len(), from, to);
            Ok(nodes.len())
        })
    }
}
