//! Job relevance engine
//!
//! `JobGraph` is a stateless service over a caller-owned [`GraphStore`]: it
//! holds configuration only, and every operation takes the store explicitly.
//! Mutating operations each run in exactly one unit of work, so a failure
//! part-way through leaves the store as it was before the call.
//!
//! ```rust
//! use jobgraph::graph::InMemoryGraphStore;
//! use jobgraph::jobs::{EventKind, JobGraph};
//!
//! let graph = JobGraph::default();
//! let mut store = InMemoryGraphStore::new();
//!
//! graph.add_job(&mut store, "Boeing", "IT").unwrap();
//! graph.add_job(&mut store, "Google", "IT").unwrap();
//! graph.click(&mut store, "Google", "IT", EventKind::Like).unwrap();
//!
//! let ranking = graph.rank_by_weight(&store).unwrap();
//! assert_eq!(ranking.entries[0].id, "Google: IT");
//! assert_eq!(ranking.entries[1].weight, 18.0);
//! ```

mod events;
mod ingest;
mod maintenance;
mod model;
mod propagation;
mod ranking;
mod similarity;

pub use events::{ClickOutcome, EventKind};
pub use maintenance::ResetReport;
pub use model::{composite_id, JobKey, JobNode, COMPANY, JOB_ID, JOB_TITLE, WEIGHT};
pub use propagation::{NeighbourUpdate, PropagationReport};
pub use ranking::Ranking;
pub use similarity::{similarity, Similarity};

use crate::config::JobGraphConfig;
use crate::graph::{EdgeId, EdgeType, GraphError, GraphStore, Label, NodeId, PropertyValue};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errors raised by the job engine
#[derive(Error, Debug, PartialEq)]
pub enum JobGraphError {
    #[error("No job found for: {0}")]
    JobNotFound(String),

    #[error("Job already exists: {0}")]
    DuplicateJob(String),

    #[error("Integrity violation: {matches} nodes share job id {id}")]
    IntegrityViolation { id: String, matches: usize },

    #[error("Node {node} is missing job property '{property}'")]
    MalformedNode { node: NodeId, property: &'static str },

    #[error("Relationship {edge} has no numeric weight")]
    MalformedRelationship { edge: EdgeId },

    #[error("Unknown event kind: {0}")]
    UnknownEvent(String),

    #[error(transparent)]
    Store(#[from] GraphError),
}

pub type JobResult<T> = Result<T, JobGraphError>;

/// Ingestion, propagation, ranking and maintenance over job nodes
#[derive(Debug, Clone)]
pub struct JobGraph {
    config: JobGraphConfig,
    label: Label,
    relationship_type: EdgeType,
}

impl JobGraph {
    pub fn new(config: JobGraphConfig) -> Self {
        let label = Label::new(config.label.as_str());
        let relationship_type = EdgeType::new(config.relationship_type.as_str());
        Self {
            config,
            label,
            relationship_type,
        }
    }

    pub fn config(&self) -> &JobGraphConfig {
        &self.config
    }

    /// Label carried by every job node
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Create the configured property indices and wait for them to come online
    pub fn ensure_indexes<S: GraphStore + ?Sized>(&self, store: &mut S) -> JobResult<()> {
        let timeout = Duration::from_secs(self.config.index_timeout_secs);
        for property in &self.config.indexes {
            store.create_index(&self.label, property)?;
            store.await_index_online(&self.label, property, timeout)?;
            let progress = store.index_population_progress(&self.label, property)?;
            info!("Index :{}({}) {:.0}% complete", self.label, property, progress);
        }
        Ok(())
    }

    /// Look up a job by company and title
    pub fn find_job<S: GraphStore + ?Sized>(
        &self,
        store: &S,
        company: &str,
        job_title: &str,
    ) -> JobResult<Option<JobNode>> {
        match self.lookup(store, &composite_id(company, job_title))? {
            Some(node) => self.load(store, node).map(Some),
            None => Ok(None),
        }
    }

    /// Look up a job that must exist
    pub fn job<S: GraphStore + ?Sized>(
        &self,
        store: &S,
        company: &str,
        job_title: &str,
    ) -> JobResult<JobNode> {
        self.find_job(store, company, job_title)?
            .ok_or_else(|| JobGraphError::JobNotFound(composite_id(company, job_title)))
    }

    /// Every job, in store iteration order
    pub fn jobs<S: GraphStore + ?Sized>(&self, store: &S) -> JobResult<Vec<JobNode>> {
        store
            .find_nodes_by_label(&self.label)?
            .into_iter()
            .map(|node| self.load(store, node))
            .collect()
    }

    /// Every job with the given title, in store iteration order
    pub fn jobs_with_title<S: GraphStore + ?Sized>(
        &self,
        store: &S,
        job_title: &str,
    ) -> JobResult<Vec<JobNode>> {
        store
            .find_nodes_by_property(&self.label, JOB_TITLE, &PropertyValue::from(job_title))?
            .into_iter()
            .map(|node| self.load(store, node))
            .collect()
    }

    pub(crate) fn load<S: GraphStore + ?Sized>(&self, store: &S, node: NodeId) -> JobResult<JobNode> {
        JobNode::try_from(&store.node(node)?)
    }

    /// Node carrying a composite id. More than one match breaks the
    /// uniqueness invariant and is reported rather than picking one.
    pub(crate) fn lookup<S: GraphStore + ?Sized>(&self, store: &S, id: &str) -> JobResult<Option<NodeId>> {
        let matches = store.find_nodes_by_property(&self.label, JOB_ID, &PropertyValue::from(id))?;
        match matches.as_slice() {
            [] => Ok(None),
            [node] => Ok(Some(*node)),
            _ => Err(JobGraphError::IntegrityViolation {
                id: id.to_string(),
                matches: matches.len(),
            }),
        }
    }
}

impl Default for JobGraph {
    fn default() -> Self {
        Self::new(JobGraphConfig::default())
    }
}
