//! Job node view over store nodes

use super::{JobGraphError, JobResult};
use crate::graph::{Node, NodeId};
use serde::Serialize;

/// Property holding the composite key
pub const JOB_ID: &str = "jobId";
pub const COMPANY: &str = "company";
pub const JOB_TITLE: &str = "jobTitle";
/// Property holding a node's relevance weight, and a relationship's similarity weight
pub const WEIGHT: &str = "weight";

/// Composite key identifying a job: `"<company>: <job title>"`
pub fn composite_id(company: &str, job_title: &str) -> String {
    format!("{}: {}", company, job_title)
}

/// The (company, title) pair two jobs are compared on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobKey<'a> {
    pub company: &'a str,
    pub job_title: &'a str,
}

impl<'a> JobKey<'a> {
    pub fn new(company: &'a str, job_title: &'a str) -> Self {
        Self { company, job_title }
    }
}

/// A job posting as read from the store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobNode {
    pub node_id: NodeId,
    /// Composite key, see [`composite_id`]
    pub id: String,
    pub company: String,
    pub job_title: String,
    pub weight: f64,
}

impl JobNode {
    pub fn key(&self) -> JobKey<'_> {
        JobKey::new(&self.company, &self.job_title)
    }
}

impl TryFrom<&Node> for JobNode {
    type Error = JobGraphError;

    fn try_from(node: &Node) -> JobResult<Self> {
        let string = |key: &'static str| {
            node.string_property(key)
                .map(str::to_string)
                .ok_or(JobGraphError::MalformedNode { node: node.id, property: key })
        };

        Ok(JobNode {
            node_id: node.id,
            id: string(JOB_ID)?,
            company: string(COMPANY)?,
            job_title: string(JOB_TITLE)?,
            weight: node
                .float_property(WEIGHT)
                .ok_or(JobGraphError::MalformedNode { node: node.id, property: WEIGHT })?,
        })
    }
}
