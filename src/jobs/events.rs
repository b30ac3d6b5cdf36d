//! Client interaction dispatch

use super::model::composite_id;
use super::propagation::PropagationReport;
use super::{JobGraph, JobGraphError, JobResult};
use crate::config::EventIncrements;
use crate::graph::{with_unit_of_work, GraphStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Kind of client interaction with a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Like,
    Dislike,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Click, EventKind::Like, EventKind::Dislike];

    /// Increment this event applies to the clicked job
    pub fn increment(self, increments: &EventIncrements) -> f64 {
        match self {
            EventKind::Click => increments.click,
            EventKind::Like => increments.like,
            EventKind::Dislike => increments.dislike,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Like => "like",
            EventKind::Dislike => "dislike",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the event names case-insensitively, and the legacy numeric
/// codes `0` (click), `1` (like) and `2` (dislike).
impl FromStr for EventKind {
    type Err = JobGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "click" | "0" => Ok(EventKind::Click),
            "like" | "1" => Ok(EventKind::Like),
            "dislike" | "2" => Ok(EventKind::Dislike),
            _ => Err(JobGraphError::UnknownEvent(s.to_string())),
        }
    }
}

/// Result of dispatching one interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// The job existed and the increment was propagated
    Applied(PropagationReport),
    /// No job carries this id; nothing changed
    NotFound { id: String },
}

impl ClickOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ClickOutcome::Applied(_))
    }
}

impl JobGraph {
    /// Record an interaction with the job `company`/`job_title`.
    ///
    /// A missing job is not an error: it is logged and reported as
    /// `ClickOutcome::NotFound`. Lookup and propagation share one unit of work.
    pub fn click<S: GraphStore + ?Sized>(
        &self,
        store: &mut S,
        company: &str,
        job_title: &str,
        event: EventKind,
    ) -> JobResult<ClickOutcome> {
        let id = composite_id(company, job_title);

        with_unit_of_work(store, |store| -> JobResult<ClickOutcome> {
            let node = match self.lookup(store, &id)? {
                Some(node) => node,
                None => {
                    warn!("There is no job for: {}", id);
                    return Ok(ClickOutcome::NotFound { id: id.clone() });
                }
            };

            let increment = event.increment(&self.config.increments);
            debug!("{} on {} ({:+})", event, id, increment);
            self.propagate_within(store, node, increment)
                .map(ClickOutcome::Applied)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InMemoryGraphStore;

    #[test]
    fn test_parse_event_kind() {
        assert_eq!("click".parse::<EventKind>().unwrap(), EventKind::Click);
        assert_eq!(" LIKE ".parse::<EventKind>().unwrap(), EventKind::Like);
        assert_eq!("2".parse::<EventKind>().unwrap(), EventKind::Dislike);
        assert_eq!(
            "share".parse::<EventKind>(),
            Err(JobGraphError::UnknownEvent("share".into()))
        );
        for kind in EventKind::ALL {
            assert_eq!(kind.to_string().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_default_increments() {
        let increments = EventIncrements::default();
        assert_eq!(EventKind::Click.increment(&increments), 1.0);
        assert_eq!(EventKind::Like.increment(&increments), 10.0);
        assert_eq!(EventKind::Dislike.increment(&increments), -10.0);
    }

    #[test]
    fn test_click_applies_increment() {
        let graph = JobGraph::default();
        let mut store = InMemoryGraphStore::new();
        graph.add_job(&mut store, "Starbucks", "Barista").unwrap();
        graph.add_job(&mut store, "Starbucks", "Store Manager").unwrap();

        let outcome = graph
            .click(&mut store, "Starbucks", "Barista", EventKind::Click)
            .unwrap();
        assert!(outcome.is_applied());

        assert_eq!(graph.job(&store, "Starbucks", "Barista").unwrap().weight, 11.0);
        assert_eq!(graph.job(&store, "Starbucks", "Store Manager").unwrap().weight, 10.25);

        graph
            .click(&mut store, "Starbucks", "Store Manager", EventKind::Dislike)
            .unwrap();
        assert_eq!(graph.job(&store, "Starbucks", "Store Manager").unwrap().weight, 0.25);
        assert_eq!(graph.job(&store, "Starbucks", "Barista").unwrap().weight, 8.5);
    }

    #[test]
    fn test_click_on_missing_job_is_not_fatal() {
        let graph = JobGraph::default();
        let mut store = InMemoryGraphStore::new();
        graph.add_job(&mut store, "Starbucks", "Barista").unwrap();

        let outcome = graph
            .click(&mut store, "Starbucks", "Astronaut", EventKind::Like)
            .unwrap();
        assert_eq!(
            outcome,
            ClickOutcome::NotFound { id: "Starbucks: Astronaut".into() }
        );
        assert_eq!(graph.job(&store, "Starbucks", "Barista").unwrap().weight, 10.0);
        assert!(!store.in_unit_of_work());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(ClickOutcome::NotFound { id: "A: b".into() }).unwrap();
        assert_eq!(json["outcome"], "not_found");
        assert_eq!(json["id"], "A: b");
    }
}
