//! Jobgraph
//!
//! A job-relevance engine over a property graph. Every job posting is a node;
//! every pair of postings is joined by a relationship whose weight encodes how
//! similar they are. Clicks, likes and dislikes raise or lower a posting's
//! weight and diffuse one hop to its neighbours, and postings are ranked by
//! the resulting weight.
//!
//! # Layout
//!
//! - [`graph`]: property graph model, the [`GraphStore`] trait with explicit
//!   units of work, and an in-memory implementation
//! - [`index`]: property indexes used by store lookups
//! - [`jobs`]: ingestion, propagation, event dispatch, ranking, maintenance
//! - [`config`]: YAML-loadable tuning knobs
//! - [`catalog`]: demo postings and interactions
//!
//! ## Example Usage
//!
//! ```rust
//! use jobgraph::{EventKind, InMemoryGraphStore, JobGraph};
//!
//! let graph = JobGraph::default();
//! let mut store = InMemoryGraphStore::new();
//!
//! graph.add_job(&mut store, "Starbucks", "Barista").unwrap();
//! graph.add_job(&mut store, "Starbucks", "Store Manager").unwrap();
//! graph.click(&mut store, "Starbucks", "Barista", EventKind::Click).unwrap();
//!
//! let ranking = graph.rank_by_weight(&store).unwrap();
//! assert_eq!(ranking.entries[0].weight, 11.0);
//! assert_eq!(ranking.entries[1].weight, 10.25);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod graph;
pub mod index;
pub mod jobs;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, EventIncrements, JobGraphConfig, SimilarityWeights};

pub use graph::{
    with_unit_of_work, Edge, EdgeId, EdgeType, GraphError, GraphResult, GraphStore,
    InMemoryGraphStore, Label, Node, NodeId, PropertyMap, PropertyValue, UnitOfWork,
};

pub use jobs::{
    ClickOutcome, EventKind, JobGraph, JobGraphError, JobNode, JobResult, PropagationReport,
    Ranking, ResetReport,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
