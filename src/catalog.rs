//! Demo catalog
//!
//! Seed postings and interactions used by the CLI `demo` command, the
//! integration tests and the benches.

use crate::graph::GraphStore;
use crate::jobs::{EventKind, JobGraph, JobNode, JobResult};

/// Company and title of every demo posting, in insertion order
pub const DEMO_JOBS: &[(&str, &str)] = &[
    ("Boeing", "Business Analyst"),
    ("Boeing", "IT"),
    ("Boeing", "Electrical Engineer"),
    ("Boeing", "Mechanical Engineer"),
    ("Boeing", "Aerospace Engineer"),
    ("Boeing", "Chief Electrical Engineer"),
    ("Boeing", "Computer Engineer"),
    ("Google", "Systems Analyst"),
    ("Google", "Software Engineer"),
    ("Google", "IT"),
    ("Google", "Database Manager"),
    ("Google", "Senior Developer"),
    ("Google", "Web Developer"),
    ("Microsoft", "Software Engineer"),
    ("Microsoft", "IT"),
    ("Microsoft", "Database Manager"),
    ("Microsoft", "Business Administrator"),
    ("Microsoft", "Senior Developer"),
    ("Microsoft", "Systems Analyst"),
    ("Amazon", "Business Administrator"),
    ("Amazon", "Systems Analyst"),
    ("Amazon", "Software Engineer"),
    ("Amazon", "IT"),
    ("Amazon", "Database Manager"),
    ("Amazon", "Warehouse Associate"),
    ("Amazon", "Warehouse Manager"),
    ("Texas Instruments", "Computer Engineer"),
    ("KPMG", "IT Project Manager"),
    ("Equifax", "Information Security Officer"),
    ("Equifax", "Systems Analyst"),
    ("Equifax", "Business Analyst"),
    ("Monsanto", "Data Analyst"),
    ("Monsanto", "Chemical Engineer"),
    ("Monsanto", "Botanist"),
    ("Monsanto", "Weed Control Scientist"),
    ("Monsanto", "Sales Representative"),
    ("Dot Foods", "Database Manager"),
    ("Dot Foods", "Warehouse Associate"),
    ("Dot Foods", "Warehouse Manager"),
    ("Dot Foods", "Business Analyst"),
    ("Panera Bread", "Store Manager"),
    ("Panera Bread", "Database Manager"),
    ("Panera Bread", "Baker"),
    ("Panera Bread", "Bakery Associate"),
    ("Panera Bread", "Shift Supervisor"),
    ("Panera Bread", "Warehouse Associate"),
    ("Panera Bread", "Truck Driver"),
    ("Panera Bread", "Sales Representative"),
    ("Imo's", "Delivery Driver"),
    ("Imo's", "Store Manager"),
    ("Imo's", "Baker"),
    ("Imo's", "Truck Driver"),
    ("Starbucks", "Barista"),
    ("Starbucks", "Shift Supervisor"),
    ("Starbucks", "Store Manager"),
    ("Starbucks", "Sales Representative"),
    ("Starbucks", "Truck Driver"),
    ("Starbucks", "Warehouse Manager"),
];

/// Interactions replayed after seeding
pub const DEMO_EVENTS: &[(&str, &str, EventKind)] = &[
    ("Starbucks", "Barista", EventKind::Click),
    ("Starbucks", "Shift Supervisor", EventKind::Like),
    ("Starbucks", "Store Manager", EventKind::Like),
    ("Equifax", "Systems Analyst", EventKind::Like),
    ("Equifax", "Business Analyst", EventKind::Like),
    ("Amazon", "Systems Analyst", EventKind::Like),
    ("Imo's", "Truck Driver", EventKind::Dislike),
    ("Monsanto", "Chemical Engineer", EventKind::Dislike),
];

/// Company rename applied by the demo
pub const DEMO_RENAME: (&str, &str) = ("Google", "Alphabet");

/// Title removed by the demo reset
pub const DEMO_RESET_TITLE: &str = "Systems Analyst";

/// Insert every demo posting
pub fn seed_jobs<S: GraphStore + ?Sized>(graph: &JobGraph, store: &mut S) -> JobResult<Vec<JobNode>> {
    DEMO_JOBS
        .iter()
        .map(|(company, title)| graph.add_job(store, company, title))
        .collect()
}
