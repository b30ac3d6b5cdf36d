use jobgraph::catalog::{self, DEMO_EVENTS, DEMO_JOBS};
use jobgraph::jobs::{similarity, JobKey, WEIGHT};
use jobgraph::{ClickOutcome, EventKind, GraphStore, InMemoryGraphStore, JobGraph, SimilarityWeights};
use std::collections::HashSet;

fn demo_graph() -> (JobGraph, InMemoryGraphStore) {
    let graph = JobGraph::default();
    let mut store = InMemoryGraphStore::new();
    graph.ensure_indexes(&mut store).unwrap();
    catalog::seed_jobs(&graph, &mut store).unwrap();
    (graph, store)
}

#[test]
fn test_boeing_google_scenario() {
    let graph = JobGraph::default();
    let mut store = InMemoryGraphStore::new();

    graph.add_job(&mut store, "Boeing", "IT").unwrap();
    graph.add_job(&mut store, "Google", "IT").unwrap();
    graph.add_job(&mut store, "Google", "Systems Analyst").unwrap();

    let outcome = graph.click(&mut store, "Google", "IT", EventKind::Like).unwrap();
    match outcome {
        ClickOutcome::Applied(report) => {
            assert_eq!(report.seed_weight, 20.0);
            assert_eq!(report.neighbours.len(), 2);
        }
        other => panic!("expected an applied click, got {:?}", other),
    }

    let ranking = graph.rank_by_weight(&store).unwrap();
    let rows: Vec<(String, f64)> = ranking.iter().map(|j| (j.id.clone(), j.weight)).collect();
    assert_eq!(
        rows,
        vec![
            ("Google: IT".to_string(), 20.0),
            ("Boeing: IT".to_string(), 18.0),
            ("Google: Systems Analyst".to_string(), 12.5),
        ]
    );
    assert_eq!(
        ranking.to_string(),
        "----------ALL NODE WEIGHTS----------\n\
         20.0 - Google: IT\n\
         18.0 - Boeing: IT\n\
         12.5 - Google: Systems Analyst\n"
    );
}

#[test]
fn test_demo_catalog_is_complete_graph() {
    let (graph, store) = demo_graph();
    let n = DEMO_JOBS.len();
    assert_eq!(store.node_count(), n);
    assert_eq!(store.relationship_count(), n * (n - 1) / 2);

    let ids: HashSet<String> = graph.jobs(&store).unwrap().into_iter().map(|j| j.id).collect();
    assert_eq!(ids.len(), n);

    for job in graph.jobs(&store).unwrap() {
        assert_eq!(store.relationships_of(job.node_id).unwrap().len(), n - 1);
    }
}

#[test]
fn test_relationship_weights_match_similarity() {
    let (graph, store) = demo_graph();
    let weights = SimilarityWeights::default();

    for rel in store.all_relationships().unwrap() {
        let edge = store.get_edge(rel).unwrap();
        let a = graph.jobs(&store).unwrap().into_iter().find(|j| j.node_id == edge.start).unwrap();
        let b = graph.jobs(&store).unwrap().into_iter().find(|j| j.node_id == edge.end).unwrap();

        let expected = similarity(&weights, a.key(), b.key());
        assert_eq!(expected, similarity(&weights, b.key(), a.key()));
        assert_eq!(edge.get_property(WEIGHT).and_then(|w| w.as_float()), Some(expected));
    }
}

#[test]
fn test_similarity_prefers_company() {
    let weights = SimilarityWeights::default();
    assert_eq!(similarity(&weights, JobKey::new("Amazon", "IT"), JobKey::new("Amazon", "Baker")), 0.25);
    assert_eq!(similarity(&weights, JobKey::new("Amazon", "IT"), JobKey::new("Boeing", "IT")), 0.8);
    assert_eq!(similarity(&weights, JobKey::new("Amazon", "IT"), JobKey::new("Boeing", "Baker")), 0.0);
}

#[test]
fn test_demo_events_ranking() {
    let (graph, mut store) = demo_graph();
    for (company, title, kind) in DEMO_EVENTS {
        assert!(graph.click(&mut store, company, title, *kind).unwrap().is_applied());
    }

    let ranking = graph.rank_by_weight(&store).unwrap();
    assert_eq!(ranking.len(), DEMO_JOBS.len());

    let top: Vec<(&str, f64)> = ranking.iter().take(7).map(|j| (j.id.as_str(), j.weight)).collect();
    assert_eq!(
        top,
        vec![
            ("Equifax: Systems Analyst", 30.5),
            ("Amazon: Systems Analyst", 28.0),
            // Equal weights: the later-created job ranks first
            ("Microsoft: Systems Analyst", 26.0),
            ("Google: Systems Analyst", 26.0),
            ("Starbucks: Store Manager", 22.75),
            ("Starbucks: Shift Supervisor", 22.75),
            ("Equifax: Business Analyst", 22.5),
        ]
    );

    let bottom: Vec<(&str, f64)> = ranking
        .iter()
        .rev()
        .take(2)
        .map(|j| (j.id.as_str(), j.weight))
        .collect();
    assert_eq!(
        bottom,
        vec![("Monsanto: Chemical Engineer", 0.0), ("Imo's: Truck Driver", 0.0)]
    );

    assert_eq!(graph.job(&store, "Starbucks", "Truck Driver").unwrap().weight, 7.25);
    assert_eq!(graph.job(&store, "Panera Bread", "Truck Driver").unwrap().weight, 2.0);
}

#[test]
fn test_propagation_total_delta() {
    let (graph, mut store) = demo_graph();
    let before: f64 = graph.jobs(&store).unwrap().iter().map(|j| j.weight).sum();

    let seed = graph.job(&store, "Google", "IT").unwrap();
    let outgoing: f64 = store
        .relationships_of(seed.node_id)
        .unwrap()
        .into_iter()
        .filter_map(|rel| store.relationship_property(rel, WEIGHT).unwrap())
        .filter_map(|w| w.as_float())
        .sum();

    graph.click(&mut store, "Google", "IT", EventKind::Like).unwrap();
    let after: f64 = graph.jobs(&store).unwrap().iter().map(|j| j.weight).sum();

    assert!((after - before - 10.0 * (1.0 + outgoing)).abs() < 1e-9);
}

#[test]
fn test_click_on_unknown_job_changes_nothing() {
    let (graph, mut store) = demo_graph();
    let before = graph.rank_by_weight(&store).unwrap();

    let outcome = graph.click(&mut store, "Boeing", "Barista", EventKind::Like).unwrap();
    assert!(!outcome.is_applied());
    assert_eq!(graph.rank_by_weight(&store).unwrap(), before);
}

#[test]
fn test_demo_rename_and_reset() {
    let (graph, mut store) = demo_graph();
    let (from, to) = catalog::DEMO_RENAME;
    assert_eq!(graph.rename_company(&mut store, from, to).unwrap(), 6);
    assert!(graph.find_job(&store, "Alphabet", "Web Developer").unwrap().is_some());

    let report = graph.reset(&mut store, catalog::DEMO_RESET_TITLE).unwrap();
    assert_eq!(report.nodes_deleted, 4);
    assert_eq!(report.relationships_deleted, DEMO_JOBS.len() * (DEMO_JOBS.len() - 1) / 2);

    assert_eq!(store.relationship_count(), 0);
    assert!(graph.jobs_with_title(&store, catalog::DEMO_RESET_TITLE).unwrap().is_empty());
    assert_eq!(store.node_count(), DEMO_JOBS.len() - 4);
}

#[test]
fn test_empty_graph() {
    let graph = JobGraph::default();
    let mut store = InMemoryGraphStore::new();
    assert!(graph.rank_by_weight(&store).unwrap().is_empty());

    let report = graph.reset(&mut store, "IT").unwrap();
    assert_eq!(report.nodes_deleted, 0);
    assert_eq!(report.relationships_deleted, 0);
}
