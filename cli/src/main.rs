//! Jobgraph CLI: drives the relevance engine over an in-memory store
//!
//! `demo` replays the built-in catalog; `run` replays a YAML scenario.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use jobgraph::catalog::{self, DEMO_EVENTS, DEMO_RENAME, DEMO_RESET_TITLE};
use jobgraph::{
    ClickOutcome, EventKind, GraphStore, InMemoryGraphStore, JobGraph, JobGraphConfig, Ranking,
    ResetReport,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "jobgraph", version, about = "Job relevance graph driver")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "JOBGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log every created relationship and propagation step
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
    /// Plain weight report, one `<weight> - <jobId>` line per job
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the demo catalog, replay its interactions and print the ranking
    Demo,
    /// Replay a scenario file
    Run {
        /// Scenario YAML path
        scenario: PathBuf,
    },
}

/// A scripted session: postings, then interactions, then renames, then an optional reset
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Scenario {
    jobs: Vec<JobEntry>,
    events: Vec<EventEntry>,
    renames: Vec<RenameEntry>,
    reset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobEntry {
    company: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    company: String,
    title: String,
    /// Event name or legacy numeric code
    event: String,
}

#[derive(Debug, Deserialize)]
struct RenameEntry {
    from: String,
    to: String,
}

#[derive(Serialize)]
struct Summary<'a> {
    ranking: &'a Ranking,
    #[serde(skip_serializing_if = "Option::is_none")]
    reset: Option<ResetReport>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let graph = JobGraph::new(config);
    let mut store = InMemoryGraphStore::new();
    graph.ensure_indexes(&mut store)?;

    let scenario = match &cli.command {
        Commands::Demo => demo_scenario(),
        Commands::Run { scenario } => load_scenario(scenario)?,
    };

    let (ranking, reset) = replay(&graph, &mut store, &scenario)?;
    print_summary(&Summary { ranking: &ranking, reset }, &cli.format)
}

fn load_config(path: Option<&Path>) -> Result<JobGraphConfig> {
    let config = match path {
        Some(path) => JobGraphConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => JobGraphConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
}

fn demo_scenario() -> Scenario {
    let (from, to) = DEMO_RENAME;
    Scenario {
        jobs: catalog::DEMO_JOBS
            .iter()
            .map(|(company, title)| JobEntry {
                company: company.to_string(),
                title: title.to_string(),
            })
            .collect(),
        events: DEMO_EVENTS
            .iter()
            .map(|(company, title, kind)| EventEntry {
                company: company.to_string(),
                title: title.to_string(),
                event: kind.to_string(),
            })
            .collect(),
        renames: vec![RenameEntry {
            from: from.to_string(),
            to: to.to_string(),
        }],
        reset: Some(DEMO_RESET_TITLE.to_string()),
    }
}

/// Apply a scenario and return the ranking taken before any reset
fn replay(
    graph: &JobGraph,
    store: &mut InMemoryGraphStore,
    scenario: &Scenario,
) -> Result<(Ranking, Option<ResetReport>)> {
    for job in &scenario.jobs {
        graph.add_job(store, &job.company, &job.title)?;
    }
    info!("Seeded {} job(s), {} relationship(s)", store.node_count(), store.relationship_count());

    for event in &scenario.events {
        let kind: EventKind = event.event.parse()?;
        match graph.click(store, &event.company, &event.title, kind)? {
            ClickOutcome::Applied(report) => info!(
                "{} on {}: {} -> {:?}, {} neighbour(s) updated",
                kind,
                report.seed,
                report.increment,
                report.seed_weight,
                report.neighbours.len()
            ),
            ClickOutcome::NotFound { id } => warn!("Skipped {} on unknown job {}", kind, id),
        }
    }

    for rename in &scenario.renames {
        graph.rename_company(store, &rename.from, &rename.to)?;
    }

    let ranking = graph.rank_by_weight(store)?;
    let reset = match &scenario.reset {
        Some(title) => Some(graph.reset(store, title)?),
        None => None,
    };
    Ok((ranking, reset))
}

fn print_summary(summary: &Summary<'_>, format: &OutputFormat) -> Result<()> {
    print!("{}", render_summary(summary, format)?);
    Ok(())
}

fn render_summary(summary: &Summary<'_>, format: &OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "rank,weight,jobId,company,jobTitle")?;
            for (rank, job) in summary.ranking.iter().enumerate() {
                writeln!(
                    out,
                    "{},{:?},{},{},{}",
                    rank + 1,
                    job.weight,
                    csv_field(&job.id),
                    csv_field(&job.company),
                    csv_field(&job.job_title)
                )?;
            }
        }
        OutputFormat::Text => {
            write!(out, "{}", summary.ranking)?;
            write_reset(&mut out, summary.reset.as_ref())?;
        }
        OutputFormat::Table => {
            if summary.ranking.is_empty() {
                writeln!(out, "(no jobs)")?;
            } else {
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["#", "Weight", "Job", "Company", "Title"]);
                for (rank, job) in summary.ranking.iter().enumerate() {
                    table.add_row(vec![
                        (rank + 1).to_string(),
                        format!("{:?}", job.weight),
                        job.id.clone(),
                        job.company.clone(),
                        job.job_title.clone(),
                    ]);
                }
                writeln!(out, "{}", table)?;
                writeln!(out, "{} job(s)", summary.ranking.len())?;
            }
            write_reset(&mut out, summary.reset.as_ref())?;
        }
    }

    Ok(out)
}

fn write_reset(out: &mut String, reset: Option<&ResetReport>) -> std::fmt::Result {
    match reset {
        Some(reset) => writeln!(
            out,
            "Reset removed {} relationship(s) and {} job(s)",
            reset.relationships_deleted, reset.nodes_deleted
        ),
        None => Ok(()),
    }
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
