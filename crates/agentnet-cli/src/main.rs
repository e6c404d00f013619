mod config;

use agentnet_memory::{FileMemoryStore, KnowledgeGraph};
use agentnet_orchestrator::{
    recall_or_execute, run_experiment, seed_reference_tasks, Controller, Debate, ExperimentResults,
    MetricsSnapshot, MetricsTracker, TaskRegistry, Team,
};
use agentnet_selection::SelectionEngine;
use clap::{Parser, Subcommand};
use config::AgentnetConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agentnet", about = "Agentnet: adaptive worker allocation")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "agentnet.toml")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new task
    Register {
        name: String,
        complexity: f64,
    },
    /// List registered tasks
    List,
    /// Remove a registered task
    Remove { name: String },
    /// Run a registered task once
    Run { name: String },
    /// Run every registered task for several iterations
    Experiment {
        /// Number of iterations
        #[arg(short, long, default_value_t = 20)]
        runs: usize,
        /// Where to write the results (defaults to the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show recorded success rates and selection counts
    Report,
    /// Split a registered task across the whole roster
    Team { name: String },
    /// Settle on an answer for a task using the knowledge graph
    Debate { task: String, proposal: String },
    /// Show what the knowledge graph knows about an entity
    Facts { entity: String },
    /// Shortest chain of facts between two entities
    Path { from: String, to: String },
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Task")]
    name: String,
    #[tabled(rename = "Complexity")]
    complexity: f64,
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Task")]
    name: String,
    #[tabled(rename = "Success")]
    success: u64,
    #[tabled(rename = "Failure")]
    failure: u64,
    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Tabled)]
struct WorkerRow {
    #[tabled(rename = "Worker")]
    identity: String,
    #[tabled(rename = "Selections")]
    selections: u64,
    #[tabled(rename = "Weight")]
    weight: String,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_controller(
    config: &AgentnetConfig,
    metrics: Arc<MetricsTracker>,
) -> anyhow::Result<Controller> {
    let engine = SelectionEngine::new(config.roster()?, config.selection.clone())?;
    info!(seed = engine.seed(), "Selection engine ready");
    Ok(Controller::new(engine, config.scoring)?.with_recorder(metrics))
}

fn print_report(snapshot: &MetricsSnapshot, distribution: Option<(&[String], &[f64])>) {
    let outcomes: Vec<OutcomeRow> = snapshot
        .tasks
        .iter()
        .map(|(name, counts)| OutcomeRow {
            name: name.clone(),
            success: counts.success,
            failure: counts.failure,
            rate: format!("{:.2}", counts.success_rate()),
        })
        .collect();

    let workers: Vec<WorkerRow> = match distribution {
        Some((identities, weights)) => identities
            .iter()
            .zip(weights)
            .map(|(identity, weight)| WorkerRow {
                identity: identity.clone(),
                selections: snapshot.workers.get(identity).copied().unwrap_or(0),
                weight: format!("{weight:.3}"),
            })
            .collect(),
        None => snapshot
            .workers
            .iter()
            .map(|(identity, count)| WorkerRow {
                identity: identity.clone(),
                selections: *count,
                weight: "-".to_string(),
            })
            .collect(),
    };

    if outcomes.is_empty() {
        println!("No task outcomes recorded yet.");
    } else {
        println!("{}", Table::new(outcomes).with(Style::rounded()));
    }
    if !workers.is_empty() {
        println!("{}", Table::new(workers).with(Style::rounded()));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = AgentnetConfig::load(&cli.config).await?;

    match cli.command {
        Commands::Register { name, complexity } => {
            let mut registry = TaskRegistry::load(&config.tasks_path()).await?;
            let task = registry.register(&name, complexity)?.clone();
            registry.save(&config.tasks_path()).await?;
            println!("Task '{}' registered with complexity {}.", task.name(), task.complexity());
        }
        Commands::List => {
            let registry = TaskRegistry::load(&config.tasks_path()).await?;
            if registry.is_empty() {
                println!("No tasks registered.");
                println!("Register one with: agentnet register <NAME> <COMPLEXITY>");
            } else {
                let rows: Vec<TaskRow> = registry
                    .list()
                    .iter()
                    .map(|t| TaskRow {
                        name: t.name().to_string(),
                        complexity: t.complexity(),
                    })
                    .collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
        Commands::Remove { name } => {
            let mut registry = TaskRegistry::load(&config.tasks_path()).await?;
            match registry.remove(&name) {
                Some(_) => {
                    registry.save(&config.tasks_path()).await?;
                    println!("Task '{name}' removed.");
                }
                None => println!("Task '{name}' not found."),
            }
        }
        Commands::Run { name } => {
            let registry = TaskRegistry::load(&config.tasks_path()).await?;
            let task = registry.require(&name)?.clone();

            let metrics = Arc::new(MetricsTracker::load(&config.metrics_path()).await?);
            let mut controller = build_controller(&config, metrics.clone())?;
            let report = controller.execute_task(&task)?;
            metrics.save(&config.metrics_path()).await?;

            let memory = FileMemoryStore::open(config.memory_path()).await?;
            let mut graph = KnowledgeGraph::load(&config.knowledge_path()).await?;

            println!(
                "Task '{}': {} (reward {:+}{})",
                task.name(),
                if report.success { "success" } else { "failure" },
                report.reward,
                if report.fallback { ", fallback" } else { "" }
            );
            for outcome in &report.outcomes {
                let worker = controller.engine().worker(outcome.index)?;
                let answer = recall_or_execute(worker.as_ref(), &task, &memory, &mut graph).await?;
                let status = if outcome.success { "ok" } else { "failed" };
                println!("  [{status}] {}: {}", outcome.identity, answer.output);
            }
            graph.save(&config.knowledge_path()).await?;
        }
        Commands::Experiment { runs, output } => {
            let mut registry = TaskRegistry::load(&config.tasks_path()).await?;
            if seed_reference_tasks(&mut registry)? > 0 {
                registry.save(&config.tasks_path()).await?;
                info!("Registered reference tasks");
            }

            let metrics = Arc::new(MetricsTracker::new());
            let mut controller = build_controller(&config, metrics.clone())?;
            info!(runs, tasks = registry.len(), "Running experiment");
            let results: ExperimentResults =
                run_experiment(&mut controller, registry.list(), &metrics, runs)?;

            let output = output.unwrap_or_else(|| config.results_path());
            results.save(&output).await?;
            metrics.save(&config.metrics_path()).await?;

            let identities = controller.engine().roster().identities();
            print_report(
                &metrics.snapshot(),
                Some((identities.as_slice(), results.distribution.as_slice())),
            );
            println!("Results saved to {}", output.display());
        }
        Commands::Report => {
            let metrics = MetricsTracker::load(&config.metrics_path()).await?;
            print_report(&metrics.snapshot(), None);
        }
        Commands::Team { name } => {
            let registry = TaskRegistry::load(&config.tasks_path()).await?;
            let task = registry.require(&name)?;
            let roster = config.roster()?;
            let team = Team::new(roster.iter().cloned().collect())?;
            let mut rng =
                ChaCha8Rng::seed_from_u64(config.selection.seed.unwrap_or_else(rand::random));
            let result = team.assign_subtasks(task, &mut rng)?;
            println!("{}", result.combined);
        }
        Commands::Debate { task, proposal } => {
            let mut graph = KnowledgeGraph::load(&config.knowledge_path()).await?;
            let roster = config.roster()?;
            let answer = Debate::new(roster.iter().cloned().collect()).resolve(
                &mut graph,
                &task,
                &proposal,
            );
            graph.save(&config.knowledge_path()).await?;
            println!("{answer}");
        }
        Commands::Facts { entity } => {
            let graph = KnowledgeGraph::load(&config.knowledge_path()).await?;
            let relations = graph.relations(&entity);
            if relations.is_empty() {
                println!("Nothing known about '{entity}'.");
            } else {
                for (relation, object) in relations {
                    println!("{entity} --{relation}--> {object}");
                }
            }
        }
        Commands::Path { from, to } => {
            let graph = KnowledgeGraph::load(&config.knowledge_path()).await?;
            let path = graph.find_path(&from, &to);
            if path.is_empty() {
                println!("No path from '{from}' to '{to}'.");
            } else {
                println!("{}", path.join(" -> "));
            }
        }
    }

    Ok(())
}
