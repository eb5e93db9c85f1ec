//! `workflow-sim` CLI entry-point.
//!
//! Available sub-commands:
//! - `validate` — check a workflow JSON file for structural defects.
//! - `simulate` — validate, then dry-run the workflow and print its trace.
//! - `template` — print a node of the given kind with its default config.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::{
    dry_run, parse_context, Context, Node, NodeConfig, NodeKind, SimulatorConfig, Workflow,
};

#[derive(Debug, Parser)]
#[command(
    name = "workflow-sim",
    about = "Validate and dry-run workflow graphs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a workflow definition JSON file.
    Validate {
        /// Path to the workflow JSON file.
        path: PathBuf,
    },
    /// Validate and simulate a workflow definition JSON file.
    Simulate(SimulateArgs),
    /// Print a new node of the given kind (start, task, approval, automated,
    /// condition, end) as JSON, with the editor's default configuration.
    Template {
        kind: NodeKind,

        /// Node id; defaults to `<kind>_1`.
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Path to the workflow JSON file.
    path: PathBuf,

    /// JSON file holding the simulation context object.
    #[arg(long, conflicts_with = "context_json")]
    context: Option<PathBuf>,

    /// Inline JSON object used as the simulation context.
    #[arg(long)]
    context_json: Option<String>,

    /// Maximum number of nodes visited before the run is abandoned.
    #[arg(
        long,
        env = "WORKFLOW_MAX_STEPS",
        default_value_t = SimulatorConfig::DEFAULT_MAX_STEPS
    )]
    max_steps: usize,

    /// Print the full report as JSON instead of trace lines.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether the workflow passed (valid, or simulated to completion).
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Validate { path } => {
            let workflow = load_workflow(&path)?;
            let errors = engine::validate(&workflow.nodes, &workflow.edges);

            if errors.is_empty() {
                println!(
                    "✅ Workflow is valid ({} nodes, {} edges).",
                    workflow.nodes.len(),
                    workflow.edges.len()
                );
                return Ok(true);
            }

            eprintln!("❌ Validation failed:");
            for error in &errors {
                eprintln!("  - {error}");
            }
            Ok(false)
        }
        Command::Simulate(args) => {
            let workflow = load_workflow(&args.path)?;
            let context = load_context(&args)?;
            let config = SimulatorConfig {
                max_steps: args.max_steps,
            };

            info!("simulating '{}' with max_steps = {}", args.path.display(), config.max_steps);
            let report = dry_run(&workflow, &context, &config);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if !report.ok {
                eprintln!("❌ Workflow has structural errors; not simulated:");
                for error in &report.structure_errors {
                    eprintln!("  - {error}");
                }
            } else {
                for step in &report.steps {
                    println!("{step}");
                }
                if report.completed {
                    println!("✅ Workflow completed.");
                } else {
                    println!("⚠️  Workflow did not reach an End node.");
                }
            }

            Ok(report.ok && report.completed)
        }
        Command::Template { kind, id } => {
            println!("{}", serde_json::to_string_pretty(&template_node(kind, id))?);
            Ok(true)
        }
    }
}

fn template_node(kind: NodeKind, id: Option<String>) -> Node {
    let id = id.unwrap_or_else(|| format!("{kind}_1"));
    Node::new(id, NodeConfig::default_for(kind))
}

fn load_workflow(path: &Path) -> Result<Workflow> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    Workflow::from_json_str(&content).with_context(|| format!("cannot load {}", path.display()))
}

fn load_context(args: &SimulateArgs) -> Result<Context> {
    let text = match (&args.context, &args.context_json) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read context file {}", path.display()))?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => return Ok(Context::new()),
    };
    Ok(parse_context(&text)?)
}
