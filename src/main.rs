//! pipeline-dag CLI - HTTP server and offline pipeline check

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use pipeline_dag::config::log_filter;
use pipeline_dag::error::{FixSuggestion, PipelineError};
use pipeline_dag::{AdjacencyList, CycleDetector, Pipeline, PipelineSummary, Server, ServerConfig};

#[derive(Parser)]
#[command(name = "pipeline-dag")]
#[command(about = "Pipeline DAG inspector - node/edge counts and cycle check")]
#[command(version)]
struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Interface to bind (overrides PIPELINE_HOST and the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides PIPELINE_PORT and the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a TOML config file (default: ./pipeline-dag.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check a pipeline JSON file without starting the server
    Check {
        /// Path to a JSON file with `nodes` and `edges`
        file: PathBuf,

        /// Print the same JSON body the server would return
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Initialize tracing (RUST_LOG wins over the info default)
    let directives = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Serve { host, port, config }) => serve(host, port, config.as_deref()).await,
        None => serve(None, None, None).await,
        Some(Commands::Check { file, json }) => check_pipeline(&file, json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn serve(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<(), PipelineError> {
    let config = ServerConfig::load(config_path)?
        .with_env()?
        .with_overrides(host, port);

    let server = Server::bind(&config).await?;
    server.run().await
}

fn check_pipeline(file: &Path, as_json: bool) -> Result<(), PipelineError> {
    let content = fs::read_to_string(file)?;
    let pipeline: Pipeline = serde_json::from_str(&content)?;

    if as_json {
        let summary = PipelineSummary::from_pipeline(&pipeline);
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    let graph = AdjacencyList::from_pipeline(&pipeline);
    // No nodes or no edges leaves nothing to walk, same verdict as the short-circuit
    let cycle = CycleDetector::new(&graph).find_cycle();

    if cycle.is_none() {
        println!("{} Pipeline '{}' is a DAG", "✓".green(), file.display());
    } else {
        println!("{} Pipeline '{}' contains a cycle", "✗".red(), file.display());
    }
    println!("  Nodes: {}", pipeline.num_nodes());
    println!("  Edges: {}", pipeline.num_edges());

    if graph.dropped_edges() > 0 {
        println!(
            "  {} {} edge(s) ignored (missing or unknown endpoint)",
            "!".yellow(),
            graph.dropped_edges()
        );
    }
    if graph.duplicate_nodes() > 0 {
        println!(
            "  {} {} duplicate node id(s) collapsed",
            "!".yellow(),
            graph.duplicate_nodes()
        );
    }

    if let Some(cycle) = cycle {
        println!("  Cycle: {}", cycle.join(" → ").red());
    }

    Ok(())
}
