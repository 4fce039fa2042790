#![allow(clippy::doc_markdown)]
//! graphstep - interactive graph editor and traversal stepper.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use graphstep_core::{GraphSession, GraphstepConfig, PlaybackMode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod repl;
mod repl_commands;

/// graphstep - edit a graph and step a remote BFS/DFS/Dijkstra over it
#[derive(Parser, Debug)]
#[command(name = "graphstep")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "graphstep.toml", env = "GRAPHSTEP_CONFIG")]
    config: PathBuf,

    /// Executor base URL (overrides the configuration)
    #[arg(short, long, env = "GRAPHSTEP_EXECUTOR_URL")]
    executor_url: Option<String>,

    /// Maximum number of nodes (overrides the configuration)
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Playback protocol: step or poll (overrides the configuration)
    #[arg(long, value_parser = parse_playback)]
    playback: Option<PlaybackMode>,

    /// Graph file to load on startup
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Default algorithm for .play/.next/.restart
    #[arg(short, long, default_value = "bfs")]
    algorithm: String,

    /// Run the commands in this file instead of the interactive prompt
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn parse_playback(value: &str) -> Result<PlaybackMode, String> {
    match value.to_lowercase().as_str() {
        "step" => Ok(PlaybackMode::Step),
        "poll" => Ok(PlaybackMode::Poll),
        other => Err(format!("unknown playback mode '{other}' (use step or poll)")),
    }
}

fn build_config(args: &Args) -> anyhow::Result<GraphstepConfig> {
    let mut config = GraphstepConfig::load_from(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(url) = &args.executor_url {
        config.executor.base_url.clone_from(url);
    }
    if let Some(max_nodes) = args.max_nodes {
        config.graph.max_nodes = max_nodes;
    }
    if let Some(playback) = args.playback {
        config.animation.playback = playback;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(executor = %config.executor.base_url, "Starting graphstep");

    let mut session = GraphSession::with_http(config)?;
    if let Some(path) = &args.load {
        let report = session
            .load(Some(path))
            .with_context(|| format!("loading graph from {}", path.display()))?;
        tracing::info!(nodes = report.nodes, edges = report.edges, "Graph loaded");
    }

    let repl_config = repl::ReplConfig::new(args.algorithm);
    match &args.script {
        Some(path) => repl::run_script(&mut session, repl_config, path).await,
        None => repl::run(&mut session, repl_config).await,
    }
}
