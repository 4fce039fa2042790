//! REPL command handlers.
//!
//! Each command is implemented as a separate function. Handlers print their
//! own output and return a [`CommandResult`] to the loop in `repl.rs`.

#![allow(clippy::doc_markdown)]

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use graphstep_core::interaction::{EditingTarget, MenuTarget};
use graphstep_core::{
    ClickOutcome, EditOutcome, EdgeOptions, GraphFormat, GraphSession, NodeId, SessionSnapshot,
    StartOutcome, StepOutcome,
};

use crate::repl::{OutputFormat, ReplConfig};

/// Result of a REPL command execution.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Quit,
    Error(String),
}

impl From<graphstep_core::Error> for CommandResult {
    fn from(err: graphstep_core::Error) -> Self {
        Self::Error(err.to_string())
    }
}

/// Upper bound for `.wait` when no duration is given.
const DEFAULT_WAIT_MS: u64 = 30_000;
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Handle a REPL command (line starting with '.')
#[allow(clippy::too_many_lines)]
pub async fn handle_command(
    session: &mut GraphSession,
    line: &str,
    config: &mut ReplConfig,
) -> CommandResult {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts.first().map(|s| s.to_lowercase()).unwrap_or_default();

    match cmd.as_str() {
        ".quit" | ".exit" | ".q" => CommandResult::Quit,
        ".help" | ".h" => {
            print_help();
            CommandResult::Continue
        }
        // Editing
        ".add" | ".node" => cmd_add(session, &parts),
        ".click" => cmd_click(session, &parts),
        ".deselect" => {
            session.click_canvas();
            CommandResult::Continue
        }
        ".connect" | ".edge" => cmd_connect(session, &parts),
        ".weight" => cmd_weight(session, &parts),
        ".move" => cmd_move(session, &parts),
        ".delete" | ".rm" => cmd_delete(session, &parts),
        ".toggle" => cmd_toggle(session, &parts),
        ".menu" => cmd_menu(session, &parts),
        ".clear" => cmd_clear(session),
        // Inspection
        ".show" | ".ls" => cmd_show(session, config, &parts),
        ".neighbors" => cmd_neighbors(session, &parts),
        ".status" => cmd_status(session),
        ".config" => cmd_config(session),
        ".format" => cmd_format(config, &parts),
        ".cls" => {
            print!("\x1B[2J\x1B[1;1H");
            CommandResult::Continue
        }
        // Animation
        ".algorithm" | ".alg" => cmd_algorithm(config, &parts),
        ".play" => cmd_play(session, config, &parts).await,
        ".stop" => cmd_stop(session),
        ".next" | ".n" => cmd_next(session, config, &parts).await,
        ".restart" => cmd_restart(session, config, &parts).await,
        ".wait" => cmd_wait(session, &parts).await,
        // Files
        ".save" => cmd_save(session, &parts),
        ".load" => cmd_load(session, &parts),
        ".export" => cmd_export(session, &parts),
        _ => CommandResult::Error(format!("Unknown command: {cmd}")),
    }
}

// ── Argument helpers ───────────────────────────────────────────────────

pub(crate) fn parse_id(parts: &[&str], index: usize, usage: &str) -> Result<u64, CommandResult> {
    let raw = parts
        .get(index)
        .ok_or_else(|| CommandResult::Error(format!("Usage: {usage}")))?;
    raw.parse::<u64>()
        .map_err(|_| CommandResult::Error(format!("'{raw}' is not a valid id")))
}

pub(crate) fn parse_coord(parts: &[&str], index: usize, usage: &str) -> Result<f64, CommandResult> {
    let raw = parts
        .get(index)
        .ok_or_else(|| CommandResult::Error(format!("Usage: {usage}")))?;
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandResult::Error(format!("'{raw}' is not a valid coordinate")))
}

pub(crate) fn parse_format(raw: Option<&&str>) -> Result<GraphFormat, CommandResult> {
    match raw.map(|s| s.to_lowercase()).as_deref() {
        None | Some("extended" | "ext") => Ok(GraphFormat::Extended),
        Some("plain") => Ok(GraphFormat::Plain),
        Some(other) => Err(CommandResult::Error(format!(
            "Unknown format '{other}' (use plain|extended)"
        ))),
    }
}

/// Parses `[weight] [--undirected|--directed]` in any order.
pub(crate) fn parse_edge_options(
    args: &[&str],
    default_directed: bool,
) -> Result<EdgeOptions, CommandResult> {
    let mut options = EdgeOptions {
        weight: None,
        directed: default_directed,
    };
    for arg in args {
        match *arg {
            "--undirected" | "-u" => options.directed = false,
            "--directed" | "-d" => options.directed = true,
            raw => {
                let weight = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|w| w.is_finite())
                    .ok_or_else(|| CommandResult::Error(format!("'{raw}' is not a valid weight")))?;
                options.weight = Some(weight);
            }
        }
    }
    Ok(options)
}

fn algorithm_arg<'a>(config: &'a ReplConfig, parts: &[&'a str]) -> &'a str {
    parts.get(1).copied().unwrap_or(&config.algorithm)
}

fn fmt_weight(weight: Option<f64>) -> String {
    weight.map_or_else(|| "-".to_string(), |w| w.to_string())
}

// ── Editing ────────────────────────────────────────────────────────────

fn cmd_add(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    const USAGE: &str = ".add <x> <y>";
    let (x, y) = match (parse_coord(parts, 1, USAGE), parse_coord(parts, 2, USAGE)) {
        (Ok(x), Ok(y)) => (x, y),
        (Err(e), _) | (_, Err(e)) => return e,
    };
    match session.double_click_canvas(x, y) {
        Ok(node) => {
            println!("Node {} at ({x}, {y})\n", node.id().to_string().green());
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

fn cmd_click(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    let id = match parse_id(parts, 1, ".click <node> [weight] [--undirected]") {
        Ok(id) => id,
        Err(e) => return e,
    };
    let default_directed = session.config().graph.default_directed;
    let options = match parse_edge_options(&parts[2..], default_directed) {
        Ok(options) => options,
        Err(e) => return e,
    };
    match session.click_node_with(id, options) {
        Ok(ClickOutcome::Selected(id)) => println!("Selected node {id}\n"),
        Ok(ClickOutcome::Deselected(id)) => println!("Deselected node {id}\n"),
        Ok(ClickOutcome::Connected(edge)) => println!(
            "Edge {}: {} {} {}\n",
            edge.id().to_string().green(),
            edge.from(),
            if edge.is_directed() { "->" } else { "--" },
            edge.to()
        ),
        Ok(ClickOutcome::ConnectRejected(reason)) => {
            return CommandResult::Error(format!("Edge refused: {reason}"));
        }
        Ok(ClickOutcome::UnknownNode(id)) => {
            return CommandResult::Error(format!("Node {id} not found"));
        }
        Err(e) => return e.into(),
    }
    CommandResult::Continue
}

fn cmd_connect(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    const USAGE: &str = ".connect <from> <to> [weight] [--undirected]";
    let (from, to) = match (parse_id(parts, 1, USAGE), parse_id(parts, 2, USAGE)) {
        (Ok(from), Ok(to)) => (from, to),
        (Err(e), _) | (_, Err(e)) => return e,
    };
    let default_directed = session.config().graph.default_directed;
    let options = match parse_edge_options(&parts[3..], default_directed) {
        Ok(options) => options,
        Err(e) => return e,
    };
    match session.add_edge(from, to, options) {
        Ok(edge) => {
            println!(
                "Edge {}: {from} {} {to} (weight {})\n",
                edge.id().to_string().green(),
                if edge.is_directed() { "->" } else { "--" },
                fmt_weight(edge.weight())
            );
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

fn cmd_weight(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    const USAGE: &str = ".weight node|edge <id> [value]";
    let kind = parts.get(1).map(|s| s.to_lowercase()).unwrap_or_default();
    let id = match parse_id(parts, 2, USAGE) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let opened = match kind.as_str() {
        "node" => session.begin_edit_node(id),
        "edge" => session.begin_edit_edge(id),
        _ => return CommandResult::Error(format!("Usage: {USAGE}")),
    };
    match opened {
        Ok(true) => {}
        Ok(false) => return CommandResult::Error(format!("{kind} {id} not found")),
        Err(e) => return e.into(),
    }

    let input = parts.get(3).copied().unwrap_or("");
    match session.commit_edit(input) {
        Ok(EditOutcome::Applied { target, weight }) => {
            let label = match target {
                EditingTarget::Node(id) => format!("node {id}"),
                EditingTarget::Edge(id) => format!("edge {id}"),
            };
            println!("Weight of {label}: {}\n", fmt_weight(weight));
            CommandResult::Continue
        }
        Ok(EditOutcome::InvalidInput(raw)) => {
            CommandResult::Error(format!("'{raw}' is not a number; weight unchanged"))
        }
        Ok(EditOutcome::TargetMissing(_) | EditOutcome::NotEditing) => {
            CommandResult::Error(format!("{kind} {id} is no longer available"))
        }
        Err(e) => e.into(),
    }
}

fn cmd_move(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    const USAGE: &str = ".move <node> <x> <y>";
    let id = match parse_id(parts, 1, USAGE) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let (x, y) = match (parse_coord(parts, 2, USAGE), parse_coord(parts, 3, USAGE)) {
        (Ok(x), Ok(y)) => (x, y),
        (Err(e), _) | (_, Err(e)) => return e,
    };
    let Some(node) = session.node(id) else {
        return CommandResult::Error(format!("Node {id} not found"));
    };

    // Grab the node at its centre so the drag lands it exactly on (x, y).
    let result = session
        .pointer_down(id, node.x(), node.y())
        .and_then(|_| session.pointer_move(x, y));
    session.pointer_up();
    match result {
        Ok(_) => {
            println!("Node {id} moved to ({x}, {y})\n");
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

fn cmd_delete(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    const USAGE: &str = ".delete node|edge <id>";
    let kind = parts.get(1).map(|s| s.to_lowercase()).unwrap_or_default();
    let id = match parse_id(parts, 2, USAGE) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let removed = match kind.as_str() {
        "node" => session.delete_node(id),
        "edge" => session.delete_edge(id),
        _ => return CommandResult::Error(format!("Usage: {USAGE}")),
    };
    match removed {
        Ok(true) => {
            println!("Deleted {kind} {id}\n");
            CommandResult::Continue
        }
        Ok(false) => CommandResult::Error(format!("{kind} {id} not found")),
        Err(e) => e.into(),
    }
}

fn cmd_toggle(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    let id = match parse_id(parts, 1, ".toggle <edge>") {
        Ok(id) => id,
        Err(e) => return e,
    };
    match session.toggle_directed(id) {
        Ok(true) => {
            let directed = session.edge(id).is_some_and(|edge| edge.is_directed());
            println!(
                "Edge {id} is now {}\n",
                if directed { "directed" } else { "undirected" }
            );
            CommandResult::Continue
        }
        Ok(false) => CommandResult::Error(format!("Edge {id} not found")),
        Err(e) => e.into(),
    }
}

fn cmd_menu(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    const USAGE: &str = ".menu node|edge <id> [x y] | .menu delete|toggle|close";
    let action = parts.get(1).map(|s| s.to_lowercase()).unwrap_or_default();
    match action.as_str() {
        "node" | "edge" => {
            let id = match parse_id(parts, 2, USAGE) {
                Ok(id) => id,
                Err(e) => return e,
            };
            let x = parse_coord(parts, 3, USAGE).unwrap_or(0.0);
            let y = parse_coord(parts, 4, USAGE).unwrap_or(0.0);
            let opened = if action == "node" {
                session.open_node_menu(id, x, y)
            } else {
                session.open_edge_menu(id, x, y)
            };
            if !opened {
                return CommandResult::Error(format!("{action} {id} not found"));
            }
            println!("Menu open on {action} {id}: {}\n", menu_actions(&action));
            CommandResult::Continue
        }
        "delete" => {
            let target = session.controller().context_menu().map(|menu| menu.target);
            let result = match target {
                Some(MenuTarget::Node(_)) => session.menu_delete_node(),
                Some(MenuTarget::Edge(_)) => session.menu_delete_edge(),
                None => return CommandResult::Error("No menu is open".to_string()),
            };
            menu_result(result, "Deleted")
        }
        "toggle" => menu_result(session.menu_toggle_directed(), "Toggled"),
        "close" => {
            session.close_menu();
            CommandResult::Continue
        }
        _ => CommandResult::Error(format!("Usage: {USAGE}")),
    }
}

fn menu_actions(kind: &str) -> &'static str {
    if kind == "node" {
        "delete"
    } else {
        "delete, toggle"
    }
}

fn menu_result(result: graphstep_core::Result<bool>, verb: &str) -> CommandResult {
    match result {
        Ok(true) => {
            println!("{verb}.\n");
            CommandResult::Continue
        }
        Ok(false) => CommandResult::Error("The menu target does not support that action".to_string()),
        Err(e) => e.into(),
    }
}

fn cmd_clear(session: &mut GraphSession) -> CommandResult {
    match session.clear() {
        Ok(()) => {
            println!("Graph cleared.\n");
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

// ── Inspection ─────────────────────────────────────────────────────────

fn cmd_show(session: &GraphSession, config: &ReplConfig, parts: &[&str]) -> CommandResult {
    let snapshot = session.snapshot();
    if config.format == OutputFormat::Json {
        return match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => {
                println!("{json}\n");
                CommandResult::Continue
            }
            Err(e) => CommandResult::Error(format!("Serialization failed: {e}")),
        };
    }

    let what = parts.get(1).map(|s| s.to_lowercase()).unwrap_or_default();
    if what.is_empty() || what == "nodes" {
        println!("{}", node_table(&snapshot));
    }
    if what.is_empty() || what == "edges" {
        println!("{}", edge_table(&snapshot));
    }
    println!();
    CommandResult::Continue
}

pub(crate) fn node_table(snapshot: &SessionSnapshot) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Node", "X", "Y", "Weight", "State"]);
    for node in &snapshot.nodes {
        let marker = if snapshot.current_node == Some(node.id()) {
            format!("{} *", node.id())
        } else {
            node.id().to_string()
        };
        table.add_row(vec![
            marker,
            node.x().to_string(),
            node.y().to_string(),
            fmt_weight(node.weight()),
            node.state().to_string(),
        ]);
    }
    table
}

pub(crate) fn edge_table(snapshot: &SessionSnapshot) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Edge", "From", "To", "Weight", "Directed"]);
    for edge in &snapshot.edges {
        table.add_row(vec![
            edge.id().to_string(),
            edge.from().to_string(),
            edge.to().to_string(),
            fmt_weight(edge.weight()),
            if edge.is_directed() { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

fn cmd_neighbors(session: &GraphSession, parts: &[&str]) -> CommandResult {
    let id: NodeId = match parse_id(parts, 1, ".neighbors <node>") {
        Ok(id) => id,
        Err(e) => return e,
    };
    if session.node(id).is_none() {
        return CommandResult::Error(format!("Node {id} not found"));
    }
    let neighbors = session.neighbors(id);
    if neighbors.is_empty() {
        println!("Node {id} has no neighbors.\n");
    } else {
        let list: Vec<String> = neighbors.iter().map(ToString::to_string).collect();
        println!("Node {id} -> {}\n", list.join(", ").green());
    }
    CommandResult::Continue
}

fn cmd_status(session: &GraphSession) -> CommandResult {
    let snapshot = session.snapshot();
    println!("{}", "Session".bold().underline());
    println!("  Phase:     {}", snapshot.phase.to_string().cyan());
    println!("  Step:      {}", snapshot.step);
    println!(
        "  Current:   {}",
        snapshot
            .current_node
            .map_or_else(|| "-".to_string(), |id| id.to_string())
    );
    println!(
        "  Selected:  {}",
        snapshot
            .selected_node
            .map_or_else(|| "-".to_string(), |id| id.to_string())
    );
    println!(
        "  Nodes:     {}/{}",
        snapshot.nodes.len(),
        session.config().graph.max_nodes
    );
    println!("  Edges:     {}", snapshot.edges.len());
    println!("  Executor:  {}", session.config().executor.base_url);
    println!();
    CommandResult::Continue
}

fn cmd_config(session: &GraphSession) -> CommandResult {
    match toml::to_string_pretty(session.config()) {
        Ok(text) => {
            println!("{text}");
            CommandResult::Continue
        }
        Err(e) => CommandResult::Error(format!("Cannot render configuration: {e}")),
    }
}

fn cmd_format(config: &mut ReplConfig, parts: &[&str]) -> CommandResult {
    if parts.len() < 2 {
        println!("Format is {:?}", config.format);
    } else {
        match parts[1].to_lowercase().as_str() {
            "table" => {
                config.format = OutputFormat::Table;
                println!("Format: table");
            }
            "json" => {
                config.format = OutputFormat::Json;
                println!("Format: json");
            }
            _ => {
                return CommandResult::Error("Use: .format table|json".to_string());
            }
        }
    }
    println!();
    CommandResult::Continue
}

// ── Animation ──────────────────────────────────────────────────────────

fn cmd_algorithm(config: &mut ReplConfig, parts: &[&str]) -> CommandResult {
    match parts.get(1) {
        Some(name) => {
            config.algorithm = name.to_lowercase();
            println!("Algorithm: {}\n", config.algorithm.green());
        }
        None => println!("Algorithm is {}\n", config.algorithm.green()),
    }
    CommandResult::Continue
}

fn report_step(outcome: StepOutcome) {
    match outcome {
        StepOutcome::Applied { step, finished: true } => {
            println!("Step {step} - {}\n", "finished".green());
        }
        StepOutcome::Applied { step, .. } => println!("Step {step}\n"),
        StepOutcome::Discarded => println!("Response discarded (run was stopped).\n"),
        StepOutcome::Inactive => println!("No run is open.\n"),
    }
}

async fn cmd_play(session: &mut GraphSession, config: &ReplConfig, parts: &[&str]) -> CommandResult {
    let algorithm = algorithm_arg(config, parts).to_string();
    match session.play(&algorithm).await {
        Ok(StartOutcome::Started(outcome)) => {
            println!("Playing {}", algorithm.cyan());
            report_step(outcome);
            CommandResult::Continue
        }
        Ok(StartOutcome::Stopped) => {
            println!("Animation stopped.\n");
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

fn cmd_stop(session: &GraphSession) -> CommandResult {
    if session.stop() {
        println!("Animation stopped.\n");
    } else {
        println!("Nothing is running.\n");
    }
    CommandResult::Continue
}

async fn cmd_next(session: &mut GraphSession, config: &ReplConfig, parts: &[&str]) -> CommandResult {
    let algorithm = algorithm_arg(config, parts).to_string();
    match session.next_step(&algorithm).await {
        Ok(outcome) => {
            report_step(outcome);
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

async fn cmd_restart(
    session: &mut GraphSession,
    config: &ReplConfig,
    parts: &[&str],
) -> CommandResult {
    let algorithm = algorithm_arg(config, parts).to_string();
    match session.restart(&algorithm).await {
        Ok(StartOutcome::Started(outcome)) => {
            println!("Restarted {}", algorithm.cyan());
            report_step(outcome);
            CommandResult::Continue
        }
        Ok(StartOutcome::Stopped) => CommandResult::Continue,
        Err(e) => e.into(),
    }
}

/// Blocks until the run finishes or the timeout elapses.
async fn cmd_wait(session: &GraphSession, parts: &[&str]) -> CommandResult {
    let limit = match parts.get(1) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => return CommandResult::Error(format!("'{raw}' is not a duration in ms")),
        },
        None => Duration::from_millis(DEFAULT_WAIT_MS),
    };
    let deadline = tokio::time::Instant::now() + limit;
    while session.is_locked() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(WAIT_POLL).await;
    }
    let status = session.stepper().status();
    println!("Phase {} at step {}\n", status.phase.to_string().cyan(), status.step);
    CommandResult::Continue
}

// ── Files ──────────────────────────────────────────────────────────────

fn cmd_save(session: &GraphSession, parts: &[&str]) -> CommandResult {
    // `.save plain` saves to the default file in plain format.
    let (path, format_arg) = match parts.get(1) {
        Some(arg) if parse_format(Some(arg)).is_ok() => (None, parts.get(1)),
        Some(arg) => (Some(Path::new(*arg)), parts.get(2)),
        None => (None, None),
    };
    let format = match parse_format(format_arg) {
        Ok(format) => format,
        Err(e) => return e,
    };
    match session.save(path, format) {
        Ok(()) => {
            let shown = path.map_or_else(
                || session.config().storage.file_name.clone(),
                |p| p.display().to_string(),
            );
            println!("Saved to {}\n", shown.green());
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

fn cmd_load(session: &mut GraphSession, parts: &[&str]) -> CommandResult {
    let path = parts.get(1).map(|p| Path::new(*p));
    match session.load(path) {
        Ok(report) => {
            println!(
                "Loaded {} nodes, {} edges",
                report.nodes.to_string().green(),
                report.edges.to_string().green()
            );
            if report.skipped_edges > 0 {
                println!(
                    "{} {} invalid edges skipped",
                    "Warning:".yellow(),
                    report.skipped_edges
                );
            }
            println!();
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

fn cmd_export(session: &GraphSession, parts: &[&str]) -> CommandResult {
    let format = match parse_format(parts.get(1)) {
        Ok(format) => format,
        Err(e) => return e,
    };
    match session.export_json(format) {
        Ok(json) => {
            println!("{json}\n");
            CommandResult::Continue
        }
        Err(e) => e.into(),
    }
}

/// Print help message
pub fn print_help() {
    println!("\n{}", "graphstep Commands".bold().underline());
    println!();
    println!("  {}                 Show this help", ".help".yellow());
    println!("  {}                 Exit", ".quit".yellow());
    println!();
    println!("{}", "Editing:".bold().underline());
    println!();
    println!("  {}            Add a node", ".add <x> <y>".yellow());
    println!(
        "  {}   Select, deselect or connect from the selection",
        ".click <node> [w] [-u]".yellow()
    );
    println!("  {}             Clear the selection", ".deselect".yellow());
    println!(
        "  {} Connect two nodes (-u undirected)",
        ".connect <a> <b> [w] [-u]".yellow()
    );
    println!(
        "  {} Set or clear a weight",
        ".weight node|edge <id> [v]".yellow()
    );
    println!("  {}    Drag a node", ".move <node> <x> <y>".yellow());
    println!("  {} Delete a node or edge", ".delete node|edge <id>".yellow());
    println!("  {}        Flip edge direction", ".toggle <edge>".yellow());
    println!(
        "  {} Context menu",
        ".menu node|edge <id> | delete | toggle | close".yellow()
    );
    println!("  {}                Remove every node and edge", ".clear".yellow());
    println!();
    println!("{}", "Animation:".bold().underline());
    println!();
    println!("  {}     Start or stop automatic stepping", ".play [alg]".yellow());
    println!("  {}                 Stop the run", ".stop".yellow());
    println!("  {}     Advance one step", ".next [alg]".yellow());
    println!("  {}  Reset states and play again", ".restart [alg]".yellow());
    println!("  {}       Wait for the run to finish", ".wait [ms]".yellow());
    println!("  {} Default algorithm (bfs, dfs, dijkstra)", ".algorithm [name]".yellow());
    println!();
    println!("{}", "Inspection and files:".bold().underline());
    println!();
    println!("  {}  Show the graph", ".show [nodes|edges]".yellow());
    println!("  {}     Neighbors of a node", ".neighbors <node>".yellow());
    println!("  {}               Animation and graph status", ".status".yellow());
    println!("  {}               Effective configuration", ".config".yellow());
    println!("  {}   Output format", ".format table|json".yellow());
    println!(
        "  {} Save to a file",
        ".save [file] [plain|extended]".yellow()
    );
    println!("  {}         Load from a file", ".load [file]".yellow());
    println!(
        "  {} Print the graph as JSON",
        ".export [plain|extended]".yellow()
    );
    println!("  {}                  Clear screen", ".cls".yellow());
    println!();
}
