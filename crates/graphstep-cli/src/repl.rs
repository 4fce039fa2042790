//! Interactive prompt and script runner.

use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use graphstep_core::GraphSession;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::repl_commands::{self, CommandResult};

/// How `.show` renders the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Settings local to the prompt.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub format: OutputFormat,
    /// Algorithm used when `.play`, `.next` or `.restart` are given none.
    pub algorithm: String,
}

impl ReplConfig {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            format: OutputFormat::default(),
            algorithm: algorithm.into(),
        }
    }
}

/// Runs one line. Lines without a leading dot are treated as commands too.
async fn dispatch(session: &mut GraphSession, line: &str, config: &mut ReplConfig) -> CommandResult {
    let result = if line.starts_with('.') {
        repl_commands::handle_command(session, line, config).await
    } else {
        repl_commands::handle_command(session, &format!(".{line}"), config).await
    };
    // Errors raised by the scheduled stepper surface on the next prompt.
    if let Some(error) = session.stepper().take_last_error() {
        eprintln!("{} animation stopped: {error}", "Error:".red().bold());
    }
    result
}

/// Reads commands until `.quit` or end of input.
pub async fn run(session: &mut GraphSession, mut config: ReplConfig) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new().context("initializing line editor")?;

    println!(
        "{} {} - executor at {}",
        "graphstep".bold(),
        env!("CARGO_PKG_VERSION"),
        session.config().executor.base_url.cyan()
    );
    println!("Type {} for commands.\n", ".help".yellow());

    loop {
        let prompt = if session.is_locked() {
            "graphstep (running)> "
        } else {
            "graphstep> "
        };
        // The editor blocks on stdin; keep the runtime's other workers free for the stepper.
        let line = tokio::task::block_in_place(|| editor.readline(prompt));
        match line {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                match dispatch(session, line, &mut config).await {
                    CommandResult::Continue => {}
                    CommandResult::Quit => break,
                    CommandResult::Error(msg) => eprintln!("{} {msg}\n", "Error:".red().bold()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if session.stop() {
                    println!("Animation stopped.");
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("reading input"),
        }
    }

    session.stop();
    println!("Bye!");
    Ok(())
}

/// Runs every non-empty, non-comment line of `path`. Stops at the first error.
pub async fn run_script(
    session: &mut GraphSession,
    mut config: ReplConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;

    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match dispatch(session, line, &mut config).await {
            CommandResult::Continue => {}
            CommandResult::Quit => break,
            CommandResult::Error(msg) => {
                session.stop();
                anyhow::bail!("{}:{}: {msg}", path.display(), index + 1);
            }
        }
    }

    session.stop();
    Ok(())
}
