//! itr - iteration protocol shell
//!
//! Interactive shell and script runner for stepping through iterators.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use iterproto::shell::{HELP, Reply, Session, ShellError};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "itr", about = "Step through iterators by hand", after_help = HELP)]
struct Cli {
    /// Script to run (one command per line); starts the REPL when omitted.
    script: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `iterproto=trace` (defaults to RUST_LOG, then `warn`).
    #[arg(long)]
    log_level: Option<String>,
    /// File to load and save REPL history.
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let mut session = Session::new().context("failed to initialize shell")?;

    match cli.script {
        Some(path) => run_file(&mut session, &path),
        None => run_repl(&mut session, cli.history.as_deref()),
    }
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter '{}'", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_file(session: &mut Session, path: &Path) -> Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;

    session
        .run_script(&source, |text| println!("{}", text))
        .map_err(|e| match e {
            ShellError::AtLine { line, error } => {
                anyhow!("{}:{}: {}", path.display(), line, error)
            }
            other => anyhow!("{}: {}", path.display(), other),
        })
}

fn run_repl(session: &mut Session, history: Option<&Path>) -> Result<()> {
    println!("itr - iteration protocol shell");
    println!("Type `help` for commands, Ctrl+D to exit.\n");

    let mut editor = DefaultEditor::new().context("failed to initialize line editor")?;
    if let Some(path) = history {
        if let Err(e) = editor.load_history(path) {
            tracing::debug!(path = %path.display(), error = %e, "no history loaded");
        }
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = editor.add_history_entry(line.as_str()) {
                        tracing::debug!(error = %e, "history entry not recorded");
                    }
                }

                match session.eval(&line) {
                    Ok(Reply::Silent) => {}
                    Ok(Reply::Text(text)) => println!("{}", text),
                    Ok(Reply::Exit) => break,
                    Err(e) => println!("Uncaught {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => return Err(e).context("failed to read input"),
        }
    }

    if let Some(path) = history {
        editor
            .save_history(path)
            .with_context(|| format!("failed to save history to {}", path.display()))?;
    }

    Ok(())
}
