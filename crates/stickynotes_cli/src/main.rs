//! Command-line driver for the sticky notes core.
//!
//! # Responsibility
//! - Wire argument parsing, logging and the note board together.
//! - Render note views to stdout; core never formats text itself.

use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stickynotes_core::{
    core_version, default_log_level, init_logging, Note, NoteBoard, NoteDisplay, NoteStore,
};

const DEFAULT_DB_FILE_NAME: &str = "stickynotes.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "stickynotes", version, about = "Timestamped sticky notes in a local SQLite file")]
struct Cli {
    /// Database file; created with its schema on first use.
    #[arg(long, default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add one note, then print all notes oldest first.
    Add { text: String },
    /// Add several notes in one transaction, then print all notes.
    AddMany {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Print all notes.
    List {
        /// Newest first.
        #[arg(long)]
        reverse: bool,
    },
}

/// Writes one line per note: text followed by its local time.
struct StdoutDisplay;

impl NoteDisplay for StdoutDisplay {
    fn display(&mut self, notes: &[Note]) {
        if notes.is_empty() {
            println!("(no notes)");
            return;
        }
        for note in notes {
            println!("- {} {}", note.text, render_timestamp(note.timestamp));
        }
    }
}

fn render_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(&Local).to_rfc3339())
        .unwrap_or_else(|| format!("@{timestamp_ms}ms"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("stickynotes: {err}");
            return ExitCode::FAILURE;
        }
    }
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stickynotes: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), stickynotes_core::StoreError> {
    let store = NoteStore::open(&cli.db)?;
    let mut board = NoteBoard::new(store, StdoutDisplay);

    match cli.command {
        Command::Add { text } => {
            board.submit(text).await?;
        }
        Command::AddMany { texts } => {
            board.submit_many(texts).await?;
        }
        Command::List { reverse } => {
            if reverse {
                board.flip_order().await?;
            } else {
                board.refresh().await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{render_timestamp, Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_add_many_with_db_override() {
        let cli = Cli::try_parse_from(["stickynotes", "--db", "x.sqlite3", "add-many", "a", "b"])
            .unwrap();
        assert_eq!(cli.db.to_str(), Some("x.sqlite3"));
        match cli.command {
            Command::AddMany { texts } => assert_eq!(texts, vec!["a", "b"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_many_requires_at_least_one_text() {
        assert!(Cli::try_parse_from(["stickynotes", "add-many"]).is_err());
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_raw_value() {
        assert_eq!(render_timestamp(i64::MAX), format!("@{}ms", i64::MAX));
    }
}
