//! Command-line entry point for moodnote.
//!
//! # Responsibility
//! - Wire logging, storage and `NoteService` together for local use.
//! - Print results as JSON so output can be piped into other tools.

use clap::{Parser, Subcommand};
use log::error;
use moodnote_core::db::open_db;
use moodnote_core::{
    analyze_content, default_log_level, init_logging, LoggingConfig, NoteDraft, NoteListQuery,
    NoteService, SqliteNoteRepository,
};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "moodnote", version, about = "Analyze and store notes")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, default_value = "moodnote.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// User the command acts for.
    #[arg(long, global = true, default_value = "local")]
    owner: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage info.
    Ping,
    /// Analyze text without storing it.
    Analyze {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Create and analyze a note.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// List notes visible to the owner.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Recompute analysis for every note of the owner.
    Reanalyze,
    /// Print analytics over notes visible to the owner.
    Analytics,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(&LoggingConfig::new(level, log_dir)?)?;
    }

    match cli.command {
        Command::Ping => {
            println!("moodnote_core ping={}", moodnote_core::ping());
            println!("moodnote_core version={}", moodnote_core::core_version());
        }
        Command::Analyze { title, content } => print_json(&analyze_content(&title, &content))?,
        Command::Add { title, content } => {
            let conn = open_db(&cli.db)?;
            let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
            let note = service.create_note(&cli.owner, NoteDraft::new(title, content))?;
            print_json(&note)?;
        }
        Command::List { limit } => {
            let conn = open_db(&cli.db)?;
            let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
            let query = NoteListQuery {
                limit,
                ..NoteListQuery::all_for(cli.owner.as_str())
            };
            print_json(&service.list_notes(&query)?)?;
        }
        Command::Reanalyze => {
            let conn = open_db(&cli.db)?;
            let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
            let count = service.reanalyze_all(&cli.owner)?;
            println!("reanalyzed={count}");
        }
        Command::Analytics => {
            let conn = open_db(&cli.db)?;
            let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
            print_json(&service.analytics(&cli.owner)?)?;
        }
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
