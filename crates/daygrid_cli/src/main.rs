//! `daygrid` command-line front end.
//!
//! # Responsibility
//! - Resolve the data directory, start logging and open the snapshot store.
//! - Map subcommands onto `CalendarService` operations.
//!
//! # Invariants
//! - Every failure is printed as `error: <message>` with a non-zero exit code.

mod commands;
mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use daygrid_core::db::open_db;
use daygrid_core::{
    default_log_level, init_logging, parse_date_key, CalendarService, Category, EventDraft,
    LogLevel, SqliteSnapshotStore,
};
use std::path::PathBuf;
use std::process::ExitCode;

const DB_FILE_NAME: &str = "daygrid.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser)]
#[command(name = "daygrid")]
#[command(about = "Schedule non-overlapping events on a monthly calendar", version)]
struct Cli {
    /// Directory holding the database and logs
    #[arg(long, global = true, env = "DAYGRID_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "DAYGRID_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an event to a day
    Add {
        /// Day (YYYY-MM-DD)
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        #[command(flatten)]
        event: EventArgs,
    },
    /// Change the event at INDEX on a day; omitted fields keep their values
    Edit {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        index: usize,

        #[command(flatten)]
        changes: EditArgs,
    },
    /// Delete the event at INDEX on a day
    Delete {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        index: usize,
    },
    /// List a day's events with their indices
    Day {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    /// Case-insensitive search across all events
    Search { term: String },
    /// Write one month's events to events-{month}-{year}.json
    Export {
        year: i32,

        /// Month (1-12)
        month: u32,

        /// Output directory (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show, set or clear the selected day
    Select {
        #[arg(value_parser = parse_date_arg, conflicts_with = "clear")]
        date: Option<NaiveDate>,

        #[arg(long)]
        clear: bool,
    },
}

#[derive(Args)]
struct EventArgs {
    #[arg(long)]
    name: String,

    /// Start time (HH:MM)
    #[arg(long)]
    start: String,

    /// End time (HH:MM)
    #[arg(long)]
    end: String,

    #[arg(long)]
    description: Option<String>,

    /// Work|Personal|Others
    #[arg(long, default_value_t = Category::Work)]
    category: Category,
}

impl EventArgs {
    fn into_draft(self) -> EventDraft {
        let draft = EventDraft::new(self.name, self.start, self.end).with_category(self.category);
        match self.description {
            Some(description) => draft.with_description(description),
            None => draft,
        }
    }
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    start: Option<String>,

    #[arg(long)]
    end: Option<String>,

    /// Pass an empty string to clear the description
    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    category: Option<Category>,
}

impl EditArgs {
    fn apply(self, mut draft: EventDraft) -> EventDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(start) = self.start {
            draft.start_time = start;
        }
        if let Some(end) = self.end {
            draft.end_time = end;
        }
        if let Some(description) = self.description {
            draft.description = Some(description);
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        draft
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let level = cli.log_level.unwrap_or_else(default_log_level);
    if let Err(err) = init_logging(level, data_dir.join(LOG_DIR_NAME)) {
        eprintln!("warning: file logging disabled: {err}");
    }
    log::debug!(
        "event=cli_start module=cli status=ok core_version={}",
        daygrid_core::core_version()
    );

    let db_path = data_dir.join(DB_FILE_NAME);
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let store = SqliteSnapshotStore::try_new(&conn)?;
    let mut service = CalendarService::open(store)?;

    match cli.command {
        Commands::Add { date, event } => commands::add(&mut service, date, event.into_draft()),
        Commands::Edit {
            date,
            index,
            changes,
        } => commands::edit(&mut service, date, index, |draft| changes.apply(draft)),
        Commands::Delete { date, index } => commands::delete(&mut service, date, index),
        Commands::Day { date } => commands::day(&service, date),
        Commands::Search { term } => commands::search(&service, &term),
        Commands::Export { year, month, out } => {
            let dir = match out {
                Some(dir) => dir,
                None => std::env::current_dir().context("failed to resolve current directory")?,
            };
            commands::export(&service, &dir, year, month)
        }
        Commands::Select { date, clear } => commands::select(&mut service, date, clear),
    }
}

fn resolve_data_dir(configured: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match configured {
        Some(dir) => dir,
        None => dirs::data_local_dir()
            .context("could not determine a local data directory; pass --data-dir")?
            .join("daygrid"),
    };
    if dir.is_absolute() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(dir))
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date_key(value).ok_or_else(|| format!("invalid date `{value}`; expected YYYY-MM-DD"))
}
