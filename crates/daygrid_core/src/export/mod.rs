//! Monthly JSON export.
//!
//! # Responsibility
//! - Serialize a month's events as indented JSON.
//! - Name export files `events-{month}-{year}.json` (month 1-indexed, unpadded).
//!
//! # Invariants
//! - Export element shape matches the persisted snapshot shape.
//! - Events are written in the order given; no re-sorting happens here.

use crate::model::event::EventRecord;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write export: {err}"),
            Self::Serialize(err) => write!(f, "failed to encode export: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Export file name for `year`/`month`.
pub fn export_file_name(year: i32, month: u32) -> String {
    format!("events-{month}-{year}.json")
}

/// Indented JSON array of `events`.
pub fn month_export_json(events: &[&EventRecord]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Writes `events` to `dir/events-{month}-{year}.json` and returns the path.
///
/// An existing file with the same name is overwritten.
pub fn write_month_export(
    dir: &Path,
    year: i32,
    month: u32,
    events: &[&EventRecord],
) -> ExportResult<PathBuf> {
    let json = month_export_json(events)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(year, month));
    std::fs::write(&path, json)?;

    info!(
        "event=month_export module=export status=ok year={year} month={month} count={}",
        events.len()
    );
    Ok(path)
}
