//! Core scheduling logic for the daygrid calendar.
//! This crate owns event validation, overlap detection and day indexing;
//! rendering and input handling stay with UI collaborators.

pub mod db;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod search;
pub mod service;

pub use error::{EventRef, Field, ScheduleError, ScheduleResult};
pub use export::{
    export_file_name, month_export_json, write_month_export, ExportError, ExportResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::date_key::{format_date_key, parse_date_key};
pub use model::event::{Category, EventDraft, EventId, EventRecord, ParseCategoryError};
pub use model::month::YearMonth;
pub use model::time_range::TimeRange;
pub use repo::snapshot_repo::{
    SnapshotStore, SqliteSnapshotStore, StorageError, StorageResult,
};
pub use schedule::day_index::DayIndex;
pub use schedule::event_store::EventStore;
pub use schedule::overlap::OverlapConflict;
pub use service::calendar_service::CalendarService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
