//! Event snapshot contracts and SQLite key-value implementation.
//!
//! # Responsibility
//! - Load and save the flat events list and the selected day.
//! - Tolerate malformed or partially invalid persisted snapshots.
//!
//! # Invariants
//! - `events` holds a JSON array of event records in store order.
//! - `selected_day` holds an ISO date; absence means no selection.
//! - Undecodable array entries are skipped one by one; a non-array value
//!   loads as empty.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::date_key::{format_date_key, parse_date_key};
use crate::model::event::EventRecord;
use chrono::NaiveDate;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the serialized events list.
pub const EVENTS_KEY: &str = "events";
/// Key holding the selected calendar day.
pub const SELECTED_DAY_KEY: &str = "selected_day";

const KV_TABLE: &str = "kv_entries";
const KV_COLUMNS: [&str; 3] = ["key", "value", "updated_at"];

pub type StorageResult<T> = Result<T, StorageError>;

/// Error for snapshot persistence operations.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Connection schema version does not match the latest migration.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing from the connection schema.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Snapshot could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "snapshot store requires schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "snapshot store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "snapshot store requires column `{column}` in table `{table}`"
            ),
            Self::Serialize(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Persistence collaborator used by the calendar service.
pub trait SnapshotStore {
    /// Loads the saved events, or an empty list when none are saved.
    fn load_events(&self) -> StorageResult<Vec<EventRecord>>;
    /// Replaces the saved events with `events`.
    fn save_events(&self, events: &[&EventRecord]) -> StorageResult<()>;
    fn load_selected_day(&self) -> StorageResult<Option<NaiveDate>>;
    /// Saves the selected day; `None` clears it.
    fn save_selected_day(&self, day: Option<NaiveDate>) -> StorageResult<()>;
}

/// Result of decoding a persisted events snapshot.
#[derive(Debug, Default)]
pub struct DecodedSnapshot {
    pub events: Vec<EventRecord>,
    /// Array entries that failed to decode or validate.
    pub skipped: usize,
}

/// Decodes an events snapshot, treating malformed input as empty.
pub fn decode_events_snapshot(raw: &str) -> DecodedSnapshot {
    let values = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(values) => values,
        Err(err) => {
            warn!(
                "event=snapshot_decode module=repo status=error error_code=snapshot_malformed line={} column={}",
                err.line(),
                err.column()
            );
            return DecodedSnapshot::default();
        }
    };

    let mut decoded = DecodedSnapshot::default();
    for value in values {
        match serde_json::from_value::<EventRecord>(value) {
            Ok(record) => decoded.events.push(record),
            Err(_) => decoded.skipped += 1,
        }
    }

    if decoded.skipped > 0 {
        warn!(
            "event=snapshot_decode module=repo status=partial loaded={} skipped={}",
            decoded.events.len(),
            decoded.skipped
        );
    }
    decoded
}

/// SQLite-backed key-value snapshot store.
pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for a foreign schema.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn read_value(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_value(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_value(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn load_events(&self) -> StorageResult<Vec<EventRecord>> {
        let Some(raw) = self.read_value(EVENTS_KEY)? else {
            return Ok(Vec::new());
        };
        let decoded = decode_events_snapshot(&raw);
        debug!(
            "event=snapshot_load module=repo status=ok loaded={} skipped={}",
            decoded.events.len(),
            decoded.skipped
        );
        Ok(decoded.events)
    }

    fn save_events(&self, events: &[&EventRecord]) -> StorageResult<()> {
        let raw = serde_json::to_string(events)?;
        self.write_value(EVENTS_KEY, &raw)
    }

    fn load_selected_day(&self) -> StorageResult<Option<NaiveDate>> {
        let Some(raw) = self.read_value(SELECTED_DAY_KEY)? else {
            return Ok(None);
        };
        let day = parse_date_key(&raw);
        if day.is_none() {
            warn!("event=selected_day_load module=repo status=error error_code=invalid_date");
        }
        Ok(day)
    }

    fn save_selected_day(&self, day: Option<NaiveDate>) -> StorageResult<()> {
        match day {
            Some(day) => self.write_value(SELECTED_DAY_KEY, &format_date_key(day)),
            None => self.delete_value(SELECTED_DAY_KEY),
        }
    }
}

fn ensure_connection_ready(conn: &Connection) -> StorageResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, KV_TABLE)? {
        return Err(StorageError::MissingRequiredTable(KV_TABLE));
    }

    for column in KV_COLUMNS {
        if !table_has_column(conn, KV_TABLE, column)? {
            return Err(StorageError::MissingRequiredColumn {
                table: KV_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StorageResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
