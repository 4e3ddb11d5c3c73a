//! Calendar use-case service.
//!
//! # Responsibility
//! - Own the event store for its whole lifecycle: load at open, persist after
//!   each mutation, flush on demand.
//! - Track the selected day independently of events.
//!
//! # Invariants
//! - Every successful mutation is followed by one snapshot save.
//! - A failed save is logged and never changes the operation result or the
//!   in-memory store.
//! - Rejected operations are not persisted.

use crate::error::ScheduleResult;
use crate::export::{write_month_export, ExportResult};
use crate::model::event::{Category, EventDraft, EventId, EventRecord};
use crate::model::month::YearMonth;
use crate::repo::snapshot_repo::{SnapshotStore, StorageResult};
use crate::schedule::event_store::EventStore;
use chrono::NaiveDate;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Calendar facade over an event store and a snapshot store.
pub struct CalendarService<S: SnapshotStore> {
    events: EventStore,
    snapshots: S,
    selected_day: Option<NaiveDate>,
}

impl<S: SnapshotStore> CalendarService<S> {
    /// Loads events and the selected day from `snapshots`.
    ///
    /// # Errors
    /// - Storage transport failures. Malformed snapshot content is not an
    ///   error and loads as an empty store.
    pub fn open(snapshots: S) -> StorageResult<Self> {
        let records = snapshots.load_events()?;
        let selected_day = snapshots.load_selected_day()?;
        let events = EventStore::from_records(records);

        info!(
            "event=store_load module=service status=ok count={} days={} selected_day={}",
            events.len(),
            events.day_index().day_count(),
            selected_day.map_or_else(|| "none".to_string(), |day| day.to_string())
        );

        Ok(Self {
            events,
            snapshots,
            selected_day,
        })
    }

    /// Read access to the underlying store.
    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn add(&mut self, date: NaiveDate, draft: &EventDraft) -> ScheduleResult<EventId> {
        let result = self.events.add(date, draft);
        log_mutation("event_add", date, None, &result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    pub fn edit(&mut self, date: NaiveDate, index: usize, draft: &EventDraft) -> ScheduleResult<()> {
        let result = self.events.edit(date, index, draft);
        log_mutation("event_edit", date, Some(index), &result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    pub fn edit_by_id(&mut self, id: EventId, draft: &EventDraft) -> ScheduleResult<()> {
        let located = self.events.locate(id);
        let result = self.events.edit_by_id(id, draft);
        log_located("event_edit", located, &result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    pub fn delete(&mut self, date: NaiveDate, index: usize) -> ScheduleResult<EventRecord> {
        let result = self.events.delete(date, index);
        log_mutation("event_delete", date, Some(index), &result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    pub fn delete_by_id(&mut self, id: EventId) -> ScheduleResult<EventRecord> {
        let located = self.events.locate(id);
        let result = self.events.delete_by_id(id);
        log_located("event_delete", located, &result);
        if result.is_ok() {
            self.persist();
        }
        result
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&EventRecord> {
        self.events.events_on(date)
    }

    pub fn categories_on(&self, date: NaiveDate) -> Vec<Category> {
        self.events.categories_on(date)
    }

    pub fn days_with_events(&self, month: YearMonth) -> Vec<NaiveDate> {
        self.events.days_with_events(month)
    }

    pub fn search(&self, term: &str) -> Vec<&EventRecord> {
        self.events.search(term)
    }

    pub fn export_month(&self, year: i32, month: u32) -> Vec<&EventRecord> {
        self.events.export_month(year, month)
    }

    /// Writes the month export file into `dir` and returns its path.
    pub fn write_month_export(&self, dir: &Path, year: i32, month: u32) -> ExportResult<PathBuf> {
        let events = self.events.export_month(year, month);
        write_month_export(dir, year, month, &events)
    }

    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.selected_day
    }

    /// Changes the selected day and persists it. `None` clears the selection.
    pub fn select_day(&mut self, day: Option<NaiveDate>) {
        self.selected_day = day;
        if let Err(err) = self.snapshots.save_selected_day(day) {
            error!(
                "event=selected_day_save module=service status=error error_code=storage_failed error={}",
                err
            );
        }
    }

    /// Saves the current events snapshot and reports the outcome.
    pub fn flush(&self) -> StorageResult<()> {
        let started_at = Instant::now();
        let snapshot = self.events.records().collect::<Vec<_>>();
        self.snapshots.save_events(&snapshot)?;
        info!(
            "event=snapshot_save module=service status=ok count={} duration_ms={}",
            snapshot.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Flushes and hands back the snapshot store.
    pub fn close(self) -> StorageResult<S> {
        self.flush()?;
        Ok(self.snapshots)
    }

    fn persist(&self) {
        if let Err(err) = self.flush() {
            error!(
                "event=snapshot_save module=service status=error error_code=storage_failed error={}",
                err
            );
        }
    }
}

fn log_mutation<T>(
    event: &str,
    date: NaiveDate,
    index: Option<usize>,
    result: &ScheduleResult<T>,
) {
    let index = index.map_or_else(|| "none".to_string(), |value| value.to_string());
    match result {
        Ok(_) => info!("event={event} module=service status=ok date={date} index={index}"),
        Err(err) => warn!(
            "event={event} module=service status=rejected date={date} index={index} error_code={}",
            err.code()
        ),
    }
}

fn log_located<T>(event: &str, located: Option<(NaiveDate, usize)>, result: &ScheduleResult<T>) {
    match (located, result) {
        (Some((date, index)), _) => log_mutation(event, date, Some(index), result),
        (None, Err(err)) => warn!(
            "event={event} module=service status=rejected error_code={}",
            err.code()
        ),
        (None, Ok(_)) => info!("event={event} module=service status=ok"),
    }
}
