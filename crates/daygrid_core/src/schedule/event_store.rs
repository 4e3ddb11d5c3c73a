//! In-memory event store.
//!
//! # Responsibility
//! - Own the single ordered sequence of all events.
//! - Route add/edit/delete through validation and overlap checks.
//! - Keep the day index in step with every mutation.
//!
//! # Invariants
//! - Store order is insertion order; edits replace in place.
//! - Every id in `order` has exactly one record and one day-index entry.
//! - Failed operations leave the store untouched.
//! - No I/O happens here; persistence belongs to the caller.

use crate::error::{EventRef, Field, ScheduleError, ScheduleResult};
use crate::model::event::{Category, EventDraft, EventId, EventRecord};
use crate::model::month::YearMonth;
use crate::model::time_range::TimeRange;
use crate::schedule::day_index::DayIndex;
use crate::schedule::overlap::{validate, validate_excluding};
use crate::search::text::search_events;
use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

/// Mutable collection of all events with a date-keyed index.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    records: HashMap<EventId, EventRecord>,
    order: Vec<EventId>,
    days: DayIndex,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a loaded snapshot, keeping snapshot order.
    ///
    /// Snapshot entries are taken as-is: same-day overlap is not re-checked.
    /// A repeated id is replaced with a fresh one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EventRecord>,
    {
        let mut store = Self::new();
        for mut record in records {
            if store.records.contains_key(&record.id) {
                record.id = Uuid::new_v4();
            }
            store.append(record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All records in store order.
    pub fn records(&self) -> impl Iterator<Item = &EventRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn day_index(&self) -> &DayIndex {
        &self.days
    }

    pub fn get(&self, id: EventId) -> Option<&EventRecord> {
        self.records.get(&id)
    }

    /// Resolves a stable id to its current `(date, index)` position.
    pub fn locate(&self, id: EventId) -> Option<(NaiveDate, usize)> {
        let record = self.records.get(&id)?;
        let index = self.days.position_of(record.date, id)?;
        Some((record.date, index))
    }

    /// Validates `draft` and appends it to `date`.
    ///
    /// # Errors
    /// - `MissingField`, `InvalidTime`, `InvalidRange` from draft validation.
    /// - `Conflict` when the range overlaps an event already on `date`.
    pub fn add(&mut self, date: NaiveDate, draft: &EventDraft) -> ScheduleResult<EventId> {
        let record = EventRecord::from_draft(date, draft)?;
        self.insert(record)
    }

    /// Appends an already-typed record after the overlap check.
    ///
    /// A record whose id is already stored is given a fresh id.
    pub fn insert(&mut self, mut record: EventRecord) -> ScheduleResult<EventId> {
        if record.name.trim().is_empty() {
            return Err(ScheduleError::MissingField(Field::Name));
        }
        self.check_overlap(record.date, &record.range, None)?;
        if self.records.contains_key(&record.id) {
            record.id = Uuid::new_v4();
        }
        Ok(self.append(record))
    }

    /// Replaces the event at `index` on `date`, keeping its position and id.
    ///
    /// # Errors
    /// - `NotFound` when `index` is out of range for `date` (checked first).
    /// - Validation errors as for [`EventStore::add`]; the edited entry is
    ///   excluded from the overlap check.
    pub fn edit(&mut self, date: NaiveDate, index: usize, draft: &EventDraft) -> ScheduleResult<()> {
        let id = self
            .days
            .id_at(date, index)
            .ok_or(ScheduleError::NotFound(EventRef::Position { date, index }))?;
        self.replace(id, date, index, draft)
    }

    /// Same as [`EventStore::edit`], addressing the event by id.
    pub fn edit_by_id(&mut self, id: EventId, draft: &EventDraft) -> ScheduleResult<()> {
        let (date, index) = self
            .locate(id)
            .ok_or(ScheduleError::NotFound(EventRef::Id(id)))?;
        self.replace(id, date, index, draft)
    }

    /// Removes the event at `index` on `date`; later same-day indices shift down.
    pub fn delete(&mut self, date: NaiveDate, index: usize) -> ScheduleResult<EventRecord> {
        let not_found = ScheduleError::NotFound(EventRef::Position { date, index });
        let id = self.days.id_at(date, index).ok_or_else(|| not_found.clone())?;
        self.remove(id).ok_or(not_found)
    }

    pub fn delete_by_id(&mut self, id: EventId) -> ScheduleResult<EventRecord> {
        self.remove(id)
            .ok_or(ScheduleError::NotFound(EventRef::Id(id)))
    }

    /// Events on `date` in insertion order; empty when there are none.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&EventRecord> {
        self.days
            .ids_on(date)
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Distinct categories on `date`, in first-seen order.
    pub fn categories_on(&self, date: NaiveDate) -> Vec<Category> {
        let mut categories = Vec::new();
        for record in self.events_on(date) {
            if !categories.contains(&record.category) {
                categories.push(record.category);
            }
        }
        categories
    }

    /// Dates inside `month` that have at least one event, ascending.
    pub fn days_with_events(&self, month: YearMonth) -> Vec<NaiveDate> {
        self.days.dates_in(month)
    }

    /// Case-insensitive search across all months. Empty `term` finds nothing.
    pub fn search(&self, term: &str) -> Vec<&EventRecord> {
        search_events(self.records(), term)
    }

    /// Events dated within `year`/`month` (1-indexed), in store order.
    ///
    /// An out-of-range month yields no events.
    pub fn export_month(&self, year: i32, month: u32) -> Vec<&EventRecord> {
        match YearMonth::new(year, month) {
            Some(month) => self.events_in_month(month),
            None => Vec::new(),
        }
    }

    pub fn events_in_month(&self, month: YearMonth) -> Vec<&EventRecord> {
        self.records()
            .filter(|record| month.contains(record.date))
            .collect()
    }

    fn append(&mut self, record: EventRecord) -> EventId {
        let id = record.id;
        self.days.push(record.date, id);
        self.order.push(id);
        self.records.insert(id, record);
        id
    }

    fn replace(
        &mut self,
        id: EventId,
        date: NaiveDate,
        index: usize,
        draft: &EventDraft,
    ) -> ScheduleResult<()> {
        let updated = EventRecord::with_id(id, date, draft)?;
        self.check_overlap(date, &updated.range, Some(index))?;
        self.records.insert(id, updated);
        Ok(())
    }

    fn remove(&mut self, id: EventId) -> Option<EventRecord> {
        let record = self.records.remove(&id)?;
        self.days.remove(record.date, id);
        self.order.retain(|candidate| *candidate != id);
        Some(record)
    }

    fn check_overlap(
        &self,
        date: NaiveDate,
        candidate: &TimeRange,
        exclude: Option<usize>,
    ) -> ScheduleResult<()> {
        let existing = self
            .days
            .ids_on(date)
            .iter()
            .filter_map(|id| self.records.get(id))
            .map(|record| &record.range);

        let verdict = match exclude {
            Some(position) => validate_excluding(candidate, existing, position),
            None => validate(candidate, existing),
        };
        verdict.map_err(|conflict| ScheduleError::Conflict {
            date,
            index: conflict.position,
        })
    }
}
