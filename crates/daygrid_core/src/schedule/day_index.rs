//! Date-keyed event index.
//!
//! # Responsibility
//! - Map each calendar date to the ids of its events, in insertion order.
//! - Answer day and month lookups without scanning the full store.
//!
//! # Invariants
//! - Buckets are never empty; a bucket is dropped with its last entry.
//! - Bucket order is insertion order, never time order.
//! - Only the owning store mutates the index.

use crate::model::event::{EventId, EventRecord};
use crate::model::month::YearMonth;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Read-only (outside the crate) date -> event-ids mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayIndex {
    buckets: BTreeMap<NaiveDate, Vec<EventId>>,
}

impl DayIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from records in store order.
    pub fn rebuild<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        let mut index = Self::new();
        for record in records {
            index.push(record.date, record.id);
        }
        index
    }

    /// Event ids on `date`, empty when the day has none.
    pub fn ids_on(&self, date: NaiveDate) -> &[EventId] {
        self.buckets
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn id_at(&self, date: NaiveDate, index: usize) -> Option<EventId> {
        self.ids_on(date).get(index).copied()
    }

    pub fn position_of(&self, date: NaiveDate, id: EventId) -> Option<usize> {
        self.ids_on(date).iter().position(|candidate| *candidate == id)
    }

    /// Dates inside `month` with at least one event, ascending.
    pub fn dates_in(&self, month: YearMonth) -> Vec<NaiveDate> {
        let Some((first, last)) = month.bounds() else {
            return Vec::new();
        };
        self.buckets.range(first..=last).map(|(date, _)| *date).collect()
    }

    /// Number of days that have events.
    pub fn day_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub(crate) fn push(&mut self, date: NaiveDate, id: EventId) {
        self.buckets.entry(date).or_default().push(id);
    }

    /// Removes `id` from `date`, returning its former position.
    pub(crate) fn remove(&mut self, date: NaiveDate, id: EventId) -> Option<usize> {
        let bucket = self.buckets.get_mut(&date)?;
        let position = bucket.iter().position(|candidate| *candidate == id)?;
        bucket.remove(position);
        if bucket.is_empty() {
            self.buckets.remove(&date);
        }
        Some(position)
    }
}
