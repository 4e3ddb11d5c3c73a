//! Case-insensitive substring search over event text fields.
//!
//! # Invariants
//! - An empty term returns no results, never "all results".
//! - Matching covers name, description and category; dates are not searched.
//! - Results keep the order of the input sequence.

use crate::model::event::EventRecord;

/// Returns the records whose name, description or category contains `term`.
///
/// Returns an empty list when `term` is empty.
pub fn search_events<'a, I>(records: I, term: &str) -> Vec<&'a EventRecord>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    if term.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_needle(record, &needle))
        .collect()
}

/// Checks one record against an already lowercased needle.
pub fn matches_needle(record: &EventRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
        || record.category.as_str().to_lowercase().contains(needle)
}
