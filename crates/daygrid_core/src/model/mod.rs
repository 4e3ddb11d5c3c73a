//! Calendar domain model.
//!
//! # Responsibility
//! - Define the typed values the scheduling core works with: time ranges,
//!   event records, raw drafts, date keys and month cursors.
//!
//! # Invariants
//! - Every stored event carries a valid `TimeRange` and a non-blank name.
//! - Dates are local calendar dates with no timezone.

pub mod date_key;
pub mod event;
pub mod month;
pub mod time_range;
