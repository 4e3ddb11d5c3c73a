//! Event scheduling core.
//!
//! # Responsibility
//! - Index events by calendar date.
//! - Reject same-day overlaps under half-open interval semantics.
//! - Provide the mutable store used by service callers.
//!
//! # Invariants
//! - All operations are synchronous and atomic against the in-memory store.
//! - The day index is derived state and only changes with store mutations.

pub mod day_index;
pub mod event_store;
pub mod overlap;
