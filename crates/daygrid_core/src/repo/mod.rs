//! Persistence collaborator contracts and implementations.
//!
//! # Responsibility
//! - Define the snapshot contract the calendar service persists through.
//! - Isolate SQLite details from scheduling logic.
//!
//! # Invariants
//! - A malformed events snapshot loads as an empty list, never as an error.
//! - Storage transport failures are returned as `StorageError`.

pub mod snapshot_repo;
