//! Event search entry points.
//!
//! # Responsibility
//! - Expose case-insensitive substring search over stored events.
//! - Keep result shaping inside core.

pub mod text;
