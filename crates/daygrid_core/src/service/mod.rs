//! Core use-case services.
//!
//! # Responsibility
//! - Wire the in-memory event store to the persistence collaborator.
//! - Keep UI callers decoupled from storage details.

pub mod calendar_service;
