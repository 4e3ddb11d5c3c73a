//! Scheduling error model.
//!
//! # Responsibility
//! - Define the error values returned by every scheduling operation.
//! - Provide stable machine-readable codes for logging.
//!
//! # Invariants
//! - Errors are plain values; no scheduling path panics.
//! - Error messages never embed user-entered event names or descriptions.

use crate::model::event::EventId;
use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Required user input fields of an event draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    StartTime,
    EndTime,
}

impl Field {
    /// Wire name of the field, matching the persisted JSON keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an event that an operation tried to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRef {
    /// Positional reference: `index` within the day bucket of `date`.
    Position { date: NaiveDate, index: usize },
    /// Stable identifier reference.
    Id(EventId),
}

impl Display for EventRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position { date, index } => write!(f, "{date}#{index}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Error returned by event validation and store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Name, start time or end time is absent (blank).
    MissingField(Field),
    /// Time text is not a 24h `HH:MM` value.
    InvalidTime { field: Field, value: String },
    /// End time is not strictly after start time.
    InvalidRange { start: NaiveTime, end: NaiveTime },
    /// Candidate overlaps the event at `index` on `date`.
    Conflict { date: NaiveDate, index: usize },
    /// Date/index or id reference does not resolve.
    NotFound(EventRef),
}

impl ScheduleError {
    /// Stable code used in log lines and by UI collaborators.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidTime { .. } => "invalid_time",
            Self::InvalidRange { .. } => "invalid_range",
            Self::Conflict { .. } => "conflict",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
            Self::InvalidTime { field, value } => {
                write!(f, "invalid time `{value}` for `{field}`; expected HH:MM")
            }
            Self::InvalidRange { start, end } => write!(
                f,
                "end time {} must be after start time {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            ),
            Self::Conflict { date, index } => {
                write!(f, "event overlaps existing event #{index} on {date}")
            }
            Self::NotFound(reference) => write!(f, "event not found: {reference}"),
        }
    }
}

impl Error for ScheduleError {}

#[cfg(test)]
mod tests {
    use super::{EventRef, Field, ScheduleError};
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn display_formats_range_as_wall_clock() {
        let err = ScheduleError::InvalidRange {
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        };
        assert_eq!(err.to_string(), "end time 09:30 must be after start time 10:00");
        assert_eq!(err.code(), "invalid_range");
    }

    #[test]
    fn not_found_position_names_date_and_index() {
        let err = ScheduleError::NotFound(EventRef::Position {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            index: 4,
        });
        assert_eq!(err.to_string(), "event not found: 2024-03-05#4");
    }

    #[test]
    fn missing_field_uses_wire_name() {
        let err = ScheduleError::MissingField(Field::StartTime);
        assert!(err.to_string().contains("startTime"));
    }
}
