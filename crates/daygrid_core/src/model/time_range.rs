//! Same-day wall-clock time ranges.
//!
//! # Responsibility
//! - Parse `HH:MM` time-of-day text into typed values.
//! - Enforce range ordering and define overlap semantics.
//!
//! # Invariants
//! - `end` is strictly after `start`; zero-length or inverted ranges never exist.
//! - Overlap is half-open: a range ending exactly when another begins does not
//!   overlap it.
//! - Time-of-day carries no date and no timezone.

use crate::error::{Field, ScheduleError, ScheduleResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Wire and display format for time-of-day values.
pub const TIME_FORMAT: &str = "%H:%M";

/// Validated `[start, end)` time-of-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeRangeWire", into = "TimeRangeWire")]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    /// Builds a range from typed times.
    ///
    /// # Errors
    /// - `InvalidRange` when `end <= start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> ScheduleResult<Self> {
        if end <= start {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from `HH:MM` start/end text.
    ///
    /// # Errors
    /// - `MissingField` when either side is blank (start is checked first).
    /// - `InvalidTime` when either side is not a 24h `HH:MM` value.
    /// - `InvalidRange` when `end <= start`.
    pub fn parse(start_text: &str, end_text: &str) -> ScheduleResult<Self> {
        if start_text.trim().is_empty() {
            return Err(ScheduleError::MissingField(Field::StartTime));
        }
        if end_text.trim().is_empty() {
            return Err(ScheduleError::MissingField(Field::EndTime));
        }
        let start = parse_time_of_day(Field::StartTime, start_text)?;
        let end = parse_time_of_day(Field::EndTime, end_text)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns whether the two ranges share any instant.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

/// Parses one `HH:MM` value for `field`.
///
/// # Errors
/// - `MissingField` for blank text.
/// - `InvalidTime` when the text is not a 24h `HH:MM` value.
pub fn parse_time_of_day(field: Field, text: &str) -> ScheduleResult<NaiveTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::MissingField(field));
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT).map_err(|_| ScheduleError::InvalidTime {
        field,
        value: trimmed.to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeRangeWire {
    start_time: String,
    end_time: String,
}

impl TryFrom<TimeRangeWire> for TimeRange {
    type Error = ScheduleError;

    fn try_from(value: TimeRangeWire) -> Result<Self, Self::Error> {
        Self::parse(&value.start_time, &value.end_time)
    }
}

impl From<TimeRange> for TimeRangeWire {
    fn from(value: TimeRange) -> Self {
        Self {
            start_time: value.start.format(TIME_FORMAT).to_string(),
            end_time: value.end.format(TIME_FORMAT).to_string(),
        }
    }
}
