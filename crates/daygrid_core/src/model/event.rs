//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical `EventRecord` stored by the calendar core.
//! - Turn raw UI input (`EventDraft`) into validated records.
//!
//! # Invariants
//! - `name` is never blank.
//! - `range` always satisfies the `TimeRange` ordering invariant.
//! - `id` is assigned once at creation and survives edits.
//! - A blank description is stored as `None`.

use crate::error::{Field, ScheduleError, ScheduleResult};
use crate::model::date_key::{format_date_key, parse_date_key};
use crate::model::time_range::{TimeRange, TIME_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable event identifier.
///
/// Positional references (date + index) are resolved to this id at the
/// store boundary.
pub type EventId = Uuid;

/// Fixed event category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Work,
    Personal,
    Others,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Others];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Others => "Others",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for category text outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl Display for ParseCategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown category `{}`; expected Work|Personal|Others",
            self.0
        )
    }
}

impl Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Case-insensitive parse of the category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCategoryError(trimmed.to_string()))
    }
}

/// Raw event input as supplied by a UI collaborator.
///
/// Times are kept as text so that validation owns every failure mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    /// `HH:MM`, 24h.
    pub start_time: String,
    /// `HH:MM`, 24h.
    pub end_time: String,
    pub description: Option<String>,
    pub category: Category,
}

impl EventDraft {
    /// Creates a draft with required fields and default category.
    pub fn new(
        name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            description: None,
            category: Category::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Pre-fills a draft from a stored record, for edit flows.
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            name: record.name.clone(),
            start_time: record.range.start().format(TIME_FORMAT).to_string(),
            end_time: record.range.end().format(TIME_FORMAT).to_string(),
            description: record.description.clone(),
            category: record.category,
        }
    }
}

/// A single stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecordWire", into = "EventRecordWire")]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
    pub range: TimeRange,
    pub description: Option<String>,
    pub category: Category,
}

impl EventRecord {
    /// Validates a draft into a new record with a freshly generated id.
    ///
    /// # Errors
    /// - `MissingField` when name, start or end is blank (in that order).
    /// - `InvalidTime` / `InvalidRange` from `TimeRange::parse`.
    pub fn from_draft(date: NaiveDate, draft: &EventDraft) -> ScheduleResult<Self> {
        Self::with_id(Uuid::new_v4(), date, draft)
    }

    /// Validates a draft into a record that keeps a caller-provided id.
    ///
    /// Used by edit paths where identity already exists.
    pub fn with_id(id: EventId, date: NaiveDate, draft: &EventDraft) -> ScheduleResult<Self> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ScheduleError::MissingField(Field::Name));
        }
        let range = TimeRange::parse(&draft.start_time, &draft.end_time)?;

        Ok(Self {
            id,
            name: name.to_string(),
            date,
            range,
            description: normalize_description(draft.description.as_deref()),
            category: draft.category,
        })
    }
}

fn normalize_description(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn new_event_id() -> EventId {
    Uuid::new_v4()
}

/// Persisted/exported JSON shape of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecordWire {
    #[serde(default = "new_event_id")]
    id: EventId,
    name: String,
    date: String,
    #[serde(flatten)]
    range: TimeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    category: Category,
}

impl TryFrom<EventRecordWire> for EventRecord {
    type Error = String;

    fn try_from(value: EventRecordWire) -> Result<Self, Self::Error> {
        let date = parse_date_key(&value.date)
            .ok_or_else(|| format!("unrecognized event date `{}`", value.date))?;
        let name = value.name.trim();
        if name.is_empty() {
            return Err(ScheduleError::MissingField(Field::Name).to_string());
        }

        Ok(Self {
            id: value.id,
            name: name.to_string(),
            date,
            range: value.range,
            description: normalize_description(value.description.as_deref()),
            category: value.category,
        })
    }
}

impl From<EventRecord> for EventRecordWire {
    fn from(value: EventRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: format_date_key(value.date),
            range: value.range,
            description: value.description,
            category: value.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, EventDraft, EventRecord};
    use crate::error::{Field, ScheduleError};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("personal".parse::<Category>().unwrap(), Category::Personal);
        assert_eq!(" OTHERS ".parse::<Category>().unwrap(), Category::Others);
        assert!("holiday".parse::<Category>().is_err());
    }

    #[test]
    fn blank_name_is_reported_before_time_errors() {
        let draft = EventDraft::new("   ", "nope", "");
        let err = EventRecord::from_draft(day(), &draft).unwrap_err();
        assert_eq!(err, ScheduleError::MissingField(Field::Name));
    }

    #[test]
    fn blank_description_normalizes_to_none() {
        let draft = EventDraft::new(" Standup ", "09:00", "09:30").with_description("  ");
        let record = EventRecord::from_draft(day(), &draft).unwrap();
        assert_eq!(record.name, "Standup");
        assert_eq!(record.description, None);
        assert_eq!(record.category, Category::Work);
    }

    #[test]
    fn draft_from_record_round_trips_input_text() {
        let draft = EventDraft::new("Gym", "18:05", "19:00")
            .with_description("legs")
            .with_category(Category::Personal);
        let record = EventRecord::from_draft(day(), &draft).unwrap();
        assert_eq!(EventDraft::from_record(&record), draft);
    }

    #[test]
    fn wire_shape_flattens_time_range() {
        let draft = EventDraft::new("Standup", "09:00", "09:30").with_description("daily");
        let record = EventRecord::from_draft(day(), &draft).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let expected_tail = r#""name":"Standup","date":"2024-03-05","startTime":"09:00","endTime":"09:30","description":"daily","category":"Work"}"#;
        assert!(json.ends_with(expected_tail), "unexpected wire shape: {json}");

        let decoded: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn wire_rejects_inverted_range_and_blank_name() {
        let inverted = r#"{"name":"x","date":"2024-03-05","startTime":"10:00","endTime":"09:00"}"#;
        assert!(serde_json::from_str::<EventRecord>(inverted).is_err());

        let blank = r#"{"name":"  ","date":"2024-03-05","startTime":"09:00","endTime":"10:00"}"#;
        assert!(serde_json::from_str::<EventRecord>(blank).is_err());
    }
}
