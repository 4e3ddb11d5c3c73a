//! Calendar date keys.
//!
//! Events are bucketed by local calendar date. The canonical key is ISO
//! `YYYY-MM-DD`. Snapshots written by the browser build stored full RFC 3339
//! timestamps of local midnight (`2024-03-04T23:00:00.000Z` for a UTC+1
//! user); those are read back as the local calendar day they encode.

use chrono::{DateTime, Local, NaiveDate};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO date or an RFC 3339 timestamp. Returns `None` when neither matches.
pub fn parse_date_key(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .ok()
        .or_else(|| timestamp_local_date(trimmed))
}

/// Formats the canonical ISO key for `date`.
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

fn timestamp_local_date(text: &str) -> Option<NaiveDate> {
    let timestamp = DateTime::parse_from_rfc3339(text).ok()?;
    Some(timestamp.with_timezone(&Local).date_naive())
}

#[cfg(test)]
mod tests {
    use super::{format_date_key, parse_date_key};
    use chrono::{Local, NaiveDate, TimeZone};

    #[test]
    fn accepts_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_date_key(" 2024-03-05 "), Some(expected));
        assert_eq!(parse_date_key("05/03/2024"), None);
        assert_eq!(parse_date_key("Tue Mar 05 2024"), None);
    }

    #[test]
    fn timestamp_of_local_midnight_maps_back_to_its_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let midnight = Local
            .from_local_datetime(&expected.and_hms_opt(0, 0, 0).unwrap())
            .earliest()
            .unwrap();
        let stored = midnight.to_utc().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();

        assert_eq!(parse_date_key(&stored), Some(expected));
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert_eq!(parse_date_key("2024-03-05T25:00:00.000Z"), None);
        assert_eq!(parse_date_key("2024-03-05T00:00:00"), None);
    }

    #[test]
    fn formats_zero_padded_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(format_date_key(date), "2024-02-09");
    }
}
