//! Calendar-date parsing for trial inputs.
//!
//! Field spreadsheets and simulation exports write day-first dates with
//! an optional time-of-day (the simulation runner stamps
//! "15/05/2023 12:00:00 AM"); snapshots and observation sheets may carry
//! ISO dates. Joins in this workspace are date-only, so any time-of-day
//! present is discarded here, once, at the parse boundary.

use chrono::{NaiveDate, NaiveDateTime};

/// Day-first and ISO shapes carrying a time-of-day.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only shapes.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d"];

/// Parse a calendar date from any accepted shape, discarding any
/// time-of-day. Returns `None` for input matching no shape.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_first_with_am_pm_marker() {
        assert_eq!(parse_date("15/05/2023 12:00:00 AM"), Some(d(2023, 5, 15)));
        assert_eq!(parse_date("1/10/2022 01:30:00 PM"), Some(d(2022, 10, 1)));
    }

    #[test]
    fn day_first_plain() {
        assert_eq!(parse_date("15/05/2023"), Some(d(2023, 5, 15)));
        // Day-first: 03/04 is 3 April, not 4 March
        assert_eq!(parse_date("03/04/2021"), Some(d(2021, 4, 3)));
    }

    #[test]
    fn iso_shapes() {
        assert_eq!(parse_date("2023-05-15"), Some(d(2023, 5, 15)));
        assert_eq!(parse_date("2023-05-15 08:00:00"), Some(d(2023, 5, 15)));
    }

    #[test]
    fn rejects_garbage_and_blank() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("  "), None);
        assert_eq!(parse_date("32/13/2020"), None);
    }
}
