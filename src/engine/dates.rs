use chrono::{Datelike, Duration, NaiveDate};

use super::EngineError;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_DATE_LEN: usize = 10;

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, EngineError> {
    let trimmed = raw.trim();
    if trimmed.len() != ISO_DATE_LEN {
        return Err(EngineError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(raw.to_string()))
}

/// Reads the calendar date at the start of an ISO-8601 date-time such as
/// `2025-06-18T09:30:00`. Returns `None` when the prefix is not a date.
pub fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    raw.get(..ISO_DATE_LEN)
        .and_then(|prefix| parse_iso_date(prefix).ok())
}

/// Most recent Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday..=Sunday of the week `week_offset` weeks away from the week holding `today`.
///
/// Offsets that land outside chrono's calendar are rejected.
pub fn week_range(
    today: NaiveDate,
    week_offset: i64,
) -> Result<(NaiveDate, NaiveDate), EngineError> {
    let out_of_range = || EngineError::WeekOutOfRange(week_offset);

    let start = Duration::try_weeks(week_offset)
        .and_then(|shift| week_start(today).checked_add_signed(shift))
        .ok_or_else(out_of_range)?;
    let end = start
        .checked_add_signed(Duration::days(6))
        .ok_or_else(out_of_range)?;
    Ok((start, end))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn year_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.ordinal0()))
}

/// Every calendar day from `start` through `end`, inclusive. Empty when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(raw: &str) -> NaiveDate {
        parse_iso_date(raw).unwrap()
    }

    #[rstest]
    #[case("2025-06-18", true)]
    #[case(" 2025-06-18 ", true)]
    #[case("2025-6-18", false)]
    #[case("2025-02-30", false)]
    #[case("yesterday", false)]
    #[case("", false)]
    fn parses_only_strict_iso_dates(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(parse_iso_date(raw).is_ok(), valid);
    }

    #[test]
    fn rejects_invalid_dates_with_typed_error() {
        assert_eq!(
            parse_iso_date("not-a-date"),
            Err(EngineError::InvalidDate("not-a-date".to_string()))
        );
    }

    #[rstest]
    #[case("2025-06-18T09:30:00", Some("2025-06-18"))]
    #[case("2025-06-18", Some("2025-06-18"))]
    #[case("2025-06", None)]
    #[case(" 2025-06-18T09:30:00", None)] // prefix is taken as-is
    #[case("garbage-timestamp", None)]
    fn reads_date_prefix_of_timestamps(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_date_prefix(raw), expected.map(date));
    }

    #[rstest]
    #[case("2025-06-16", "2025-06-16")] // Monday
    #[case("2025-06-18", "2025-06-16")] // Wednesday
    #[case("2025-06-22", "2025-06-16")] // Sunday
    #[case("2025-01-01", "2024-12-30")] // crosses the year boundary
    fn finds_monday_of_week(#[case] day: &str, #[case] monday: &str) {
        assert_eq!(week_start(date(day)), date(monday));
    }

    #[test]
    fn week_range_applies_offset() {
        let today = date("2025-06-18");
        assert_eq!(week_range(today, 0), Ok((date("2025-06-16"), date("2025-06-22"))));
        assert_eq!(week_range(today, -1), Ok((date("2025-06-09"), date("2025-06-15"))));
        assert_eq!(week_range(today, 2), Ok((date("2025-06-30"), date("2025-07-06"))));
    }

    #[rstest]
    #[case(20_000_000)]
    #[case(-20_000_000)]
    #[case(i64::MAX)]
    #[case(i64::MIN)]
    fn week_range_rejects_offsets_off_the_calendar(#[case] offset: i64) {
        assert_eq!(
            week_range(date("2025-06-18"), offset),
            Err(EngineError::WeekOutOfRange(offset))
        );
    }

    #[test]
    fn month_and_year_starts() {
        assert_eq!(month_start(date("2025-06-18")), date("2025-06-01"));
        assert_eq!(year_start(date("2025-06-18")), date("2025-01-01"));
        assert_eq!(year_start(date("2024-12-31")), date("2024-01-01"));
    }

    #[test]
    fn iterates_days_inclusive() {
        let days: Vec<_> = days_inclusive(date("2025-02-27"), date("2025-03-01")).collect();
        assert_eq!(
            days,
            vec![date("2025-02-27"), date("2025-02-28"), date("2025-03-01")]
        );
        assert_eq!(
            days_inclusive(date("2025-03-02"), date("2025-03-01")).count(),
            0
        );
    }
}
