use anyhow::Context;
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

const DAY_MS: f64 = 86_400_000.0;

pub fn add_seconds(date: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    date.checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

pub fn add_minutes(date: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    date.checked_add_signed(TimeDelta::try_minutes(minutes)?)
}

pub fn add_hours(date: DateTime<Utc>, hours: i64) -> Option<DateTime<Utc>> {
    date.checked_add_signed(TimeDelta::try_hours(hours)?)
}

/// Whole days from `from` to `to`, rounded.
pub fn diff_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    ((to - from).num_milliseconds() as f64 / DAY_MS).round() as i64
}

/// `YYYY-MM-DD HH:MM:SS.mmm`, shifted into `offset` when given.
pub fn date_to_sql(date: DateTime<Utc>, offset: Option<FixedOffset>) -> String {
    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
    match offset {
        Some(offset) => date.with_timezone(&offset).format(FORMAT).to_string(),
        None => date.format(FORMAT).to_string(),
    }
}

pub fn format_date(date: DateTime<Utc>, offset: FixedOffset) -> String {
    date.with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Current time for log lines.
pub fn format_now(offset: FixedOffset) -> String {
    format_date(Utc::now(), offset)
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM`, `Z` or `UTC`.
pub fn parse_utc_offset(s: &str) -> anyhow::Result<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("invalid utc offset");
    }

    s.parse::<FixedOffset>()
        .with_context(|| format!("invalid utc offset: {s}"))
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add() {
        let date = noon();

        assert_eq!(
            add_seconds(date, 30),
            Some(Utc.with_ymd_and_hms(2024, 8, 4, 12, 0, 30).unwrap())
        );
        assert_eq!(
            add_minutes(date, -90),
            Some(Utc.with_ymd_and_hms(2024, 8, 4, 10, 30, 0).unwrap())
        );
        assert_eq!(
            add_hours(date, 13),
            Some(Utc.with_ymd_and_hms(2024, 8, 5, 1, 0, 0).unwrap())
        );
        assert_eq!(add_hours(date, i64::MAX), None);
    }

    #[test]
    fn test_diff_days() {
        let from = noon();
        let to = Utc.with_ymd_and_hms(2024, 8, 7, 0, 0, 0).unwrap();

        assert_eq!(diff_days(from, to), 3);
        assert_eq!(diff_days(to, from), -3);
    }

    #[test]
    fn test_date_to_sql() {
        let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();

        assert_eq!(date_to_sql(noon(), None), "2024-08-04 12:00:00.000");
        assert_eq!(
            date_to_sql(noon(), Some(bangkok)),
            "2024-08-04 19:00:00.000"
        );
    }

    #[test]
    fn test_format_date() {
        let bangkok = parse_utc_offset("+07:00").unwrap();

        assert_eq!(format_date(noon(), bangkok), "2024-08-04 19:00:00");
        assert_eq!(format_now(bangkok).len(), "YYYY-MM-DD HH:MM:SS".len());
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(
            parse_utc_offset(" +07:00 ").unwrap(),
            "+07:00".parse::<FixedOffset>().unwrap()
        );
        assert_eq!(
            parse_utc_offset("-0530").unwrap(),
            FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap()
        );
        assert_eq!(
            parse_utc_offset("UTC").unwrap(),
            FixedOffset::east_opt(0).unwrap()
        );
        assert!(parse_utc_offset("07:00").is_err());
        assert!(parse_utc_offset("+7").is_err());
        assert!(parse_utc_offset("+07:75").is_err());
    }
}
