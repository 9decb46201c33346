//! Flexible parsing of instants and durations from human/machine strings.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tracing::trace;

use crate::duration::{
    duration_from_seconds, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::errors::{Result, TimeRangeError};

/// Absolute point in time. Naive inputs are read as UTC.
pub type Instant = DateTime<Utc>;

/// Date-and-time layouts, tried in order after RFC 3339.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%d_%H%M%S",
    "%Y.%m.%d_%H:%M:%S",
    "%d-%b-%Y %H:%M:%S%.f",
    "%Y-%b-%d %H:%M:%S",
];

/// Date-only layouts, resolved to midnight.
pub const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d", "%Y%m%d", "%d-%b-%Y", "%Y-%b-%d"];

/// Parses `value` with the default format list.
pub fn parse_time(value: &str) -> Result<Instant> {
    TimeParser::default().parse(value)
}

/// Parses a duration: a signed number of seconds with an optional unit
/// (`s`, `m`/`min`, `h`/`hr`, `d`, or their long forms).
pub fn parse_duration(value: &str) -> Result<Duration> {
    let trimmed = value.trim();
    // the unit is the trailing run of letters, so `1e3` stays a number
    let split = trimmed
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .len();
    let (number, unit) = trimmed.split_at(split);

    let amount: f64 = number
        .trim()
        .parse()
        .map_err(|_| TimeRangeError::parse(value, "expected a number of seconds"))?;

    let scale = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        "m" | "min" | "mins" | "minute" | "minutes" => SECONDS_PER_MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => SECONDS_PER_HOUR,
        "d" | "day" | "days" => SECONDS_PER_DAY,
        other => {
            return Err(TimeRangeError::parse(
                value,
                format!("unknown duration unit '{other}'"),
            ))
        }
    };

    duration_from_seconds(amount * scale)
}

/// Instant parser holding the default layouts plus any configured extras.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeParser {
    extra_formats: Vec<String>,
}

impl TimeParser {
    /// Parser that also tries `formats` after the built-in layouts.
    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra_formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    pub fn extra_formats(&self) -> &[String] {
        &self.extra_formats
    }

    pub fn parse(&self, value: &str) -> Result<Instant> {
        let input = value.trim();
        if input.is_empty() {
            return Err(TimeRangeError::parse(value, "empty time string"));
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
            return Ok(parsed.with_timezone(&Utc));
        }

        let extras = self.extra_formats.iter().map(String::as_str);
        let found = DATETIME_FORMATS
            .iter()
            .copied()
            .chain(DATE_FORMATS.iter().copied())
            .chain(extras)
            .find_map(|format| parse_with(input, format).map(|instant| (format, instant)));

        match found {
            Some((format, instant)) => {
                trace!(input, format, "parsed instant");
                Ok(instant)
            }
            None => Err(TimeRangeError::parse(value, "no matching time format")),
        }
    }
}

fn parse_with(input: &str, format: &str) -> Option<Instant> {
    NaiveDateTime::parse_from_str(input, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test_case("2012/1/1", utc(2012, 1, 1, 0, 0, 0) ; "short slash date")]
    #[test_case("2012/1/2T00:00:00", utc(2012, 1, 2, 0, 0, 0) ; "slash date with t")]
    #[test_case("2014/05/03 12:00", utc(2014, 5, 3, 12, 0, 0) ; "slash date with minutes")]
    #[test_case("2014-05-03 12:00:30", utc(2014, 5, 3, 12, 0, 30) ; "iso with space")]
    #[test_case("2011-09-28T10:30:00Z", utc(2011, 9, 28, 10, 30, 0) ; "rfc3339")]
    #[test_case("2011-09-28T12:30:00+02:00", utc(2011, 9, 28, 10, 30, 0) ; "rfc3339 with offset")]
    #[test_case("20070930T221205", utc(2007, 9, 30, 22, 12, 5) ; "compact")]
    #[test_case("2007.09.30_22:12:05", utc(2007, 9, 30, 22, 12, 5) ; "dotted")]
    #[test_case("30-Sep-2007 22:12:05", utc(2007, 9, 30, 22, 12, 5) ; "month name")]
    #[test_case("  2012-01-01  ", utc(2012, 1, 1, 0, 0, 0) ; "surrounding whitespace")]
    fn parses_known_layouts(input: &str, expected: Instant) {
        assert_eq!(parse_time(input).unwrap(), expected);
    }

    #[test]
    fn keeps_fractional_seconds() {
        let parsed = parse_time("2012-01-01T00:00:00.250").unwrap();
        assert_eq!(parsed, utc(2012, 1, 1, 0, 0, 0) + Duration::milliseconds(250));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_time("next tuesday").unwrap_err();
        assert!(matches!(err, TimeRangeError::Parse { .. }));
        assert!(parse_time("   ").is_err());
        assert!(parse_time("2012/13/01").is_err());
    }

    #[test]
    fn extra_formats_are_tried_last() {
        let parser = TimeParser::with_formats(["%H:%M %d/%m/%Y", "%j/%Y"]);
        assert_eq!(
            parser.parse("06:30 03/05/2014").unwrap(),
            utc(2014, 5, 3, 6, 30, 0)
        );
        assert!(parse_time("06:30 03/05/2014").is_err());
    }

    #[test_case("86400", Duration::days(1) ; "bare seconds")]
    #[test_case("-86400", Duration::days(-1) ; "negative seconds")]
    #[test_case("10s", Duration::seconds(10) ; "seconds suffix")]
    #[test_case("12h", Duration::hours(12) ; "hours suffix")]
    #[test_case("1.5 minutes", Duration::seconds(90) ; "long unit")]
    #[test_case("-1d", Duration::days(-1) ; "negative days")]
    #[test_case("1e3", Duration::seconds(1_000) ; "scientific notation")]
    #[test_case("1.5e1 min", Duration::seconds(900) ; "scientific notation with unit")]
    fn parses_durations(input: &str, expected: Duration) {
        assert_eq!(parse_duration(input).unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_duration_units() {
        assert!(parse_duration("3 fortnights").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("2012/1/1").is_err());
        assert!(parse_duration("inf").is_err());
    }
}
