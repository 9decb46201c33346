//! Argument shapes accepted when building a [`TimeRange`].
//!
//! Each variant resolves to concrete instants or durations before the
//! range is normalized, so construction never inspects types at runtime.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use timerange_core::duration::duration_from_seconds;
use timerange_core::{parse_duration, CoreResult, Instant, TimeParser, TimeRangeError};

use crate::range::TimeRange;

/// A value that denotes an instant.
#[derive(Debug, Clone, PartialEq)]
pub enum InstantLike {
    Text(String),
    Instant(Instant),
}

impl InstantLike {
    pub fn resolve(&self, parser: &TimeParser) -> CoreResult<Instant> {
        match self {
            InstantLike::Text(text) => parser.parse(text),
            InstantLike::Instant(instant) => Ok(*instant),
        }
    }
}

impl From<&str> for InstantLike {
    fn from(value: &str) -> Self {
        InstantLike::Text(value.to_string())
    }
}

impl From<String> for InstantLike {
    fn from(value: String) -> Self {
        InstantLike::Text(value)
    }
}

impl From<Instant> for InstantLike {
    fn from(value: Instant) -> Self {
        InstantLike::Instant(value)
    }
}

impl From<&Instant> for InstantLike {
    fn from(value: &Instant) -> Self {
        InstantLike::Instant(*value)
    }
}

impl From<NaiveDateTime> for InstantLike {
    fn from(value: NaiveDateTime) -> Self {
        InstantLike::Instant(value.and_utc())
    }
}

impl From<NaiveDate> for InstantLike {
    fn from(value: NaiveDate) -> Self {
        InstantLike::Instant(value.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

/// A value that denotes a signed duration.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationLike {
    Seconds(f64),
    Delta(Duration),
    Text(String),
}

impl DurationLike {
    pub fn resolve(&self) -> CoreResult<Duration> {
        match self {
            DurationLike::Seconds(seconds) => duration_from_seconds(*seconds),
            DurationLike::Delta(delta) => Ok(*delta),
            DurationLike::Text(text) => parse_duration(text),
        }
    }

    /// Duration-like text, e.g. `"12h"` or `"-86400"`.
    pub fn text(value: impl Into<String>) -> Self {
        DurationLike::Text(value.into())
    }
}

impl From<f64> for DurationLike {
    fn from(value: f64) -> Self {
        DurationLike::Seconds(value)
    }
}

impl From<i64> for DurationLike {
    fn from(value: i64) -> Self {
        DurationLike::Seconds(value as f64)
    }
}

impl From<i32> for DurationLike {
    fn from(value: i32) -> Self {
        DurationLike::Seconds(f64::from(value))
    }
}

impl From<Duration> for DurationLike {
    fn from(value: Duration) -> Self {
        DurationLike::Delta(value)
    }
}

/// Second constructor argument: either the other endpoint or an offset from the first.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeEnd {
    Instant(InstantLike),
    Duration(DurationLike),
    /// Plain numbers are seconds; other text is read as an instant first,
    /// then as a duration.
    Text(String),
}

impl RangeEnd {
    pub fn resolve(&self, from: Instant, parser: &TimeParser) -> CoreResult<Instant> {
        match self {
            RangeEnd::Instant(instant) => instant.resolve(parser),
            RangeEnd::Duration(duration) => offset(from, duration.resolve()?),
            // compact layouts such as `%Y%m%d` would otherwise swallow second counts
            RangeEnd::Text(text) if text.trim().parse::<f64>().is_ok() => {
                offset(from, parse_duration(text)?)
            }
            RangeEnd::Text(text) => match parser.parse(text) {
                Ok(instant) => Ok(instant),
                Err(instant_err) => match parse_duration(text) {
                    Ok(duration) => offset(from, duration),
                    Err(_) => Err(instant_err),
                },
            },
        }
    }
}

fn offset(from: Instant, duration: Duration) -> CoreResult<Instant> {
    from.checked_add_signed(duration)
        .ok_or_else(|| TimeRangeError::out_of_range(format!("{from} + {duration}")))
}

impl From<&str> for RangeEnd {
    fn from(value: &str) -> Self {
        RangeEnd::Text(value.to_string())
    }
}

impl From<String> for RangeEnd {
    fn from(value: String) -> Self {
        RangeEnd::Text(value)
    }
}

impl From<InstantLike> for RangeEnd {
    fn from(value: InstantLike) -> Self {
        RangeEnd::Instant(value)
    }
}

impl From<DurationLike> for RangeEnd {
    fn from(value: DurationLike) -> Self {
        RangeEnd::Duration(value)
    }
}

impl From<Instant> for RangeEnd {
    fn from(value: Instant) -> Self {
        RangeEnd::Instant(value.into())
    }
}

impl From<NaiveDateTime> for RangeEnd {
    fn from(value: NaiveDateTime) -> Self {
        RangeEnd::Instant(value.into())
    }
}

impl From<NaiveDate> for RangeEnd {
    fn from(value: NaiveDate) -> Self {
        RangeEnd::Instant(value.into())
    }
}

impl From<Duration> for RangeEnd {
    fn from(value: Duration) -> Self {
        RangeEnd::Duration(value.into())
    }
}

impl From<f64> for RangeEnd {
    fn from(value: f64) -> Self {
        RangeEnd::Duration(value.into())
    }
}

impl From<i64> for RangeEnd {
    fn from(value: i64) -> Self {
        RangeEnd::Duration(value.into())
    }
}

impl From<i32> for RangeEnd {
    fn from(value: i32) -> Self {
        RangeEnd::Duration(value.into())
    }
}

/// Single-argument constructor shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeSpec {
    Pair(InstantLike, RangeEnd),
    Sequence(Vec<InstantLike>),
    Range(TimeRange),
}

impl<A, B> From<(A, B)> for RangeSpec
where
    A: Into<InstantLike>,
    B: Into<RangeEnd>,
{
    fn from((a, b): (A, B)) -> Self {
        RangeSpec::Pair(a.into(), b.into())
    }
}

impl<T: Into<InstantLike>> From<Vec<T>> for RangeSpec {
    fn from(values: Vec<T>) -> Self {
        RangeSpec::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<InstantLike>, const N: usize> From<[T; N]> for RangeSpec {
    fn from(values: [T; N]) -> Self {
        RangeSpec::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl From<TimeRange> for RangeSpec {
    fn from(range: TimeRange) -> Self {
        RangeSpec::Range(range)
    }
}

impl From<&TimeRange> for RangeSpec {
    fn from(range: &TimeRange) -> Self {
        RangeSpec::Range(*range)
    }
}
