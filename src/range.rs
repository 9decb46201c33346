//! The [`TimeRange`] type: a closed interval between two instants.

use std::fmt;
use std::ops::{Bound, RangeBounds};

use chrono::{Duration, NaiveDate};
use timerange_core::duration::{
    as_seconds_f64, from_total_nanos, total_nanos, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE,
};
use timerange_core::{CoreResult, Instant, TimeParser, TimeRangeError};
use tracing::{debug, trace};

use crate::input::{DurationLike, InstantLike, RangeEnd, RangeSpec};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Closed interval `[start, end]` with `start <= end` after construction.
///
/// `next`, `previous` and `extend` mutate the range in place. Every other
/// operation leaves it untouched, and `dt` is always derived from the
/// current endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: Instant,
    end: Instant,
}

impl TimeRange {
    /// Builds a range from a start and either an end or an offset from the start.
    ///
    /// Reversed inputs are swapped rather than rejected, so
    /// `TimeRange::new("2012/1/2", -86400)` equals
    /// `TimeRange::new("2012/1/1", "2012/1/2")`.
    pub fn new(start: impl Into<InstantLike>, end: impl Into<RangeEnd>) -> CoreResult<Self> {
        Self::from_spec(RangeSpec::Pair(start.into(), end.into()))
    }

    /// Builds a range from a single argument: a pair, a two-element sequence or a range.
    pub fn from_spec(spec: impl Into<RangeSpec>) -> CoreResult<Self> {
        Self::with_parser(&TimeParser::default(), spec)
    }

    /// Same as [`TimeRange::from_spec`], resolving text through `parser`.
    pub fn with_parser(parser: &TimeParser, spec: impl Into<RangeSpec>) -> CoreResult<Self> {
        match spec.into() {
            RangeSpec::Pair(first, second) => {
                let t1 = first.resolve(parser)?;
                let t2 = second.resolve(t1, parser)?;
                Ok(Self::from_instants(t1, t2))
            }
            RangeSpec::Sequence(values) => match values.as_slice() {
                [first, second] => {
                    let t1 = first.resolve(parser)?;
                    let t2 = second.resolve(parser)?;
                    Ok(Self::from_instants(t1, t2))
                }
                other => Err(TimeRangeError::Shape(format!(
                    "expected a sequence of 2 instants, got {}",
                    other.len()
                ))),
            },
            RangeSpec::Range(range) => Ok(range),
        }
    }

    /// Orders two resolved instants into a range.
    pub fn from_instants(t1: Instant, t2: Instant) -> Self {
        if t1 > t2 {
            debug!(%t1, %t2, "swapping reversed time range endpoints");
            Self { start: t2, end: t1 }
        } else {
            Self { start: t1, end: t2 }
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    /// Length of the range, `end - start`.
    pub fn dt(&self) -> Duration {
        self.end - self.start
    }

    /// Midpoint, `start + dt / 2`.
    pub fn center(&self) -> Instant {
        self.start + self.dt() / 2
    }

    pub fn days(&self) -> f64 {
        self.seconds() / SECONDS_PER_DAY
    }

    pub fn hours(&self) -> f64 {
        self.seconds() / SECONDS_PER_HOUR
    }

    pub fn minutes(&self) -> f64 {
        self.seconds() / SECONDS_PER_MINUTE
    }

    pub fn seconds(&self) -> f64 {
        as_seconds_f64(self.dt())
    }

    /// Whether `value` lies within the range, endpoints included.
    ///
    /// Text is parsed with the default parser; a parse failure is returned
    /// as an error rather than treated as "not contained".
    pub fn contains(&self, value: impl Into<InstantLike>) -> CoreResult<bool> {
        let instant = value.into().resolve(&TimeParser::default())?;
        Ok(self.contains_instant(&instant))
    }

    pub fn contains_instant(&self, instant: &Instant) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// Divides the range into `n` equal, contiguous sub-ranges.
    ///
    /// Each boundary is computed from `start` directly, so the last
    /// sub-range ends exactly at `end`.
    pub fn split(&self, n: usize) -> CoreResult<Vec<TimeRange>> {
        if n == 0 {
            return Err(TimeRangeError::InvalidSplit(n));
        }

        let span = total_nanos(self.dt());
        let parts = n as i128;
        let boundary = |i: i128| -> CoreResult<Instant> {
            let offset = span
                .checked_mul(i)
                .ok_or_else(|| TimeRangeError::out_of_range(format!("{n} splits")))?
                / parts;
            shift(self.start, from_total_nanos(offset)?)
        };

        let mut pieces = Vec::with_capacity(n);
        let mut lower = self.start;
        for i in 1..=parts {
            let upper = boundary(i)?;
            pieces.push(TimeRange {
                start: lower,
                end: upper,
            });
            lower = upper;
        }

        debug!(parts = n, "split time range");
        Ok(pieces)
    }

    /// Slides a window of `window_size` across the range in steps of `cadence`.
    ///
    /// Snapshots start at `start`, `start + cadence`, ... and each one is
    /// exactly `window_size` wide. Generation stops after the first snapshot
    /// that reaches `end`, so the last one may run past `end` by less than a
    /// cadence; snapshots are never truncated. A window wider than the range
    /// yields nothing.
    pub fn window(
        &self,
        cadence: impl Into<DurationLike>,
        window_size: impl Into<DurationLike>,
    ) -> CoreResult<Vec<TimeRange>> {
        let cadence = cadence.into().resolve()?;
        let window_size = window_size.into().resolve()?;

        if cadence <= Duration::zero() {
            return Err(TimeRangeError::InvalidWindow(format!(
                "cadence must be positive, got {cadence}"
            )));
        }
        if window_size < Duration::zero() {
            return Err(TimeRangeError::InvalidWindow(format!(
                "window size must not be negative, got {window_size}"
            )));
        }

        let span = total_nanos(self.dt());
        let step = total_nanos(cadence);
        let width = total_nanos(window_size);
        // one snapshot at `start`, then one more per cadence while the
        // previous snapshot still ends before `end`
        let count = if width > span {
            0
        } else {
            1 + (span - width + step - 1) / step
        };

        let snapshots = (0..count)
            .map(|k| {
                let start = shift(self.start, from_total_nanos(k * step)?)?;
                let end = shift(start, window_size)?;
                Ok(TimeRange { start, end })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        debug!(
            snapshots = snapshots.len(),
            %cadence,
            %window_size,
            "windowed time range"
        );
        Ok(snapshots)
    }

    /// Every calendar date touched by the range, from the date of `start`
    /// to the date of `end`.
    pub fn get_dates(&self) -> Vec<NaiveDate> {
        let last = self.end.date_naive();
        self.start
            .date_naive()
            .iter_days()
            .take_while(|day| *day <= last)
            .collect()
    }

    /// Moves the range forward by its own length.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> CoreResult<()> {
        let dt = self.dt();
        self.translate(dt, dt)
    }

    /// Moves the range backward by its own length.
    pub fn previous(&mut self) -> CoreResult<()> {
        let dt = self.dt();
        self.translate(-dt, -dt)
    }

    /// Adds `start_delta` to `start` and `end_delta` to `end`.
    ///
    /// The endpoints are not re-ordered afterwards; keeping `start <= end`
    /// is up to the caller.
    pub fn extend(&mut self, start_delta: Duration, end_delta: Duration) -> CoreResult<()> {
        self.translate(start_delta, end_delta)
    }

    fn translate(&mut self, start_delta: Duration, end_delta: Duration) -> CoreResult<()> {
        let start = shift(self.start, start_delta)?;
        let end = shift(self.end, end_delta)?;
        trace!(%start, %end, "moved time range");
        self.start = start;
        self.end = end;
        Ok(())
    }
}

fn shift(instant: Instant, delta: Duration) -> CoreResult<Instant> {
    instant
        .checked_add_signed(delta)
        .ok_or_else(|| TimeRangeError::out_of_range(format!("{instant} + {delta}")))
}

impl RangeBounds<Instant> for TimeRange {
    fn start_bound(&self) -> Bound<&Instant> {
        Bound::Included(&self.start)
    }

    fn end_bound(&self) -> Bound<&Instant> {
        Bound::Included(&self.end)
    }
}

impl TryFrom<RangeSpec> for TimeRange {
    type Error = TimeRangeError;

    fn try_from(spec: RangeSpec) -> Result<Self, Self::Error> {
        TimeRange::from_spec(spec)
    }
}

impl TryFrom<[&str; 2]> for TimeRange {
    type Error = TimeRangeError;

    fn try_from(values: [&str; 2]) -> Result<Self, Self::Error> {
        TimeRange::from_spec(values)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start:    {}", self.start.format(DISPLAY_FORMAT))?;
        writeln!(f, "End:      {}", self.end.format(DISPLAY_FORMAT))?;
        writeln!(f, "Center:   {}", self.center().format(DISPLAY_FORMAT))?;
        writeln!(f, "Duration: {} days", self.days())?;
        writeln!(f, "          {} hours", self.hours())?;
        writeln!(f, "          {} minutes", self.minutes())?;
        write!(f, "          {} seconds", self.seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn split_of_uneven_span_stays_contiguous() {
        let range = TimeRange::from_instants(
            at(2012, 1, 1, 0, 0, 0),
            at(2012, 1, 1, 0, 0, 0) + Duration::nanoseconds(10),
        );
        let pieces = range.split(3).unwrap();

        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].start(), range.start());
        assert_eq!(pieces[2].end(), range.end());
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn zero_width_window_on_zero_length_range() {
        let t = at(2012, 1, 1, 0, 0, 0);
        let range = TimeRange::from_instants(t, t);
        let snapshots = range.window(1, 0).unwrap();
        assert_eq!(snapshots, vec![TimeRange::from_instants(t, t)]);
    }

    #[test]
    fn translate_is_atomic_on_overflow() {
        let mut range =
            TimeRange::from_instants(at(2012, 1, 1, 0, 0, 0), at(2012, 1, 2, 0, 0, 0));
        let before = range;

        let err = range
            .extend(Duration::zero(), Duration::MAX)
            .unwrap_err();
        assert!(matches!(err, TimeRangeError::OutOfRange(_)));
        assert_eq!(range, before);
    }

    #[test]
    fn display_lists_endpoints_and_duration() {
        let range = TimeRange::from_instants(at(2012, 1, 1, 0, 0, 0), at(2012, 1, 2, 0, 0, 0));
        let rendered = range.to_string();
        assert!(rendered.contains("Start:    2012-01-01 00:00:00"));
        assert!(rendered.contains("Center:   2012-01-01 12:00:00"));
        assert!(rendered.contains("24 hours"));
        assert!(rendered.contains("86400 seconds"));
    }
}
