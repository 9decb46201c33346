//! Exact conversions between `chrono::Duration` and scalar quantities.
//!
//! Interval arithmetic is done on whole nanoseconds held in an `i128`, so
//! splitting and scaling never accumulate rounding error.

use chrono::Duration;

use crate::errors::{Result, TimeRangeError};

pub const NANOS_PER_SECOND: i128 = 1_000_000_000;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Total length of `duration` in nanoseconds.
pub fn total_nanos(duration: Duration) -> i128 {
    i128::from(duration.num_seconds()) * NANOS_PER_SECOND + i128::from(duration.subsec_nanos())
}

/// Builds a duration from a nanosecond count.
pub fn from_total_nanos(nanos: i128) -> Result<Duration> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND))
        .map_err(|_| TimeRangeError::out_of_range(format!("{nanos}ns")))?;
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as i64;

    Duration::try_seconds(secs)
        .and_then(|whole| whole.checked_add(&Duration::nanoseconds(subsec)))
        .ok_or_else(|| TimeRangeError::out_of_range(format!("{nanos}ns")))
}

/// Length of `duration` in (fractional) seconds.
pub fn as_seconds_f64(duration: Duration) -> f64 {
    total_nanos(duration) as f64 / NANOS_PER_SECOND as f64
}

/// Converts a number of seconds into a duration, rounding to the nearest nanosecond.
pub fn duration_from_seconds(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() {
        return Err(TimeRangeError::parse(
            seconds.to_string(),
            "duration must be a finite number of seconds",
        ));
    }

    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * NANOS_PER_SECOND as f64).round() as i64;

    // `as` saturates, so anything past i64 fails inside try_seconds
    Duration::try_seconds(whole as i64)
        .and_then(|base| base.checked_add(&Duration::nanoseconds(nanos)))
        .ok_or_else(|| TimeRangeError::out_of_range(format!("{seconds}s")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_durations_keep_their_sign() {
        let d = Duration::milliseconds(-1_500);
        assert_eq!(total_nanos(d), -1_500_000_000);
        assert_eq!(from_total_nanos(total_nanos(d)).unwrap(), d);
    }

    #[test]
    fn fractional_seconds_round_to_nanoseconds() {
        let d = duration_from_seconds(0.25).unwrap();
        assert_eq!(d, Duration::milliseconds(250));
        assert_eq!(as_seconds_f64(d), 0.25);

        let negative = duration_from_seconds(-86_400.0).unwrap();
        assert_eq!(negative, Duration::days(-1));
    }

    #[test]
    fn rejects_non_finite_seconds() {
        assert!(matches!(
            duration_from_seconds(f64::NAN),
            Err(TimeRangeError::Parse { .. })
        ));
        assert!(matches!(
            duration_from_seconds(1e300),
            Err(TimeRangeError::OutOfRange(_))
        ));
    }
}
