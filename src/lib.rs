//! TimeRange: observation windows between two instants.
//!
//! A [`TimeRange`] is a closed interval `[start, end]` that can be queried
//! (duration, midpoint, containment), decomposed ([`TimeRange::split`],
//! [`TimeRange::window`]) and moved in place ([`TimeRange::next`],
//! [`TimeRange::previous`], [`TimeRange::extend`]).
//!
//! # Architecture
//!
//! * `input`: the closed set of argument shapes accepted by the constructors
//! * `range`: the interval type and its operations
//!
//! Parsing, errors, configuration and logging live in `timerange-core` and
//! are re-exported here.
//!
//! ```
//! use timerange::TimeRange;
//!
//! let range = TimeRange::new("2012/1/1", "2012/1/2")?;
//! assert_eq!(range.hours(), 24.0);
//! assert_eq!(range.split(4)?.len(), 4);
//! assert!(range.contains("2012/1/1 12:00")?);
//! # Ok::<(), timerange::TimeRangeError>(())
//! ```

pub mod input;
pub mod range;

pub use input::{DurationLike, InstantLike, RangeEnd, RangeSpec};
pub use range::TimeRange;
pub use timerange_core::{
    parse_duration, parse_time, CoreConfig, CoreResult as Result, Instant, TimeParser,
    TimeRangeError,
};
