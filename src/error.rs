//! Error types for series construction, lookup and slicing.

use thiserror::Error;

use crate::time::Time;

/// Broad classification of a `SeriesError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input could not be turned into a (non-empty, strictly ordered) series
    Construction,
    /// Point assignment to a time the series does not contain
    Lookup,
    /// A resampling interval or slice step that is not strictly positive
    Interval,
    /// A slice request with no defined meaning
    UnsupportedSlice,
}

/// Error returned by fallible series operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError<T: Time> {
    /// Input (or the result of a transform) holds no points
    #[error("series must contain at least one point")]
    Empty,
    /// Parallel time and value sequences differ in length
    #[error("times and values differ in length ({times} times, {values} values)")]
    LengthMismatch { times: usize, values: usize },
    /// The same time appears more than once in the input
    #[error("duplicate time {time}")]
    DuplicateTime { time: T },
    /// A time that cannot be ordered (NaN)
    #[error("time {time} cannot be ordered")]
    InvalidTime { time: T },
    /// Point assignment at a time the series does not contain
    #[error("time {time} is not present in the series")]
    TimeNotFound { time: T },
    /// Interval or step is zero or negative
    #[error("interval {interval} must be greater than zero")]
    InvalidInterval { interval: T },
    /// Slice request with no defined meaning
    #[error("unsupported slice: {reason}")]
    UnsupportedSlice { reason: &'static str },
}

impl<T: Time> SeriesError<T> {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty
            | Self::LengthMismatch { .. }
            | Self::DuplicateTime { .. }
            | Self::InvalidTime { .. } => ErrorKind::Construction,
            Self::TimeNotFound { .. } => ErrorKind::Lookup,
            Self::InvalidInterval { .. } => ErrorKind::Interval,
            Self::UnsupportedSlice { .. } => ErrorKind::UnsupportedSlice,
        }
    }
}

/// Reject zero and negative intervals before a resampling pass
pub(crate) fn check_interval<T: Time>(interval: T) -> Result<(), SeriesError<T>> {
    // NaN fails the comparison too
    if interval > T::ZERO {
        Ok(())
    } else {
        Err(SeriesError::InvalidInterval { interval })
    }
}
