//! `sparseries` - Sparse, irregularly-sampled time series
//!
//! A series is a strictly ascending list of times paired with values. It can
//! be queried at any time, not just recorded ones, sliced by time range,
//! resampled, and combined with another series point by point over the
//! union of both timelines.
//!
//! # Example
//! ```
//! use sparseries::{Series, Slice};
//!
//! let a = Series::new(vec![0_i64, 2, 4], vec![0.0, 2.0, 4.0]).unwrap();
//! let b = Series::new(vec![1_i64, 2, 3], vec![1.0, 2.0, 3.0]).unwrap();
//!
//! // Each side holds its prior value at times it did not record
//! let sum = &a + &b;
//! assert_eq!(sum.times(), &[0, 1, 2, 3, 4]);
//! assert_eq!(sum.values(), &[0.0, 1.0, 4.0, 5.0, 7.0]);
//!
//! // Right side wins where both sides recorded a time
//! let merged = &a | &b;
//! assert_eq!(merged.values(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
//!
//! // Resample a range to a fixed step
//! let times: Vec<i64> = (0..10).collect();
//! let values: Vec<f64> = (0..10_i32).map(f64::from).collect();
//! let dense = Series::new(times, values).unwrap();
//! let thinned = dense.slice(Slice::between(0, 8).step_by(2)).unwrap();
//! assert_eq!(thinned.times(), &[0, 2, 4, 6]);
//! ```
//!
//! # Query rules
//!
//! | Query time | `interpolate = false` | `interpolate = true` |
//! |------------|-----------------------|----------------------|
//! | recorded | recorded value | recorded value |
//! | between two recorded times | prior value | linear interpolation |
//! | after the last time | last value | last value |
//! | before the first time | `first_val` (or the first value with `use_first_value`) | same |
//!
//! Values are never extrapolated.
//!
//! # Range queries
//!
//! [`Slice`] describes `[start:stop:step]`. The result holds every recorded
//! time in `start <= t < stop`; a `stop` equal to the final recorded time is
//! inclusive. A `start` before the first time adds a boundary point at
//! `start` unless `use_first_value` is set. With a `step`, the selected range
//! is regridded: densified to unit spacing, then thinned to `step`. Values of
//! the result always come from the point query, so an interpolating series
//! interpolates against its full data.
//!
//! # Combining
//!
//! `+ - * /` (or [`Series::add`] and friends) sample both operands at every
//! time of either and apply the operation; division by zero yields `0.0`.
//! `|` ([`Series::merge`]) is a structural union of recorded points. The
//! result inherits the left operand's configuration.
//!
//! # Records
//!
//! [`StructuredSeries`] holds [`Record`] values. Records are forward-filled
//! field by field, and only the declared value keys take part in arithmetic.
//!
//! # Policies
//! - Input is sorted at construction; duplicate times are rejected.
//! - Series are never empty; a transform that would empty one fails.
//! - Every transform returns a new series. [`Series::set`] is the only
//!   in-place operation.

#![allow(clippy::float_cmp)]

mod combine;
mod config;
mod error;
mod locate;
mod record;
mod resample;
mod series;
mod slice;
mod structured;
mod time;

#[cfg(test)]
mod tests;

// Re-export public API
pub use combine::Op;
pub use config::SeriesConfig;
pub use error::{ErrorKind, SeriesError};
pub use locate::{locate, Mode};
pub use record::Record;
pub use resample::{pad, prune};
pub use series::Series;
pub use slice::Slice;
pub use structured::StructuredSeries;
pub use time::Time;
