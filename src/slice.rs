//! Point and range queries.
//!
//! A range query first settles on the list of result times (located by
//! binary search, optionally resampled to a step), then fills every time
//! with a point query. Both series kinds share the time resolution; only
//! the point query differs.

use std::borrow::Cow;

use crate::error::{check_interval, SeriesError};
use crate::locate::{search, Mode};
use crate::series::Series;
use crate::time::Time;

/// Bounds of a range query, the counterpart of `series[start:stop:step]`
///
/// Unset bounds are open: `start` defaults to the first time and `stop`
/// runs through the end. The result holds every time `t` with
/// `start <= t < stop`, except that a `stop` equal to the final recorded
/// time includes that point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Slice<T> {
    pub start: Option<T>,
    pub stop: Option<T>,
    pub step: Option<T>,
}

impl<T> Slice<T> {
    /// `[:]`, the whole series unchanged
    #[must_use]
    pub const fn full() -> Self {
        Self { start: None, stop: None, step: None }
    }

    /// `[start:]`
    #[must_use]
    pub const fn starting_at(start: T) -> Self {
        Self { start: Some(start), stop: None, step: None }
    }

    /// `[:stop]`
    #[must_use]
    pub const fn until(stop: T) -> Self {
        Self { start: None, stop: Some(stop), step: None }
    }

    /// `[start:stop]`
    #[must_use]
    pub const fn between(start: T, stop: T) -> Self {
        Self { start: Some(start), stop: Some(stop), step: None }
    }

    /// Resample the selected range to a regular `step`
    #[must_use]
    pub fn step_by(mut self, step: T) -> Self {
        self.step = Some(step);
        self
    }

    /// Whether every bound is open
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.start.is_none() && self.stop.is_none() && self.step.is_none()
    }
}

/// Exclusive end index for a range stopping at `stop`
///
/// The last time `<= stop` is located; a time strictly below `stop` is part
/// of the range, as is a `stop` landing exactly on the final time.
fn stop_index<T: Time>(stop: T, times: &[T]) -> usize {
    let idx = search(Some(stop), times, Mode::End);
    if times[idx] < stop || (idx == times.len() - 1 && times[idx] == stop) {
        idx + 1
    } else {
        idx
    }
}

/// Times a range query resolves to
///
/// `recorded` is the series' time list; `synthesize` says whether a start
/// before the first time adds a boundary point at `start`.
pub(crate) fn slice_times<T: Time>(
    recorded: &[T],
    synthesize: bool,
    query: &Slice<T>,
) -> Result<Vec<T>, SeriesError<T>> {
    if let Some(step) = query.step {
        check_interval(step)?;
    }
    if let (Some(start), Some(stop)) = (query.start, query.stop) {
        if start > stop {
            return Err(SeriesError::UnsupportedSlice {
                reason: "start is after stop",
            });
        }
    }

    let mut times = Cow::Borrowed(recorded);
    if let Some(start) = query.start {
        if synthesize && start < recorded[0] {
            let mut with_boundary = Vec::with_capacity(recorded.len() + 1);
            with_boundary.push(start);
            with_boundary.extend_from_slice(recorded);
            times = Cow::Owned(with_boundary);
        }
    }

    let lo = search(query.start, &times, Mode::Begin);
    let hi = query.stop.map_or(times.len(), |stop| stop_index(stop, &times));
    if lo >= hi {
        return Err(SeriesError::Empty);
    }
    let window = &times[lo..hi];

    let Some(step) = query.step else {
        return Ok(window.to_vec());
    };
    Ok(step_grid(step, window))
}

/// Times of `window` resampled to `step`
///
/// Equivalent to padding the window at unit spacing (at `step` when that is
/// finer) and pruning the result to `step`, but each kept time is computed
/// directly, so the cost follows the output size rather than the time span.
/// Integer times therefore land on `window[0] + k * step`.
fn step_grid<T: Time>(step: T, window: &[T]) -> Vec<T> {
    let fill = if step < T::UNIT { step } else { T::UNIT };
    let last = window[window.len() - 1];
    let mut prev = window[0];
    let mut out = vec![prev];
    while last.gap(prev) >= step {
        let mut target = prev + step;
        if target <= prev {
            // Step is below the float resolution at `prev`: go to the next recorded time
            let k = window.partition_point(|t| *t <= prev);
            if k == window.len() {
                break;
            }
            target = window[k];
        }
        // window[0] <= prev < target <= last, so 1 <= j < len
        let j = window.partition_point(|t| *t < target);
        let next = if window[j] == target {
            target
        } else {
            let padded = target.ceil_to_grid(window[j - 1], fill);
            if padded > prev && padded < window[j] {
                padded
            } else {
                window[j]
            }
        };
        out.push(next);
        prev = next;
    }
    out
}

impl<T: Time> Series<T> {
    /// Value at an arbitrary time
    ///
    /// Recorded times answer their value. Between recorded times the prior
    /// value is held, or interpolated when the series interpolates. After
    /// the last time the last value is held. Before the first time the
    /// answer is `first_val`, or the first recorded value when
    /// `use_first_value` is set; it is never extrapolated.
    #[must_use]
    pub fn at(&self, time: T) -> f64 {
        let (times, values) = self.to_lists();
        let config = self.config();
        if time < times[0] {
            return if config.use_first_value { values[0] } else { config.first_val };
        }
        let i = search(Some(time), times, Mode::End);
        if config.interpolate && times[i] < time && i + 1 < times.len() {
            let frac = crate::time::fraction(time, times[i], times[i + 1]);
            return values[i] + (values[i + 1] - values[i]) * frac;
        }
        values[i]
    }

    /// Sub-series selected by `query`
    ///
    /// Values of the result come from [`Series::at`], so an interpolating
    /// series interpolates against its full recorded data, and a start before
    /// the first time yields a boundary point unless `use_first_value` is set.
    ///
    /// # Errors
    /// - `SeriesError::InvalidInterval` for a step that is not positive
    /// - `SeriesError::UnsupportedSlice` when start is after stop
    /// - `SeriesError::Empty` when no time falls in the range
    pub fn slice(&self, query: Slice<T>) -> Result<Self, SeriesError<T>> {
        if query.is_full() {
            return Ok(self.clone());
        }
        let times = slice_times(self.times(), !self.config().use_first_value, &query)?;
        let values = times.iter().map(|&t| self.at(t)).collect();
        Ok(self.derive(times, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_index_rule() {
        let times = [2_i64, 4, 6, 8];
        assert_eq!(stop_index(7, &times), 3);
        assert_eq!(stop_index(6, &times), 2);
        assert_eq!(stop_index(8, &times), 4);
        assert_eq!(stop_index(9, &times), 4);
        assert_eq!(stop_index(1, &times), 0);
    }

    #[test]
    fn test_slice_times_with_boundary() {
        let times = [2_i64, 4, 6, 8];
        let got = slice_times(&times, true, &Slice::between(0, 6)).unwrap();
        assert_eq!(got, vec![0, 2, 4]);
        let got = slice_times(&times, false, &Slice::between(0, 6)).unwrap();
        assert_eq!(got, vec![2, 4]);
    }

    #[test]
    fn test_slice_times_step_regularizes_grid() {
        let times = [0_i64, 1, 5];
        let got = slice_times(&times, true, &Slice::full().step_by(2)).unwrap();
        assert_eq!(got, vec![0, 2, 4]);
    }

    #[test]
    fn test_step_grid_follows_output_size() {
        let times = [0_i64, 100_000_000];
        let got = slice_times(&times, true, &Slice::full().step_by(50_000_000)).unwrap();
        assert_eq!(got, vec![0, 50_000_000, 100_000_000]);

        let base = 1_760_000_000_000_u64;
        let times = [base, base + 7, base + 86_400_000];
        let got = step_grid(3_600_000, &times);
        assert_eq!(got.len(), 25);
        assert!(got.windows(2).all(|w| w[1] - w[0] == 3_600_000));
    }

    #[test]
    fn test_step_grid_irregular_float_times() {
        // Unit padding from 0.7 puts the next kept time at 1.7
        let got = step_grid(1.0, &[0.0_f64, 0.7, 2.5]);
        assert_eq!(got.len(), 2);
        assert!((got[1] - 1.7).abs() < 1e-12);
    }

    #[test]
    fn test_step_grid_large_float_times() {
        let times = [1e16_f64, 1e16 + 4.0];
        assert_eq!(step_grid(2.0, &times), vec![1e16, 1e16 + 2.0, 1e16 + 4.0]);
        // A step too fine to move the clock falls back to recorded times
        assert_eq!(step_grid(0.5, &times), vec![1e16, 1e16 + 4.0]);
    }

    #[test]
    fn test_slice_times_fractional_step() {
        let times = [0.0_f64, 1.0];
        let got = slice_times(&times, true, &Slice::full().step_by(0.5)).unwrap();
        assert_eq!(got, vec![0.0, 0.5, 1.0]);
    }
}
