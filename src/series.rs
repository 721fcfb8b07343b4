//! Ordered pair store for scalar series, plus its self-transforms.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};

use crate::config::SeriesConfig;
use crate::error::{check_interval, SeriesError};
use crate::locate::position;
use crate::resample;
use crate::time::Time;

/// Sort `(time, value)` pairs into parallel lists, rejecting empty input,
/// unorderable times and duplicate times
pub(crate) fn normalize<T: Time, V>(mut pairs: Vec<(T, V)>) -> Result<(Vec<T>, Vec<V>), SeriesError<T>> {
    if pairs.is_empty() {
        debug!("rejecting empty series input");
        return Err(SeriesError::Empty);
    }
    if let Some(&(time, _)) = pairs.iter().find(|(t, _)| !t.is_ordered()) {
        debug!("rejecting unorderable time {time}");
        return Err(SeriesError::InvalidTime { time });
    }
    if pairs.windows(2).any(|w| w[0].0 > w[1].0) {
        debug!("sorting {} unordered input points", pairs.len());
        // Every time is ordered here, so partial_cmp never fails
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    }
    if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
        let time = w[0].0;
        debug!("rejecting duplicate time {time}");
        return Err(SeriesError::DuplicateTime { time });
    }
    Ok(pairs.into_iter().unzip())
}

/// Check parallel lists for equal length and zip them into pairs
pub(crate) fn zip_lists<T: Time, V>(times: Vec<T>, values: Vec<V>) -> Result<Vec<(T, V)>, SeriesError<T>> {
    if times.len() != values.len() {
        return Err(SeriesError::LengthMismatch {
            times: times.len(),
            values: values.len(),
        });
    }
    Ok(times.into_iter().zip(values).collect())
}

/// A sparse, irregularly-sampled series of `(time, value)` points
///
/// Times are strictly ascending and there is always at least one point.
/// Transforms never mutate `self`; they return a new series carrying the
/// same configuration. The one in-place operation is [`Series::set`].
///
/// # Example
/// ```
/// use sparseries::{Series, Slice};
///
/// let s = Series::new(vec![2_i64, 4, 6, 8], vec![2.0, 4.0, 6.0, 8.0]).unwrap();
/// assert_eq!(s.at(5), 4.0);
/// assert_eq!(s.slice(Slice::between(2, 7)).unwrap().times(), &[2, 4, 6]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T: Time = i64> {
    times: Vec<T>,
    values: Vec<f64>,
    config: SeriesConfig<f64>,
}

impl<T: Time> Series<T> {
    /// Build a series from parallel time and value sequences
    ///
    /// Input may be in any order; it is sorted by time.
    ///
    /// # Errors
    /// Returns a construction error if the input is empty, the lengths
    /// differ, a time is NaN or a time appears twice.
    pub fn new(times: Vec<T>, values: Vec<f64>) -> Result<Self, SeriesError<T>> {
        Self::from_pairs(zip_lists(times, values)?)
    }

    /// Build a series from `(time, value)` pairs
    ///
    /// # Errors
    /// Same conditions as [`Series::new`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SeriesError<T>>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let (times, values) = normalize(pairs.into_iter().collect())?;
        Ok(Self {
            times,
            values,
            config: SeriesConfig::default(),
        })
    }

    /// Build a series from a time to value mapping
    ///
    /// # Errors
    /// Returns `SeriesError::Empty` for an empty map.
    pub fn from_map(map: BTreeMap<T, f64>) -> Result<Self, SeriesError<T>>
    where
        T: Ord,
    {
        Self::from_pairs(map)
    }

    /// Replace the query configuration
    #[must_use]
    pub fn with_config(mut self, config: SeriesConfig<f64>) -> Self {
        self.config = config;
        self
    }

    /// Assemble a series from lists that already satisfy the invariants
    pub(crate) fn from_parts(times: Vec<T>, values: Vec<f64>, config: SeriesConfig<f64>) -> Self {
        debug_assert!(!times.is_empty());
        debug_assert_eq!(times.len(), values.len());
        debug_assert!(times.windows(2).all(|w| w[0] < w[1]));
        Self { times, values, config }
    }

    /// Same configuration, new points
    pub(crate) fn derive(&self, times: Vec<T>, values: Vec<f64>) -> Self {
        Self::from_parts(times, values, self.config.clone())
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SeriesConfig<f64> {
        &self.config
    }

    /// Number of points
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a series holds at least one point
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First recorded point
    #[must_use]
    pub fn first(&self) -> (T, f64) {
        (self.times[0], self.values[0])
    }

    /// Last recorded point
    #[must_use]
    pub fn last(&self) -> (T, f64) {
        let i = self.len() - 1;
        (self.times[i], self.values[i])
    }

    /// Iterate over `(time, value)` points in time order
    pub fn iter(&self) -> impl Iterator<Item = (T, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Recorded value at exactly `time`, without interpolation or holding
    #[must_use]
    pub fn get(&self, time: T) -> Option<f64> {
        position(time, &self.times).map(|i| self.values[i])
    }

    /// Replace the value recorded at `time`
    ///
    /// # Errors
    /// Returns `SeriesError::TimeNotFound` if `time` is not recorded.
    pub fn set(&mut self, time: T, value: f64) -> Result<(), SeriesError<T>> {
        let idx = position(time, &self.times).ok_or(SeriesError::TimeNotFound { time })?;
        self.values[idx] = value;
        Ok(())
    }

    #[must_use]
    pub fn to_pairs(&self) -> Vec<(T, f64)> {
        self.iter().collect()
    }

    /// Borrow the parallel time and value lists
    #[must_use]
    pub fn to_lists(&self) -> (&[T], &[f64]) {
        (&self.times, &self.values)
    }

    #[must_use]
    pub fn to_map(&self) -> BTreeMap<T, f64>
    where
        T: Ord,
    {
        self.iter().collect()
    }

    /// Rescale values linearly so the first is unchanged and the last becomes `new_end`
    ///
    /// When the first and last values are equal, the rise is spread evenly
    /// over index positions instead. A single-point series is returned as is.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tilt(&self, new_end: f64) -> Self {
        let n = self.len();
        if n < 2 {
            return self.clone();
        }
        let start = self.values[0];
        let rise = new_end - start;
        let run = self.values[n - 1] - start;
        let mut values: Vec<f64> = if run == 0.0 {
            let step = rise / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        } else {
            self.values.iter().map(|&v| start + rise * ((v - start) / run)).collect()
        };
        values[0] = start;
        values[n - 1] = new_end;
        self.derive(self.times.clone(), values)
    }

    /// Pair times and values `n` positions out of phase
    ///
    /// A positive `n` drops the first `n` times and the last `n` values, so
    /// values move `n` positions later in time; a negative `n` drops the
    /// last `n` times and the first `n` values, moving values earlier.
    ///
    /// # Errors
    /// Returns `SeriesError::Empty` when `|n|` is not smaller than the length.
    pub fn shift(&self, n: isize) -> Result<Self, SeriesError<T>> {
        let (times, values) = shift_lists(&self.times, &self.values, n)?;
        Ok(self.derive(times, values))
    }

    /// Keep only points at least `interval` apart
    ///
    /// # Errors
    /// Returns `SeriesError::InvalidInterval` unless `interval > 0`.
    pub fn prune(&self, interval: T, keep_end: bool) -> Result<Self, SeriesError<T>> {
        check_interval(interval)?;
        let (times, values) = resample::prune(interval, &self.times, &self.values, keep_end);
        trace!("prune({interval}): {} -> {} points", self.len(), times.len());
        Ok(self.derive(times, values))
    }

    /// Insert points so no gap exceeds `interval`
    ///
    /// Synthesized points carry the next recorded value, or the interpolated
    /// value when the series interpolates.
    ///
    /// # Errors
    /// Returns `SeriesError::InvalidInterval` unless `interval > 0`.
    pub fn pad(&self, interval: T, keep_end: bool) -> Result<Self, SeriesError<T>> {
        check_interval(interval)?;
        let (times, mut values) = resample::pad(interval, &self.times, &self.values, keep_end);
        trace!("pad({interval}): {} -> {} points", self.len(), times.len());
        if self.config.interpolate {
            values = times.iter().map(|&t| self.at(t)).collect();
        }
        Ok(self.derive(times, values))
    }
}

/// Shift parallel lists `n` positions out of phase
pub(crate) fn shift_lists<T: Time, V: Clone>(
    times: &[T],
    values: &[V],
    n: isize,
) -> Result<(Vec<T>, Vec<V>), SeriesError<T>> {
    let len = times.len();
    let k = n.unsigned_abs();
    if k >= len {
        return Err(SeriesError::Empty);
    }
    Ok(if n >= 0 {
        (times[k..].to_vec(), values[..len - k].to_vec())
    } else {
        (times[..len - k].to_vec(), values[k..].to_vec())
    })
}

impl<T: Time> fmt::Display for Series<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Series: {:?}, {:?}", self.times, self.values)
    }
}

impl<'a, T: Time> IntoIterator for &'a Series<T> {
    type Item = (T, f64);
    type IntoIter = std::iter::Zip<std::iter::Copied<std::slice::Iter<'a, T>>, std::iter::Copied<std::slice::Iter<'a, f64>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter().copied().zip(self.values.iter().copied())
    }
}
