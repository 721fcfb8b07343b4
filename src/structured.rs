//! Series whose values are field records.
//!
//! Every record is stored forward-filled: fields persist from earlier
//! records until a later record overrides them. Declared value keys are
//! resolved from their explicit updates with the same hold, interpolation
//! and first-value rules as a scalar [`Series`], so a stored record always
//! equals the point query at its time.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, BitOr, Div, Mul, Sub};

use log::trace;

use crate::combine::{impl_binary_ops, merge_points, union_times, Op};
use crate::config::SeriesConfig;
use crate::error::{check_interval, SeriesError};
use crate::locate::{position, search, Mode};
use crate::record::Record;
use crate::resample;
use crate::series::{normalize, shift_lists, zip_lists, Series};
use crate::slice::{slice_times, Slice};
use crate::time::Time;

/// A series of [`Record`] values with a declared set of numeric value keys
///
/// `config.first_val` is the per-field default. A value key first written
/// after the series starts behaves as if it had been written at the first
/// time with `first_val` (or with its first value under `use_first_value`),
/// so an interpolating series ramps up to the first write. A key never
/// written reads `first_val` everywhere.
///
/// Two series are equal when their times, records, value keys and
/// configuration are; how the records were originally provided does not
/// matter.
///
/// # Example
/// ```
/// use sparseries::{Record, StructuredSeries};
///
/// let s = StructuredSeries::from_pairs(
///     vec![
///         (0_i64, Record::new().with_value("v", 1.0).with_meta("by", "me")),
///         (1, Record::new().with_value("v", 2.0).with_value("k", 2.0)),
///     ],
///     ["v", "k"],
/// )
/// .unwrap();
///
/// let r = s.at(0);
/// assert_eq!(r.value("k"), Some(0.0));
/// assert_eq!(s.at(1).meta("by").and_then(|m| m.as_str()), Some("me"));
/// ```
#[derive(Debug, Clone)]
pub struct StructuredSeries<T: Time = i64> {
    times: Vec<T>,
    /// Records as provided, before forward-filling
    updates: Vec<Record>,
    /// Forward-filled records with every value key resolved
    records: Vec<Record>,
    /// Resolved values of each value key at every time
    tracks: BTreeMap<String, Series<T>>,
    value_keys: BTreeSet<String>,
    config: SeriesConfig<f64>,
}

impl<T: Time> StructuredSeries<T> {
    /// Build from parallel time and record sequences
    ///
    /// # Errors
    /// Returns a construction error if the input is empty, the lengths
    /// differ, a time is NaN or a time appears twice.
    pub fn new<K>(times: Vec<T>, records: Vec<Record>, value_keys: K) -> Result<Self, SeriesError<T>>
    where
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self::from_pairs(zip_lists(times, records)?, value_keys)
    }

    /// Build from `(time, record)` pairs in any order
    ///
    /// # Errors
    /// Same conditions as [`StructuredSeries::new`].
    pub fn from_pairs<I, K>(pairs: I, value_keys: K) -> Result<Self, SeriesError<T>>
    where
        I: IntoIterator<Item = (T, Record)>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let (times, updates) = normalize(pairs.into_iter().collect())?;
        let value_keys = value_keys.into_iter().map(Into::into).collect();
        Ok(Self::build(times, updates, value_keys, SeriesConfig::default()))
    }

    /// Build from a time to record mapping
    ///
    /// # Errors
    /// Returns `SeriesError::Empty` for an empty map.
    pub fn from_map<K>(map: BTreeMap<T, Record>, value_keys: K) -> Result<Self, SeriesError<T>>
    where
        T: Ord,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self::from_pairs(map, value_keys)
    }

    /// Replace the query configuration, resolving the value keys again from
    /// the records as provided
    #[must_use]
    pub fn with_config(self, config: SeriesConfig<f64>) -> Self {
        Self::build(self.times, self.updates, self.value_keys, config)
    }

    /// Forward-fill `updates` and resolve the value keys; input must already
    /// be sorted, non-empty and free of duplicate times
    fn build(times: Vec<T>, updates: Vec<Record>, value_keys: BTreeSet<String>, config: SeriesConfig<f64>) -> Self {
        let mut records = Vec::with_capacity(updates.len());
        let mut acc = Record::new();
        for update in &updates {
            acc.update(update);
            records.push(acc.clone());
        }

        let mut tracks = BTreeMap::new();
        for key in &value_keys {
            let written = Self::written(key, &times, &updates, &config);
            let values: Vec<f64> = times
                .iter()
                .map(|&t| written.as_ref().map_or(config.first_val, |w| w.at(t)))
                .collect();
            for (record, &value) in records.iter_mut().zip(&values) {
                record.set_value(key.as_str(), value);
            }
            tracks.insert(key.clone(), Series::from_parts(times.clone(), values, config.clone()));
        }

        Self {
            times,
            updates,
            records,
            tracks,
            value_keys,
            config,
        }
    }

    /// Explicit writes of `key`, anchored at the first time when the first
    /// write comes later; `None` if the key is never written
    fn written(key: &str, times: &[T], updates: &[Record], config: &SeriesConfig<f64>) -> Option<Series<T>> {
        let (mut key_times, mut key_values): (Vec<T>, Vec<f64>) = times
            .iter()
            .zip(updates)
            .filter_map(|(&t, u)| u.value(key).map(|v| (t, v)))
            .unzip();
        let &first_write = key_times.first()?;
        if first_write > times[0] {
            let anchor = if config.use_first_value { key_values[0] } else { config.first_val };
            key_times.insert(0, times[0]);
            key_values.insert(0, anchor);
        }
        Some(Series::from_parts(key_times, key_values, config.clone()))
    }

    /// Same value keys and configuration, new points
    fn derive(&self, times: Vec<T>, records: Vec<Record>) -> Self {
        Self::build(times, records, self.value_keys.clone(), self.config.clone())
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SeriesConfig<f64> {
        &self.config
    }

    #[must_use]
    pub fn value_keys(&self) -> &BTreeSet<String> {
        &self.value_keys
    }

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

    /// Forward-filled records with resolved value keys, parallel to
    /// [`StructuredSeries::times`]
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (T, &Record)> + '_ {
        self.times.iter().copied().zip(self.records.iter())
    }

    #[must_use]
    pub fn to_pairs(&self) -> Vec<(T, Record)> {
        self.iter().map(|(t, r)| (t, r.clone())).collect()
    }

    /// Borrow the parallel time and (forward-filled) record lists
    #[must_use]
    pub fn to_lists(&self) -> (&[T], &[Record]) {
        (&self.times, &self.records)
    }

    #[must_use]
    pub fn to_map(&self) -> BTreeMap<T, Record>
    where
        T: Ord,
    {
        self.to_pairs().into_iter().collect()
    }

    /// Replace the record provided at `time`, then forward-fill and resolve
    /// again from the records as provided
    ///
    /// # Errors
    /// Returns `SeriesError::TimeNotFound` if `time` is not recorded.
    pub fn set(&mut self, time: T, record: Record) -> Result<(), SeriesError<T>> {
        let idx = position(time, &self.times).ok_or(SeriesError::TimeNotFound { time })?;
        let mut updates = std::mem::take(&mut self.updates);
        updates[idx] = record;
        *self = Self::build(
            std::mem::take(&mut self.times),
            updates,
            std::mem::take(&mut self.value_keys),
            self.config.clone(),
        );
        Ok(())
    }

    /// Effective record at an arbitrary time
    ///
    /// Passthrough fields come from the forward-filled record at the last
    /// time `<= time` (the first record before the series starts). Every
    /// value key is resolved with the scalar point query, falling back to
    /// `first_val` for keys never written.
    #[must_use]
    pub fn at(&self, time: T) -> Record {
        let idx = search(Some(time), &self.times, Mode::End);
        let mut record = self.records[idx].clone();
        for (key, track) in &self.tracks {
            record.set_value(key.as_str(), track.at(time));
        }
        record
    }

    /// Sub-series selected by `query`
    ///
    /// Resolves the same times a scalar series would, including step
    /// resampling and the boundary point before the first time, and fills
    /// each with [`StructuredSeries::at`].
    ///
    /// # Errors
    /// Same conditions as [`Series::slice`].
    pub fn slice(&self, query: Slice<T>) -> Result<Self, SeriesError<T>> {
        if query.is_full() {
            return Ok(self.clone());
        }
        let times = slice_times(&self.times, !self.config.use_first_value, &query)?;
        let records = times.iter().map(|&t| self.at(t)).collect();
        Ok(self.derive(times, records))
    }

    /// Apply `op` to the value keys over the union of both series' times
    ///
    /// At each time the two effective records are merged (right overriding
    /// left), then every key declared by either side is set to `op` applied
    /// to the left and right values, a missing value counting as `0.0`.
    /// The result declares the union of both key sets and takes the left
    /// configuration.
    #[must_use]
    pub fn combine(&self, other: &Self, op: Op) -> Self {
        let keys: BTreeSet<String> = self.value_keys.union(&other.value_keys).cloned().collect();
        let times = union_times(&self.times, &other.times);
        let records = times
            .iter()
            .map(|&t| {
                let (lhs, rhs) = (self.at(t), other.at(t));
                let mut out = lhs.merged(&rhs);
                for key in &keys {
                    let value = op.apply(lhs.value(key).unwrap_or(0.0), rhs.value(key).unwrap_or(0.0));
                    out.set_value(key.as_str(), value);
                }
                out
            })
            .collect();
        trace!("{op:?} over {} + {} records -> {}", self.len(), other.len(), times.len());
        Self::build(times, records, keys, self.config.clone())
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Self {
        self.combine(other, Op::Add)
    }

    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.combine(other, Op::Subtract)
    }

    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        self.combine(other, Op::Multiply)
    }

    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        self.combine(other, Op::Divide)
    }

    /// Structural union of the provided records, `other` winning on equal
    /// times, forward-filled again over the merged timeline
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let keys = self.value_keys.union(&other.value_keys).cloned().collect();
        let (times, updates) = merge_points(
            (self.times.as_slice(), self.updates.as_slice()),
            (other.times.as_slice(), other.updates.as_slice()),
        );
        Self::build(times, updates, keys, self.config.clone())
    }

    /// Keep only records at least `interval` apart
    ///
    /// # Errors
    /// Returns `SeriesError::InvalidInterval` unless `interval > 0`.
    pub fn prune(&self, interval: T, keep_end: bool) -> Result<Self, SeriesError<T>> {
        check_interval(interval)?;
        let (times, records) = resample::prune(interval, &self.times, &self.records, keep_end);
        Ok(self.derive(times, records))
    }

    /// Insert records so no gap exceeds `interval`
    ///
    /// Synthesized records copy the next recorded one, or are filled by
    /// [`StructuredSeries::at`] when the series interpolates.
    ///
    /// # Errors
    /// Returns `SeriesError::InvalidInterval` unless `interval > 0`.
    pub fn pad(&self, interval: T, keep_end: bool) -> Result<Self, SeriesError<T>> {
        check_interval(interval)?;
        let (times, mut records) = resample::pad(interval, &self.times, &self.records, keep_end);
        if self.config.interpolate {
            records = times.iter().map(|&t| self.at(t)).collect();
        }
        Ok(self.derive(times, records))
    }

    /// Pair times and records `n` positions out of phase, see [`Series::shift`]
    ///
    /// # Errors
    /// Returns `SeriesError::Empty` when `|n|` is not smaller than the length.
    pub fn shift(&self, n: isize) -> Result<Self, SeriesError<T>> {
        let (times, records) = shift_lists(&self.times, &self.records, n)?;
        Ok(self.derive(times, records))
    }
}

impl_binary_ops!(
    StructuredSeries;
    Add::add => add,
    Sub::sub => subtract,
    Mul::mul => multiply,
    Div::div => divide,
    BitOr::bitor => merge,
);

impl<T: Time> PartialEq for StructuredSeries<T> {
    fn eq(&self, other: &Self) -> bool {
        self.times == other.times
            && self.records == other.records
            && self.value_keys == other.value_keys
            && self.config == other.config
    }
}

impl<T: Time> fmt::Display for StructuredSeries<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructuredSeries: {:?}, {:?}", self.times, self.records)
    }
}
