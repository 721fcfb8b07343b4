//! Binary search over ascending time sequences.

use crate::time::Time;

/// How `locate` resolves a query time that is not recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// First index whose time is `>=` the query.
    /// `0` when the query precedes every time, `len` when it exceeds every time.
    Begin,
    /// Last index whose time is `<=` the query.
    /// Clamped to `0` below the range and to `len - 1` above it.
    End,
}

/// Map a query time to an index of `times`
///
/// An exact match always returns its own index. `None` stands for an open
/// slice bound and maps to `0` (`Begin`) or `len - 1` (`End`) without searching.
/// Returns `None` when `times` is empty.
///
/// `times` must be strictly ascending.
#[must_use]
pub fn locate<T: Time>(query: Option<T>, times: &[T], mode: Mode) -> Option<usize> {
    (!times.is_empty()).then(|| search(query, times, mode))
}

/// [`locate`] over times known to be non-empty
#[inline]
pub(crate) fn search<T: Time>(query: Option<T>, times: &[T], mode: Mode) -> usize {
    let last = times.len().saturating_sub(1);
    match (query, mode) {
        (None, Mode::Begin) => 0,
        (None, Mode::End) => last,
        (Some(q), Mode::Begin) => times.partition_point(|t| *t < q),
        (Some(q), Mode::End) => times.partition_point(|t| *t <= q).saturating_sub(1),
    }
}

/// Index of `time` if it is recorded
#[inline]
pub(crate) fn position<T: Time>(time: T, times: &[T]) -> Option<usize> {
    let idx = times.partition_point(|t| *t < time);
    (idx < times.len() && times[idx] == time).then_some(idx)
}
