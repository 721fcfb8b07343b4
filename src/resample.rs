//! Resampling passes over parallel time/value lists.
//!
//! Both passes are driven by the time list alone: spacing is measured on
//! `times` and the paired values simply follow their time. Comparisons are
//! exact.

use crate::time::Time;

/// Indices of the points kept when thinning `times` to a minimum spacing
///
/// Index 0 is always kept. A later point is kept when it lies at least
/// `interval` past the last kept time. With `keep_end` the final index is
/// kept regardless of spacing.
fn prune_indices<T: Time>(interval: T, times: &[T], keep_end: bool) -> Vec<usize> {
    let Some(&first) = times.first() else {
        return Vec::new();
    };
    let last_idx = times.len() - 1;
    let mut kept = vec![0];
    let mut prev = first;
    for (idx, &t) in times.iter().enumerate().skip(1) {
        if (keep_end && idx == last_idx) || t.gap(prev) >= interval {
            kept.push(idx);
            prev = t;
        }
    }
    kept
}

/// Densified time list, each entry paired with the index of the original
/// point whose value it carries
///
/// Between consecutive points further apart than `interval`, times are
/// synthesized at multiples of `interval` past the previous time; each takes
/// the index of the upcoming original point. Original points are always
/// emitted, except that without `keep_end` a final point closer than
/// `interval` to the point before it is omitted. A gap whose float times
/// cannot be advanced by `interval` is left unfilled.
fn pad_indices<T: Time>(interval: T, times: &[T], keep_end: bool) -> Vec<(T, usize)> {
    let mut out = Vec::with_capacity(times.len());
    let mut prev: Option<T> = None;
    for (idx, &curr) in times.iter().enumerate() {
        if let Some(mut p) = prev {
            while curr.gap(p) > interval {
                let next = p + interval;
                // Float times can be too coarse for the interval to move them
                if next <= p {
                    break;
                }
                p = next;
                out.push((p, idx));
            }
        }
        out.push((curr, idx));
        prev = Some(curr);
    }
    if !keep_end && out.len() >= 2 {
        let n = out.len();
        if out[n - 1].0.gap(out[n - 2].0) < interval {
            out.pop();
        }
    }
    out
}

/// Thin parallel lists to a minimum spacing of `interval`
///
/// `interval` must be positive.
#[must_use]
pub fn prune<T: Time, V: Clone>(interval: T, times: &[T], values: &[V], keep_end: bool) -> (Vec<T>, Vec<V>) {
    debug_assert_eq!(times.len(), values.len());
    prune_indices(interval, times, keep_end)
        .into_iter()
        .map(|i| (times[i], values[i].clone()))
        .unzip()
}

/// Densify parallel lists so no gap exceeds `interval`
///
/// Synthesized points carry the value of the next original point.
/// `interval` must be positive.
#[must_use]
pub fn pad<T: Time, V: Clone>(interval: T, times: &[T], values: &[V], keep_end: bool) -> (Vec<T>, Vec<V>) {
    debug_assert_eq!(times.len(), values.len());
    pad_indices(interval, times, keep_end)
        .into_iter()
        .map(|(t, i)| (t, values[i].clone()))
        .unzip()
}
