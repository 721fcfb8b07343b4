use crate::{Record, Series, SeriesConfig, Slice, StructuredSeries};
use proptest::prelude::*;

prop_compose! {
    /// Generate a series with 1-60 distinct times in [0, 1000)
    fn arb_series()(
        times in prop::collection::btree_set(0i64..1000, 1..60),
        values in prop::collection::vec(-1000i32..1000, 60),
        interpolate in any::<bool>(),
        use_first_value in any::<bool>(),
    ) -> Series {
        let pairs: Vec<(i64, f64)> = times
            .into_iter()
            .zip(values)
            .map(|(t, v)| (t, f64::from(v)))
            .collect();
        let config = SeriesConfig::default()
            .with_interpolate(interpolate)
            .with_use_first_value(use_first_value);
        Series::from_pairs(pairs).unwrap().with_config(config)
    }
}

prop_compose! {
    /// Generate a structured series with sparse `v` writes, occasional notes
    /// and a `k` key that is never written
    fn arb_structured()(
        times in prop::collection::btree_set(0i64..1000, 1..40),
        fields in prop::collection::vec((prop::option::of(-1000i32..1000), any::<bool>()), 40),
        interpolate in any::<bool>(),
        use_first_value in any::<bool>(),
        first_val in -10i32..10,
    ) -> StructuredSeries {
        let pairs: Vec<(i64, Record)> = times
            .into_iter()
            .zip(fields)
            .map(|(t, (v, note))| {
                let mut r = Record::new();
                if let Some(v) = v {
                    r.set_value("v", f64::from(v));
                }
                if note {
                    r.set_meta("note", format!("at {t}"));
                }
                (t, r)
            })
            .collect();
        let config = SeriesConfig::default()
            .with_interpolate(interpolate)
            .with_use_first_value(use_first_value)
            .with_first_val(f64::from(first_val));
        StructuredSeries::from_pairs(pairs, ["v", "k"]).unwrap().with_config(config)
    }
}

proptest! {
    /// Property: exported records agree with the point query at their time
    #[test]
    fn prop_structured_records_match_point_query(s in arb_structured()) {
        for (t, r) in s.iter() {
            prop_assert_eq!(&s.at(t), r, "t={}", t);
        }
    }

    /// Property: rebuilding a structured series from its pairs gives an equal series
    #[test]
    fn prop_structured_pairs_roundtrip(s in arb_structured(), queries in prop::collection::vec(-10i64..1010, 10)) {
        let rebuilt = StructuredSeries::from_pairs(s.to_pairs(), ["v", "k"])
            .unwrap()
            .with_config(s.config().clone());
        prop_assert_eq!(&rebuilt, &s);
        for t in queries {
            prop_assert_eq!(rebuilt.at(t), s.at(t), "t={}", t);
        }
    }

    /// Property: a fully open slice returns the series unchanged
    #[test]
    fn prop_full_slice_identity(s in arb_series()) {
        prop_assert_eq!(s.slice(Slice::full()).unwrap(), s);
    }

    /// Property: rebuilding from exported pairs gives an equal series
    #[test]
    fn prop_pairs_roundtrip(s in arb_series()) {
        let rebuilt = Series::from_pairs(s.to_pairs()).unwrap().with_config(s.config().clone());
        prop_assert_eq!(rebuilt, s);
    }

    /// Property: recorded times answer their recorded value
    #[test]
    fn prop_recorded_times_exact(s in arb_series()) {
        for (t, v) in s.iter() {
            prop_assert_eq!(s.at(t), v);
        }
    }

    /// Property: combined times are the sorted union of both operands' times
    #[test]
    fn prop_combine_alignment(a in arb_series(), b in arb_series()) {
        let mut expected: Vec<i64> = a.times().iter().chain(b.times()).copied().collect();
        expected.sort_unstable();
        expected.dedup();
        let sum = &a + &b;
        let merged = &a | &b;
        prop_assert_eq!(sum.times(), expected.as_slice());
        prop_assert_eq!(merged.times(), expected.as_slice());
    }

    /// Property: dividing by a zero-valued point yields zero
    #[test]
    fn prop_divide_by_zero(a in arb_series(), b in arb_series()) {
        let q = &a / &b;
        for (t, v) in q.iter() {
            if b.at(t) == 0.0 {
                prop_assert_eq!(v, 0.0, "t={}", t);
            } else {
                prop_assert_eq!(v, a.at(t) / b.at(t));
            }
        }
    }

    /// Property: merged series keep right values where right recorded a time
    #[test]
    fn prop_merge_right_wins(a in arb_series(), b in arb_series()) {
        let m = &a | &b;
        for (t, v) in m.iter() {
            let expected = b.get(t).or_else(|| a.get(t));
            prop_assert_eq!(Some(v), expected);
        }
    }

    /// Property: tilt keeps the first value and lands on the new end
    #[test]
    fn prop_tilt_endpoints(s in arb_series(), new_end in -1000.0f64..1000.0) {
        prop_assume!(s.len() >= 2);
        let tilted = s.tilt(new_end);
        prop_assert_eq!(tilted.values()[0], s.values()[0]);
        prop_assert_eq!(tilted.values()[tilted.len() - 1], new_end);
        prop_assert_eq!(tilted.times(), s.times());
    }

    /// Property: range results stay inside the requested bounds
    #[test]
    fn prop_slice_within_bounds(s in arb_series(), start in 0i64..1000, span in 1i64..500) {
        let stop = start + span;
        let (last, _) = s.last();
        if let Ok(r) = s.slice(Slice::between(start, stop)) {
            for &t in r.times() {
                prop_assert!(t >= start);
                prop_assert!(t < stop || t == last);
            }
        }
    }
}

/// Generate resampling properties for a specific interval using a macro
macro_rules! proptest_interval {
    ($interval:expr, $mod_name:ident) => {
        mod $mod_name {
            use super::*;

            proptest! {
                /// Property: pruning twice equals pruning once
                #[test]
                fn prop_prune_idempotent(s in arb_series(), keep_end in any::<bool>()) {
                    let once = s.prune($interval, keep_end).unwrap();
                    let twice = once.prune($interval, keep_end).unwrap();
                    prop_assert_eq!(twice, once);
                }

                /// Property: pruned points are at least the interval apart
                #[test]
                fn prop_prune_spacing(s in arb_series()) {
                    let pruned = s.prune($interval, false).unwrap();
                    prop_assert_eq!(pruned.times()[0], s.times()[0]);
                    for w in pruned.times().windows(2) {
                        prop_assert!(w[1] - w[0] >= $interval, "gap {} < {}", w[1] - w[0], $interval);
                    }
                }

                /// Property: padding keeps every recorded point and leaves no gap above the interval
                #[test]
                fn prop_pad_gaps(s in arb_series()) {
                    let padded = s.pad($interval, true).unwrap();
                    for w in padded.times().windows(2) {
                        prop_assert!(w[1] - w[0] <= $interval);
                    }
                    for &t in s.times() {
                        prop_assert!(padded.times().contains(&t), "lost recorded time {}", t);
                    }
                }

                /// Property: stepped slices are spaced exactly by the step from their first time
                #[test]
                fn prop_step_slice_regular(s in arb_series()) {
                    let r = s.slice(Slice::full().step_by($interval)).unwrap();
                    prop_assert_eq!(r.times()[0], s.times()[0]);
                    for w in r.times().windows(2) {
                        prop_assert_eq!(w[1] - w[0], $interval);
                    }
                }
            }
        }
    };
}

// Generate resampling tests for common intervals
proptest_interval!(1, interval_1);
proptest_interval!(3, interval_3);
proptest_interval!(10, interval_10);
proptest_interval!(60, interval_60);
