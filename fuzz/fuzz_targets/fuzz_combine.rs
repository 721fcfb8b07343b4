#![no_main]

use libfuzzer_sys::fuzz_target;
use sparseries::Series;

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }

    // First byte splits the remaining (time: u8, value: i8) tuples between the two series
    let split = 1 + usize::from(data[0]) * 2 % (data.len() - 1);
    let parse = |bytes: &[u8]| -> Vec<(i64, f64)> {
        bytes
            .chunks_exact(2)
            .map(|c| (i64::from(c[0]), f64::from(c[1] as i8)))
            .collect()
    };
    let (Ok(a), Ok(b)) = (
        Series::from_pairs(parse(&data[1..split])),
        Series::from_pairs(parse(&data[split..])),
    ) else {
        return;
    };

    let sum = &a + &b;
    let quotient = &a / &b;
    let merged = &a | &b;

    // Property: every combination spans the same union of times
    assert_eq!(sum.times(), quotient.times());
    assert_eq!(sum.times(), merged.times());
    // Property: division never produces a non-finite value
    assert!(quotient.values().iter().all(|v| v.is_finite()));
});
