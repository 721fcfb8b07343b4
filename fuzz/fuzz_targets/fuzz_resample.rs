#![no_main]

use libfuzzer_sys::fuzz_target;
use sparseries::Series;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // Byte 0: interval (1-32), byte 1: keep_end flag
    let interval = i64::from(data[0] % 32) + 1;
    let keep_end = data[1] & 1 != 0;

    // Remaining bytes are interpreted as (time: u8, value: i8) tuples
    let pairs: Vec<(i64, f64)> = data[2..]
        .chunks_exact(2)
        .map(|c| (i64::from(c[0]), f64::from(c[1] as i8)))
        .collect();
    let Ok(series) = Series::from_pairs(pairs) else {
        return;
    };

    // Property: prune is idempotent
    let once = series.prune(interval, keep_end).unwrap();
    let twice = once.prune(interval, keep_end).unwrap();
    assert_eq!(once, twice, "prune not idempotent");

    // Property: padding with keep_end leaves no gap above the interval
    let padded = series.pad(interval, true).unwrap();
    assert!(padded.times().windows(2).all(|w| w[1] - w[0] <= interval));
});
