#![no_main]

use libfuzzer_sys::fuzz_target;
use sparseries::{Series, SeriesConfig, Slice};

fuzz_target!(|data: &[u8]| {
    // Need a flags byte, three query bytes and at least one point
    if data.len() < 7 {
        return;
    }

    // Byte 0: config flags, bytes 1-3: start, stop, step
    let config = SeriesConfig::default()
        .with_interpolate(data[0] & 1 != 0)
        .with_use_first_value(data[0] & 2 != 0);
    let start = i64::from(data[1]);
    let stop = i64::from(data[2]);
    let step = i64::from(data[3] % 16);

    // Remaining bytes are interpreted as (time: u8, value: i8) tuples
    let pairs: Vec<(i64, f64)> = data[4..]
        .chunks_exact(2)
        .map(|c| (i64::from(c[0]), f64::from(c[1] as i8)))
        .collect();
    let Ok(series) = Series::from_pairs(pairs) else {
        return;
    };
    let series = series.with_config(config);

    let mut query = Slice::between(start, stop);
    if step > 0 {
        query = query.step_by(step);
    }
    if let Ok(r) = series.slice(query) {
        // Property: results are strictly ascending and inside the bounds
        assert!(r.times().windows(2).all(|w| w[0] < w[1]), "times not ascending");
        let (last, _) = series.last();
        for &t in r.times() {
            assert!(t >= start && (t < stop || t == last), "time {t} outside {start}..{stop}");
        }
    }
});
