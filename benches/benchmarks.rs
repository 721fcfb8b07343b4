use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sparseries::{Series, SeriesConfig, Slice};

/// Irregularly spaced sensor-like series: gaps of 60-299s, slowly drifting values
fn sensor_series(count: u64) -> Series<u64> {
    let base_ts = 1_760_000_000u64;
    let mut ts = base_ts;
    let pairs: Vec<(u64, f64)> = (0..count)
        .map(|i| {
            ts += 60 + (i * 7919) % 240;
            (ts, 20.0 + ((i % 50) as f64) * 0.1)
        })
        .collect();
    Series::from_pairs(pairs).unwrap()
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");

    for count in [100u64, 1000, 10000] {
        let base = sensor_series(count);
        let mut pairs = base.to_pairs();
        pairs.reverse();
        group.throughput(Throughput::Elements(count));
        group.bench_function(format!("{count}_unsorted_points"), |b| {
            b.iter(|| black_box(Series::from_pairs(black_box(pairs.clone())).unwrap()))
        });
    }
    group.finish();
}

fn bench_point_query(c: &mut Criterion) {
    let held = sensor_series(10000);
    let interpolated = held.clone().with_config(SeriesConfig::default().with_interpolate(true));
    let (first, _) = held.first();
    let (last, _) = held.last();

    let mut group = c.benchmark_group("point_query");
    group.throughput(Throughput::Elements(1000));
    for (name, s) in [("hold", &held), ("interpolate", &interpolated)] {
        group.bench_function(format!("1000_queries_{name}"), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for t in (first..last).step_by(((last - first) / 1000) as usize) {
                    acc += s.at(black_box(t));
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

fn bench_step_slice(c: &mut Criterion) {
    let s = sensor_series(1000);
    let (first, _) = s.first();

    let mut group = c.benchmark_group("step_slice");
    group.bench_function("one_day_at_300s", |b| {
        b.iter(|| black_box(s.slice(Slice::between(first, first + 86_400).step_by(300)).unwrap()))
    });
    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let a = sensor_series(10000);
    let b = a.shift(3).unwrap().tilt(30.0);

    let mut group = c.benchmark_group("combine");
    group.throughput(Throughput::Elements(10000));
    group.bench_function("add_10000_points", |bench| bench.iter(|| black_box(&a + &b)));
    group.bench_function("merge_10000_points", |bench| bench.iter(|| black_box(&a | &b)));
    group.finish();
}

criterion_group!(benches, bench_construct, bench_point_query, bench_step_slice, bench_combine);
criterion_main!(benches);
