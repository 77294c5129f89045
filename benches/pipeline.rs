use barotrend::clock::EventClock;
use barotrend::events::{build, detect, merge, EventPipeline};
use barotrend::series::{parse_forecast, ForecastResponse, IngestOptions, PressureSeries, Sample};
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const T0: i64 = 1_760_832_000;

/// Hourly series with swings on several time scales so every stage has work
fn synthetic_series(hours: usize) -> PressureSeries {
    let samples = (0..hours)
        .map(|h| {
            let t = h as f64;
            let value = 1013.0
                + 6.0 * (t / 40.0 * std::f64::consts::TAU).sin()
                + 1.5 * (t / 9.0 * std::f64::consts::TAU).sin()
                + 0.3 * (t / 3.1 * std::f64::consts::TAU).sin();
            Sample::new(T0 + h as i64 * 3600, (value * 10.0).round() / 10.0)
        })
        .collect();
    PressureSeries::from_samples(samples).unwrap()
}

/// Benchmark the full detect, build, merge pipeline
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = EventPipeline::default();

    // one week, the Open-Meteo default window, and a year
    for hours in [168, 384, 8760] {
        let series = synthetic_series(hours);
        group.throughput(Throughput::Elements(hours as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}h", hours)),
            &series,
            |b, series| {
                b.iter(|| black_box(pipeline.run(black_box(series))));
            },
        );
    }

    group.finish();
}

/// Benchmark the stages separately on a year of data
fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let series = synthetic_series(8760);
    let values = series.values();
    let extrema = detect(&values, 0.09);
    let events = build(&series, &extrema, 1.0);

    group.bench_function("detect", |b| {
        b.iter(|| black_box(detect(black_box(&values), 0.09)));
    });
    group.bench_function("build", |b| {
        b.iter(|| black_box(build(&series, black_box(&extrema), 1.0)));
    });
    group.bench_function("merge", |b| {
        b.iter(|| black_box(merge(black_box(&events), 1.0)));
    });

    group.finish();
}

/// Benchmark one countdown tick, the work done every tick interval
fn bench_clock_tick(c: &mut Criterion) {
    let series = synthetic_series(8760);
    let snapshot = EventPipeline::default().run(&series);
    let clock = EventClock::default();
    let now = Utc.timestamp_opt(T0 + 4380 * 3600, 0).unwrap();

    c.bench_function("clock_observe", |b| {
        b.iter(|| black_box(clock.observe(black_box(&snapshot.events), now)));
    });
}

/// Benchmark parsing a forecast body
fn bench_parse_forecast(c: &mut Criterion) {
    let body = serde_json::to_string(&ForecastResponse::from_series(&synthetic_series(384))).unwrap();
    let options = IngestOptions::default();

    c.bench_function("parse_forecast_384h", |b| {
        b.iter(|| black_box(parse_forecast(black_box(&body), &options).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_pipeline,
    bench_stages,
    bench_clock_tick,
    bench_parse_forecast
);
criterion_main!(benches);
