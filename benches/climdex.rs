use climdex::{find_runs, Climdex, RawDailyRow};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chrono::{Datelike, Duration, NaiveDate};

/// Roughly 45 years of daily records with a deterministic seasonal cycle
/// and pseudo-noise.
fn synthetic_rows() -> Vec<RawDailyRow> {
    let start = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let mut rows = Vec::new();
    let mut date = start;
    while date <= end {
        let phase = date.ordinal() as f64 / 365.25 * std::f64::consts::TAU;
        let jitter = ((date.num_days_from_ce() as i64 * 2654435761 % 17) - 8) as f64 * 0.4;
        let tmax = 27.0 + 6.0 * phase.sin() + jitter;
        rows.push(RawDailyRow::new(
            date.year(),
            date.format("%m-%d").to_string(),
            tmax,
            tmax - 9.0,
        ));
        date += Duration::days(1);
    }
    rows
}

fn bench_climdex(c: &mut Criterion) {
    let flags: Vec<bool> = (0..20_000).map(|i| i * 7919 % 13 < 6).collect();
    c.bench_function("find_runs", |b| {
        b.iter(|| find_runs(black_box(&flags), black_box(3)))
    });

    let rows = synthetic_rows();
    let engine = Climdex::builder()
        .reference_start(1991)
        .reference_end(2020)
        .build();
    c.bench_function("full_pipeline", |b| {
        b.iter(|| engine.run(black_box(&rows)).unwrap())
    });
}

criterion_group!(benches, bench_climdex);
criterion_main!(benches);
