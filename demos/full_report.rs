//! Runs the whole pipeline over a synthetic station record and writes the
//! six output artifacts as CSV files.
//!
//! cargo run --example full_report

use chrono::{Datelike, Duration, NaiveDate};
use climdex::{Climdex, RawDailyRow, WaveKind};
use std::error::Error;
use std::path::Path;

/// Builds a deterministic multi-decade daily record: a seasonal cycle, a
/// slow warming trend, pseudo-noise, and a few planted extreme episodes.
fn synthetic_station() -> Vec<RawDailyRow> {
    let start = NaiveDate::from_ymd_opt(1981, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let mut rows = Vec::new();
    let mut date = start;
    while date <= end {
        let phase = date.ordinal() as f64 / 365.25 * std::f64::consts::TAU;
        let trend = (date.year() - 1981) as f64 * 0.02;
        let jitter = ((date.num_days_from_ce() as i64 * 2654435761 % 21) - 10) as f64 * 0.35;
        let mut tmax = 28.0 + 5.0 * phase.sin() + trend + jitter;
        let mut tmin = tmax - 9.0 - (jitter * 0.3).abs();
        // A planted heat wave and cold snap for the event table.
        if date.year() == 2016 && date.month() == 2 && (10..=16).contains(&date.day()) {
            tmax += 8.0;
        }
        if date.year() == 2018 && date.month() == 7 && (3..=6).contains(&date.day()) {
            tmin -= 8.0;
        }
        rows.push(RawDailyRow::new(
            date.year(),
            date.format("%m-%d").to_string(),
            tmax,
            tmin,
        ));
        date += Duration::days(1);
    }
    rows
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger_lite();

    let rows = synthetic_station();
    println!("Running pipeline over {} raw records...", rows.len());

    let engine = Climdex::builder()
        .reference_start(1991)
        .reference_end(2020)
        .min_wave_days(3)
        .build();
    let report = engine.run(&rows)?;

    println!("Climatology buckets: {}", report.climatology.height());
    println!("Annual index table:\n{}", report.annual_indices);

    let heat = report
        .events
        .iter()
        .filter(|e| e.kind == WaveKind::Heat)
        .count();
    println!(
        "Detected {} wave(s): {} heat, {} cold",
        report.events.len(),
        heat,
        report.events.len() - heat
    );
    for event in report.events.iter().take(5) {
        println!(
            "  {} wave from {} to {} ({} days)",
            event.kind, event.start, event.end, event.duration_days
        );
    }

    let out = Path::new("climdex-report");
    report.write_csv(out)?;
    println!("Artifacts written to {}/", out.display());
    Ok(())
}

/// The library logs through `log`; print warnings to stderr without pulling
/// in a logger dependency for a demo.
fn env_logger_lite() {
    struct StderrLog;
    impl log::Log for StderrLog {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Info
        }
        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                eprintln!("[{}] {}", record.level(), record.args());
            }
        }
        fn flush(&self) {}
    }
    static LOGGER: StderrLog = StderrLog;
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Info));
}
