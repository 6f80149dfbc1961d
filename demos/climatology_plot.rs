//! Plots the day-of-year climatology (normal Tmax/Tmin with the p10-p90
//! band) for a synthetic station using `plotlars`.
//!
//! cargo run --example climatology_plot --features examples

use chrono::{Datelike, Duration, NaiveDate};
use climdex::{Climdex, RawDailyRow};
use plotlars::{Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;
use std::error::Error;

fn synthetic_station() -> Vec<RawDailyRow> {
    let start = NaiveDate::from_ymd_opt(1991, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
    let mut rows = Vec::new();
    let mut date = start;
    while date <= end {
        let phase = date.ordinal() as f64 / 365.25 * std::f64::consts::TAU;
        let jitter = ((date.num_days_from_ce() as i64 * 2654435761 % 19) - 9) as f64 * 0.4;
        let tmax = 28.0 + 5.0 * phase.sin() + jitter;
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

fn main() -> Result<(), Box<dyn Error>> {
    println!("Building climatology...");

    let engine = Climdex::builder()
        .reference_start(1991)
        .reference_end(2020)
        .build();
    let series = engine.normalize(&synthetic_station())?;
    let climatology = engine.climatology(&series)?.collect()?;

    // Stamp each day-of-year onto a leap year so the x axis is temporal.
    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let calendar_days: Vec<NaiveDate> = climatology
        .column("doy")?
        .i32()?
        .into_no_null_iter()
        .map(|doy| base + Duration::days((doy - 1) as i64))
        .collect();
    let mut plot_data = climatology.clone();
    plot_data.with_column(
        DateChunked::from_naive_date("calendar_day".into(), calendar_days).into_column(),
    )?;

    println!("Generating climatology plot...");
    plot_climatology(&plot_data);
    println!("Plot shown in browser.");
    Ok(())
}

/// Plots the normal Tmax/Tmin and their percentile envelopes by day of year.
fn plot_climatology(data: &DataFrame) {
    TimeSeriesPlot::builder()
        .data(data)
        .x("calendar_day")
        .y("tmax_mean")
        .additional_series(vec!["tmax_p10", "tmax_p90", "tmin_mean", "tmin_p10", "tmin_p90"])
        .colors(vec![
            Rgb(200, 30, 30),
            Rgb(235, 150, 150),
            Rgb(235, 150, 150),
            Rgb(30, 80, 200),
            Rgb(150, 180, 235),
            Rgb(150, 180, 235),
        ])
        .lines(vec![
            Line::Solid,
            Line::Dash,
            Line::Dash,
            Line::Solid,
            Line::Dash,
            Line::Dash,
        ])
        .plot_title(Text::from("Daily climatology (1991-2020)").size(18))
        .x_title("Day of year")
        .y_title("Temperature (°C)")
        .build()
        .plot();
}
