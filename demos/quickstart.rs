//! Quickstart example: band correction and features on one series.
//!
//! Run with: cargo run --example quickstart

use chrono::{Duration, TimeZone, Utc};
use orderseries::core::TimeSeries;
use orderseries::detection::{correct_series, BandConfig};
use orderseries::features::{max_slope, min_slope, SeasonalityEstimator};

fn main() {
    println!("=== orderseries Quickstart ===\n");

    // 1. Two years of weekly orders with a yearly pattern and two bulk orders
    let timestamps: Vec<_> = (0..104)
        .map(|i| Utc.with_ymd_and_hms(2022, 1, 2, 0, 0, 0).unwrap() + Duration::weeks(i))
        .collect();

    let mut values: Vec<f64> = (0..104)
        .map(|i| {
            40.0                                                       // base level
            + 15.0 * (2.0 * std::f64::consts::PI * i as f64 / 52.0).sin() // yearly cycle
            + (i % 3) as f64                                           // noise
        })
        .collect();
    values[30] = 900.0;
    values[77] = 650.0;

    let ts = TimeSeries::new(timestamps, values.clone())
        .unwrap()
        .with_label("SKU-0001");
    println!("Created series {:?} with {} weeks", ts.label(), ts.len());

    // 2. Correct with a tight band so the bulk orders stand out
    println!("\n--- Band correction (window 5, 1.5 std) ---");
    let config = BandConfig::new(5, 1.5);
    let corrected = correct_series(&ts, &config).unwrap();

    println!(
        "Corrected series: {} weeks ({} dropped at each end)",
        corrected.len(),
        config.edge_loss()
    );
    for week in [30usize, 77] {
        let j = week - config.edge_loss();
        println!(
            "  week {:>3}: {:>8.1} -> {:>8.1}",
            week,
            values[week],
            corrected.values()[j]
        );
    }

    // 3. Features on raw and corrected values
    println!("\n--- Features ---");
    println!(
        "{:<12} {:>12} {:>12} {:>10}",
        "Series", "Max slope", "Min slope", "Lag"
    );
    println!("{:-<50}", "");

    let estimator = SeasonalityEstimator::new(52);
    for (name, series) in [("raw", &ts), ("corrected", &corrected)] {
        println!(
            "{:<12} {:>12.1} {:>12.1} {:>10}",
            name,
            max_slope(series).unwrap(),
            min_slope(series).unwrap(),
            estimator.estimate(series.values()).unwrap()
        );
    }

    // 4. Untyped input is rejected
    println!("\n--- Invalid input ---");
    match max_slope("not a series") {
        Ok(v) => println!("unexpected slope {v}"),
        Err(e) => println!("max_slope(\"not a series\") -> {e}"),
    }

    println!("\n=== Quickstart Complete ===");
}
