//! Normalize raw order lines into a corrected weekly grid.
//!
//! Run with: RUST_LOG=orderseries=debug cargo run --example weekly_normalization

use chrono::{Duration, NaiveDate};
use orderseries::core::RawRecord;
use orderseries::detection::BandConfig;
use orderseries::normalize::{DatasetNormalizer, FailurePolicy, NormalizerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderseries=info".into()),
        )
        .init();

    println!("=== Weekly Normalization Example ===\n");

    // Daily order lines for a few articles over half a year. Some days carry
    // several lines for the same article; those are summed.
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let mut records = Vec::new();
    for day in 0..182i64 {
        let date = (start + Duration::days(day)).to_string();
        records.push(RawRecord::new(date.clone(), "BOLT-M8", 10.0 + (day % 5) as f64));
        if day % 2 == 0 {
            records.push(RawRecord::new(date.clone(), "BOLT-M8", 3.0));
            records.push(RawRecord::new(date.clone(), "NUT-M8", 8.0));
        }
        if day % 7 == 3 {
            records.push(RawRecord::new(date, "WASHER-8", 25.0));
        }
    }
    // One bulk order
    records.push(RawRecord::new("2023-03-15", "NUT-M8", 2_500.0));
    // One broken line
    records.push(RawRecord::new("2023-04-04", "WASHER-8", f64::NAN));

    println!("Input: {} order lines", records.len());

    let config = NormalizerConfig::default()
        .with_band(BandConfig::new(5, 1.5))
        .with_failure_policy(FailurePolicy::Isolate)
        .with_parallel(true);

    let normalizer = DatasetNormalizer::new(config).with_progress(|p| {
        println!("  [{}/{}] {}", p.completed, p.total, p.article);
    });

    let result = match normalizer.normalize(&records) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("normalization failed: {e}");
            std::process::exit(1);
        }
    };

    let grid = &result.grid;
    println!(
        "\nGrid: {} weeks x {} articles, {} points corrected",
        grid.len(),
        grid.width(),
        result.total_anomalies()
    );
    for failure in &result.failures {
        println!("Dropped {}: {}", failure.article, failure.error);
    }

    print!("\n{:<12}", "Week");
    for article in grid.articles() {
        print!("{:>12}", article);
    }
    println!();
    println!("{:-<1$}", "", 12 * (grid.width() + 1));

    for (row, ts) in grid.index().iter().enumerate() {
        print!("{:<12}", ts.format("%Y-%m-%d"));
        for article in grid.articles() {
            print!("{:>12.1}", grid.get(article, row).unwrap_or(f64::NAN));
        }
        println!();
    }
}
