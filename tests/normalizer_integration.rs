//! End-to-end normalization of order records.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, TimeZone, Utc, Weekday};
use orderseries::core::{ArticleGrid, RawRecord};
use orderseries::detection::BandConfig;
use orderseries::features::{max_slope, SeasonalityEstimator};
use orderseries::normalize::{normalize_records, DatasetNormalizer, FailurePolicy, NormalizerConfig};
use orderseries::PrepError;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn sunday(k: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 5).unwrap() + Duration::weeks(k)
}

/// Weekly records for several articles, no duplicates, Sundays only.
fn regular_dataset(weeks: i64) -> Vec<RawRecord> {
    let mut records = Vec::new();
    for (a, article) in ["A-100", "B-200", "C-300"].iter().enumerate() {
        for k in 0..weeks {
            let qty = 20.0 + ((k * (a as i64 + 2)) % 7) as f64;
            records.push(RawRecord::new(sunday(k).to_string(), *article, qty));
        }
    }
    records
}

#[test]
fn regular_weekly_dataset_loses_four_rows() {
    let records = regular_dataset(26);

    let grid = normalize_records(&records).unwrap();

    assert_eq!(grid.len(), 26 - 4);
    let articles: BTreeSet<&str> = grid.articles().collect();
    let expected: BTreeSet<&str> = records.iter().map(|r| r.article.as_str()).collect();
    assert_eq!(articles, expected);

    let first = Utc.with_ymd_and_hms(2020, 1, 19, 0, 0, 0).unwrap();
    assert_eq!(grid.index()[0], first);
    assert_eq!(grid.frequency(), Some(Duration::weeks(1)));
    for article in grid.articles() {
        let ts = grid.series(article).unwrap();
        assert!(ts.is_regular(Duration::weeks(1)));
    }
}

#[test]
fn rebuilt_grid_recovers_weekly_frequency() {
    let grid = normalize_records(&regular_dataset(16)).unwrap();
    let rebuilt = ArticleGrid::new(grid.index().to_vec(), grid.columns().clone()).unwrap();

    assert!(rebuilt.frequency().is_none());
    for article in rebuilt.articles() {
        let ts = rebuilt.series(article).unwrap();
        assert_eq!(ts.frequency(), Some(Duration::weeks(1)));
        assert_eq!(ts.values(), grid.column(article).unwrap());
    }
}

#[test]
fn record_order_does_not_matter() {
    let records = regular_dataset(20);
    let mut shuffled = records.clone();
    shuffled.reverse();
    shuffled.rotate_left(17);

    assert_eq!(
        normalize_records(&records).unwrap(),
        normalize_records(&shuffled).unwrap()
    );
}

#[test]
fn duplicate_records_are_summed() {
    let mut records = regular_dataset(12);
    let extra: Vec<RawRecord> = records
        .iter()
        .filter(|r| r.article == "A-100")
        .cloned()
        .collect();
    records.extend(extra);

    let doubled = normalize_records(&records).unwrap();
    let single = normalize_records(&regular_dataset(12)).unwrap();

    let a2 = doubled.column("A-100").unwrap();
    let a1 = single.column("A-100").unwrap();
    for (x2, x1) in a2.iter().zip(a1) {
        assert_relative_eq!(*x2, 2.0 * x1, epsilon = 1e-9);
    }
    assert_eq!(doubled.column("B-200"), single.column("B-200"));
}

#[test]
fn gaps_are_zero_filled_before_correction() {
    // Article sold only in alternating weeks.
    let records: Vec<RawRecord> = (0..16)
        .filter(|k| k % 2 == 0)
        .map(|k| RawRecord::new(sunday(k).to_string(), "SPARSE", 6.0))
        .chain(std::iter::once(RawRecord::new(
            sunday(15).to_string(),
            "DENSE",
            1.0,
        )))
        .collect();

    let grid = normalize_records(&records).unwrap();

    // Index spans week 0..=15, trimmed to 2..14.
    assert_eq!(grid.len(), 12);
    assert_eq!(
        grid.column("SPARSE").unwrap()[..4],
        [6.0, 0.0, 6.0, 0.0]
    );
    assert!(grid.column("DENSE").unwrap().iter().all(|&v| v == 0.0));
}

#[test]
fn mixed_date_formats_land_in_the_same_week() {
    let mut records = regular_dataset(10);
    // Wednesday 2020-01-29 in three spellings, all in the week ending 02-02.
    records.push(RawRecord::new("2020-01-29", "D-400", 1.0));
    records.push(RawRecord::new("29.01.2020", "D-400", 1.0));
    records.push(RawRecord::new("2020-01-29T10:15:00", "D-400", 1.0));

    let grid = normalize_records(&records).unwrap();

    // Week ending 2020-02-02 is week 4, row 2 after trimming.
    assert_eq!(grid.column("D-400").unwrap()[2], 3.0);
}

#[test]
fn unparseable_date_fails_the_run() {
    let mut records = regular_dataset(10);
    records.push(RawRecord::new("2020-13-01", "A-100", 1.0));

    assert_eq!(
        normalize_records(&records).unwrap_err(),
        PrepError::InvalidDate("2020-13-01".to_string())
    );
}

#[test]
fn bulk_order_is_flattened() {
    let mut records = regular_dataset(20);
    records.push(RawRecord::new(sunday(10).to_string(), "B-200", 5_000.0));

    let config = NormalizerConfig::default().with_band(BandConfig::new(5, 1.5));
    let result = DatasetNormalizer::new(config).normalize(&records).unwrap();

    let column = result.grid.column("B-200").unwrap();
    assert!(column.iter().all(|&v| v < 5_000.0));
    assert!(result.anomaly_counts["B-200"] >= 1);
}

#[test]
fn default_band_keeps_weekly_noise() {
    // A centered window of five cannot push any point past three sample
    // standard deviations, so regular data passes through unchanged.
    let result = DatasetNormalizer::default()
        .normalize(&regular_dataset(30))
        .unwrap();

    assert_eq!(result.total_anomalies(), 0);
}

#[test]
fn isolated_failures_are_reported() {
    let mut records = regular_dataset(12);
    records.push(RawRecord::new(sunday(3).to_string(), "C-300", f64::NAN));

    let config = NormalizerConfig::default().with_failure_policy(FailurePolicy::Isolate);
    let result = DatasetNormalizer::new(config).normalize(&records).unwrap();

    assert!(result.has_failures());
    assert_eq!(result.failures[0].article, "C-300");
    assert!(matches!(result.failures[0].error, PrepError::InvalidInput(_)));
    assert_eq!(result.grid.width(), 2);
    assert!(!result.grid.contains("C-300"));
}

#[test]
fn progress_callback_sees_every_column() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let normalizer = DatasetNormalizer::new(NormalizerConfig::default().with_parallel(true))
        .with_progress(move |p| {
            assert_eq!(p.total, 3);
            assert!(p.completed >= 1 && p.completed <= 3);
            counter.fetch_add(1, Ordering::SeqCst);
        });

    normalizer.normalize(&regular_dataset(12)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn other_week_anchor_shifts_the_index() {
    let records = regular_dataset(10);
    let config = NormalizerConfig::default().with_week_anchor(Weekday::Mon);

    let grid = DatasetNormalizer::new(config)
        .normalize(&records)
        .unwrap()
        .into_grid();

    // Sundays roll forward to the following Monday.
    let first = Utc.with_ymd_and_hms(2020, 1, 20, 0, 0, 0).unwrap();
    assert_eq!(grid.index()[0], first);
    assert_eq!(grid.len(), 6);
}

#[test]
fn features_run_on_normalized_columns() {
    let grid = normalize_records(&regular_dataset(60)).unwrap();
    let column = grid.column("A-100").unwrap();

    let slope = max_slope(column).unwrap();
    assert!(slope > 0.0);

    let lag = SeasonalityEstimator::new(52).estimate(column).unwrap();
    assert!((1..=52).contains(&lag));
}
