//! Records to corrected weekly grid.

use super::pivot::pivot_weekly;
use crate::core::{ArticleGrid, RawRecord};
use crate::detection::{correct_anomalies, BandConfig, BandCorrection};
use crate::error::{PrepError, Result};
use chrono::{Duration, Weekday};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What to do when one article column cannot be corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Abort the whole run with [`PrepError::ColumnFailed`].
    #[default]
    FailFast,
    /// Drop the column and report it in [`NormalizedDataset::failures`].
    Isolate,
}

/// Configuration for [`DatasetNormalizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizerConfig {
    /// Band used for every article column.
    pub band: BandConfig,
    /// Last day of each weekly bucket.
    pub week_anchor: Weekday,
    /// Handling of per-column failures.
    pub failure_policy: FailurePolicy,
    /// Correct columns on the rayon thread pool. Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            band: BandConfig::default(),
            week_anchor: Weekday::Sun,
            failure_policy: FailurePolicy::FailFast,
            parallel: false,
        }
    }
}

impl NormalizerConfig {
    pub fn with_band(mut self, band: BandConfig) -> Self {
        self.band = band;
        self
    }

    pub fn with_week_anchor(mut self, anchor: Weekday) -> Self {
        self.week_anchor = anchor;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Reported after each article column is corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress<'a> {
    pub article: &'a str,
    /// Columns finished so far, this one included.
    pub completed: usize,
    pub total: usize,
}

/// An article dropped under [`FailurePolicy::Isolate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFailure {
    pub article: String,
    pub error: PrepError,
}

/// Output of a normalization run.
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    /// Corrected, edge-trimmed weekly grid.
    pub grid: ArticleGrid,
    /// Columns that were dropped, in article order.
    pub failures: Vec<ColumnFailure>,
    /// Replaced points per article.
    pub anomaly_counts: BTreeMap<String, usize>,
}

impl NormalizedDataset {
    pub fn total_anomalies(&self) -> usize {
        self.anomaly_counts.values().sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn into_grid(self) -> ArticleGrid {
        self.grid
    }
}

type ProgressFn = dyn Fn(&Progress<'_>) + Send + Sync;

/// Turns raw order records into a corrected per-article weekly grid.
///
/// 1. parse dates and sum records into weekly buckets per article,
/// 2. zero-fill weeks without orders,
/// 3. correct each article column with the rolling band,
/// 4. trim the `window / 2` edge weeks from the shared index.
pub struct DatasetNormalizer {
    config: NormalizerConfig,
    progress: Option<Box<ProgressFn>>,
}

impl fmt::Debug for DatasetNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetNormalizer")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Default for DatasetNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl DatasetNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Register a callback invoked after each column completes.
    ///
    /// With parallel correction the callback runs on worker threads and
    /// articles arrive in completion order.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Progress<'_>) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Run the full pipeline over `records`.
    pub fn normalize(&self, records: &[RawRecord]) -> Result<NormalizedDataset> {
        let raw = pivot_weekly(records, self.config.week_anchor)?;
        self.config.band.validate(raw.len())?;

        let outcomes = self.correct_columns(raw.columns());

        let mut columns = BTreeMap::new();
        let mut anomaly_counts = BTreeMap::new();
        let mut failures = Vec::new();

        for (article, outcome) in outcomes {
            match outcome {
                Ok(correction) => {
                    anomaly_counts.insert(article.clone(), correction.anomaly_count());
                    columns.insert(article, correction.values);
                }
                Err(err) => match self.config.failure_policy {
                    FailurePolicy::FailFast => return Err(err.in_column(article)),
                    FailurePolicy::Isolate => {
                        warn!(article = %article, error = %err, "dropping article column");
                        failures.push(ColumnFailure {
                            article,
                            error: err,
                        });
                    }
                },
            }
        }

        let index = raw.trim_edges(self.config.band.edge_loss())?.index().to_vec();
        let grid = ArticleGrid::new(index, columns)?.with_frequency(Duration::weeks(1));

        let dataset = NormalizedDataset {
            grid,
            failures,
            anomaly_counts,
        };

        info!(
            articles = dataset.grid.width(),
            weeks = dataset.grid.len(),
            anomalies = dataset.total_anomalies(),
            failed = dataset.failures.len(),
            "normalized order records"
        );

        Ok(dataset)
    }

    /// Correct every column, returning outcomes in article order.
    fn correct_columns(
        &self,
        columns: &BTreeMap<String, Vec<f64>>,
    ) -> Vec<(String, Result<BandCorrection>)> {
        let total = columns.len();
        let completed = AtomicUsize::new(0);

        let correct = |(article, values): (&String, &Vec<f64>)| {
            let outcome = correct_anomalies(values, &self.config.band);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;

            debug!(
                article = %article,
                anomalies = outcome.as_ref().map(|c| c.anomaly_count()).unwrap_or(0),
                ok = outcome.is_ok(),
                "corrected column {done}/{total}"
            );
            if let Some(callback) = &self.progress {
                callback(&Progress {
                    article,
                    completed: done,
                    total,
                });
            }

            (article.clone(), outcome)
        };

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return columns.par_iter().map(correct).collect();
            }
        }

        columns.iter().map(correct).collect()
    }
}

/// Normalize records with the default configuration (window 5, 3 standard
/// deviations, weeks ending on Sunday, fail fast).
pub fn normalize_records(records: &[RawRecord]) -> Result<ArticleGrid> {
    DatasetNormalizer::default()
        .normalize(records)
        .map(NormalizedDataset::into_grid)
}
