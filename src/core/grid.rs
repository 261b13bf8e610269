//! Dense per-article quantity grid.

use super::TimeSeries;
use crate::error::{PrepError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Per-article timeseries sharing one ordered timestamp index.
///
/// Every column has exactly `index().len()` values. Articles are kept in
/// sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleGrid {
    index: Vec<DateTime<Utc>>,
    columns: BTreeMap<String, Vec<f64>>,
    frequency: Option<Duration>,
}

impl ArticleGrid {
    /// Build a grid, checking the index ordering and every column length.
    pub fn new(index: Vec<DateTime<Utc>>, columns: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        for i in 1..index.len() {
            if index[i] <= index[i - 1] {
                return Err(PrepError::TimestampError(
                    "grid index must be strictly increasing".to_string(),
                ));
            }
        }

        for values in columns.values() {
            if values.len() != index.len() {
                return Err(PrepError::DimensionMismatch {
                    expected: index.len(),
                    got: values.len(),
                });
            }
        }

        Ok(Self {
            index,
            columns,
            frequency: None,
        })
    }

    pub fn with_frequency(mut self, freq: Duration) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Number of rows (periods).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of article columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn frequency(&self) -> Option<Duration> {
        self.frequency
    }

    /// Article ids in sorted order.
    pub fn articles(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    pub fn contains(&self, article: &str) -> bool {
        self.columns.contains_key(article)
    }

    /// Raw values of one article column.
    pub fn column(&self, article: &str) -> Option<&[f64]> {
        self.columns.get(article).map(Vec::as_slice)
    }

    pub fn columns(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.columns
    }

    /// One article column as a labelled [`TimeSeries`].
    ///
    /// Without a grid frequency, the series gets one only when every index
    /// spacing is the same.
    pub fn series(&self, article: &str) -> Option<TimeSeries> {
        let values = self.columns.get(article)?.clone();
        let ts = TimeSeries::new(self.index.clone(), values)
            .ok()?
            .with_label(article);
        let freq = self.frequency.or_else(|| ts.infer_frequency(1.0).ok());
        Some(match freq {
            Some(freq) => ts.with_frequency(freq),
            None => ts,
        })
    }

    /// Value of one cell.
    pub fn get(&self, article: &str, row: usize) -> Option<f64> {
        self.columns.get(article)?.get(row).copied()
    }

    /// Keep rows `start..end` for every column.
    pub fn slice_rows(&self, start: usize, end: usize) -> Result<ArticleGrid> {
        if start > end {
            return Err(PrepError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(PrepError::IndexOutOfBounds {
                index: end,
                size: self.len(),
            });
        }

        Ok(ArticleGrid {
            index: self.index[start..end].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(article, values)| (article.clone(), values[start..end].to_vec()))
                .collect(),
            frequency: self.frequency,
        })
    }

    /// Drop `n` rows from each end of the grid.
    pub fn trim_edges(&self, n: usize) -> Result<ArticleGrid> {
        if 2 * n > self.len() {
            return Err(PrepError::InsufficientData {
                needed: 2 * n,
                got: self.len(),
            });
        }
        self.slice_rows(n, self.len() - n)
    }
}
