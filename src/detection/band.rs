//! Rolling band anomaly correction.
//!
//! A point is anomalous when it falls outside `mean ± n_std * std` of the
//! centered window around it. Anomalous points are replaced by that local
//! mean; every other point is kept as is. The `window / 2` points at each
//! end have no full window and are dropped from the output.

use crate::core::TimeSeries;
use crate::error::{PrepError, Result};
use crate::transform::RollingStats;

/// Configuration for band correction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandConfig {
    /// Width of the centered rolling window.
    pub window: usize,
    /// Half-width of the band in standard deviations.
    pub n_std: f64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            window: 5,
            n_std: 3.0,
        }
    }
}

impl BandConfig {
    pub fn new(window: usize, n_std: f64) -> Self {
        Self { window, n_std }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_n_std(mut self, n_std: f64) -> Self {
        self.n_std = n_std;
        self
    }

    /// Number of points lost at each end of a corrected sequence.
    pub fn edge_loss(&self) -> usize {
        self.window / 2
    }

    /// Check the configuration against a sequence of length `len`.
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.window < 2 || self.window >= len {
            return Err(PrepError::InvalidWindow {
                window: self.window,
                len,
            });
        }
        if !self.n_std.is_finite() || self.n_std <= 0.0 {
            return Err(PrepError::InvalidParameter(format!(
                "n_std must be positive, got {}",
                self.n_std
            )));
        }
        Ok(())
    }
}

/// Result of band correction.
#[derive(Debug, Clone)]
pub struct BandCorrection {
    /// Corrected values with the edges trimmed.
    pub values: Vec<f64>,
    /// Rolling mean aligned with `values`.
    pub mean: Vec<f64>,
    /// Rolling sample standard deviation aligned with `values`.
    pub std: Vec<f64>,
    /// Indices (into the input sequence) of replaced points.
    pub anomaly_indices: Vec<usize>,
    /// Number of input points dropped at the start; `values[j]` is input
    /// index `j + offset`.
    pub offset: usize,
}

impl BandCorrection {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomaly_indices.len()
    }

    /// Check if an input index was replaced.
    pub fn is_anomaly(&self, index: usize) -> bool {
        self.anomaly_indices.binary_search(&index).is_ok()
    }
}

/// Replace out-of-band points by their local mean and trim the edges.
///
/// Fails with [`PrepError::InvalidWindow`] when `window < 2` or
/// `window >= series.len()`, and with [`PrepError::InvalidInput`] when the
/// series holds NaN or infinite values.
///
/// A window with zero variance has a zero-width band, so any point that
/// differs from its mean there is replaced.
pub fn correct_anomalies(series: &[f64], config: &BandConfig) -> Result<BandCorrection> {
    config.validate(series.len())?;
    if let Some(i) = series.iter().position(|x| !x.is_finite()) {
        return Err(PrepError::InvalidInput(format!(
            "non-finite value {} at index {i}",
            series[i]
        )));
    }

    let stats = RollingStats::centered(series, config.window);
    let shift = config.edge_loss();
    let end = series.len() - shift;

    let mut values = Vec::with_capacity(end - shift);
    let mut anomaly_indices = Vec::new();

    for (i, &qty) in series.iter().enumerate().take(end).skip(shift) {
        let mean = stats.mean[i];
        let band = config.n_std * stats.std[i];

        if qty < mean - band || qty > mean + band {
            values.push(mean);
            anomaly_indices.push(i);
        } else {
            values.push(qty);
        }
    }

    Ok(BandCorrection {
        values,
        mean: stats.mean[shift..end].to_vec(),
        std: stats.std[shift..end].to_vec(),
        anomaly_indices,
        offset: shift,
    })
}

/// Band correction of a timestamped series; timestamps are trimmed with the
/// values.
pub fn correct_series(series: &TimeSeries, config: &BandConfig) -> Result<TimeSeries> {
    let correction = correct_anomalies(series.values(), config)?;
    series
        .slice(correction.offset, correction.offset + correction.len())?
        .with_values(correction.values)
}
