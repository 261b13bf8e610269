//! Seasonal lag estimation from cumulative shares.
//!
//! The trailing `slen` values are rotated cyclically. For each rotation the
//! cumulative share of the window total is computed, and the lag is the
//! smallest number of leading points whose share stays at or below `prop`,
//! plus one. Rotation 0 (the window as observed) is excluded.

use crate::error::{PrepError, Result};

/// Default cumulative-share threshold.
pub const DEFAULT_PROPORTION: f64 = 0.75;

/// Estimate a seasonal lag from the last `slen` values of `series`.
///
/// Returns 0 when the window sums to zero.
///
/// # Arguments
/// * `series` - Input time series
/// * `slen` - Length of the trailing window (at least 2)
/// * `prop` - Cumulative-share threshold in (0, 1]
pub fn seasonal_lag(series: &[f64], slen: usize, prop: f64) -> Result<usize> {
    if slen < 2 {
        return Err(PrepError::InsufficientData {
            needed: 2,
            got: slen,
        });
    }
    if slen > series.len() {
        return Err(PrepError::InsufficientData {
            needed: slen,
            got: series.len(),
        });
    }
    if !prop.is_finite() || prop <= 0.0 || prop > 1.0 {
        return Err(PrepError::InvalidParameter(format!(
            "prop must be in (0, 1], got {prop}"
        )));
    }

    let window = &series[series.len() - slen..];
    let total: f64 = window.iter().sum();
    if total == 0.0 {
        return Ok(0);
    }

    let lag = (1..slen)
        .map(|shift| slen - points_above(window, shift, total, prop))
        .min()
        .unwrap_or(slen);

    Ok(lag + 1)
}

/// [`seasonal_lag`] with the default threshold of 0.75.
pub fn seasonal_lag_default(series: &[f64], slen: usize) -> Result<usize> {
    seasonal_lag(series, slen, DEFAULT_PROPORTION)
}

/// Count cumulative shares above `prop` for the window rotated right by
/// `shift`.
fn points_above(window: &[f64], shift: usize, total: f64, prop: f64) -> usize {
    let n = window.len();
    let mut cumulative = 0.0;
    let mut count = 0;

    for j in 0..n {
        cumulative += window[(j + n - shift) % n];
        if cumulative / total > prop {
            count += 1;
        }
    }

    count
}

/// Seasonal lag estimator with a fixed window and threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalityEstimator {
    /// Trailing window length (52 weeks by default).
    pub slen: usize,
    /// Cumulative-share threshold.
    pub prop: f64,
}

impl Default for SeasonalityEstimator {
    fn default() -> Self {
        Self {
            slen: 52,
            prop: DEFAULT_PROPORTION,
        }
    }
}

impl SeasonalityEstimator {
    pub fn new(slen: usize) -> Self {
        Self {
            slen,
            ..Self::default()
        }
    }

    pub fn with_prop(mut self, prop: f64) -> Self {
        self.prop = prop;
        self
    }

    pub fn estimate(&self, series: &[f64]) -> Result<usize> {
        seasonal_lag(series, self.slen, self.prop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_window_returns_zero() {
        let series = vec![5.0, 3.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(seasonal_lag_default(&series, 4).unwrap(), 0);
    }

    #[test]
    fn single_spike_window() {
        // Window [0, 0, 0, 8]. Every rotation other than 0 brings the spike
        // forward; rotation 1 puts it first, so every cumulative share is 1.
        let series = vec![0.0, 0.0, 0.0, 8.0];
        assert_eq!(seasonal_lag_default(&series, 4).unwrap(), 1);
    }

    #[test]
    fn observed_order_is_not_a_rotation() {
        // Window [8, 0, 0, 0] as observed would put every share above 0.75
        // and give (4 - 4) + 1. Rotation 1 is [0, 8, 0, 0]: 3 above -> 1.
        let series = vec![8.0, 0.0, 0.0, 0.0];
        assert_eq!(seasonal_lag_default(&series, 4).unwrap(), 2);
    }

    #[test]
    fn uniform_window() {
        // Shares 0.25, 0.5, 0.75, 1.0 for every rotation: only the last one
        // is strictly above 0.75, so the lag is (4 - 1) + 1.
        let series = vec![2.0; 4];
        assert_eq!(seasonal_lag_default(&series, 4).unwrap(), 4);
    }

    #[test]
    fn uses_only_trailing_window() {
        let series = vec![100.0, 100.0, 2.0, 2.0, 2.0, 2.0];
        assert_eq!(seasonal_lag_default(&series, 4).unwrap(), 4);
    }

    #[test]
    fn rotations_are_cyclic_right_shifts() {
        // Window [1, 0, 0, 3], total 4.
        // shift 1 -> [3, 1, 0, 0]: shares .75 1 1 1 -> 3 above -> 1
        // shift 2 -> [0, 3, 1, 0]: shares 0 .75 1 1   -> 2 above -> 2
        // shift 3 -> [0, 0, 3, 1]: shares 0 0 .75 1   -> 1 above -> 3
        let series = vec![1.0, 0.0, 0.0, 3.0];
        assert_eq!(seasonal_lag_default(&series, 4).unwrap(), 2);
    }

    #[test]
    fn threshold_changes_the_lag() {
        let series = vec![2.0; 4];
        // Shares 0.25 0.5 0.75 1.0; above 0.4 -> 3 points
        assert_eq!(seasonal_lag(&series, 4, 0.4).unwrap(), 2);
    }

    #[test]
    fn rejects_bad_arguments() {
        let series = vec![1.0, 2.0, 3.0];

        assert_eq!(
            seasonal_lag_default(&series, 5).unwrap_err(),
            PrepError::InsufficientData { needed: 5, got: 3 }
        );
        assert_eq!(
            seasonal_lag_default(&series, 1).unwrap_err(),
            PrepError::InsufficientData { needed: 2, got: 1 }
        );
        assert!(matches!(
            seasonal_lag(&series, 3, 0.0),
            Err(PrepError::InvalidParameter(_))
        ));
        assert!(matches!(
            seasonal_lag(&series, 3, 1.5),
            Err(PrepError::InvalidParameter(_))
        ));
    }

    #[test]
    fn estimator_defaults() {
        let est = SeasonalityEstimator::default();
        assert_eq!(est.slen, 52);
        assert_eq!(est.prop, 0.75);

        let series = vec![2.0; 8];
        assert_eq!(SeasonalityEstimator::new(4).estimate(&series).unwrap(), 4);
        assert_eq!(
            SeasonalityEstimator::new(4)
                .with_prop(0.4)
                .estimate(&series)
                .unwrap(),
            2
        );
    }
}
