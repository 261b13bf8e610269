//! Slope features: extremes of the first difference.

use crate::core::TimeSeries;
use crate::error::{PrepError, Result};

/// A value handed over from a tabular source before its type is checked.
///
/// Only `Series` is accepted by the slope features; scalars and text are
/// rejected with [`PrepError::InvalidInput`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureInput {
    Series(Vec<f64>),
    Scalar(f64),
    Text(String),
}

impl FeatureInput {
    /// Borrow the sequence, or fail for scalars and text.
    pub fn as_series(&self) -> Result<&[f64]> {
        match self {
            FeatureInput::Series(values) => Ok(values.as_slice()),
            FeatureInput::Scalar(x) => Err(PrepError::InvalidInput(format!(
                "expected a sequence, got scalar {x}"
            ))),
            FeatureInput::Text(_) => Err(PrepError::InvalidInput(
                "expected a sequence, got text".to_string(),
            )),
        }
    }
}

impl From<Vec<f64>> for FeatureInput {
    fn from(values: Vec<f64>) -> Self {
        FeatureInput::Series(values)
    }
}

impl From<&[f64]> for FeatureInput {
    fn from(values: &[f64]) -> Self {
        FeatureInput::Series(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for FeatureInput {
    fn from(values: [f64; N]) -> Self {
        FeatureInput::Series(values.to_vec())
    }
}

impl From<&TimeSeries> for FeatureInput {
    fn from(ts: &TimeSeries) -> Self {
        FeatureInput::Series(ts.values().to_vec())
    }
}

impl From<f64> for FeatureInput {
    fn from(x: f64) -> Self {
        FeatureInput::Scalar(x)
    }
}

impl From<&str> for FeatureInput {
    fn from(s: &str) -> Self {
        FeatureInput::Text(s.to_string())
    }
}

impl From<String> for FeatureInput {
    fn from(s: String) -> Self {
        FeatureInput::Text(s)
    }
}

/// First differences `x[i+1] - x[i]`, requiring at least two points.
fn first_differences(input: &FeatureInput) -> Result<Vec<f64>> {
    let series = input.as_series()?;
    if series.len() < 2 {
        return Err(PrepError::InsufficientData {
            needed: 2,
            got: series.len(),
        });
    }
    Ok(series.windows(2).map(|w| w[1] - w[0]).collect())
}

/// Returns the largest step between consecutive values.
///
/// ```
/// use orderseries::features::max_slope;
///
/// assert_eq!(max_slope(vec![2.0, 5.0, 16.0, 8.0, 3.0]).unwrap(), 11.0);
/// assert!(max_slope("this is a text string").is_err());
/// ```
pub fn max_slope(input: impl Into<FeatureInput>) -> Result<f64> {
    let diffs = first_differences(&input.into())?;
    Ok(diffs.into_iter().fold(f64::NEG_INFINITY, f64::max))
}

/// Returns the smallest (most negative) step between consecutive values.
pub fn min_slope(input: impl Into<FeatureInput>) -> Result<f64> {
    let diffs = first_differences(&input.into())?;
    Ok(diffs.into_iter().fold(f64::INFINITY, f64::min))
}

/// Returns `(min_slope, max_slope)` from one pass.
pub fn slope_extremes(input: impl Into<FeatureInput>) -> Result<(f64, f64)> {
    let diffs = first_differences(&input.into())?;
    Ok(diffs
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        }))
}
