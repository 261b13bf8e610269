//! Per-article features computed on corrected weekly series.
//!
//! # Example
//!
//! ```
//! use orderseries::features::{max_slope, seasonal_lag_default};
//!
//! let weekly = vec![2.0, 5.0, 16.0, 8.0, 3.0];
//!
//! let slope = max_slope(weekly.as_slice()).unwrap();
//! assert_eq!(slope, 11.0);
//!
//! let lag = seasonal_lag_default(&weekly, 4).unwrap();
//! assert!(lag >= 1);
//! ```

pub mod seasonality;
pub mod slope;

pub use seasonality::{
    seasonal_lag, seasonal_lag_default, SeasonalityEstimator, DEFAULT_PROPORTION,
};
pub use slope::{max_slope, min_slope, slope_extremes, FeatureInput};
