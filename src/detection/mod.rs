//! Anomaly detection and correction for order timeseries.
//!
//! # Example
//!
//! ```
//! use orderseries::detection::{correct_anomalies, BandConfig};
//!
//! let series = vec![1.0, 1.0, 1.0, 100.0, 1.0, 1.0, 1.0];
//! let result = correct_anomalies(&series, &BandConfig::new(3, 1.0)).unwrap();
//!
//! assert_eq!(result.values.len(), 5);
//! assert!(result.is_anomaly(3));
//! ```

mod band;

pub use band::{correct_anomalies, correct_series, BandConfig, BandCorrection};
