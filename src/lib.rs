//! # orderseries
//!
//! Anomaly correction and feature extraction for weekly order quantities,
//! one timeseries per article.
//!
//! Raw (date, article, quantity) records are pivoted into a zero-filled
//! weekly grid, every article column is cleaned with a centered rolling
//! mean/std band, and the edge weeks without a full window are trimmed.
//! Slope and seasonal-lag helpers derive simple features from the cleaned
//! columns.
//!
//! ```
//! use orderseries::prelude::*;
//!
//! let records: Vec<RawRecord> = (0..12)
//!     .map(|k| {
//!         let date = chrono::NaiveDate::from_ymd_opt(2021, 1, 3).unwrap()
//!             + chrono::Duration::weeks(k);
//!         RawRecord::new(date.to_string(), "SKU-1", (k % 4) as f64)
//!     })
//!     .collect();
//!
//! let grid = normalize_records(&records).unwrap();
//! assert_eq!(grid.len(), 8);
//!
//! let column = grid.column("SKU-1").unwrap();
//! assert_eq!(max_slope(column).unwrap(), 1.0);
//! ```

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod detection;
pub mod error;
pub mod features;
pub mod normalize;
pub mod transform;

pub use error::{PrepError, Result};

pub mod prelude {
    pub use crate::core::{ArticleGrid, RawRecord, TimeSeries};
    pub use crate::detection::{correct_anomalies, BandConfig, BandCorrection};
    pub use crate::error::{PrepError, Result};
    pub use crate::features::{max_slope, min_slope, seasonal_lag, SeasonalityEstimator};
    pub use crate::normalize::{
        normalize_records, DatasetNormalizer, FailurePolicy, NormalizedDataset, NormalizerConfig,
    };
}
