//! Dataset normalization: raw order records to a corrected weekly grid.
//!
//! # Example
//!
//! ```
//! use orderseries::core::RawRecord;
//! use orderseries::normalize::{DatasetNormalizer, NormalizerConfig};
//!
//! // Daily orders over eight weeks, Sunday 2021-01-03 to Sunday 2021-02-21.
//! let records: Vec<RawRecord> = (0..50)
//!     .map(|k| {
//!         let date = chrono::NaiveDate::from_ymd_opt(2021, 1, 3).unwrap()
//!             + chrono::Duration::days(k);
//!         RawRecord::new(date.to_string(), "A-1", 1.0)
//!     })
//!     .collect();
//!
//! let result = DatasetNormalizer::new(NormalizerConfig::default())
//!     .normalize(&records)
//!     .unwrap();
//!
//! // Eight weekly buckets, two dropped at each end.
//! assert_eq!(result.grid.len(), 4);
//! assert_eq!(result.grid.column("A-1").unwrap(), &[7.0, 7.0, 7.0, 7.0]);
//! ```

mod normalizer;
mod pivot;

pub use normalizer::{
    normalize_records, ColumnFailure, DatasetNormalizer, FailurePolicy, NormalizedDataset,
    NormalizerConfig, Progress,
};
pub use pivot::pivot_weekly;
