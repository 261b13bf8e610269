//! Window transformations for timeseries.
//!
//! # Example
//!
//! ```
//! use orderseries::transform::{rolling_mean, RollingStats};
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! // Trailing mean with window 3
//! let rm = rolling_mean(&series, 3, false);
//! assert!(rm[1].is_nan());
//!
//! // Centered mean and std in one pass
//! let stats = RollingStats::centered(&series, 3);
//! assert_eq!(stats.mean[2], 3.0);
//! ```

pub mod window;

pub use window::{rolling_mean, rolling_std, rolling_var, RollingStats};
