//! Core data structures: records, timeseries and the article grid.

mod grid;
mod record;
mod time_series;

pub use grid::ArticleGrid;
pub use record::{parse_date, week_end, RawRecord};
pub use time_series::TimeSeries;
