//! Pivot raw records into a dense weekly grid.

use crate::core::{parse_date, week_end, ArticleGrid, RawRecord};
use crate::error::{PrepError, Result};
use chrono::{DateTime, Duration, Utc, Weekday};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Sum records into weekly buckets, one zero-filled column per article.
///
/// Each date is assigned to the week ending on `anchor` (see
/// [`week_end`]); repeated (week, article) pairs are summed. The index runs
/// weekly from the first to the last observed week, and weeks without
/// records are 0 for that article.
pub fn pivot_weekly(records: &[RawRecord], anchor: Weekday) -> Result<ArticleGrid> {
    if records.is_empty() {
        return Err(PrepError::EmptyData);
    }

    let mut cells: HashMap<(DateTime<Utc>, &str), f64> = HashMap::new();
    let mut first: Option<DateTime<Utc>> = None;
    let mut last: Option<DateTime<Utc>> = None;

    for record in records {
        let week = week_end(&parse_date(&record.date)?, anchor);
        *cells.entry((week, record.article.as_str())).or_insert(0.0) += record.quantity;

        first = Some(first.map_or(week, |f| f.min(week)));
        last = Some(last.map_or(week, |l| l.max(week)));
    }

    let (first, last) = match (first, last) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(PrepError::EmptyData),
    };

    let rows = ((last - first).num_weeks() + 1) as usize;
    let index: Vec<DateTime<Utc>> = (0..rows)
        .map(|k| first + Duration::weeks(k as i64))
        .collect();

    let mut columns: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for ((week, article), qty) in cells {
        let row = (week - first).num_weeks() as usize;
        columns
            .entry(article.to_string())
            .or_insert_with(|| vec![0.0; rows])[row] += qty;
    }

    trace!(
        records = records.len(),
        weeks = rows,
        articles = columns.len(),
        "pivoted records into weekly grid"
    );

    Ok(ArticleGrid::new(index, columns)?.with_frequency(Duration::weeks(1)))
}
