//! Raw transactional records and date handling.

use crate::error::{PrepError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};

/// One order line: quantity of an article on a date.
///
/// Records are unordered and may repeat a (date, article) pair; repeats are
/// summed during normalization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawRecord {
    /// Date field as delivered by the source, parsed with [`parse_date`].
    pub date: String,
    /// Article / SKU identifier.
    pub article: String,
    /// Ordered quantity.
    #[cfg_attr(feature = "serde", serde(alias = "qty"))]
    pub quantity: f64,
}

impl RawRecord {
    pub fn new(date: impl Into<String>, article: impl Into<String>, quantity: f64) -> Self {
        Self {
            date: date.into(),
            article: article.into(),
            quantity,
        }
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%Y%m%d"];

/// Parse a date field into a UTC timestamp.
///
/// Accepts RFC 3339 and a few common date / date-time layouts. Date-only
/// values map to midnight UTC.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    Err(PrepError::InvalidDate(raw.to_string()))
}

/// Map a timestamp to the end of its week.
///
/// The week ends on `anchor`: a timestamp falling on the anchor day stays in
/// that week, any other day rolls forward to the next anchor. The result is
/// at midnight UTC.
pub fn week_end(ts: &DateTime<Utc>, anchor: Weekday) -> DateTime<Utc> {
    let date = ts.date_naive();
    let current = date.weekday().num_days_from_monday() as i64;
    let target = anchor.num_days_from_monday() as i64;
    let ahead = (target - current).rem_euclid(7);

    (date + Duration::days(ahead)).and_time(NaiveTime::MIN).and_utc()
}
