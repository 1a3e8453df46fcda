//! Bucket keys mapping a timestamp to its rollup group
//!
//! All keys are computed in UTC. Weeks start on Sunday (day-of-week index 0).

use crate::series_core::Granularity;
use chrono::{DateTime, Datelike, Duration, Utc};

/// Bucket identifier for `timestamp` at `granularity`
///
/// - finest: the full timestamp, so only samples stamped at the same instant
///   share a bucket (rolling up the finest series collapses duplicate appends)
/// - daily: `YYYY-MM-DD`
/// - weekly: `YYYY-MM-DD` of the Sunday starting that week
/// - monthly: `YYYY-MM`
pub fn bucket_key(granularity: Granularity, timestamp: &DateTime<Utc>) -> String {
    match granularity {
        Granularity::Finest => crate::series_core::record::format_timestamp(timestamp),
        Granularity::Daily => timestamp.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => week_start(timestamp).format("%Y-%m-%d").to_string(),
        Granularity::Monthly => timestamp.format("%Y-%m").to_string(),
    }
}

fn week_start(timestamp: &DateTime<Utc>) -> chrono::NaiveDate {
    let date = timestamp.date_naive();
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}
