// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Newest-first ordering for task logs and bucket items.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;

use crate::models::{BucketItem, TaskLogRecord};
use crate::time_utils::LOG_DATE_FORMAT;

/// Time labels seen in stored records: 24-hour and 12-hour, with or without seconds.
const TIME_FORMATS: [&str; 5] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M:%S %p", "%I:%M%p"];

/// Parse a wall-clock label such as `17:00`, `09:05 AM` or `9:05 p.m.`.
pub fn parse_time(label: &str) -> Option<NaiveTime> {
    // Browsers emit U+202F (narrow no-break space) before the meridiem.
    let normalized = label
        .replace(['\u{202f}', '\u{a0}'], " ")
        .replace('.', "")
        .trim()
        .to_uppercase();

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
}

/// Combined chronological key of a record's `date` and `time`.
///
/// `None` when either part cannot be parsed.
pub fn datetime_key(record: &TaskLogRecord) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(record.date.trim(), LOG_DATE_FORMAT).ok()?;
    let time = parse_time(&record.time)?;
    Some(date.and_time(time))
}

/// Descending order with unkeyed entries last.
fn newest_first<K: Ord>(a: Option<K>, b: Option<K>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort task logs most recent first. Stable: equal keys keep input order.
pub fn sort_newest_first(records: &mut [TaskLogRecord]) {
    records.sort_by(|a, b| newest_first(datetime_key(a), datetime_key(b)));
}

/// Sort bucket items by creation instant, most recent first. Stable.
pub fn sort_bucket_newest_first(items: &mut [BucketItem]) {
    items.sort_by(|a, b| newest_first(a.created_at, b.created_at));
}
