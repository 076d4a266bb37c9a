// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filter predicate over task log records.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::TaskLogRecord;
use crate::time_utils::LOG_DATE_FORMAT;

/// A user's filter intent: optional user and inclusive date bounds.
///
/// Empty strings are treated as "no constraint", so a cleared form field
/// round-trips to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FilterSpec {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_from: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_to: Option<String>,
}

impl FilterSpec {
    pub fn new(user_id: Option<&str>, date_from: Option<&str>, date_to: Option<&str>) -> Self {
        Self {
            user_id: non_empty(user_id),
            date_from: non_empty(date_from),
            date_to: non_empty(date_to),
        }
    }

    pub fn for_user(user_id: &str) -> Self {
        Self::new(Some(user_id), None, None)
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.date_from.is_none() && self.date_to.is_none()
    }

    /// Whether `record` passes all three clauses.
    ///
    /// Dates compare as strings; `YYYY-MM-DD` is fixed width and zero padded
    /// so lexicographic order is chronological order.
    pub fn matches(&self, record: &TaskLogRecord) -> bool {
        let user_match = self
            .user_id
            .as_deref()
            .map_or(true, |user_id| record.user_id == user_id);
        let from_match = self
            .date_from
            .as_deref()
            .map_or(true, |from| record.date.as_str() >= from);
        let to_match = self
            .date_to
            .as_deref()
            .map_or(true, |to| record.date.as_str() <= to);

        user_match && from_match && to_match
    }

    /// Reject bounds that are not `YYYY-MM-DD`, since string comparison
    /// is only meaningful for that exact form.
    pub fn check_dates(&self) -> Result<(), String> {
        for (name, value) in [("date_from", &self.date_from), ("date_to", &self.date_to)] {
            if let Some(value) = value {
                if !is_log_date(value) {
                    return Err(format!("Invalid '{name}' parameter: must be YYYY-MM-DD"));
                }
            }
        }
        Ok(())
    }
}

/// Records passing `spec`, in input order.
pub fn filter_records(records: &[TaskLogRecord], spec: &FilterSpec) -> Vec<TaskLogRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}

fn is_log_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, LOG_DATE_FORMAT).is_ok()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(non_empty(value.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: &str, date: &str) -> TaskLogRecord {
        TaskLogRecord {
            id: format!("{user_id}-{date}"),
            user_id: user_id.to_string(),
            user_name: user_id.to_uppercase(),
            task_title: "QA".to_string(),
            description: String::new(),
            date: date.to_string(),
            time: "10:00 AM".to_string(),
        }
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = FilterSpec::default();
        assert!(spec.is_empty());
        assert!(spec.matches(&record("u1", "1999-12-31")));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let spec = FilterSpec::new(None, Some("2024-01-02"), Some("2024-01-04"));

        assert!(!spec.matches(&record("u1", "2024-01-01")));
        assert!(spec.matches(&record("u1", "2024-01-02")));
        assert!(spec.matches(&record("u1", "2024-01-04")));
        assert!(!spec.matches(&record("u1", "2024-01-05")));
    }

    #[test]
    fn test_all_clauses_must_hold() {
        let spec = FilterSpec::new(Some("u1"), Some("2024-01-02"), None);

        assert!(spec.matches(&record("u1", "2024-02-01")));
        assert!(!spec.matches(&record("u2", "2024-02-01")));
        assert!(!spec.matches(&record("u1", "2024-01-01")));
    }

    #[test]
    fn test_empty_strings_mean_no_constraint() {
        let spec = FilterSpec::new(Some(""), Some("  "), None);
        assert!(spec.is_empty());

        let parsed: FilterSpec =
            serde_json::from_value(serde_json::json!({"user_id": "", "date_to": "2024-01-01"}))
                .unwrap();
        assert_eq!(parsed.user_id, None);
        assert_eq!(parsed.date_to.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_filter_records_keeps_input_order() {
        let records = vec![
            record("u2", "2024-01-01"),
            record("u1", "2024-01-03"),
            record("u1", "2024-01-02"),
        ];
        let filtered = filter_records(&records, &FilterSpec::for_user("u1"));
        let dates: Vec<&str> = filtered.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-02"]);
    }

    #[test]
    fn test_check_dates() {
        assert!(FilterSpec::new(None, Some("2024-01-02"), Some("2024-12-31"))
            .check_dates()
            .is_ok());
        assert!(FilterSpec::new(None, Some("2024-1-2"), None)
            .check_dates()
            .is_err());
        assert!(FilterSpec::new(None, None, Some("not-a-date"))
            .check_dates()
            .is_err());
    }
}
