// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task log record model for storage and API.

use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One logged unit of work, stored in the `tasks` collection.
///
/// Field names match the documents written by the web client, so existing
/// data deserializes unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TaskLogRecord {
    /// Store-assigned document ID (empty until inserted)
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Owning user (Firebase UID)
    pub user_id: String,
    /// Display name captured at creation time
    pub user_name: String,
    /// Short label, unique per user and date
    pub task_title: String,
    #[serde(default)]
    pub description: String,
    /// Calendar date (`YYYY-MM-DD`) in the reference time zone
    pub date: String,
    /// Wall-clock time label captured at creation
    #[serde(default)]
    pub time: String,
}

/// Equality query over the `tasks` collection.
///
/// Every populated field must match; an empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub task_title: Option<String>,
}

impl TaskQuery {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn on_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn titled(mut self, task_title: impl Into<String>) -> Self {
        self.task_title = Some(task_title.into());
        self
    }

    /// Check a record against every populated field.
    pub fn matches(&self, record: &TaskLogRecord) -> bool {
        self.user_id.as_ref().map_or(true, |v| *v == record.user_id)
            && self.date.as_ref().map_or(true, |v| *v == record.date)
            && self
                .task_title
                .as_ref()
                .map_or(true, |v| *v == record.task_title)
    }
}

/// Request body for creating or editing a task log.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TaskLogInput {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub task_title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Partial update applied to an existing task log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLogUpdate {
    pub task_title: String,
    pub description: String,
}

impl From<TaskLogInput> for TaskLogUpdate {
    fn from(input: TaskLogInput) -> Self {
        Self {
            task_title: input.task_title,
            description: input.description,
        }
    }
}
