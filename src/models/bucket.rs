// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bucket (backlog) item model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::format_utc_rfc3339;

/// Planned work not yet logged against a date, stored in the `todos` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketItem {
    /// Store-assigned document ID (empty until inserted)
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    pub project_name: String,
    #[serde(default)]
    pub description: String,
    /// Creation instant; documents written by older clients may lack it
    #[serde(default, with = "firestore::serialize_as_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for adding a bucket item.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BucketInput {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Bucket item as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BucketItemView {
    pub id: String,
    pub project_name: String,
    pub description: String,
    pub created_at: Option<String>,
}

impl From<&BucketItem> for BucketItemView {
    fn from(item: &BucketItem) -> Self {
        Self {
            id: item.id.clone(),
            project_name: item.project_name.clone(),
            description: item.description.clone(),
            created_at: item.created_at.map(format_utc_rfc3339),
        }
    }
}
