// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bucket service: a per-user backlog of planned work.
//!
//! Marking an item done moves it into today's task logs. The move is an
//! insert followed by a delete with no transaction; if the delete fails the
//! item stays in the bucket and the new log is kept.

use std::sync::Arc;

use crate::db::DocumentStore;
use crate::error::{AppError, Result};
use crate::models::{BucketInput, BucketItem, TaskLogRecord};
use crate::pipeline::{paginate, sort_bucket_newest_first, Page, PageRequest, PageSize};
use crate::services::task_log::{Author, TaskLogService};

/// Bucket pages are not configurable.
pub const BUCKET_PAGE_SIZE: usize = 10;

pub const FETCH_TODOS_FAILED_MESSAGE: &str = "Failed to fetch todos";
pub const ADD_TODO_FAILED_MESSAGE: &str = "Failed to add todo";
pub const DELETE_TODO_FAILED_MESSAGE: &str = "Failed to delete todo";
pub const MARK_DONE_FAILED_MESSAGE: &str = "Failed to mark todo as done";

pub struct BucketService {
    store: Arc<dyn DocumentStore>,
    task_logs: Arc<TaskLogService>,
}

impl BucketService {
    pub fn new(store: Arc<dyn DocumentStore>, task_logs: Arc<TaskLogService>) -> Self {
        Self { store, task_logs }
    }

    /// One page of the user's bucket, newest first.
    pub async fn list(&self, user_id: &str, page: usize) -> Result<Page<BucketItem>> {
        let mut items = self
            .store
            .list_bucket_items(user_id)
            .await
            .map_err(|e| e.fetch_failure(FETCH_TODOS_FAILED_MESSAGE))?;
        sort_bucket_newest_first(&mut items);

        let size = PageSize::new(BUCKET_PAGE_SIZE)?;
        Ok(paginate(&items, PageRequest::new(page, size))?)
    }

    /// Add an item; the store stamps `created_at`.
    pub async fn add(&self, user_id: &str, input: BucketInput) -> Result<BucketItem> {
        let item = BucketItem {
            id: String::new(),
            user_id: user_id.to_string(),
            project_name: input.project_name,
            description: input.description,
            created_at: None,
        };
        let item = self
            .store
            .insert_bucket_item(&item)
            .await
            .map_err(|e| e.write_failure(ADD_TODO_FAILED_MESSAGE))?;

        tracing::debug!(item_id = %item.id, user_id = %user_id, "Bucket item added");
        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.item(id).await?;
        self.store
            .delete_bucket_item(id)
            .await
            .map_err(|e| e.write_failure(DELETE_TODO_FAILED_MESSAGE))
    }

    /// Log the item as a task for today, then remove it from the bucket.
    ///
    /// The title duplicate guard does not apply here.
    pub async fn mark_done(&self, author: Author<'_>, id: &str) -> Result<TaskLogRecord> {
        let item = self.item(id).await?;
        let clock = self.task_logs.clock();

        let record = TaskLogRecord {
            id: String::new(),
            user_id: author.user_id.to_string(),
            user_name: author.user_name.to_string(),
            task_title: item.project_name,
            description: item.description,
            date: clock.today(),
            time: clock.time_label(),
        };
        let record = self
            .task_logs
            .insert(record)
            .await
            .map_err(|e| relabel_write(e, MARK_DONE_FAILED_MESSAGE))?;

        if let Err(e) = self.store.delete_bucket_item(id).await {
            tracing::warn!(
                item_id = %id,
                task_id = %record.id,
                error = %e,
                "Bucket item logged but not removed; partial move"
            );
            return Err(e.write_failure(MARK_DONE_FAILED_MESSAGE));
        }

        tracing::debug!(item_id = %id, task_id = %record.id, "Bucket item marked done");
        Ok(record)
    }

    async fn item(&self, id: &str) -> Result<BucketItem> {
        let item = self
            .store
            .get_bucket_item(id)
            .await
            .map_err(|e| e.fetch_failure(FETCH_TODOS_FAILED_MESSAGE))?;

        let mut item = item.ok_or_else(|| AppError::NotFound(format!("Bucket item {id}")))?;
        item.id = id.to_string();
        Ok(item)
    }
}

fn relabel_write(err: AppError, message: &'static str) -> AppError {
    match err {
        AppError::Write(_) => AppError::Write(message),
        other => other.write_failure(message),
    }
}
