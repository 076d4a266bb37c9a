// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task log service: today's logs, creation with the duplicate guard, edits.

use std::sync::Arc;

use crate::db::DocumentStore;
use crate::error::{AppError, Result};
use crate::models::{TaskLogInput, TaskLogRecord, TaskLogUpdate, TaskQuery};
use crate::pipeline::{sort_newest_first, FETCH_FAILED_MESSAGE};
use crate::time_utils::ReferenceClock;

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save task";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update task";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete task";

/// Who a new log is recorded for.
#[derive(Debug, Clone, Copy)]
pub struct Author<'a> {
    pub user_id: &'a str,
    pub user_name: &'a str,
}

pub struct TaskLogService {
    store: Arc<dyn DocumentStore>,
    clock: ReferenceClock,
}

impl TaskLogService {
    pub fn new(store: Arc<dyn DocumentStore>, clock: ReferenceClock) -> Self {
        Self { store, clock }
    }

    pub fn clock(&self) -> &ReferenceClock {
        &self.clock
    }

    /// The user's logs for today in the reference zone, newest first.
    pub async fn today_for(&self, user_id: &str) -> Result<Vec<TaskLogRecord>> {
        let query = TaskQuery::for_user(user_id).on_date(self.clock.today());
        let mut records = self
            .store
            .find_tasks(&query)
            .await
            .map_err(|e| e.fetch_failure(FETCH_FAILED_MESSAGE))?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Log a task for today.
    ///
    /// Rejected with [`AppError::DuplicateTask`] if the user already has a
    /// log with the same title today; nothing is written in that case.
    /// The check and insert are separate store calls, so two concurrent
    /// submissions can both pass the check.
    pub async fn log_today(&self, author: Author<'_>, input: TaskLogInput) -> Result<TaskLogRecord> {
        let date = self.clock.today();
        let record = TaskLogRecord {
            id: String::new(),
            user_id: author.user_id.to_string(),
            user_name: author.user_name.to_string(),
            task_title: input.task_title,
            description: input.description,
            date,
            time: self.clock.time_label(),
        };
        self.ensure_unique_title(&record).await?;
        self.insert(record).await
    }

    /// Insert a fully-formed record without the duplicate guard.
    pub(crate) async fn insert(&self, mut record: TaskLogRecord) -> Result<TaskLogRecord> {
        record.id = self
            .store
            .insert_task(&record)
            .await
            .map_err(|e| e.write_failure(SAVE_FAILED_MESSAGE))?;

        tracing::debug!(
            task_id = %record.id,
            user_id = %record.user_id,
            task_title = %record.task_title,
            date = %record.date,
            time = %record.time,
            "Task log created"
        );

        Ok(record)
    }

    async fn ensure_unique_title(&self, record: &TaskLogRecord) -> Result<()> {
        let query = TaskQuery::for_user(&record.user_id)
            .on_date(&record.date)
            .titled(&record.task_title);
        let existing = self
            .store
            .find_tasks(&query)
            .await
            .map_err(|e| e.write_failure(SAVE_FAILED_MESSAGE))?;

        if existing.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                user_id = %record.user_id,
                task_title = %record.task_title,
                "Duplicate task title rejected"
            );
            Err(AppError::DuplicateTask)
        }
    }

    /// Replace title and description of an existing log.
    ///
    /// Edits are not checked against other titles on the same date.
    pub async fn update(&self, id: &str, update: TaskLogUpdate) -> Result<TaskLogRecord> {
        let Some(mut record) = self
            .store
            .get_task(id)
            .await
            .map_err(|e| e.fetch_failure(FETCH_FAILED_MESSAGE))?
        else {
            return Err(AppError::NotFound(format!("Task {id}")));
        };

        self.store
            .update_task(id, &update)
            .await
            .map_err(|e| e.write_failure(UPDATE_FAILED_MESSAGE))?;

        record.id = id.to_string();
        record.task_title = update.task_title;
        record.description = update.description;
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if self
            .store
            .get_task(id)
            .await
            .map_err(|e| e.fetch_failure(FETCH_FAILED_MESSAGE))?
            .is_none()
        {
            return Err(AppError::NotFound(format!("Task {id}")));
        }

        self.store
            .delete_task(id)
            .await
            .map_err(|e| e.write_failure(DELETE_FAILED_MESSAGE))
    }

    /// Every task log, unordered. Team views filter and sort in memory.
    pub async fn all(&self) -> Result<Vec<TaskLogRecord>> {
        self.store.list_tasks().await
    }
}
