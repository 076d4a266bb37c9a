// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store for local development and tests.
//!
//! Mirrors the Firestore semantics the application relies on: generated IDs,
//! store-assigned creation times, merge updates, equality queries and
//! unordered reads.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::db::{collections, DocumentStore};
use crate::error::AppError;
use crate::models::{BucketItem, TaskLogRecord, TaskLogUpdate, TaskQuery, UserProfile};

/// Which operations should fail, for exercising error paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    #[default]
    None,
    Reads,
    Writes,
    /// Bucket deletes only (strands a half-finished move)
    BucketDeletes,
}

#[derive(Default)]
struct Collections {
    users: BTreeMap<String, UserProfile>,
    tasks: BTreeMap<String, TaskLogRecord>,
    todos: BTreeMap<String, BucketItem>,
    /// Last bucket `created_at` handed out
    last_created: Option<DateTime<Utc>>,
}

impl Collections {
    /// Wall-clock now, bumped past the previous stamp so that inserts in
    /// the same tick still order strictly.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        self.last_created = Some(stamp);
        stamp
    }
}

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
    next_id: AtomicU64,
    failure: RwLock<FailureMode>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_failure_mode(&self, mode: FailureMode) {
        *self.failure.write().await = mode;
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        let data = self.data.read().await;
        match collection {
            collections::USERS => data.users.len(),
            collections::TASKS => data.tasks.len(),
            collections::TODOS => data.todos.len(),
            _ => 0,
        }
    }

    fn generate_id(&self, collection: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{collection}-{n:06}")
    }

    async fn check_read(&self) -> Result<(), AppError> {
        match *self.failure.read().await {
            FailureMode::Reads => Err(AppError::Database("simulated read failure".to_string())),
            _ => Ok(()),
        }
    }

    async fn check_write(&self, collection: &str, is_delete: bool) -> Result<(), AppError> {
        match *self.failure.read().await {
            FailureMode::Writes => Err(AppError::Database("simulated write failure".to_string())),
            FailureMode::BucketDeletes if is_delete && collection == collections::TODOS => Err(
                AppError::Database("simulated bucket delete failure".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.check_read().await?;
        Ok(self.data.read().await.users.get(user_id).cloned())
    }

    async fn upsert_user(&self, profile: &UserProfile) -> Result<(), AppError> {
        self.check_write(collections::USERS, false).await?;
        let mut data = self.data.write().await;
        data.users
            .entry(profile.user_id.clone())
            .and_modify(|stored| stored.merge(profile))
            .or_insert_with(|| profile.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, AppError> {
        self.check_read().await?;
        Ok(self.data.read().await.users.values().cloned().collect())
    }

    async fn insert_task(&self, record: &TaskLogRecord) -> Result<String, AppError> {
        self.check_write(collections::TASKS, false).await?;
        let id = self.generate_id(collections::TASKS);
        let mut stored = record.clone();
        stored.id.clone_from(&id);
        self.data.write().await.tasks.insert(id.clone(), stored);
        Ok(id)
    }

    async fn get_task(&self, id: &str) -> Result<Option<TaskLogRecord>, AppError> {
        self.check_read().await?;
        Ok(self.data.read().await.tasks.get(id).cloned())
    }

    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskLogRecord>, AppError> {
        self.check_read().await?;
        Ok(self
            .data
            .read()
            .await
            .tasks
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    async fn list_tasks(&self) -> Result<Vec<TaskLogRecord>, AppError> {
        self.check_read().await?;
        Ok(self.data.read().await.tasks.values().cloned().collect())
    }

    async fn update_task(&self, id: &str, update: &TaskLogUpdate) -> Result<(), AppError> {
        self.check_write(collections::TASKS, false).await?;
        let mut data = self.data.write().await;
        let record = data
            .tasks
            .get_mut(id)
            .ok_or_else(|| AppError::Database(format!("No task document {id}")))?;
        record.task_title.clone_from(&update.task_title);
        record.description.clone_from(&update.description);
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), AppError> {
        self.check_write(collections::TASKS, true).await?;
        self.data.write().await.tasks.remove(id);
        Ok(())
    }

    async fn insert_bucket_item(&self, item: &BucketItem) -> Result<BucketItem, AppError> {
        self.check_write(collections::TODOS, false).await?;
        let id = self.generate_id(collections::TODOS);
        let mut data = self.data.write().await;
        let stored = BucketItem {
            id: id.clone(),
            created_at: Some(data.next_created_at()),
            ..item.clone()
        };
        data.todos.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_bucket_item(&self, id: &str) -> Result<Option<BucketItem>, AppError> {
        self.check_read().await?;
        Ok(self.data.read().await.todos.get(id).cloned())
    }

    async fn list_bucket_items(&self, user_id: &str) -> Result<Vec<BucketItem>, AppError> {
        self.check_read().await?;
        Ok(self
            .data
            .read()
            .await
            .todos
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_bucket_item(&self, id: &str) -> Result<(), AppError> {
        self.check_write(collections::TODOS, true).await?;
        self.data.write().await.todos.remove(id);
        Ok(())
    }
}
