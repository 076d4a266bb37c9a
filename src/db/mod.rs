//! Database layer (Firestore, with an in-memory stand-in).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::{FailureMode, MemoryStore};

use crate::error::AppError;
use crate::models::{BucketItem, TaskLogRecord, TaskLogUpdate, TaskQuery, UserProfile};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TASKS: &str = "tasks";
    /// Bucket (backlog) items
    pub const TODOS: &str = "todos";
}

/// Durable record storage.
///
/// Only one-shot reads and single-document writes: no range queries,
/// transactions or listeners. Errors surface as `AppError::Database`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // ─── Users ───────────────────────────────────────────────────

    /// Get a user profile by UID.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError>;

    /// Create or merge a user profile; `None` fields are left untouched.
    async fn upsert_user(&self, profile: &UserProfile) -> Result<(), AppError>;

    /// Fetch every user profile.
    async fn list_users(&self) -> Result<Vec<UserProfile>, AppError>;

    // ─── Task Logs ───────────────────────────────────────────────

    /// Insert a task log and return its generated ID.
    async fn insert_task(&self, record: &TaskLogRecord) -> Result<String, AppError>;

    async fn get_task(&self, id: &str) -> Result<Option<TaskLogRecord>, AppError>;

    /// Equality query, all populated fields AND-combined.
    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskLogRecord>, AppError>;

    /// Fetch every task log.
    async fn list_tasks(&self) -> Result<Vec<TaskLogRecord>, AppError>;

    /// Merge title and description into an existing task log.
    async fn update_task(&self, id: &str, update: &TaskLogUpdate) -> Result<(), AppError>;

    async fn delete_task(&self, id: &str) -> Result<(), AppError>;

    // ─── Bucket Items ────────────────────────────────────────────

    /// Insert a bucket item and return it as stored.
    ///
    /// The store assigns `id` and `created_at`; values supplied by the caller
    /// are ignored. Successive inserts get strictly increasing `created_at`.
    async fn insert_bucket_item(&self, item: &BucketItem) -> Result<BucketItem, AppError>;

    async fn get_bucket_item(&self, id: &str) -> Result<Option<BucketItem>, AppError>;

    /// All bucket items owned by `user_id`, unordered.
    async fn list_bucket_items(&self, user_id: &str) -> Result<Vec<BucketItem>, AppError>;

    async fn delete_bucket_item(&self, id: &str) -> Result<(), AppError>;
}
