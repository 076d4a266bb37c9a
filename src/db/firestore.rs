// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (directory profiles, merged on sign-in)
//! - Tasks (task log records)
//! - Todos (bucket items)

use crate::db::{collections, DocumentStore};
use crate::error::AppError;
use crate::models::{BucketItem, TaskLogRecord, TaskLogUpdate, TaskQuery, UserProfile};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fields touched by a task log edit.
const TASK_UPDATE_FIELDS: [&str; 2] = ["taskTitle", "description"];

/// Server-stamped bucket field.
const BUCKET_CREATED_AT_FIELD: &str = "createdAt";

/// Merge body for a task log edit. The update builder only takes objects
/// that deserialize as well as serialize.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskLogPatch {
    task_title: String,
    description: String,
}

impl From<&TaskLogUpdate> for TaskLogPatch {
    fn from(update: &TaskLogUpdate) -> Self {
        Self {
            task_title: update.task_title.clone(),
            description: update.description.clone(),
        }
    }
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FirestoreDb {
    // ─── User Operations ─────────────────────────────────────────

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert_user(&self, profile: &UserProfile) -> Result<(), AppError> {
        // The field mask makes this a merge: absent fields keep their stored values.
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(profile.present_fields())
            .in_col(collections::USERS)
            .document_id(&profile.user_id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Task Log Operations ─────────────────────────────────────

    async fn insert_task(&self, record: &TaskLogRecord) -> Result<String, AppError> {
        let created: TaskLogRecord = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::TASKS)
            .generate_document_id()
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(created.id)
    }

    async fn get_task(&self, id: &str) -> Result<Option<TaskLogRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TASKS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskLogRecord>, AppError> {
        let query = query.clone();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::TASKS)
            .filter(move |q| {
                q.for_all([
                    query
                        .user_id
                        .as_deref()
                        .and_then(|v| q.field("userId").eq(v)),
                    query.date.as_deref().and_then(|v| q.field("date").eq(v)),
                    query
                        .task_title
                        .as_deref()
                        .and_then(|v| q.field("taskTitle").eq(v)),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_tasks(&self) -> Result<Vec<TaskLogRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::TASKS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update_task(&self, id: &str, update: &TaskLogUpdate) -> Result<(), AppError> {
        let patch = TaskLogPatch::from(update);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(TASK_UPDATE_FIELDS)
            .in_col(collections::TASKS)
            .document_id(id)
            .object(&patch)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), AppError> {
        self.delete_document(collections::TASKS, id).await
    }

    // ─── Bucket Operations ───────────────────────────────────────

    async fn insert_bucket_item(&self, item: &BucketItem) -> Result<BucketItem, AppError> {
        let client = self.get_client()?;
        let unstamped = BucketItem {
            created_at: None,
            ..item.clone()
        };

        let created: BucketItem = client
            .fluent()
            .insert()
            .into(collections::TODOS)
            .generate_document_id()
            .object(&unstamped)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // createdAt comes from the server clock, never the caller's.
        let writer = client
            .create_simple_batch_writer()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let mut batch = writer.new_batch();
        client
            .fluent()
            .update()
            .in_col(collections::TODOS)
            .document_id(&created.id)
            .transforms(|t| {
                t.fields([t
                    .field(BUCKET_CREATED_AT_FIELD)
                    .server_value(firestore::FirestoreTransformServerValue::RequestTime)])
            })
            .only_transform()
            .add_to_batch(&mut batch)
            .map_err(|e| AppError::Database(e.to_string()))?;
        let response = batch
            .write()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        // Batch writes report per-write failures in statuses, not as errors
        if let Some(status) = response.statuses.iter().find(|s| s.code != 0) {
            tracing::warn!(item_id = %created.id, code = status.code, "createdAt stamp failed");
            return Err(AppError::Database(format!(
                "Failed to stamp bucket item {}: {}",
                created.id, status.message
            )));
        }

        let mut stored = self.get_bucket_item(&created.id).await?.ok_or_else(|| {
            AppError::Database(format!("Bucket item {} vanished after insert", created.id))
        })?;
        stored.id = created.id;
        Ok(stored)
    }

    async fn get_bucket_item(&self, id: &str) -> Result<Option<BucketItem>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TODOS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_bucket_items(&self, user_id: &str) -> Result<Vec<BucketItem>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::TODOS)
            .filter(|q| q.for_all([q.field("userId").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_bucket_item(&self, id: &str) -> Result<(), AppError> {
        self.delete_document(collections::TODOS, id).await
    }
}
