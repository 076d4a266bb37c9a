// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bucket routes: the signed-in user's backlog.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{BucketInput, BucketItemView, TaskLogRecord};
use crate::pipeline::Page;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/bucket", get(list_bucket).post(add_item))
        .route("/api/bucket/{id}", delete(delete_item))
        .route("/api/bucket/{id}/done", post(mark_done))
}

#[derive(Deserialize)]
struct BucketQuery {
    #[serde(default = "default_page")]
    page: usize,
}

fn default_page() -> usize {
    1
}

async fn list_bucket(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<BucketQuery>,
) -> Result<Json<Page<BucketItemView>>> {
    let page = state.bucket.list(&user.user_id, params.page).await?;
    Ok(Json(page.map(|item| BucketItemView::from(&item))))
}

async fn add_item(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<BucketInput>,
) -> Result<(StatusCode, Json<BucketItemView>)> {
    input.validate()?;
    let item = state.bucket.add(&user.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(BucketItemView::from(&item))))
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.bucket.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move an item into today's task logs.
async fn mark_done(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<TaskLogRecord>)> {
    let record = state.bucket.mark_done(user.author(), &id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
