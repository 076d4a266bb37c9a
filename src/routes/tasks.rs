// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! My Tasks routes: today's logs for the signed-in user.
//!
//! Edits and deletes address a log by ID and are shared with the team view.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{TaskLogInput, TaskLogRecord};
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tasks/today", get(list_today).post(create_today))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TodayResponse {
    pub date: String,
    pub tasks: Vec<TaskLogRecord>,
}

async fn list_today(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TodayResponse>> {
    let tasks = state.task_logs.today_for(&user.user_id).await?;
    Ok(Json(TodayResponse {
        date: state.task_logs.clock().today(),
        tasks,
    }))
}

async fn create_today(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<TaskLogInput>,
) -> Result<(StatusCode, Json<TaskLogRecord>)> {
    input.validate()?;
    let record = state.task_logs.log_today(user.author(), input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<TaskLogInput>,
) -> Result<Json<TaskLogRecord>> {
    input.validate()?;
    let record = state.task_logs.update(&id, input.into()).await?;
    Ok(Json(record))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.task_logs.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
