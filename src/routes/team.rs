// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team overview routes: everyone's logs, filtered, paged and exported.
//!
//! Each request is one explicit apply of the filter in its query string
//! against a fresh fetch of all logs.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::TaskLogRecord;
use crate::pipeline::{
    FilterSpec, LoadState, PageSize, ResultsScreen, DEFAULT_PAGE_SIZE, EXPORT_FILE_NAME,
    TEAM_PAGE_SIZES,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/team/logs", get(team_logs))
        .route("/api/team/logs/export", get(export_logs))
}

#[derive(Debug, Deserialize)]
struct TeamLogsQuery {
    user_id: Option<String>,
    date_from: Option<String>,
    date_to: Option<String>,
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_per_page")]
    per_page: usize,
}

fn default_page() -> usize {
    1
}
fn default_per_page() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TeamLogsResponse {
    pub rows: Vec<TaskLogRecord>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub export_enabled: bool,
    /// Filter the rows were selected with
    pub filter: FilterSpec,
}

/// Fetch all logs and apply `filter`, leaving the screen ready for paging.
async fn load_screen(state: &AppState, filter: FilterSpec, size: PageSize) -> Result<ResultsScreen> {
    filter.check_dates().map_err(AppError::BadRequest)?;

    let mut screen = ResultsScreen::new(size);
    screen.set_filter(filter);
    // A fresh screen sits on page 1, which every load keeps in range
    let _ = screen.finish_load(state.task_logs.all().await);

    if let LoadState::Error(message) = screen.state() {
        return Err(AppError::Fetch(*message));
    }
    Ok(screen)
}

async fn team_logs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TeamLogsQuery>,
) -> Result<Json<TeamLogsResponse>> {
    let size = PageSize::from_choices(params.per_page, &TEAM_PAGE_SIZES)?;
    let filter = FilterSpec::new(
        params.user_id.as_deref(),
        params.date_from.as_deref(),
        params.date_to.as_deref(),
    );
    let mut screen = load_screen(&state, filter, size).await?;
    screen.go_to_page(params.page)?;

    let page = screen.visible_page()?;
    tracing::debug!(
        total = page.total,
        page = page.page,
        per_page = page.per_page,
        "Team logs served"
    );

    Ok(Json(TeamLogsResponse {
        rows: page.items,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages,
        has_previous: page.has_previous,
        has_next: page.has_next,
        export_enabled: screen.export_enabled(),
        filter: screen.applied_filter().clone(),
    }))
}

/// Download every row matching the filter as CSV, regardless of paging.
async fn export_logs(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<FilterSpec>,
) -> Result<impl IntoResponse> {
    let screen = load_screen(&state, filter, PageSize::default()).await?;
    let csv = screen.export_csv()?;

    tracing::info!(rows = screen.total(), "Team logs exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}
