// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task log query pipeline: filter, sort, paginate, export.
//!
//! All stages run in memory over a fetched record set. The store only offers
//! equality queries, so range filtering and ordering happen here.

pub mod export;
pub mod filter;
pub mod page;
pub mod screen;
pub mod sort;

pub use export::{encode_csv, project, ExportError, ExportRow, EXPORT_FILE_NAME};
pub use filter::{filter_records, FilterSpec};
pub use page::{paginate, Page, PageError, PageRequest, PageSize, DEFAULT_PAGE_SIZE, TEAM_PAGE_SIZES};
pub use screen::{
    FilterStatus, LoadState, PageMoved, ResultsScreen, ScreenError, FETCH_FAILED_MESSAGE,
};
pub use sort::{datetime_key, sort_bucket_newest_first, sort_newest_first};

use crate::error::AppError;
use crate::models::TaskLogRecord;

/// Result of one pass through the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The requested page of the sorted, filtered rows
    pub visible: Page<TaskLogRecord>,
    /// All sorted, filtered rows (what an export contains)
    pub export_rows: Vec<TaskLogRecord>,
}

impl PipelineOutput {
    pub fn total(&self) -> usize {
        self.export_rows.len()
    }
}

/// Filter, sort newest first, then slice out one page.
pub fn run(
    records: &[TaskLogRecord],
    filter: &FilterSpec,
    request: PageRequest,
) -> Result<PipelineOutput, PageError> {
    let mut rows = filter_records(records, filter);
    sort_newest_first(&mut rows);
    let visible = paginate(&rows, request)?;

    Ok(PipelineOutput {
        visible,
        export_rows: rows,
    })
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::OutOfRange { page, total_pages } => {
                AppError::PageOutOfRange { page, total_pages }
            }
            PageError::UnsupportedSize(size) => {
                AppError::BadRequest(format!("Unsupported page size: {size}"))
            }
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Empty => AppError::NothingToExport,
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<ScreenError> for AppError {
    fn from(err: ScreenError) -> Self {
        match err {
            ScreenError::NotReady => AppError::Fetch(FETCH_FAILED_MESSAGE),
            ScreenError::Page(err) => err.into(),
            ScreenError::Export(err) => err.into(),
        }
    }
}
