// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Results screen state: load status plus the live/applied filter split.
//!
//! The live filter follows the user's input; rows and exports come only from
//! the applied snapshot, which changes on an explicit apply or after a fresh
//! load (which re-applies the live filter).

use serde::Serialize;
use std::fmt::Display;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::export::{encode_csv, project, ExportError};
use super::filter::{filter_records, FilterSpec};
use super::page::{page_in_range, paginate, total_pages, Page, PageError, PageRequest, PageSize};
use super::sort::sort_newest_first;
use crate::models::TaskLogRecord;

/// Generic message shown when the record fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch tasks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Error(&'static str),
}

/// Whether the live filter inputs match the applied snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FilterStatus {
    Unapplied,
    Applied,
}

/// The current page fell outside a reloaded set and was moved to its last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMoved {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("Results are not loaded")]
    NotReady,

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub struct ResultsScreen {
    state: LoadState,
    records: Vec<TaskLogRecord>,
    live: FilterSpec,
    applied: FilterSpec,
    applied_rows: Vec<TaskLogRecord>,
    page: usize,
    page_size: PageSize,
}

impl ResultsScreen {
    /// A screen waiting for its first load.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            state: LoadState::Loading,
            records: Vec::new(),
            live: FilterSpec::default(),
            applied: FilterSpec::default(),
            applied_rows: Vec::new(),
            page: 1,
            page_size,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Go back to `Loading`, e.g. after a create/update/delete.
    pub fn reload(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Complete a fetch. Success auto-applies the live filter; failure moves
    /// to `Error` with a generic message and no rows.
    ///
    /// If the reloaded set no longer reaches the current page, the screen
    /// moves to the last page and reports the move.
    #[must_use]
    pub fn finish_load<E: Display>(
        &mut self,
        result: Result<Vec<TaskLogRecord>, E>,
    ) -> Option<PageMoved> {
        match result {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Results loaded");
                self.records = records;
                self.state = LoadState::Ready;
                self.commit_live();
                if page_in_range(self.page, self.applied_rows.len(), self.page_size) {
                    return None;
                }

                let moved = PageMoved {
                    from: self.page,
                    to: total_pages(self.applied_rows.len(), self.page_size).max(1),
                };
                tracing::debug!(from = moved.from, to = moved.to, "Page moved after reload");
                self.page = moved.to;
                Some(moved)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Results fetch failed");
                self.records.clear();
                self.applied_rows.clear();
                self.state = LoadState::Error(FETCH_FAILED_MESSAGE);
                None
            }
        }
    }

    /// Update the live filter inputs. Visible rows do not change.
    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.live = spec;
    }

    pub fn live_filter(&self) -> &FilterSpec {
        &self.live
    }

    pub fn applied_filter(&self) -> &FilterSpec {
        &self.applied
    }

    /// Number of records the live filter would select if applied now.
    pub fn candidate_count(&self) -> usize {
        self.records.iter().filter(|r| self.live.matches(r)).count()
    }

    pub fn filter_status(&self) -> FilterStatus {
        if self.live == self.applied {
            FilterStatus::Applied
        } else {
            FilterStatus::Unapplied
        }
    }

    /// Whether an apply would change anything.
    pub fn can_apply(&self) -> bool {
        self.state == LoadState::Ready && self.filter_status() == FilterStatus::Unapplied
    }

    /// Snapshot the live filter into the applied slot and return to page 1.
    pub fn apply(&mut self) -> Result<(), ScreenError> {
        self.ensure_ready()?;
        self.commit_live();
        self.page = 1;
        Ok(())
    }

    fn commit_live(&mut self) {
        self.applied = self.live.clone();
        self.applied_rows = filter_records(&self.records, &self.applied);
        sort_newest_first(&mut self.applied_rows);
    }

    fn ensure_ready(&self) -> Result<(), ScreenError> {
        match self.state {
            LoadState::Ready => Ok(()),
            _ => Err(ScreenError::NotReady),
        }
    }

    /// Applied rows, sorted newest first and unpaginated.
    pub fn applied_rows(&self) -> &[TaskLogRecord] {
        &self.applied_rows
    }

    pub fn total(&self) -> usize {
        self.applied_rows.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.applied_rows.len(), self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Change rows per page; returns to page 1.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.page = 1;
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Move to `page`; pages outside the applied range are refused.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), ScreenError> {
        self.ensure_ready()?;
        if !page_in_range(page, self.applied_rows.len(), self.page_size) {
            return Err(PageError::OutOfRange {
                page,
                total_pages: self.total_pages(),
            }
            .into());
        }
        self.page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), ScreenError> {
        self.go_to_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> Result<(), ScreenError> {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Rows on the current page.
    pub fn visible_page(&self) -> Result<Page<TaskLogRecord>, ScreenError> {
        self.ensure_ready()?;
        Ok(paginate(
            &self.applied_rows,
            PageRequest::new(self.page, self.page_size),
        )?)
    }

    /// Export is offered only when the applied set has rows.
    pub fn export_enabled(&self) -> bool {
        self.state == LoadState::Ready && !self.applied_rows.is_empty()
    }

    /// CSV of the whole applied set, independent of the current page.
    pub fn export_csv(&self) -> Result<Vec<u8>, ScreenError> {
        self.ensure_ready()?;
        Ok(encode_csv(&project(&self.applied_rows))?)
    }
}
