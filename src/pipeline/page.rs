// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page slicing with explicit boundaries.
//!
//! Pages are 1-indexed. A request outside `1..=total_pages` is an error rather
//! than being clamped, so callers always know when they hit a boundary. An
//! empty sequence still has a (blank) page 1.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Fixed page size of the bucket list.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Page sizes offered on the team overview.
pub const TEAM_PAGE_SIZES: [usize; 3] = [10, 20, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Page {page} is outside 1..={total_pages}")]
    OutOfRange { page: usize, total_pages: usize },

    #[error("Unsupported page size: {0}")]
    UnsupportedSize(usize),
}

/// Number of rows per page; always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::UnsupportedSize(size));
        }
        Ok(Self(size))
    }

    /// Accept only one of the sizes a view offers.
    pub fn from_choices(size: usize, choices: &[usize]) -> Result<Self, PageError> {
        if !choices.contains(&size) {
            return Err(PageError::UnsupportedSize(size));
        }
        Self::new(size)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-indexed page number
    pub page: usize,
    pub size: PageSize,
}

impl PageRequest {
    pub fn new(page: usize, size: PageSize) -> Self {
        Self { page, size }
    }

    pub fn first(size: PageSize) -> Self {
        Self { page: 1, size }
    }
}

/// One page of a sorted sequence, plus the state of the paging controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// `ceil(count / size)`
pub fn total_pages(count: usize, size: PageSize) -> usize {
    count.div_ceil(size.get())
}

/// Whether `page` may be requested for a sequence of `count` items.
pub fn page_in_range(page: usize, count: usize, size: PageSize) -> bool {
    let pages = total_pages(count, size);
    page >= 1 && (page <= pages || (page == 1 && pages == 0))
}

/// Slice `items[(page-1)*size .. page*size]`.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Result<Page<T>, PageError> {
    let size = request.size.get();
    let pages = total_pages(items.len(), request.size);

    if !page_in_range(request.page, items.len(), request.size) {
        return Err(PageError::OutOfRange {
            page: request.page,
            total_pages: pages,
        });
    }

    let start = (request.page - 1) * size;
    let end = start.saturating_add(size).min(items.len());
    let slice = items.get(start..end).unwrap_or_default();

    Ok(Page {
        items: slice.to_vec(),
        page: request.page,
        per_page: size,
        total: items.len(),
        total_pages: pages,
        has_previous: request.page > 1,
        has_next: request.page < pages,
    })
}
