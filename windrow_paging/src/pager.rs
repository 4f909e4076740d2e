// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use smallvec::SmallVec;

use crate::filter::{Query, SearchRecord, record_matches};

/// Default page size for a freshly created [`Pager`].
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default upper bound for [`Pager::set_page_size`].
pub const DEFAULT_MAX_PAGE_SIZE: usize = 500;

/// One entry of a pagination control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    /// A clickable page number (1-based).
    Page(usize),
    /// A gap between page numbers, rendered as an ellipsis.
    Ellipsis,
}

/// Inline capacity covers a full strip for `window <= 6`.
type PageStrip = SmallVec<[PageEntry; 16]>;

/// One page of a filtered collection, plus its control metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, R> {
    /// The records on the current page, in collection order.
    pub items: Vec<&'a R>,
    /// Current page (1-based).
    pub page: usize,
    /// Page size in effect.
    pub page_size: usize,
    /// Number of records after filtering.
    pub total_items: usize,
    /// Number of pages after filtering (`0` when no records match).
    pub total_pages: usize,
    /// `true` if a later page exists.
    pub has_next_page: bool,
    /// `true` if an earlier page exists.
    pub has_prev_page: bool,
}

/// Page-window state over a filtered collection.
///
/// The pager owns `page`, `page_size`, the active search [`Query`], and the
/// post-filter item count, and keeps them mutually consistent: `page` is
/// always clamped to `[1, max(1, total_pages)]` whenever the count or the
/// page size changes. Every setter clamps rather than errors: out-of-range
/// navigation is an expected race between data updates and pending user
/// input, not a bug to surface.
///
/// ```rust
/// use windrow_paging::Pager;
///
/// let mut pager = Pager::new(10);
/// pager.set_total_items(100);
/// pager.set_page(15);
/// assert_eq!(pager.page(), 10); // clamped to the last page
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    max_page_size: usize,
    total_items: usize,
    query: Query,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// Creates a pager with the given page size and no records.
    ///
    /// The page size is clamped to `[1, DEFAULT_MAX_PAGE_SIZE]`.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.clamp(1, DEFAULT_MAX_PAGE_SIZE),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            total_items: 0,
            query: Query::default(),
        }
    }

    /// Sets the upper bound accepted by [`set_page_size`](Self::set_page_size).
    ///
    /// Clamped to at least `1`; the current page size is re-clamped into the
    /// new bound.
    pub fn set_max_page_size(&mut self, max: usize) {
        self.max_page_size = max.max(1);
        self.set_page_size(self.page_size);
    }

    /// Returns the current page (1-based, always valid).
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the post-filter item count last supplied.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns the active query.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Returns `ceil(total_items / page_size)`; `0` when there are no items.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Returns `true` if a page after the current one exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Returns `true` if a page before the current one exists.
    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Navigates to page `n`, clamped to the valid range.
    ///
    /// Never errors; calling twice with the same `n` is idempotent.
    pub fn set_page(&mut self, n: usize) {
        self.page = n.clamp(1, self.total_pages().max(1));
    }

    /// Sets the page size, clamped to `[1, max_page_size]`.
    ///
    /// The current page is re-clamped against the recomputed page count.
    pub fn set_page_size(&mut self, n: usize) {
        self.page_size = n.clamp(1, self.max_page_size);
        self.set_page(self.page);
    }

    /// Updates the post-filter item count and re-clamps the current page.
    pub fn set_total_items(&mut self, n: usize) {
        self.total_items = n;
        self.set_page(self.page);
    }

    /// Replaces the active search query.
    ///
    /// When the query text changes, the page resets to 1 so a narrowed
    /// result set never leaves the user on a page past the end. Setting the
    /// identical text keeps the current page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = Query::new(query);
        if query != self.query {
            self.query = query;
            self.page = 1;
        }
    }

    /// Returns the current page's index window into the filtered collection.
    #[must_use]
    pub fn page_bounds(&self) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size);
        let start = start.min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    /// Filters `records` with the active query and slices out the current page.
    ///
    /// The pager adopts the post-filter count (re-clamping `page`) before
    /// slicing, so a query that narrows the results can never produce an
    /// empty page while matches remain.
    pub fn paginate<'a, R: SearchRecord>(&mut self, records: &'a [R]) -> Page<'a, R> {
        let matched: Vec<&'a R> = if self.query.is_empty() {
            records.iter().collect()
        } else {
            records
                .iter()
                .filter(|record| record_matches(*record, &self.query))
                .collect()
        };
        self.set_total_items(matched.len());
        let bounds = self.page_bounds();
        Page {
            items: matched[bounds].to_vec(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages(),
            has_next_page: self.has_next_page(),
            has_prev_page: self.has_prev_page(),
        }
    }

    /// Produces the page numbers to display as pagination controls.
    ///
    /// The strip always contains page 1 and the last page, plus every page
    /// within `window` of the current one; each gap collapses into a single
    /// [`PageEntry::Ellipsis`]. Empty when there are no pages.
    #[must_use]
    pub fn page_range(&self, window: usize) -> SmallVec<[PageEntry; 16]> {
        let total = self.total_pages();
        let mut strip = PageStrip::new();
        let mut last_kept = 0;
        for p in 1..=total {
            if p != 1 && p != total && p.abs_diff(self.page) > window {
                continue;
            }
            if last_kept != 0 && p > last_kept + 1 {
                strip.push(PageEntry::Ellipsis);
            }
            strip.push(PageEntry::Page(p));
            last_kept = p;
        }
        strip
    }
}
