// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windrow Paging: page-windowing and free-text filtering over in-memory
//! collections.
//!
//! Where `windrow_virtualizer` windows a collection by scroll offset, this
//! crate windows it by page number. Both sit above the same host-owned data:
//! raw records go through the filter, then (optionally a host-side sort),
//! then a page slice.
//!
//! The pieces are:
//!
//! - [`Query`] / [`FieldValue`] / [`SearchRecord`]: case-insensitive
//!   substring search over a record's declared searchable fields. A record
//!   matches when any field matches; the empty query matches everything.
//! - [`Pager`]: 1-based page, page size, and post-filter count, kept
//!   mutually consistent by clamping. [`Pager::paginate`] produces a
//!   [`Page`] (the current slice plus the metadata pagination controls
//!   need), and [`Pager::page_range`] produces the numbered control strip
//!   with ellipsis gaps.
//! - [`QueryCache`]: explicit, host-owned memoization of per-query results
//!   with TTL eviction.
//!
//! State synchronization with the outside world (URL query strings, local
//! storage, re-fetch polling) is the host's concern; the pager only exposes
//! getters and clamping setters.
//!
//! ## Minimal example
//!
//! ```rust
//! use windrow_paging::{FieldValue, Pager, SearchRecord};
//!
//! struct Customer {
//!     name: &'static str,
//! }
//!
//! impl SearchRecord for Customer {
//!     fn searchable_fields(&self, visit: &mut dyn FnMut(FieldValue<'_>)) {
//!         visit(FieldValue::Text(self.name));
//!     }
//! }
//!
//! let customers = [
//!     Customer { name: "Ann" },
//!     Customer { name: "bob" },
//!     Customer { name: "Cara" },
//! ];
//!
//! let mut pager = Pager::new(10);
//! pager.set_search("a");
//!
//! let page = pager.paginate(&customers);
//! let names: Vec<&str> = page.items.iter().map(|c| c.name).collect();
//! assert_eq!(names, ["Ann", "Cara"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod filter;
mod pager;

pub use cache::QueryCache;
pub use filter::{FieldValue, Query, SearchRecord, filter_indices, record_matches};
pub use pager::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE, Page, PageEntry, Pager};
