// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windrow Virtualizer: core 1D offset-index virtualization.
//!
//! This crate decides which items of a dense strip indexed `0..count` must be
//! rendered to cover a scrollable viewport, without mounting every row. It is
//! renderer-agnostic: the host owns the data, the scroll surface, and the
//! row widgets; the virtualizer owns only derived view state.
//!
//! The core concepts are:
//!
//! - [`SizeCache`]: per-index resolved sizes (estimates lazily overridden by
//!   real measurements) with prefix-sum offset queries and binary-search
//!   index lookup.
//! - [`Virtualizer`]: viewport extent, scroll offset, overscan, and scroll
//!   margin on top of a [`SizeCache`]; computes the visible index window and
//!   realized [`VirtualItem`]s, and plans imperative scrolls via [`Align`].
//! - A debounced `is_scrolling` flag driven by host timestamps (see
//!   `windrow_timing`), for UI affordances only.
//!
//! Hosts are responsible for:
//!
//! - Feeding scroll events ([`Virtualizer::on_scroll`]) and viewport changes
//!   ([`Virtualizer::set_viewport_extent`]).
//! - Diffing [`Virtualizer::visible_range`] between renders to mount and
//!   unmount rows, and positioning each row at its [`VirtualItem::start`].
//! - Sizing a spacer to [`Virtualizer::total_size`] so native scrollbars
//!   reflect true content length.
//! - Reporting observed row sizes back via [`Virtualizer::measure`].
//!
//! ## Minimal example
//!
//! ```rust
//! use windrow_virtualizer::Virtualizer;
//!
//! // 10,000 rows, estimated 24 logical pixels each.
//! let mut v = Virtualizer::new(10_000, 24.0);
//! v.set_viewport_extent(Some(600.0));
//! v.set_overscan(5);
//!
//! v.on_scroll(4_800.0, 0);
//!
//! for item in v.virtual_items() {
//!     // Host renders row `item.index` at offset `item.start`.
//!     assert!(item.end() > 4_800.0 - 5.0 * 24.0);
//! }
//! ```
//!
//! All extents and offsets are `f64` in a caller-chosen 1D coordinate space
//! (typically logical pixels) and are expected to be finite; invalid inputs
//! are clamped or ignored, never panicked on. This crate is `no_std` and
//! uses `alloc`.

#![no_std]

extern crate alloc;

mod size_cache;
mod virtualizer;

pub use size_cache::SizeCache;
pub use virtualizer::{
    Align, DEFAULT_SCROLL_END_DELAY_MS, VirtualItem, Virtualizer, VirtualizerDebugInfo,
};
