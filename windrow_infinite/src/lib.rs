// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windrow Infinite: append-accumulation feeds and load-more gating.
//!
//! The alternative to page-windowing for feeds that grow by appending:
//! the host renders all accumulated items (usually behind
//! `windrow_virtualizer`) and fetches the next batch when the user nears
//! the end of the list.
//!
//! Two cooperating pieces:
//!
//! - [`Feed`]: the accumulated items plus `has_more` / `loading` / `error`
//!   slots. The feed never fetches anything itself: the host calls
//!   [`Feed::begin_load`], performs its request, and reports back with
//!   [`Feed::extend`] or [`Feed::fail`]. Retry after a failure is an
//!   explicit host action ([`Feed::retry`]); the feed never retries on its
//!   own.
//! - [`InfiniteLoader`]: decides *when* to fetch. The host observes a
//!   sentinel element near the list's end (an intersection observer, a
//!   scroll-position check, whatever the UI stack offers) and forwards each
//!   observation; the loader answers "invoke your load action now" at most
//!   once per observation, rate-limited by a cool-down so rapid
//!   intersection toggling cannot double-fetch, and never while the feed is
//!   loading, failed, or exhausted.
//!
//! ```rust
//! use windrow_infinite::{Feed, InfiniteLoader};
//!
//! let mut feed: Feed<u32> = Feed::new();
//! let mut loader = InfiniteLoader::new();
//!
//! // Sentinel scrolled into view: time to fetch.
//! assert!(loader.observe(true, 1_000, &feed));
//! feed.begin_load();
//!
//! // More intersection chatter while the request is in flight: no fetch.
//! assert!(!loader.observe(true, 1_100, &feed));
//!
//! feed.extend([1, 2, 3], true);
//! assert_eq!(feed.items(), &[1, 2, 3]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use windrow_timing::Cooldown;

/// Default cool-down between load-more triggers.
pub const DEFAULT_LOAD_COOLDOWN_MS: u64 = 500;

/// Accumulated items of an append-only feed, plus its fetch state.
///
/// All state transitions are host-driven; the feed only enforces their
/// consistency (no load while one is in flight, no load past the end, no
/// load while a failure is unresolved).
#[derive(Debug, Clone)]
pub struct Feed<T> {
    items: Vec<T>,
    has_more: bool,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Feed<T> {
    /// Creates an empty feed that expects more items.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            has_more: true,
            loading: false,
            error: None,
        }
    }

    /// Returns the accumulated items in append order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the number of accumulated items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the source may still have items to append.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns `true` while a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the unresolved failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a load as in flight.
    ///
    /// Returns `true` if the transition happened; a no-op (returning
    /// `false`) while already loading, exhausted, or failed.
    pub fn begin_load(&mut self) -> bool {
        if self.loading || !self.has_more || self.error.is_some() {
            return false;
        }
        self.loading = true;
        true
    }

    /// Appends a fetched batch and records whether more remain.
    ///
    /// Clears the in-flight flag. Accepted even without a preceding
    /// [`begin_load`](Self::begin_load) so hosts can seed initial data.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = T>, has_more: bool) {
        self.items.extend(batch);
        self.has_more = has_more;
        self.loading = false;
    }

    /// Records a load failure.
    ///
    /// Clears the in-flight flag; further loads are refused until the host
    /// resolves the failure via [`retry`](Self::retry).
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Clears an unresolved failure so the next load may proceed.
    ///
    /// Retrying is always an explicit host action; accumulated items are
    /// kept.
    pub fn retry(&mut self) {
        self.error = None;
    }

    /// Drops all items and state, e.g. when the host swaps the collection.
    pub fn reset(&mut self) {
        self.items.clear();
        self.has_more = true;
        self.loading = false;
        self.error = None;
    }
}

/// Turns sentinel-intersection observations into load-more decisions.
///
/// [`observe`](Self::observe) returns `true` when the host should invoke
/// its load action. The decision is gated three ways:
///
/// - never while the feed is loading, failed, or exhausted;
/// - at most once per observation;
/// - successive triggers are separated by at least the cool-down window,
///   so rapid intersection toggling cannot double-fetch.
///
/// Blocked observations do not consume the cool-down; only actual triggers
/// start the window.
#[derive(Debug, Clone)]
pub struct InfiniteLoader {
    cooldown: Cooldown,
}

impl Default for InfiniteLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl InfiniteLoader {
    /// Creates a loader with the default 500ms cool-down.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cooldown_ms(DEFAULT_LOAD_COOLDOWN_MS)
    }

    /// Creates a loader with a custom cool-down window.
    #[must_use]
    pub fn with_cooldown_ms(window_ms: u64) -> Self {
        Self {
            cooldown: Cooldown::new(window_ms),
        }
    }

    /// Returns the cool-down window in milliseconds.
    #[must_use]
    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown.window_ms()
    }

    /// Forwards one sentinel observation at `now_ms`.
    ///
    /// Returns `true` when the host should invoke its load action.
    pub fn observe<T>(&mut self, intersecting: bool, now_ms: u64, feed: &Feed<T>) -> bool {
        if !intersecting {
            return false;
        }
        if feed.is_loading() || feed.error().is_some() || !feed.has_more() {
            return false;
        }
        self.cooldown.try_fire(now_ms)
    }

    /// Clears cool-down state, e.g. after [`Feed::reset`].
    pub fn reset(&mut self) {
        self.cooldown.reset();
    }
}
