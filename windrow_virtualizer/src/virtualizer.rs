// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use windrow_timing::DebounceTimer;

use crate::SizeCache;

/// Default quiet period after the last scroll event before
/// [`Virtualizer::is_scrolling`] resets.
pub const DEFAULT_SCROLL_END_DELAY_MS: u64 = 150;

/// Placement of a target item after [`Virtualizer::scroll_to_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Item start aligns with the viewport start.
    #[default]
    Start,
    /// Item center aligns with the viewport center.
    Center,
    /// Item end aligns with the viewport end.
    End,
    /// No scroll if the item is fully visible; otherwise the nearest of
    /// [`Align::Start`] / [`Align::End`].
    Auto,
}

/// One realized item's position in the scroll axis.
///
/// Derived and ephemeral: recomputed on every
/// [`Virtualizer::virtual_items`] call, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualItem {
    /// Item index in `0..count`.
    pub index: usize,
    /// Cumulative offset of all prior items.
    pub start: f64,
    /// Resolved (measured-or-estimated) extent.
    pub size: f64,
}

impl VirtualItem {
    /// Returns `start + size`.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

/// Snapshot of a [`Virtualizer`]'s state for debugging and inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualizerDebugInfo {
    /// Total item count.
    pub count: usize,
    /// Extra items realized beyond each visible edge.
    pub overscan: usize,
    /// Extra pixels treated as visible beyond the viewport edges.
    pub scroll_margin: f64,
    /// Attached viewport extent, if any.
    pub viewport_extent: Option<f64>,
    /// Current committed scroll offset.
    pub scroll_offset: f64,
    /// Debounced scrolling flag.
    pub is_scrolling: bool,
    /// Sum of all resolved item sizes.
    pub total_size: f64,
}

/// Computes which items of a dense `0..count` strip must be rendered.
///
/// The virtualizer owns derived view state only: a [`SizeCache`] of resolved
/// item extents, the committed scroll offset, and a debounced `is_scrolling`
/// flag. Everything it reports ([`virtual_items`](Self::virtual_items),
/// [`total_size`](Self::total_size)) is a pure function of that state; there
/// is no hidden reactive machinery, so any host can drive it from whatever
/// change-detection mechanism it prefers.
///
/// Overscan is symmetric: the visible index range is widened by `overscan`
/// items on both the leading and the trailing edge, floored at `0` and
/// capped at `count`.
///
/// ```rust
/// use windrow_virtualizer::Virtualizer;
///
/// let mut v = Virtualizer::new(1_000, 50.0);
/// v.set_viewport_extent(Some(800.0));
/// v.on_scroll(5_000.0, 0);
///
/// let items = v.virtual_items();
/// assert_eq!(items.first().unwrap().index, 100);
/// assert_eq!(items.first().unwrap().start, 5_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct Virtualizer {
    cache: SizeCache,
    overscan: usize,
    scroll_margin: f64,
    viewport_extent: Option<f64>,
    scroll_offset: f64,
    is_scrolling: bool,
    scroll_end: DebounceTimer,
}

impl Virtualizer {
    /// Creates a virtualizer for `count` items with a uniform size estimate.
    #[must_use]
    pub fn new(count: usize, estimate_size: f64) -> Self {
        Self {
            cache: SizeCache::new(count, estimate_size),
            overscan: 0,
            scroll_margin: 0.0,
            viewport_extent: None,
            scroll_offset: 0.0,
            is_scrolling: false,
            scroll_end: DebounceTimer::new(DEFAULT_SCROLL_END_DELAY_MS),
        }
    }

    /// Creates a virtualizer with a per-index size estimate function.
    #[must_use]
    pub fn with_estimate_fn(
        count: usize,
        estimate_size: f64,
        estimate: impl FnMut(usize) -> f64,
    ) -> Self {
        let mut v = Self::new(0, estimate_size);
        v.cache = SizeCache::with_estimate_fn(count, estimate_size, estimate);
        v
    }

    /// Returns the total item count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cache.len()
    }

    /// Replaces the item count, e.g. when the host swaps its collection.
    ///
    /// Measured sizes for surviving leading indices are kept; trailing
    /// entries are invalidated (the cache is keyed by index, not identity).
    pub fn set_count(&mut self, count: usize) {
        self.cache.set_len(count);
        self.clamp_committed_offset();
    }

    /// Like [`set_count`](Self::set_count), filling growth from `estimate(index)`.
    pub fn set_count_with(&mut self, count: usize, mut estimate: impl FnMut(usize) -> f64) {
        self.cache.set_len_with(count, &mut estimate);
        self.clamp_committed_offset();
    }

    /// Returns the overscan item count.
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Sets how many extra items to realize beyond each visible edge.
    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    /// Returns the scroll margin in pixels.
    #[must_use]
    pub fn scroll_margin(&self) -> f64 {
        self.scroll_margin
    }

    /// Sets the extra pixel margin treated as visible beyond the viewport.
    ///
    /// Negative or non-finite values clamp to `0.0`.
    pub fn set_scroll_margin(&mut self, margin: f64) {
        self.scroll_margin = if margin.is_finite() && margin > 0.0 {
            margin
        } else {
            0.0
        };
    }

    /// Returns the attached viewport extent, if any.
    #[must_use]
    pub fn viewport_extent(&self) -> Option<f64> {
        self.viewport_extent
    }

    /// Attaches (or detaches) the scrollable viewport.
    ///
    /// `None` means no scrollable element is available; all window queries
    /// return empty until one is attached. Negative or non-finite extents
    /// clamp to `0.0`.
    pub fn set_viewport_extent(&mut self, extent: Option<f64>) {
        self.viewport_extent = extent.map(|e| if e.is_finite() && e > 0.0 { e } else { 0.0 });
        self.clamp_committed_offset();
    }

    /// Returns the committed scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Returns `true` while scroll events are arriving.
    ///
    /// This is a debounced UI affordance (scrollbar styling, suppressing
    /// expensive work mid-fling); window computation never depends on it.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Sets the quiet period for scroll-end detection.
    pub fn set_scroll_end_delay_ms(&mut self, delay_ms: u64) {
        self.scroll_end.set_delay_ms(delay_ms);
    }

    /// Commits a scroll event from the host at `now_ms`.
    ///
    /// The offset is clamped to the scrollable range; non-finite offsets are
    /// ignored. Marks the virtualizer as scrolling and (re)arms the
    /// scroll-end timer; each event supersedes the previous deadline.
    pub fn on_scroll(&mut self, offset: f64, now_ms: u64) {
        if offset.is_finite() {
            self.scroll_offset = self.clamp_scroll_offset(offset);
        }
        self.is_scrolling = true;
        self.scroll_end.arm(now_ms);
    }

    /// Advances scroll-end detection to `now_ms`.
    ///
    /// Returns `true` if the quiet period elapsed and `is_scrolling` was
    /// cleared by this call.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.scroll_end.fire(now_ms) && self.is_scrolling {
            self.is_scrolling = false;
            return true;
        }
        false
    }

    /// Cancels pending scroll-end detection and clears the scrolling flag.
    ///
    /// Hosts call this on teardown so no stale deadline fires into a view
    /// that no longer exists.
    pub fn cancel_pending(&mut self) {
        self.scroll_end.cancel();
        self.is_scrolling = false;
    }

    /// Records a real measurement for `index`.
    ///
    /// Out-of-range indices and invalid sizes are ignored (the estimate
    /// stays in effect until a valid measurement arrives). The measured size
    /// takes precedence for this index until the count changes past it.
    pub fn measure(&mut self, index: usize, size: f64) {
        self.cache.measure(index, size);
    }

    /// Discards all measurements, reverting to estimates.
    pub fn reset_measurements(&mut self) {
        self.cache.reset_measurements();
    }

    /// Returns the underlying size cache.
    #[must_use]
    pub fn size_cache(&self) -> &SizeCache {
        &self.cache
    }

    /// Returns the sum of all resolved item sizes.
    ///
    /// Hosts size a spacer element with this so native scrollbars reflect
    /// the true content length.
    pub fn total_size(&mut self) -> f64 {
        self.cache.total()
    }

    /// Returns the index window to realize, overscan included.
    ///
    /// Hosts diff this range against the previous one to mount and unmount
    /// rows. Empty when `count == 0` or no viewport is attached.
    pub fn visible_range(&mut self) -> Range<usize> {
        let Some(viewport) = self.viewport_extent else {
            return 0..0;
        };
        let count = self.cache.len();
        if count == 0 || viewport <= 0.0 {
            return 0..0;
        }

        let offset = self.clamp_scroll_offset(self.scroll_offset);
        let lo = offset - self.scroll_margin;
        let hi = offset + viewport + self.scroll_margin;
        let core = self.cache.range_covering(lo, hi);
        if core.is_empty() {
            return core;
        }
        let start = core.start.saturating_sub(self.overscan);
        let end = core.end.saturating_add(self.overscan).min(count);
        start..end
    }

    /// Returns the realized items for the current window, ascending by index.
    ///
    /// Consecutive items are contiguous: `items[i].end() == items[i + 1].start`.
    pub fn virtual_items(&mut self) -> Vec<VirtualItem> {
        let range = self.visible_range();
        let mut items = Vec::with_capacity(range.len());
        let mut start = self.cache.start_of(range.start);
        for index in range {
            let size = self.cache.size_of(index);
            items.push(VirtualItem { index, start, size });
            start += size;
        }
        items
    }

    /// Scrolls so the viewport starts at `offset`, clamped to the content.
    ///
    /// Non-finite offsets are ignored.
    pub fn scroll_to_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.scroll_offset = self.clamp_scroll_offset(offset);
        }
    }

    /// Scrolls so `index` is positioned per `align`.
    ///
    /// A no-op when `index` is outside `0..count` or no viewport is attached.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) {
        if let Some(target) = self.scroll_to_index_offset(index, align) {
            self.scroll_offset = target;
        }
    }

    /// Computes the clamped target offset for [`scroll_to_index`](Self::scroll_to_index)
    /// without applying it.
    ///
    /// Hosts that animate scrolling drive their own interpolation toward the
    /// returned target. `None` when `index` is out of range or no viewport is
    /// attached.
    pub fn scroll_to_index_offset(&mut self, index: usize, align: Align) -> Option<f64> {
        let viewport = self.viewport_extent?;
        if index >= self.cache.len() {
            return None;
        }
        let start = self.cache.start_of(index);
        let size = self.cache.size_of(index);
        let end = start + size;

        let target = match align {
            Align::Start => start,
            Align::End => end - viewport,
            Align::Center => start + size / 2.0 - viewport / 2.0,
            Align::Auto => {
                let current = self.scroll_offset;
                if start >= current && end <= current + viewport {
                    current
                } else if start < current {
                    start
                } else {
                    end - viewport
                }
            }
        };
        Some(self.clamp_scroll_offset(target))
    }

    /// Returns a state snapshot for debugging and inspection.
    pub fn debug_info(&mut self) -> VirtualizerDebugInfo {
        VirtualizerDebugInfo {
            count: self.cache.len(),
            overscan: self.overscan,
            scroll_margin: self.scroll_margin,
            viewport_extent: self.viewport_extent,
            scroll_offset: self.scroll_offset,
            is_scrolling: self.is_scrolling,
            total_size: self.cache.total(),
        }
    }

    fn clamp_scroll_offset(&mut self, offset: f64) -> f64 {
        let viewport = self.viewport_extent.unwrap_or(0.0);
        let max = (self.cache.total() - viewport).max(0.0);
        offset.clamp(0.0, max)
    }

    fn clamp_committed_offset(&mut self) {
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::{Align, Virtualizer};

    fn attached(count: usize, estimate: f64, viewport: f64) -> Virtualizer {
        let mut v = Virtualizer::new(count, estimate);
        v.set_viewport_extent(Some(viewport));
        v
    }

    #[test]
    fn empty_count_yields_no_items() {
        let mut v = attached(0, 50.0, 800.0);
        assert!(v.virtual_items().is_empty());
        assert_eq!(v.total_size(), 0.0);
    }

    #[test]
    fn detached_viewport_yields_no_items() {
        let mut v = Virtualizer::new(100, 50.0);
        v.on_scroll(500.0, 0);
        assert!(v.virtual_items().is_empty());
        // Attaching makes the window computable.
        v.set_viewport_extent(Some(200.0));
        assert!(!v.virtual_items().is_empty());
    }

    #[test]
    fn window_matches_uniform_arithmetic() {
        // 1000 items x 50px, viewport 800, offset 5000: items 100..=116.
        let mut v = attached(1_000, 50.0, 800.0);
        v.on_scroll(5_000.0, 0);

        let items = v.virtual_items();
        assert_eq!(items.first().unwrap().index, 100);
        assert_eq!(items.last().unwrap().index, 116);
    }

    #[test]
    fn overscan_expands_both_edges() {
        let mut v = attached(1_000, 50.0, 800.0);
        v.set_overscan(3);
        v.on_scroll(5_000.0, 0);

        let range = v.visible_range();
        assert_eq!(range, 97..120);
    }

    #[test]
    fn overscan_clamps_at_collection_bounds() {
        let mut v = attached(20, 50.0, 800.0);
        v.set_overscan(10);
        let range = v.visible_range();
        assert_eq!(range, 0..20);
    }

    #[test]
    fn scroll_margin_widens_the_window() {
        let mut v = attached(1_000, 50.0, 800.0);
        v.on_scroll(5_000.0, 0);
        v.set_scroll_margin(100.0);

        let range = v.visible_range();
        assert_eq!(range, 98..119);
    }

    #[test]
    fn items_are_contiguous_and_ascending() {
        let mut v = attached(200, 30.0, 500.0);
        v.measure(40, 90.0);
        v.measure(41, 15.0);
        v.on_scroll(1_200.0, 0);

        let items = v.virtual_items();
        for pair in items.windows(2) {
            assert_eq!(pair[0].index + 1, pair[1].index);
            assert_eq!(pair[0].end(), pair[1].start);
        }
    }

    #[test]
    fn measured_size_takes_precedence() {
        let mut v = attached(10, 50.0, 400.0);
        v.measure(2, 125.0);

        let item = v
            .virtual_items()
            .into_iter()
            .find(|it| it.index == 2)
            .unwrap();
        assert_eq!(item.size, 125.0);
        assert_eq!(v.total_size(), 9.0 * 50.0 + 125.0);
    }

    #[test]
    fn scroll_to_offset_clamps_to_content() {
        let mut v = attached(10, 50.0, 300.0);
        v.scroll_to_offset(10_000.0);
        assert_eq!(v.scroll_offset(), 200.0);
        v.scroll_to_offset(-50.0);
        assert_eq!(v.scroll_offset(), 0.0);
        v.scroll_to_offset(f64::NAN);
        assert_eq!(v.scroll_offset(), 0.0);
    }

    #[test]
    fn scroll_to_index_aligns() {
        let mut v = attached(100, 50.0, 300.0);

        v.scroll_to_index(40, Align::Start);
        assert_eq!(v.scroll_offset(), 2_000.0);

        v.scroll_to_index(40, Align::End);
        assert_eq!(v.scroll_offset(), 2_050.0 - 300.0);

        v.scroll_to_index(40, Align::Center);
        assert_eq!(v.scroll_offset(), 2_025.0 - 150.0);
    }

    #[test]
    fn scroll_to_index_auto_keeps_visible_items_in_place() {
        let mut v = attached(100, 50.0, 300.0);
        v.scroll_to_offset(2_000.0);

        // Item 41 is fully visible: no movement.
        v.scroll_to_index(41, Align::Auto);
        assert_eq!(v.scroll_offset(), 2_000.0);

        // Item above the window: align to start.
        v.scroll_to_index(10, Align::Auto);
        assert_eq!(v.scroll_offset(), 500.0);

        // Item below the window: align to end.
        v.scroll_to_index(30, Align::Auto);
        assert_eq!(v.scroll_offset(), 1_550.0 - 300.0);
    }

    #[test]
    fn scroll_to_out_of_range_index_is_a_no_op() {
        let mut v = attached(10, 50.0, 300.0);
        v.scroll_to_offset(100.0);
        v.scroll_to_index(10, Align::Start);
        assert_eq!(v.scroll_offset(), 100.0);
        assert_eq!(v.scroll_to_index_offset(usize::MAX, Align::Start), None);
    }

    #[test]
    fn scrolling_flag_debounces() {
        let mut v = attached(100, 50.0, 300.0);
        assert!(!v.is_scrolling());

        v.on_scroll(100.0, 1_000);
        assert!(v.is_scrolling());

        // Another event before the quiet period keeps the flag set and
        // supersedes the deadline.
        assert!(!v.poll(1_100));
        v.on_scroll(150.0, 1_100);
        assert!(!v.poll(1_150));
        assert!(v.is_scrolling());

        assert!(v.poll(1_250));
        assert!(!v.is_scrolling());
    }

    #[test]
    fn cancel_pending_clears_timer_and_flag() {
        let mut v = attached(100, 50.0, 300.0);
        v.on_scroll(100.0, 0);
        v.cancel_pending();
        assert!(!v.is_scrolling());
        assert!(!v.poll(10_000));
    }

    #[test]
    fn count_change_reclamps_scroll_offset() {
        let mut v = attached(100, 50.0, 300.0);
        v.scroll_to_offset(4_000.0);
        v.set_count(10);
        assert_eq!(v.scroll_offset(), 200.0);
    }

    #[test]
    fn debug_info_reflects_state() {
        let mut v = attached(4, 25.0, 60.0);
        v.on_scroll(10.0, 0);
        let info = v.debug_info();
        assert_eq!(info.count, 4);
        assert_eq!(info.total_size, 100.0);
        assert_eq!(info.scroll_offset, 10.0);
        assert!(info.is_scrolling);
    }
}
