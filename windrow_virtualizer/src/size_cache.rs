// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measured-size cache with prefix-sum offset queries.

use alloc::vec::Vec;
use core::ops::Range;

/// Fallback extent used when an estimate or measurement is not a positive,
/// finite number.
const FALLBACK_EXTENT: f64 = 1.0;

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        FALLBACK_EXTENT
    }
}

/// Per-index item sizes: estimates overridden by real measurements.
///
/// The cache holds one resolved size per index in `0..len`. An index starts
/// out with an estimated size and is upgraded in place when the host reports
/// a real measurement via [`measure`](Self::measure). Measured sizes take
/// precedence over estimates until the entry itself is dropped.
///
/// The cache is keyed by **index**, not item identity. Resizing via
/// [`set_len`](Self::set_len) keeps the leading `min(old, new)` entries and
/// invalidates exactly the trailing ones; hosts that reorder their data while
/// keeping the same length should call
/// [`reset_measurements`](Self::reset_measurements).
///
/// Offsets are a monotonic prefix sum over the resolved sizes, rebuilt lazily
/// from the first index changed since the last query. Queries therefore take
/// `&mut self`, mirroring the measure-then-read cycle of a render pass.
///
/// ```rust
/// use windrow_virtualizer::SizeCache;
///
/// let mut cache = SizeCache::new(10, 25.0);
/// assert_eq!(cache.total(), 250.0);
///
/// cache.measure(3, 40.0);
/// assert_eq!(cache.size_of(3), 40.0);
/// assert_eq!(cache.start_of(4), 3.0 * 25.0 + 40.0);
/// ```
#[derive(Debug, Clone)]
pub struct SizeCache {
    estimate: f64,
    sizes: Vec<f64>,
    measured: Vec<bool>,
    /// `starts[i]` is the cumulative extent of items `0..i`.
    starts: Vec<f64>,
    /// Entries of `starts` below this index are valid.
    starts_valid_to: usize,
}

impl SizeCache {
    /// Creates a cache of `len` items, all sized by a uniform estimate.
    ///
    /// Estimates that are not positive and finite are replaced by a `1.0`
    /// fallback rather than rejected.
    #[must_use]
    pub fn new(len: usize, estimate: f64) -> Self {
        let estimate = sanitize_extent(estimate);
        let mut cache = Self {
            estimate,
            sizes: Vec::new(),
            measured: Vec::new(),
            starts: Vec::new(),
            starts_valid_to: 0,
        };
        cache.set_len(len);
        cache
    }

    /// Creates a cache of `len` items with a per-index estimate function.
    ///
    /// `uniform_estimate` is retained for entries added by later
    /// [`set_len`](Self::set_len) growth.
    #[must_use]
    pub fn with_estimate_fn(
        len: usize,
        uniform_estimate: f64,
        mut estimate: impl FnMut(usize) -> f64,
    ) -> Self {
        let mut cache = Self::new(0, uniform_estimate);
        cache.set_len_with(len, &mut estimate);
        cache
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns `true` if the cache tracks no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Returns the uniform estimate used for unmeasured entries.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Resizes to `len` items, filling growth with the uniform estimate.
    ///
    /// Leading entries (and their measurements) survive; trailing entries are
    /// dropped.
    pub fn set_len(&mut self, len: usize) {
        let estimate = self.estimate;
        self.set_len_with(len, &mut move |_| estimate);
    }

    /// Resizes to `len` items, filling growth from `estimate(index)`.
    pub fn set_len_with(&mut self, len: usize, estimate: &mut dyn FnMut(usize) -> f64) {
        let old = self.sizes.len();
        if len == old {
            return;
        }
        if len < old {
            self.sizes.truncate(len);
            self.measured.truncate(len);
        } else {
            self.sizes.reserve(len - old);
            self.measured.reserve(len - old);
            for i in old..len {
                self.sizes.push(sanitize_extent(estimate(i)));
                self.measured.push(false);
            }
        }
        self.invalidate_from(old.min(len));
    }

    /// Records a real measurement for `index`.
    ///
    /// Out-of-range indices and non-finite or non-positive sizes are ignored;
    /// the entry keeps its previous value until a valid measurement arrives.
    pub fn measure(&mut self, index: usize, size: f64) {
        if index >= self.sizes.len() || !size.is_finite() || size <= 0.0 {
            return;
        }
        self.measured[index] = true;
        if self.sizes[index] != size {
            self.sizes[index] = size;
            self.invalidate_from(index);
        }
    }

    /// Returns `true` if `index` holds a measured (not estimated) size.
    #[must_use]
    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Discards all measurements, reverting every entry to the uniform estimate.
    pub fn reset_measurements(&mut self) {
        for (size, measured) in self.sizes.iter_mut().zip(self.measured.iter_mut()) {
            *size = self.estimate;
            *measured = false;
        }
        self.invalidate_from(0);
    }

    /// Returns the resolved size of `index`, or `0.0` when out of range.
    #[must_use]
    pub fn size_of(&self, index: usize) -> f64 {
        self.sizes.get(index).copied().unwrap_or(0.0)
    }

    /// Returns the cumulative offset of items before `index`.
    ///
    /// `start_of(len)` is the total extent. Indices beyond `len` clamp to it.
    pub fn start_of(&mut self, index: usize) -> f64 {
        let len = self.sizes.len();
        if index >= len {
            return self.total();
        }
        self.ensure_starts(index + 1);
        self.starts[index]
    }

    /// Returns the end offset of `index` (`start + size`).
    pub fn end_of(&mut self, index: usize) -> f64 {
        self.start_of(index) + self.size_of(index)
    }

    /// Returns the sum of all resolved sizes.
    pub fn total(&mut self) -> f64 {
        let len = self.sizes.len();
        if len == 0 {
            return 0.0;
        }
        self.ensure_starts(len);
        self.starts[len - 1] + self.sizes[len - 1]
    }

    /// Returns the index of the item containing `offset`.
    ///
    /// Binary search over the monotonic prefix sums: the first index whose
    /// end offset exceeds `offset`. Offsets at or below zero map to `0`;
    /// offsets at or beyond the total clamp to `len - 1`. Returns `0` for an
    /// empty cache.
    pub fn index_at(&mut self, offset: f64) -> usize {
        let len = self.sizes.len();
        if len == 0 || offset <= 0.0 {
            return 0;
        }
        self.ensure_starts(len);
        // Number of items starting at or before `offset`, minus the one
        // containing it.
        let below = self.starts.partition_point(|&start| start <= offset);
        below.saturating_sub(1).min(len - 1)
    }

    /// Forward-scan equivalent of [`index_at`](Self::index_at).
    ///
    /// Walks items from the front until the running offset passes `offset`.
    /// Agrees with the binary search for every monotonic model; kept as an
    /// explicit alternative for hosts that interleave size mutation with the
    /// walk and want the scan's incremental reads.
    pub fn index_at_linear(&mut self, offset: f64) -> usize {
        let len = self.sizes.len();
        if len == 0 {
            return 0;
        }
        let mut end = 0.0;
        for (i, &size) in self.sizes.iter().enumerate() {
            end += size;
            if end > offset {
                return i;
            }
        }
        len - 1
    }

    /// Returns the indices that must be realized to cover `[lo, hi)`.
    ///
    /// This spans every index whose `[start, end)` intersects the window and
    /// additionally the item containing the window's end offset, so an item
    /// starting exactly at `hi` is included. Empty when the window is empty
    /// or lies entirely outside the content.
    pub fn range_covering(&mut self, lo: f64, hi: f64) -> Range<usize> {
        let len = self.sizes.len();
        if len == 0 || hi <= lo {
            return 0..0;
        }
        let total = self.total();
        if lo >= total || hi <= 0.0 {
            return 0..0;
        }
        let start = self.index_at(lo.max(0.0));
        let end = self.index_at(hi) + 1;
        start..end.max(start)
    }

    fn invalidate_from(&mut self, index: usize) {
        self.starts_valid_to = self.starts_valid_to.min(index);
    }

    fn ensure_starts(&mut self, upto: usize) {
        let len = self.sizes.len();
        self.starts.resize(len, 0.0);
        let upto = upto.min(len);
        if self.starts_valid_to >= upto {
            return;
        }
        let mut offset = if self.starts_valid_to == 0 {
            0.0
        } else {
            self.starts[self.starts_valid_to - 1] + self.sizes[self.starts_valid_to - 1]
        };
        // Rebuild through the end: trailing queries usually follow.
        for i in self.starts_valid_to..len {
            self.starts[i] = offset;
            offset += self.sizes[i];
        }
        self.starts_valid_to = len;
    }
}
