// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-owned memoization of query results with TTL eviction.

use alloc::string::String;

use hashbrown::HashMap;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_ms: u64,
}

/// Caches per-query derived values (typically filtered index sets) with a
/// time-to-live.
///
/// The cache is an explicit object owned by the host and passed to whatever
/// runs the search, never process-wide state. Like the timers in
/// `windrow_timing`, it is host-clock-driven: every operation takes a
/// `now_ms` timestamp, so TTL behavior is deterministic under test.
///
/// An entry is live for `ttl_ms` milliseconds after insertion. Expired
/// entries miss on [`get`](Self::get) and are evicted on access;
/// [`evict_expired`](Self::evict_expired) sweeps the rest when the host
/// wants bounded memory.
///
/// ```rust
/// use windrow_paging::QueryCache;
///
/// let mut cache = QueryCache::new(30_000);
/// cache.insert("ann", vec![0usize, 2], 1_000);
///
/// assert_eq!(cache.get("ann", 10_000), Some(&vec![0, 2]));
/// // 30s later the entry has expired.
/// assert_eq!(cache.get("ann", 31_000), None);
/// ```
#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    ttl_ms: u64,
    entries: HashMap<String, Entry<V>>,
}

impl<V> QueryCache<V> {
    /// Creates an empty cache whose entries live for `ttl_ms` milliseconds.
    #[must_use]
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            entries: HashMap::new(),
        }
    }

    /// Returns the configured time-to-live in milliseconds.
    #[must_use]
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Sets the time-to-live applied on subsequent reads.
    pub fn set_ttl_ms(&mut self, ttl_ms: u64) {
        self.ttl_ms = ttl_ms;
    }

    /// Returns the number of entries, live or not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores `value` under `query`, replacing and re-timestamping any
    /// previous entry.
    pub fn insert(&mut self, query: impl Into<String>, value: V, now_ms: u64) {
        self.entries.insert(
            query.into(),
            Entry {
                value,
                inserted_ms: now_ms,
            },
        );
    }

    /// Looks up the live value for `query`.
    ///
    /// An entry older than the TTL misses and is evicted by the lookup.
    pub fn get(&mut self, query: &str, now_ms: u64) -> Option<&V> {
        let live = match self.entries.get(query) {
            Some(entry) => now_ms.saturating_sub(entry.inserted_ms) < self.ttl_ms,
            None => return None,
        };
        if !live {
            self.entries.remove(query);
            return None;
        }
        self.entries.get(query).map(|entry| &entry.value)
    }

    /// Removes every expired entry; returns how many were evicted.
    pub fn evict_expired(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl_ms;
        self.entries
            .retain(|_, entry| now_ms.saturating_sub(entry.inserted_ms) < ttl);
        before - self.entries.len()
    }

    /// Drops all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::QueryCache;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn hit_within_ttl_miss_after() {
        let mut cache = QueryCache::new(30_000);
        cache.insert("ann", vec![1usize, 2], 1_000);

        assert_eq!(cache.get("ann", 1_000), Some(&vec![1, 2]));
        assert_eq!(cache.get("ann", 30_999), Some(&vec![1, 2]));
        assert_eq!(cache.get("ann", 31_000), None);
        // The expired entry was evicted by the miss.
        assert!(cache.is_empty());
    }

    #[test]
    fn reinsert_refreshes_the_timestamp() {
        let mut cache = QueryCache::new(1_000);
        cache.insert("q", 1, 0);
        cache.insert("q", 2, 900);

        assert_eq!(cache.get("q", 1_500), Some(&2));
        assert_eq!(cache.get("q", 1_900), None);
    }

    #[test]
    fn evict_expired_sweeps_only_stale_entries() {
        let mut cache = QueryCache::<Vec<usize>>::new(1_000);
        cache.insert("old", vec![], 0);
        cache.insert("new", vec![7], 900);

        assert_eq!(cache.evict_expired(1_100), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("new", 1_100), Some(&vec![7]));
    }

    #[test]
    fn unknown_query_misses() {
        let mut cache = QueryCache::<usize>::new(1_000);
        assert_eq!(cache.get("nope", 0), None);
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = QueryCache::new(1_000);
        cache.insert("a", 1, 0);
        cache.insert("b", 2, 0);
        cache.clear();
        assert!(cache.is_empty());
    }
}
