//! Freshness-bounded cache for decoded registry listings.

use crate::model::gift::GiftRecord;
use std::time::{Duration, Instant};

/// Default freshness window for cached listings.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);

/// Single-entry listing cache.
///
/// Entries expire by age; a zero TTL keeps the cache permanently stale, which
/// disables it without a separate code path.
#[derive(Debug)]
pub(crate) struct ListingCache {
    ttl: Duration,
    entry: Option<CachedListing>,
}

#[derive(Debug)]
struct CachedListing {
    records: Vec<GiftRecord>,
    fetched_at: Instant,
}

impl ListingCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Returns the cached listing while it is still fresh.
    pub(crate) fn get(&self) -> Option<&[GiftRecord]> {
        let entry = self.entry.as_ref()?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(&entry.records)
        } else {
            None
        }
    }

    pub(crate) fn put(&mut self, records: Vec<GiftRecord>) {
        self.entry = Some(CachedListing {
            records,
            fetched_at: Instant::now(),
        });
    }

    pub(crate) fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gift::{GiftCategory, GiftRecord};

    fn sample() -> Vec<GiftRecord> {
        vec![GiftRecord::new("Panela", GiftCategory::Cozinha).unwrap()]
    }

    #[test]
    fn fresh_entry_is_served() {
        let mut cache = ListingCache::new(Duration::from_secs(60));
        cache.put(sample());
        let served = cache.get().expect("entry should still be fresh");
        assert_eq!(served.len(), 1);
    }

    #[test]
    fn zero_ttl_never_serves() {
        let mut cache = ListingCache::new(Duration::ZERO);
        cache.put(sample());
        assert!(cache.get().is_none());
    }

    #[test]
    fn clear_drops_entry() {
        let mut cache = ListingCache::new(Duration::from_secs(60));
        cache.put(sample());
        cache.clear();
        assert!(cache.get().is_none());
    }
}
