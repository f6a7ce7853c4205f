//! Time-boxed local cache for session lists and per-session message pages.
//!
//! Expiry is lazy: an expired entry is deleted by the read that discovers
//! it, never by a background sweep. The dashmap entry API serializes
//! same-key operations, so concurrent read-modify-write on one key cannot
//! lose updates.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::Duration;
use tokio::time::Instant;


struct CacheEntry<T> {
    written_at: Instant,
    data: T,
}

pub struct TtlCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fetch a live entry. An entry older than the TTL is treated as absent
    /// and evicted on the spot.
    pub fn get(&self, key: &str) -> Option<T> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(occupied) => {
                if occupied.get().written_at.elapsed() > self.ttl {
                    occupied.remove();
                    None
                } else {
                    Some(occupied.get().data.clone())
                }
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Store a value; always refreshes the entry's timestamp.
    pub fn set(&self, key: &str, data: T) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                written_at: Instant::now(),
                data,
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    #[cfg(test)]
    pub(crate) fn contains_entry(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
