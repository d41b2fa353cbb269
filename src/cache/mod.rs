//! In-memory cache with per-entry expiration.
//!
//! # Design Decisions
//! - One instance per worker process; never shared across workers, so
//!   workers may legitimately hold different values for the same key
//! - Reads enforce validity: an expired entry behaves exactly like a
//!   never-stored key
//! - Expired entries are evicted lazily by the `get` that observes them
//! - A zero TTL means the entry expires immediately

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::clock::Clock;

struct Entry<V> {
    value: V,
    deadline: Instant,
}

/// A key/value store where every entry carries an absolute expiration
/// instant. Get and put are constant time.
pub struct ExpiringCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ExpiringCache<V> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Store `value` under `key`, valid for `ttl` from now. Overwrites any
    /// existing entry under the same key.
    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let deadline = self.clock.now() + ttl;
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(key.into(), Entry { value, deadline });
    }

    /// Return the value under `key` if one exists and has not expired.
    /// "Never stored" and "expired" are indistinguishable misses.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if now < entry.deadline => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        let entries = self.entries.lock().expect("cache mutex poisoned");
        entries.values().filter(|e| now < e.deadline).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache_with_clock() -> (ExpiringCache<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (ExpiringCache::new(clock.clone()), clock)
    }

    #[test]
    fn put_then_get_returns_value() {
        let (cache, _clock) = cache_with_clock();
        cache.put("k", "v".to_string(), Duration::from_secs(300));
        assert_eq!(cache.get("k"), Some("v".to_string()));
    }

    #[test]
    fn get_after_ttl_is_a_miss() {
        let (cache, clock) = cache_with_clock();
        cache.put("k", "v".to_string(), Duration::from_secs(300));
        clock.advance(Duration::from_secs(301));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn get_at_exact_deadline_is_a_miss() {
        let (cache, clock) = cache_with_clock();
        cache.put("k", "v".to_string(), Duration::from_secs(300));
        clock.advance(Duration::from_secs(300));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn never_stored_key_is_a_miss() {
        let (cache, _clock) = cache_with_clock();
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn put_overwrites_existing_entry() {
        let (cache, clock) = cache_with_clock();
        cache.put("k", "old".to_string(), Duration::from_secs(10));
        clock.advance(Duration::from_secs(5));
        cache.put("k", "new".to_string(), Duration::from_secs(10));
        clock.advance(Duration::from_secs(6));
        // The rewrite pushed the deadline out past the original one.
        assert_eq!(cache.get("k"), Some("new".to_string()));
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let (cache, _clock) = cache_with_clock();
        cache.put("k", "v".to_string(), Duration::ZERO);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let (cache, clock) = cache_with_clock();
        cache.put("a", "v".to_string(), Duration::from_secs(1));
        cache.put("b", "v".to_string(), Duration::from_secs(600));
        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some("v".to_string()));
    }
}
