//! A small keyed cache for values that go stale on their own, such as derived
//! market prices that only need recomputing every few minutes.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// The TTL used when the caller doesn't specify one.
const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached value and the instant it stops being valid.
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// A cache whose entries expire a fixed duration after they are written.
///
/// Expiry is write-time only: reading an entry does not extend its life, and
/// overwriting a key always restarts its clock. Expired entries are removed
/// lazily, by the first lookup that observes them; there is no background
/// sweep, so an entry that is never looked up again stays in memory. That
/// trade-off suits the small, infrequently-queried caches this is used for.
pub struct ExpiringCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V> ExpiringCache<K, V> {
    /// Creates a cache with the default five-minute TTL.
    pub fn new() -> ExpiringCache<K, V> {
        ExpiringCache::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache whose entries live for `ttl` after each write.
    pub fn with_ttl(ttl: Duration) -> ExpiringCache<K, V> {
        ExpiringCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Stores `value` under `key`, expiring `ttl` from now. Any existing entry
    /// for the key is replaced outright, whatever its remaining life was.
    pub fn set(&mut self, key: K, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Returns the value for `key` if one is present and still live. An entry
    /// whose expiry has been reached is removed and treated as absent.
    pub fn try_get(&mut self, key: &K) -> Option<&V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.expires_at <= Instant::now(),
            None => return None,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Returns the TTL applied to each write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K: Eq + Hash, V> Default for ExpiringCache<K, V> {
    fn default() -> ExpiringCache<K, V> {
        ExpiringCache::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn fresh_entries_are_returned() {
        let mut cache = ExpiringCache::with_ttl(Duration::from_secs(60));

        cache.set("gold", 117);

        assert_eq!(cache.try_get(&"gold"), Some(&117));
        assert_eq!(cache.try_get(&"silver"), None);
    }

    #[test]
    fn expired_entries_are_removed_and_stay_gone() {
        let mut cache = ExpiringCache::with_ttl(Duration::from_millis(10));

        cache.set("gold", 117);
        sleep(Duration::from_millis(20));

        assert_eq!(cache.try_get(&"gold"), None);

        // The entry must not come back on a second look.
        assert_eq!(cache.try_get(&"gold"), None);
    }

    #[test]
    fn reads_do_not_extend_an_entrys_life() {
        let mut cache = ExpiringCache::with_ttl(Duration::from_millis(40));

        cache.set("gold", 117);

        sleep(Duration::from_millis(25));
        assert_eq!(cache.try_get(&"gold"), Some(&117));

        // If the read above had refreshed the expiry, the entry would still be
        // live here.
        sleep(Duration::from_millis(25));
        assert_eq!(cache.try_get(&"gold"), None);
    }

    #[test]
    fn overwriting_a_key_restarts_its_clock() {
        let mut cache = ExpiringCache::with_ttl(Duration::from_millis(40));

        cache.set("gold", 117);
        sleep(Duration::from_millis(25));

        cache.set("gold", 254);
        sleep(Duration::from_millis(25));

        // 50ms after the first write but only 25ms after the second.
        assert_eq!(cache.try_get(&"gold"), Some(&254));
    }

    #[test]
    fn default_ttl_is_five_minutes() {
        let cache: ExpiringCache<&str, u32> = ExpiringCache::new();
        assert_eq!(cache.ttl(), Duration::from_secs(300));
    }
}
