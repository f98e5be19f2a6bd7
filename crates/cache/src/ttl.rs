use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    created_at: Instant,
    expires_at: Instant,
}

/// Snapshot of a [`TtlCache`]'s hit/miss counters (§4.8).
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A thread-safe keyed cache with a default TTL, hard capacity, oldest-first
/// eviction, and a periodic expired-entry sweep bounded to one pass per
/// `cleanup_interval` (§4.8). Can be disabled by configuration, in which case
/// every lookup misses and every insert is a no-op, while keeping the same
/// call sites in C7 unchanged.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
    default_ttl: Duration,
    capacity: usize,
    cleanup_interval: Duration,
    last_sweep: Mutex<Instant>,
    stats: Mutex<CacheStats>,
    enabled: bool,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize, default_ttl: Duration, cleanup_interval: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            capacity,
            cleanup_interval,
            last_sweep: Mutex::new(Instant::now()),
            stats: Mutex::new(CacheStats::default()),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(0, Duration::ZERO, Duration::MAX)
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        if !self.enabled {
            return None;
        }
        self.sweep_if_due();
        let mut entries = self.entries.lock().unwrap();
        let mut stats = self.stats.lock().unwrap();
        let now = Instant::now();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => {
                stats.hits += 1;
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                stats.misses += 1;
                None
            }
            None => {
                stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
        if !self.enabled {
            return;
        }
        self.sweep_if_due();
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            evict_oldest_tenth(&mut entries);
        }
        entries.insert(
            key,
            Entry {
                value,
                created_at: now,
                expires_at: now + ttl,
            },
        );
    }

    pub fn stats(&self) -> CacheStats {
        let size = self.entries.lock().unwrap().len();
        let mut stats = *self.stats.lock().unwrap();
        stats.size = size;
        stats
    }

    fn sweep_if_due(&self) {
        let mut last_sweep = self.last_sweep.lock().unwrap();
        let now = Instant::now();
        if now.duration_since(*last_sweep) < self.cleanup_interval {
            return;
        }
        *last_sweep = now;
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, entry| entry.expires_at > now);
    }
}

/// Evicts the oldest ~10% of entries by creation time (at least one), giving
/// approximate LRU-by-creation-time behavior without tracking access order.
fn evict_oldest_tenth<K: Eq + Hash + Clone, V>(entries: &mut HashMap<K, Entry<V>>) {
    let evict_count = (entries.len() / 10).max(1);
    let mut by_age: Vec<(K, Instant)> = entries
        .iter()
        .map(|(k, entry)| (k.clone(), entry.created_at))
        .collect();
    by_age.sort_by_key(|(_, created_at)| *created_at);
    for (key, _) in by_age.into_iter().take(evict_count) {
        entries.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_entry_is_absent() {
        let cache = TtlCache::new(10, Duration::from_millis(10), Duration::from_secs(60));
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let cache = TtlCache::new(4, Duration::from_secs(60), Duration::from_secs(60));
        for i in 0..10 {
            cache.insert(i, i);
        }
        assert!(cache.stats().size <= 4);
    }

    #[test]
    fn disabled_cache_never_hits() {
        let cache: TtlCache<&str, i32> = TtlCache::disabled();
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), None);
    }
}
