//! Cache of compiled native regexes.
//!
//! Each settled edit recompiles the current pattern, and users flip between
//! a handful of patterns and flag combinations while editing. The cache keys
//! compiled regexes on the compile-relevant flag letters plus the pattern
//! source so those round trips skip compilation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use regex::Regex;

/// Default maximum cache size.
pub const DEFAULT_CACHE_SIZE: usize = 100;

/// A cache for compiled regular expressions.
///
/// When full, the oldest inserted entry is evicted.
pub struct RegexCache {
    cache: RwLock<Entries>,
    max_size: usize,
    total_hits: AtomicUsize,
    total_misses: AtomicUsize,
}

struct Entries {
    map: HashMap<String, Arc<Regex>>,
    order: Vec<String>,
}

/// Build the cache key for a pattern compiled under the given flag letters.
#[must_use]
pub fn cache_key(pattern: &str, compile_flags: &str) -> String {
    format!("{compile_flags}/{pattern}")
}

impl RegexCache {
    /// Create a new regex cache with the specified maximum size.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            cache: RwLock::new(Entries {
                map: HashMap::with_capacity(max_size),
                order: Vec::with_capacity(max_size),
            }),
            max_size,
            total_hits: AtomicUsize::new(0),
            total_misses: AtomicUsize::new(0),
        }
    }

    /// Return the cached regex for `key`, compiling it with `compile` on a miss.
    ///
    /// # Errors
    ///
    /// Returns the compiler's error unchanged; failures are not cached.
    pub fn get_or_compile<F>(&self, key: &str, compile: F) -> Result<Arc<Regex>, regex::Error>
    where
        F: FnOnce() -> Result<Regex, regex::Error>,
    {
        // Poisoned locks are recovered.
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(regex) = cache.map.get(key) {
                self.total_hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Arc::clone(regex));
            }
        }

        self.total_misses.fetch_add(1, Ordering::Relaxed);
        let regex = Arc::new(compile()?);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have inserted while we compiled.
        if let Some(existing) = cache.map.get(key) {
            return Ok(Arc::clone(existing));
        }

        if cache.map.len() >= self.max_size && !cache.order.is_empty() {
            let oldest = cache.order.remove(0);
            cache.map.remove(&oldest);
        }

        cache.map.insert(key.to_string(), Arc::clone(&regex));
        cache.order.push(key.to_string());

        Ok(regex)
    }

    /// Check if a key is cached.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.map.contains_key(key)
    }

    /// Get the current number of cached regexes.
    #[must_use]
    pub fn len(&self) -> usize {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.map.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            max_size: self.max_size,
            total_hits: self.total_hits.load(Ordering::Relaxed),
            total_misses: self.total_misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl std::fmt::Debug for RegexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexCache")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Statistics about a regex cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of cached regexes.
    pub size: usize,
    /// Maximum cache size.
    pub max_size: usize,
    /// Total cache hits.
    pub total_hits: usize,
    /// Total cache misses.
    pub total_misses: usize,
}

impl CacheStats {
    /// Get the cache hit rate as a ratio (0.0 to 1.0).
    ///
    /// Returns 1.0 if no accesses have been made.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_hits + self.total_misses;
        if total == 0 {
            1.0
        } else {
            self.total_hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> impl FnOnce() -> Result<Regex, regex::Error> + '_ {
        move || Regex::new(pattern)
    }

    #[test]
    fn cache_returns_shared_regex() {
        let cache = RegexCache::new(10);

        let r1 = cache.get_or_compile("/\\d+", compile(r"\d+")).unwrap();
        let r2 = cache.get_or_compile("/\\d+", compile(r"\d+")).unwrap();

        assert!(Arc::ptr_eq(&r1, &r2));
    }

    #[test]
    fn flags_are_part_of_the_key() {
        assert_ne!(cache_key("a", "i"), cache_key("a", ""));
        assert_ne!(cache_key("i/a", ""), cache_key("a", "i/"));
    }

    #[test]
    fn cache_eviction() {
        let cache = RegexCache::new(2);

        cache.get_or_compile("a+", compile("a+")).unwrap();
        cache.get_or_compile("b+", compile("b+")).unwrap();
        assert_eq!(cache.len(), 2);

        // Evicts "a+"
        cache.get_or_compile("c+", compile("c+")).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a+"));
        assert!(cache.contains("b+"));
        assert!(cache.contains("c+"));
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = RegexCache::new(10);
        assert!(cache.get_or_compile("[", compile("[")).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let cache = RegexCache::new(10);
        assert!((cache.stats().hit_rate() - 1.0).abs() < f64::EPSILON);

        cache.get_or_compile("x", compile("x")).unwrap();
        cache.get_or_compile("x", compile("x")).unwrap();
        cache.get_or_compile("x", compile("x")).unwrap();
        cache.get_or_compile("y", compile("y")).unwrap();

        let stats = cache.stats();
        assert_eq!(stats.total_hits, 2);
        assert_eq!(stats.total_misses, 2);
        assert!((stats.hit_rate() - 0.5).abs() < 0.001);
    }
}
