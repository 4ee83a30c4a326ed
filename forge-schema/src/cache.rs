//! Caching of parse results.
//!
//! Parsing the same source twice yields the same [`Parsed`] value, so results
//! are memoised by their source text and shared behind [`Arc`].
//!
//! # Examples
//!
//! ```rust
//! use forge_schema::cache::SchemaCache;
//! use std::sync::Arc;
//!
//! let cache = SchemaCache::new();
//!
//! let first = cache.get_or_parse("model User { id Int @id }");
//! let second = cache.get_or_parse("model User { id Int @id }");
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::parser::{Parsed, parse_with};
use crate::validator::Validator;

/// Number of results kept by a cache unless configured otherwise.
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// A bounded cache of parse results keyed by source text.
///
/// Every entry is validated with the cache's [`Validator`]. When the cache
/// is full the oldest entry is evicted. At most one lock is held at a time.
#[derive(Debug)]
pub struct SchemaCache {
    entries: RwLock<IndexMap<Box<str>, Arc<Parsed>>>,
    max_entries: usize,
    validator: Validator,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Statistics for the schema cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries dropped to stay within the size limit.
    pub evictions: u64,
    /// Number of results currently cached.
    pub cached_count: usize,
}

impl CacheStats {
    /// Get the cache hit rate.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self {
            entries: RwLock::default(),
            max_entries: DEFAULT_MAX_ENTRIES,
            validator: Validator::default(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }
}

impl SchemaCache {
    /// Create a new empty cache using the default validation settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that validates with the given validator.
    pub fn with_validator(validator: Validator) -> Self {
        Self {
            validator,
            ..Self::default()
        }
    }

    /// Limit the number of cached results (at least one).
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// Get a cached result or parse and cache a new one.
    pub fn get_or_parse(&self, source: &str) -> Arc<Parsed> {
        let cached = self.entries.read().get(source).cloned();
        if let Some(parsed) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("Schema cache hit ({} bytes)", source.len());
            return parsed;
        }

        let parsed = Arc::new(parse_with(source, &self.validator));
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("Schema cache miss ({} bytes)", source.len());

        let mut entries = self.entries.write();
        // Another thread may have parsed the same source meanwhile; keep the first.
        if let Some(existing) = entries.get(source) {
            return Arc::clone(existing);
        }
        while entries.len() >= self.max_entries {
            entries.shift_remove_index(0);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        entries.insert(source.into(), Arc::clone(&parsed));

        parsed
    }

    /// Check if a source is cached.
    pub fn contains(&self, source: &str) -> bool {
        self.entries.read().contains_key(source)
    }

    /// Clear the cache.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            cached_count: self.len(),
        }
    }

    /// Get the number of cached results.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove a source from the cache.
    pub fn remove(&self, source: &str) -> bool {
        self.entries.write().shift_remove(source).is_some()
    }
}
