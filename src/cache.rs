//! Short-TTL memoization of search results.
//!
//! Absorbs repeated identical searches so the upstream provider is hit at
//! most once per key per TTL window. Empty result lists are cached too:
//! a query known to have no matches should not keep punishing upstream.
//!
//! There is no eviction beyond TTL expiry; capacity is bounded by distinct
//! key cardinality within the window, which is acceptable at the request
//! volume this backend expects.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::model::RecipeDetail;

/// Time source for the cache, injected so tests can advance time
/// deterministically instead of sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time via [`Instant`].
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Cache key: trimmed query text plus pagination window.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct CacheKey {
    pub query: String,
    pub offset: u32,
    pub count: u32,
}

impl CacheKey {
    pub fn new(query: &str, offset: u32, count: u32) -> Self {
        Self {
            query: query.trim().to_string(),
            offset,
            count,
        }
    }
}

struct CacheEntry {
    results: Vec<RecipeDetail>,
    inserted_at: Instant,
}

/// Thread-safe TTL cache for normalized search results.
///
/// A mutex-guarded map is enough here: contention is low and entries are
/// small. Expiry is fixed from insertion, independent of access.
pub struct ResultCache<C: Clock = SystemClock> {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: C,
}

impl ResultCache<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> ResultCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Look up a cached result list. Expired entries are removed and
    /// treated as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<RecipeDetail>> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if self.clock.now().duration_since(entry.inserted_at) <= self.ttl => {
                Some(entry.results.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a result list (possibly empty) under the key.
    pub fn set(&self, key: CacheKey, results: Vec<RecipeDetail>) {
        let entry = CacheEntry {
            results,
            inserted_at: self.clock.now(),
        };
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .insert(key, entry);
    }

    /// Number of entries currently held, including not-yet-collected
    /// expired ones.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
