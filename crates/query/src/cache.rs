//! Aggregate result cache.
//!
//! Dashboard sections frequently ask for the same grouping of the same
//! snapshot (bars sorted by `max`, then by `min`, then by `mean`). This cache
//! memoizes `aggregate` results for one immutable table, keyed by the group
//! columns, the measure column and the requested statistics, with LRU
//! eviction once `max_size` entries are held.

use crate::executor::ProjectExecutor;
use crate::group_by::{aggregate, check_group_cols};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::hash::Hasher;
use log::debug;
use staystat_core::{Error, Result, Table};

/// A simple hasher for computing request fingerprints.
/// Uses FNV-1a algorithm which is fast and has good distribution.
struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::FNV_OFFSET,
        }
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state ^= *byte as u64;
            self.state = self.state.wrapping_mul(Self::FNV_PRIME);
        }
    }
}

/// Computes a fingerprint for an aggregation request.
/// Requests naming the same columns and statistics in the same order share a
/// fingerprint.
pub fn compute_request_fingerprint(group_cols: &[&str], measure: &str, stats: &[&str]) -> u64 {
    let mut hasher = FnvHasher::new();
    hasher.write(b"group");
    for col in group_cols {
        hasher.write(col.as_bytes());
        hasher.write(&[0]);
    }
    hasher.write(b"measure");
    hasher.write(measure.as_bytes());
    hasher.write(&[0]);
    hasher.write(b"stats");
    for stat in stats {
        hasher.write(stat.as_bytes());
        hasher.write(&[0]);
    }
    hasher.finish()
}

/// The request parts, kept to tell apart colliding fingerprints.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RequestKey {
    group_cols: Vec<String>,
    measure: String,
    stats: Vec<String>,
}

impl RequestKey {
    fn new(group_cols: &[&str], measure: &str, stats: &[&str]) -> Self {
        Self {
            group_cols: group_cols.iter().map(|c| String::from(*c)).collect(),
            measure: String::from(measure),
            stats: stats.iter().map(|s| String::from(*s)).collect(),
        }
    }
}

/// Cache entry with access tracking for LRU eviction.
struct CacheEntry {
    key: RequestKey,
    result: Arc<Table>,
    last_access: u64,
}

/// LRU cache of aggregation results over one table snapshot.
pub struct AggregateCache {
    /// The snapshot every cached result was computed from.
    table: Arc<Table>,
    /// Cached results indexed by fingerprint.
    cache: BTreeMap<u64, CacheEntry>,
    /// Maximum number of entries.
    max_size: usize,
    /// Global access counter for LRU tracking.
    access_counter: u64,
    /// Cache statistics.
    hits: u64,
    misses: u64,
}

impl AggregateCache {
    /// Default number of cached results.
    pub const DEFAULT_SIZE: usize = 64;

    /// Creates a cache over `table` holding at most `max_size` results.
    pub fn new(table: Arc<Table>, max_size: usize) -> Self {
        Self {
            table,
            cache: BTreeMap::new(),
            max_size: max_size.max(1),
            access_counter: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Creates a cache with the default size (64 entries).
    pub fn with_defaults(table: Arc<Table>) -> Self {
        Self::new(table, Self::DEFAULT_SIZE)
    }

    /// Returns the table snapshot this cache aggregates.
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Returns the cached result for the request, computing it on a miss.
    ///
    /// The snapshot is first projected onto `group_cols ++ [measure]`, then
    /// passed to [`aggregate`]. Errors are returned as-is and never cached.
    pub fn get_or_compute(
        &mut self,
        group_cols: &[&str],
        measure: &str,
        stats: &[&str],
    ) -> Result<Arc<Table>> {
        self.access_counter += 1;
        let fingerprint = compute_request_fingerprint(group_cols, measure, stats);
        let key = RequestKey::new(group_cols, measure, stats);

        if let Some(entry) = self.cache.get_mut(&fingerprint) {
            if entry.key == key {
                entry.last_access = self.access_counter;
                self.hits += 1;
                debug!("aggregate cache hit for {:?} over {}", group_cols, measure);
                return Ok(Arc::clone(&entry.result));
            }
        }

        self.misses += 1;
        debug!("aggregate cache miss for {:?} over {}", group_cols, measure);

        check_group_cols(group_cols)?;
        if group_cols.contains(&measure) {
            return Err(Error::invalid_argument(format!(
                "measure column {} is also a group column",
                measure
            )));
        }

        let mut columns: Vec<&str> = Vec::with_capacity(group_cols.len() + 1);
        columns.extend_from_slice(group_cols);
        columns.push(measure);
        let projected = ProjectExecutor::by_names(&columns).execute(&self.table)?;
        let result = Arc::new(aggregate(&projected, group_cols, stats)?);

        // A colliding fingerprint is simply replaced.
        if !self.cache.contains_key(&fingerprint) && self.cache.len() >= self.max_size {
            self.evict_lru();
        }
        self.cache.insert(
            fingerprint,
            CacheEntry {
                key,
                result: Arc::clone(&result),
                last_access: self.access_counter,
            },
        );
        Ok(result)
    }

    /// Evicts the least recently used entry.
    fn evict_lru(&mut self) {
        let lru_key = self
            .cache
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(k, _)| *k);

        if let Some(key) = lru_key {
            self.cache.remove(&key);
        }
    }

    /// Clears the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns cache hit count.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns cache miss count.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Returns cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
