use crate::types::{IndicatorKind, PerformanceEntry, ScreeningResult};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache key for a screening result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreenKey {
    pub indicator: IndicatorKind,
    /// Percentile in hundredths, so the key stays hashable.
    pub percentile_bp: u32,
    pub limit: usize,
}

impl ScreenKey {
    pub fn new(indicator: IndicatorKind, percentile: f64, limit: usize) -> Self {
        Self {
            indicator,
            percentile_bp: (percentile * 100.0).round() as u32,
            limit,
        }
    }
}

/// Screening results keyed by indicator, percentile and universe size.
pub type ScreeningCache = ResultCache<ScreenKey, ScreeningResult>;

/// Performance rankings keyed by the number of entries kept.
pub type PerformanceCache = ResultCache<usize, Vec<PerformanceEntry>>;

struct CacheEntry<V> {
    value: Arc<V>,
    stored_at: Instant,
    updated_at: DateTime<Utc>,
}

/// Last computed results, with a TTL deciding when a refresh is due.
///
/// Owned by the caller (the API state); the screening engine never sees it.
/// Expired entries stay readable through `get_stale` until the next insert
/// sweeps them out.
pub struct ResultCache<K, V> {
    data: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

/// Summary of a result cache.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub ttl_secs: u64,
    pub last_update: Option<DateTime<Utc>>,
    pub next_update: Option<DateTime<Utc>>,
}

impl<K: Eq + Hash, V> ResultCache<K, V> {
    /// Create a new cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    /// Get a value if it is younger than the TTL.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let entry = self.data.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Get a value regardless of age, e.g. as a fallback when the feed fails.
    pub fn get_stale(&self, key: &K) -> Option<Arc<V>> {
        self.data.get(key).map(|entry| entry.value.clone())
    }

    /// Most recently stored value, regardless of key or age.
    pub fn latest(&self) -> Option<Arc<V>> {
        self.data
            .iter()
            .max_by_key(|entry| entry.updated_at)
            .map(|entry| entry.value.clone())
    }

    /// Store a value, replacing any previous one for the key, and drop
    /// every other entry that has outlived the TTL.
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let ttl = self.ttl;
        self.data.retain(|_, entry| entry.stored_at.elapsed() < ttl);

        let value = Arc::new(value);
        self.data.insert(
            key,
            CacheEntry {
                value: value.clone(),
                stored_at: Instant::now(),
                updated_at: Utc::now(),
            },
        );
        value
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Most recent update and when it falls due for refresh.
    pub fn stats(&self) -> CacheStats {
        let last_update = self.data.iter().map(|entry| entry.updated_at).max();
        let next_update = last_update
            .and_then(|t| chrono::Duration::from_std(self.ttl).ok().map(|ttl| t + ttl));

        CacheStats {
            entries: self.data.len(),
            ttl_secs: self.ttl.as_secs(),
            last_update,
            next_update,
        }
    }
}
