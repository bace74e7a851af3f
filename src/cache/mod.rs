//! Content-addressed vector cache.
//!
//! One [`moka`] cache holds two entry classes under disjoint key prefixes
//! (see [`crate::hashing`]): embedding vectors with a long absolute TTL, and
//! result lists with a short absolute TTL plus a sliding window that resets
//! on read hits. Embeddings for fixed text never change; result lists go
//! stale as the underlying document set changes, so the two staleness
//! tolerances get independent policies.
//!
//! The cache is fail-open: it is a performance optimization, never a
//! correctness dependency. A decode failure is logged and reported as a
//! miss; no cache-internal failure surfaces to callers.

mod entry;


use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::Config;
use crate::hashing::{embedding_key, results_key};
use entry::{CacheEntry, CachePayload, EntryExpiry};

/// Shared cache for embeddings and reranked result lists.
///
/// Keyed by content fingerprint; safe for concurrent use (reads and writes
/// of distinct keys do not block each other, and a write to a key followed
/// by a read of the same key observes the write).
pub struct VectorCache {
    entries: Cache<String, CacheEntry>,
    embedding_ttl: Duration,
    results_ttl: Duration,
    sliding_window: Duration,
}

impl VectorCache {
    /// Creates a cache with the configured TTLs and byte budget.
    pub fn new(config: &Config) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.cache_capacity_bytes)
            .weigher(|_key: &String, entry: &CacheEntry| entry.weight)
            .expire_after(EntryExpiry)
            .build();

        Self {
            entries,
            embedding_ttl: config.embedding_ttl,
            results_ttl: config.results_ttl,
            sliding_window: config.sliding_window,
        }
    }

    /// Returns the cached embedding for `text`, or `None` if missing or expired.
    pub fn get_embedding(&self, text: &str) -> Option<Vec<f32>> {
        let key = embedding_key(text);
        match self.entries.get(&key)?.payload {
            CachePayload::Embedding(vector) => Some(vector.as_ref().clone()),
            CachePayload::Results(_) => {
                warn!(key = %key, "cache class mismatch: expected embedding entry");
                None
            }
        }
    }

    /// Stores an embedding under `text`'s fingerprint with the default TTL.
    pub fn put_embedding(&self, text: &str, vector: Vec<f32>) {
        self.put_embedding_with_ttl(text, vector, self.embedding_ttl);
    }

    /// Stores an embedding with an explicit absolute TTL.
    pub fn put_embedding_with_ttl(&self, text: &str, vector: Vec<f32>, ttl: Duration) {
        let key = embedding_key(text);
        let weight = approximate_weight(key.len() + vector.len() * 4);
        self.entries
            .insert(key, CacheEntry::embedding(Arc::new(vector), ttl, weight));
    }

    /// Returns cached results for `query`, or `None` if missing or expired.
    ///
    /// A successful read resets the entry's sliding window. A payload that no
    /// longer decodes as `Vec<T>` is treated as a miss (fail-open).
    pub fn get_results<T: DeserializeOwned>(&self, query: &str) -> Option<Vec<T>> {
        let key = results_key(query, std::any::type_name::<T>());
        match self.entries.get(&key)?.payload {
            CachePayload::Results(value) => match serde_json::from_value(value.as_ref().clone()) {
                Ok(results) => Some(results),
                Err(e) => {
                    warn!(key = %key, error = %e, "discarding undecodable cached results");
                    self.entries.invalidate(&key);
                    None
                }
            },
            CachePayload::Embedding(_) => {
                warn!(key = %key, "cache class mismatch: expected results entry");
                None
            }
        }
    }

    /// Stores a result list for `query` with the default TTL and sliding window.
    pub fn put_results<T: Serialize>(&self, query: &str, results: &[T]) {
        self.put_results_with_ttl(query, results, self.results_ttl, self.sliding_window);
    }

    /// Stores a result list with explicit absolute TTL and sliding window.
    pub fn put_results_with_ttl<T: Serialize>(
        &self,
        query: &str,
        results: &[T],
        ttl: Duration,
        sliding_window: Duration,
    ) {
        let key = results_key(query, std::any::type_name::<T>());
        let value = match serde_json::to_value(results) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to serialize results; skipping cache store");
                return;
            }
        };

        let weight = approximate_weight(key.len() + json_weight(&value));
        self.entries.insert(
            key,
            CacheEntry::results(Arc::new(value), ttl, sliding_window, weight),
        );
    }

    /// Unconditionally evicts a single entry. Idempotent on missing keys.
    pub fn remove(&self, key: &str) {
        self.entries.invalidate(key);
    }

    /// Evicts the embedding entry for `text`, if present.
    pub fn remove_embedding(&self, text: &str) {
        self.remove(&embedding_key(text));
    }

    /// Evicts the result-list entry for `query`, if present.
    pub fn remove_results<T>(&self, query: &str) {
        self.remove(&results_key(query, std::any::type_name::<T>()));
    }

    /// Evicts every entry.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Returns the approximate weighted size of the cache in bytes.
    pub fn weighted_size(&self) -> u64 {
        self.entries.weighted_size()
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for VectorCache {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl std::fmt::Debug for VectorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorCache")
            .field("entries", &self.entries.entry_count())
            .field("embedding_ttl", &self.embedding_ttl)
            .field("results_ttl", &self.results_ttl)
            .field("sliding_window", &self.sliding_window)
            .finish()
    }
}

fn approximate_weight(bytes: usize) -> u32 {
    u32::try_from(bytes).unwrap_or(u32::MAX)
}

/// Rough in-memory cost of a JSON payload, without re-serializing it.
fn json_weight(value: &serde_json::Value) -> usize {
    use serde_json::Value;

    match value {
        Value::Null | Value::Bool(_) => 1,
        Value::Number(_) => 8,
        Value::String(s) => s.len(),
        Value::Array(items) => items.iter().map(json_weight).sum::<usize>() + items.len(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| k.len() + json_weight(v))
            .sum::<usize>(),
    }
}
