//! Cache entry representation and per-entry expiration policy.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;

/// Stored payload, one variant per cache class.
#[derive(Clone, Debug)]
pub(crate) enum CachePayload {
    /// A computed embedding vector.
    Embedding(Arc<Vec<f32>>),
    /// A serialized result list (JSON array).
    Results(Arc<serde_json::Value>),
}

/// One cache entry: payload plus its expiration policy and weight.
///
/// `sliding` is only set for result entries; embedding entries expire on
/// their absolute TTL alone.
#[derive(Clone, Debug)]
pub(crate) struct CacheEntry {
    pub(crate) payload: CachePayload,
    pub(crate) ttl: Duration,
    pub(crate) sliding: Option<Duration>,
    pub(crate) weight: u32,
}

impl CacheEntry {
    pub(crate) fn embedding(vector: Arc<Vec<f32>>, ttl: Duration, weight: u32) -> Self {
        Self {
            payload: CachePayload::Embedding(vector),
            ttl,
            sliding: None,
            weight,
        }
    }

    pub(crate) fn results(
        value: Arc<serde_json::Value>,
        ttl: Duration,
        sliding: Duration,
        weight: u32,
    ) -> Self {
        Self {
            payload: CachePayload::Results(value),
            ttl,
            sliding: Some(sliding),
            weight,
        }
    }

    /// Expiration from a write: the sliding window applies alongside the
    /// absolute TTL, but can only shorten it.
    fn initial_expiry(&self) -> Duration {
        match self.sliding {
            Some(window) => self.ttl.min(window),
            None => self.ttl,
        }
    }
}

/// Per-entry expiration: absolute TTL for every entry, plus a sliding
/// window for result entries that resets on each successful read, never
/// past the entry's absolute deadline.
pub(crate) struct EntryExpiry;

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.initial_expiry())
    }

    fn expire_after_read(
        &self,
        _key: &String,
        value: &CacheEntry,
        read_at: Instant,
        duration_until_expiry: Option<Duration>,
        last_modified_at: Instant,
    ) -> Option<Duration> {
        match value.sliding {
            // Embedding entries: reads do not extend the lifetime.
            None => duration_until_expiry,
            Some(window) => {
                let deadline = last_modified_at + value.ttl;
                let remaining = deadline.saturating_duration_since(read_at);
                Some(remaining.min(window))
            }
        }
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // An overwrite is a fresh store: full TTL, sliding window re-armed.
        Some(value.initial_expiry())
    }
}
