//! Mock embedding provider for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{EmbeddingProvider, ProviderError, ProviderResult};

/// Deterministic in-memory provider with a call counter.
///
/// Texts registered via [`insert`](Self::insert) return their fixed vector;
/// anything else gets a deterministic pseudo-embedding derived from its
/// fingerprint, so distinct texts embed differently without any setup.
pub struct MockEmbeddingProvider {
    dimension: usize,
    vectors: RwLock<HashMap<String, Vec<f32>>>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl MockEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: RwLock::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// A provider whose every `embed` call fails.
    pub fn failing(dimension: usize) -> Self {
        let provider = Self::new(dimension);
        provider.fail.store(true, Ordering::Relaxed);
        provider
    }

    /// Registers a fixed vector for `text`.
    pub fn insert(&self, text: &str, vector: Vec<f32>) {
        self.vectors.write().insert(text.to_string(), vector);
    }

    /// Number of `embed` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn pseudo_embedding(&self, text: &str) -> Vec<f32> {
        // Stretch the 32 hash bytes across the dimension, mapped into [-1, 1].
        let hash = blake3::hash(text.as_bytes());
        let bytes = hash.as_bytes();
        (0..self.dimension)
            .map(|i| (bytes[i % bytes.len()] as f32 - 127.5) / 127.5)
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> ProviderResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::Relaxed) {
            return Err(ProviderError::RequestFailed {
                reason: "mock provider configured to fail".into(),
            });
        }

        if let Some(vector) = self.vectors.read().get(text) {
            return Ok(vector.clone());
        }

        Ok(self.pseudo_embedding(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
