//! Mock vector source for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{SourceError, SourceResult, StoredVector, VectorSource};

/// In-memory source with a fetch counter and a switchable failure mode.
#[derive(Default)]
pub struct MockVectorSource {
    vectors: RwLock<Vec<StoredVector>>,
    fetches: AtomicUsize,
    fail: AtomicBool,
}

impl MockVectorSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vectors(vectors: Vec<StoredVector>) -> Self {
        Self {
            vectors: RwLock::new(vectors),
            ..Default::default()
        }
    }

    pub fn push(&self, stored: StoredVector) {
        self.vectors.write().push(stored);
    }

    /// Number of fetches made so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Makes every subsequent fetch fail.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl VectorSource for MockVectorSource {
    async fn fetch_candidate_vectors(&self) -> SourceResult<Vec<StoredVector>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(SourceError::FetchFailed {
                reason: "mock source configured to fail".into(),
            });
        }

        Ok(self.vectors.read().clone())
    }
}
