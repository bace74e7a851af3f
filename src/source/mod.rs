//! Storage collaborator boundary.
//!
//! The document store owns persistence; the core only reads the stored
//! (id, vector, metadata) tuples it needs for a scan. Keeping the linear
//! scan behind this seam means an approximate-nearest-neighbor index can be
//! substituted without touching the reranker.

#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockVectorSource;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to fetch candidate vectors: {reason}")]
    FetchFailed { reason: String },
}

pub type SourceResult<T> = Result<T, SourceError>;

/// One stored document vector, as read from the document store.
#[derive(Debug, Clone)]
pub struct StoredVector {
    /// Opaque document identifier.
    pub id: String,
    /// The stored embedding.
    pub vector: Vec<f32>,
    /// Opaque key/value bag carried through to results untouched.
    pub metadata: Map<String, Value>,
}

impl StoredVector {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Read-only access to documents that currently have a stored vector.
#[async_trait]
pub trait VectorSource: Send + Sync {
    /// Fetches every stored (id, vector, metadata) tuple. The core performs
    /// no writes to this store.
    async fn fetch_candidate_vectors(&self) -> SourceResult<Vec<StoredVector>>;
}
