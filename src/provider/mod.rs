//! Embedding provider boundary.
//!
//! The core consumes embeddings, it never computes them: implementations
//! live outside this crate (an HTTP service, an in-process model, a test
//! double). [`LazyEmbeddingClient`] wraps a fallible provider constructor so
//! a missing or misconfigured provider degrades to "no embedding" instead of
//! failing the pipeline.

mod lazy;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use lazy::LazyEmbeddingClient;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingProvider;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("embedding provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("invalid embedding response: {reason}")]
    InvalidResponse { reason: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Converts text to a fixed-dimension float vector.
///
/// Calls may suspend (network-bound); the core awaits them at the pipeline
/// boundary and never suspends mid-computation itself.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds `text`. The returned vector's length must equal [`dimension`](Self::dimension).
    async fn embed(&self, text: &str) -> ProviderResult<Vec<f32>>;

    /// The fixed dimension of vectors this provider produces.
    fn dimension(&self) -> usize;
}
