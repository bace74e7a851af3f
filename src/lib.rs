//! Semantic retrieval core for a document store.
//!
//! Given a query, this crate turns text into a vector (through a cached,
//! lazily-initialized embedding provider), finds the most similar stored
//! documents with a cosine-similarity scan, and reranks the top candidates
//! with Maximal Marginal Relevance to balance relevance against redundancy.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Retrieval configuration
//! - [`VectorCache`] - Content-addressed embedding/result cache
//! - [`Retriever`], [`RetrievalOptions`] - End-to-end pipeline
//!
//! ## Scanning & Reranking
//! - [`SimilarityScanner`], [`CandidateVector`] - Linear cosine scan
//! - [`MmrReranker`], [`MmrConfig`], [`MmrResult`] - MMR selection
//! - [`CancelFlag`] - Cooperative cancellation for both
//!
//! ## Collaborator Boundaries
//! - [`EmbeddingProvider`], [`LazyEmbeddingClient`] - Embedding generation
//! - [`VectorSource`], [`StoredVector`] - Document store reads
//!
//! ## Utilities
//! - [`cosine_similarity`] and friends in [`vecmath`]
//! - Fingerprint and cache-key helpers in [`hashing`]
//!
//! ## Test/Mock Support
//! Mock collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod cancel;
pub mod config;
pub mod constants;
pub mod hashing;
pub mod pipeline;
pub mod provider;
pub mod rerank;
pub mod scan;
pub mod source;
pub mod vecmath;

pub use cache::VectorCache;
pub use cancel::CancelFlag;
pub use config::{Config, ConfigError};
pub use pipeline::{RetrievalError, RetrievalOptions, RetrievalResult, Retriever};
pub use provider::{EmbeddingProvider, LazyEmbeddingClient, ProviderError, ProviderResult};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockEmbeddingProvider;
pub use rerank::{MmrConfig, MmrReranker, MmrResult, RerankError, RerankResult};
pub use scan::{CandidateVector, ScanError, ScanResult, SimilarityScanner};
#[cfg(any(test, feature = "mock"))]
pub use source::MockVectorSource;
pub use source::{SourceError, SourceResult, StoredVector, VectorSource};
pub use vecmath::{cosine_similarity, dot, l2_norm};
