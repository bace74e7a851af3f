//! The retrieval pipeline.
//!
//! Query text → result-cache lookup → embedding (cache, then provider) →
//! candidate fetch → cosine scan → MMR rerank → result-cache store.

pub mod error;

pub use error::{RetrievalError, RetrievalResult};

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::cache::VectorCache;
use crate::config::Config;
use crate::provider::LazyEmbeddingClient;
use crate::rerank::{MmrReranker, MmrResult};
use crate::scan::SimilarityScanner;
use crate::source::VectorSource;

/// Per-request knobs, defaulting to the configured values.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalOptions {
    /// Candidate pool size taken from the scan.
    pub top_n: usize,
    /// Number of results selected by MMR.
    pub top_k: usize,
    /// MMR relevance/diversity trade-off.
    pub lambda: f64,
}

impl RetrievalOptions {
    fn from_config(config: &Config) -> Self {
        Self {
            top_n: config.scan_top_n,
            top_k: config.mmr_top_k,
            lambda: config.mmr_lambda,
        }
    }
}

/// End-to-end retrieval over a [`VectorSource`].
///
/// The cache and embedder are shared handles so several retrievers (or other
/// pipeline stages) can reuse them. The scanner and reranker operate on
/// caller-owned snapshots and hold no state of their own.
pub struct Retriever<S: VectorSource> {
    cache: Arc<VectorCache>,
    embedder: Arc<LazyEmbeddingClient>,
    source: Arc<S>,
    scanner: SimilarityScanner,
    reranker: MmrReranker,
    defaults: RetrievalOptions,
}

impl<S: VectorSource> Retriever<S> {
    pub fn new(
        config: &Config,
        cache: Arc<VectorCache>,
        embedder: Arc<LazyEmbeddingClient>,
        source: Arc<S>,
    ) -> Self {
        Self {
            cache,
            embedder,
            source,
            scanner: SimilarityScanner::new(),
            reranker: MmrReranker::new(),
            defaults: RetrievalOptions::from_config(config),
        }
    }

    pub fn cache(&self) -> &Arc<VectorCache> {
        &self.cache
    }

    pub fn embedder(&self) -> &Arc<LazyEmbeddingClient> {
        &self.embedder
    }

    /// Retrieves with the configured defaults.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn retrieve(&self, query: &str) -> RetrievalResult<Vec<MmrResult>> {
        self.retrieve_with(query, self.defaults).await
    }

    /// Retrieves with explicit per-call options.
    ///
    /// An unavailable embedding provider is a valid terminal state: the
    /// request yields an empty result set, never an error.
    pub async fn retrieve_with(
        &self,
        query: &str,
        options: RetrievalOptions,
    ) -> RetrievalResult<Vec<MmrResult>> {
        if let Some(cached) = self.cache.get_results::<MmrResult>(query) {
            debug!(results = cached.len(), "result cache hit");
            return Ok(cached);
        }

        let Some(embedding) = self.embed_query(query).await else {
            info!("no embedding available for query; returning empty result set");
            return Ok(Vec::new());
        };

        let stored = self.source.fetch_candidate_vectors().await?;
        debug!(stored = stored.len(), "fetched candidate vectors");

        let pool = self.scanner.top_n(&embedding, &stored, options.top_n);
        let results = self
            .reranker
            .rerank_with(&embedding, pool, options.top_k, options.lambda);

        self.cache.put_results(query, &results);

        Ok(results)
    }

    async fn embed_query(&self, query: &str) -> Option<Vec<f32>> {
        if let Some(vector) = self.cache.get_embedding(query) {
            debug!("embedding cache hit");
            return Some(vector);
        }

        let vector = self.embedder.embed(query).await?;
        self.cache.put_embedding(query, vector.clone());
        Some(vector)
    }
}

impl<S: VectorSource> std::fmt::Debug for Retriever<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("cache", &self.cache)
            .field("embedder", &self.embedder)
            .field("defaults", &self.defaults)
            .finish()
    }
}
