use tracing::{debug, info, warn};

use crate::cancel::CancelFlag;
use crate::constants::{DEFAULT_MMR_LAMBDA, DEFAULT_MMR_TOP_K};
use crate::scan::CandidateVector;
use crate::vecmath::cosine_similarity;

use super::error::{RerankError, RerankResult};
use super::types::MmrResult;

/// Default selection parameters, overridable per call.
#[derive(Debug, Clone, Copy)]
pub struct MmrConfig {
    /// Number of results to select.
    pub top_k: usize,
    /// Relevance/diversity trade-off: `1.0` is pure relevance, `0.0` pure
    /// diversity. Expected within [0, 1].
    pub lambda: f64,
}

impl Default for MmrConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_MMR_TOP_K,
            lambda: DEFAULT_MMR_LAMBDA,
        }
    }
}

impl MmrConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }
}

/// Greedy MMR selection over a pre-filtered candidate pool.
///
/// Each round scores every remaining candidate as
/// `λ·cos(query, c) − (1−λ)·max_{s ∈ selected} cos(c, s)` and picks the
/// maximum (exact ties go to the latest remaining position, which favors
/// the diverse candidate when a near-duplicate and an orthogonal candidate
/// score equally). The redundancy term is `0` for the first pick, so it is
/// pure relevance.
///
/// Complexity is O(top_k × candidates × d); acceptable because the pool is
/// already a small pre-filtered set, typically tens of candidates.
#[derive(Debug, Clone, Default)]
pub struct MmrReranker {
    config: MmrConfig,
}

impl MmrReranker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MmrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MmrConfig {
        &self.config
    }

    /// Reranks with the configured `top_k` and `lambda`.
    pub fn rerank(&self, query: &[f32], candidates: Vec<CandidateVector>) -> Vec<MmrResult> {
        self.rerank_with(query, candidates, self.config.top_k, self.config.lambda)
    }

    /// Reranks with explicit parameters.
    ///
    /// Malformed inputs degrade: empty candidates or `top_k == 0` yield `[]`
    /// with a warning, an out-of-range λ is clamped into [0, 1], and a
    /// dimension mismatch inside any similarity contributes `0` instead of
    /// poisoning the batch.
    pub fn rerank_with(
        &self,
        query: &[f32],
        candidates: Vec<CandidateVector>,
        top_k: usize,
        lambda: f64,
    ) -> Vec<MmrResult> {
        // select() can only fail when a cancel flag is supplied.
        self.select(query, candidates, top_k, lambda, None)
            .unwrap_or_default()
    }

    /// Like [`rerank_with`](Self::rerank_with), checking `cancel` between
    /// selection rounds. A cancelled rerank returns
    /// [`RerankError::Cancelled`] with nothing accumulated.
    pub fn rerank_cancellable(
        &self,
        query: &[f32],
        candidates: Vec<CandidateVector>,
        top_k: usize,
        lambda: f64,
        cancel: &CancelFlag,
    ) -> RerankResult<Vec<MmrResult>> {
        self.select(query, candidates, top_k, lambda, Some(cancel))
    }

    fn select(
        &self,
        query: &[f32],
        candidates: Vec<CandidateVector>,
        top_k: usize,
        lambda: f64,
        cancel: Option<&CancelFlag>,
    ) -> RerankResult<Vec<MmrResult>> {
        if candidates.is_empty() {
            warn!("MMR rerank requested with no candidates");
            return Ok(Vec::new());
        }
        if top_k == 0 {
            warn!(candidates = candidates.len(), "MMR rerank requested with top_k = 0");
            return Ok(Vec::new());
        }

        let lambda = if (0.0..=1.0).contains(&lambda) {
            lambda
        } else {
            warn!(lambda, "MMR lambda outside [0, 1]; clamping");
            lambda.clamp(0.0, 1.0)
        };

        let mismatched = candidates
            .iter()
            .filter(|c| c.vector.len() != query.len())
            .count();
        if mismatched > 0 {
            warn!(
                mismatched,
                expected_dim = query.len(),
                "candidates with mismatched dimensions score zero similarity"
            );
        }

        info!(
            candidates = candidates.len(),
            top_k, lambda, "MMR reranking started"
        );

        let rounds = top_k.min(candidates.len());
        let mut remaining = candidates;
        let mut selected_vectors: Vec<Vec<f32>> = Vec::with_capacity(rounds);
        let mut output = Vec::with_capacity(rounds);

        for round in 0..rounds {
            if let Some(flag) = cancel {
                if flag.is_cancelled() {
                    debug!(selected = output.len(), "rerank cancelled");
                    return Err(RerankError::Cancelled);
                }
            }

            let mut best_index = 0;
            let mut best_score = f64::NEG_INFINITY;

            for (index, candidate) in remaining.iter().enumerate() {
                let relevance = f64::from(cosine_similarity(query, &candidate.vector));
                let redundancy = selected_vectors
                    .iter()
                    .map(|s| f64::from(cosine_similarity(&candidate.vector, s)))
                    .fold(f64::NEG_INFINITY, f64::max);
                // First pick has nothing selected yet: pure relevance.
                let redundancy = if redundancy == f64::NEG_INFINITY {
                    0.0
                } else {
                    redundancy
                };

                let score = lambda * relevance - (1.0 - lambda) * redundancy;

                // Exact ties go to the latest remaining position.
                if score >= best_score {
                    best_score = score;
                    best_index = index;
                }
            }

            let chosen = remaining.remove(best_index);
            selected_vectors.push(chosen.vector.clone());
            output.push(MmrResult {
                id: chosen.id,
                vector: chosen.vector,
                initial_score: chosen.initial_score,
                mmr_score: best_score,
                rank: round + 1,
                metadata: chosen.metadata,
            });
        }

        info!(selected = output.len(), "MMR reranking completed");
        Ok(output)
    }
}
