//! Cosine-similarity candidate scan.
//!
//! A full O(candidates × d) linear pass over the stored vectors, with no
//! index structure. This is the documented scalability ceiling of the subsystem;
//! it stays behind this module boundary so an approximate-nearest-neighbor
//! index can replace it without touching the MMR logic.

#[cfg(test)]
mod tests;

use std::cmp::Ordering;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cancel::CancelFlag;
use crate::source::StoredVector;
use crate::vecmath::cosine_similarity;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan cancelled")]
    Cancelled,
}

pub type ScanResult<T> = Result<T, ScanError>;

/// One retrieval candidate prior to reranking.
///
/// Constructed from the scanner's output and owned by the caller of the
/// reranker; immutable once constructed.
#[derive(Debug, Clone)]
pub struct CandidateVector {
    /// Opaque document identifier.
    pub id: String,
    /// The candidate's stored embedding.
    pub vector: Vec<f32>,
    /// Cosine similarity to the query at scan time.
    pub initial_score: f64,
    /// Opaque key/value bag carried through from the store.
    pub metadata: Map<String, Value>,
}

/// Linear cosine-similarity scanner.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScanner;

impl SimilarityScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scores every candidate against `query`, sorts descending by score,
    /// and returns the first `n` (or fewer, if `candidates` is smaller).
    ///
    /// Ties keep first-seen input order, so results are deterministic. A
    /// zero-norm or dimension-mismatched candidate scores `0.0` and ranks
    /// last instead of aborting the scan. Empty input yields `[]`.
    pub fn top_n(
        &self,
        query: &[f32],
        candidates: &[StoredVector],
        n: usize,
    ) -> Vec<CandidateVector> {
        if candidates.is_empty() {
            debug!("no candidates to scan");
            return Vec::new();
        }

        let mut scored: Vec<CandidateVector> = candidates
            .iter()
            .map(|stored| score_candidate(query, stored))
            .collect();

        rank(&mut scored, n);
        scored
    }

    /// Like [`top_n`](Self::top_n), checking `cancel` between candidates.
    ///
    /// A cancelled scan returns [`ScanError::Cancelled`] with nothing
    /// accumulated, never a truncated-but-unlabeled result.
    pub fn top_n_cancellable(
        &self,
        query: &[f32],
        candidates: &[StoredVector],
        n: usize,
        cancel: &CancelFlag,
    ) -> ScanResult<Vec<CandidateVector>> {
        if candidates.is_empty() {
            debug!("no candidates to scan");
            return Ok(Vec::new());
        }

        let mut scored = Vec::with_capacity(candidates.len());
        for stored in candidates {
            if cancel.is_cancelled() {
                debug!(scanned = scored.len(), "scan cancelled");
                return Err(ScanError::Cancelled);
            }
            scored.push(score_candidate(query, stored));
        }

        rank(&mut scored, n);
        Ok(scored)
    }
}

fn score_candidate(query: &[f32], stored: &StoredVector) -> CandidateVector {
    if stored.vector.len() != query.len() {
        // Stored data may come from a provider swap: rank last, don't abort.
        warn!(
            candidate_id = %stored.id,
            expected_dim = query.len(),
            actual_dim = stored.vector.len(),
            "dimension mismatch; scoring candidate as zero"
        );
    }

    CandidateVector {
        id: stored.id.clone(),
        vector: stored.vector.clone(),
        initial_score: f64::from(cosine_similarity(query, &stored.vector)),
        metadata: stored.metadata.clone(),
    }
}

fn rank(scored: &mut Vec<CandidateVector>, n: usize) {
    // Stable sort: equal scores keep first-seen input order.
    scored.sort_by(|a, b| {
        b.initial_score
            .partial_cmp(&a.initial_score)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(n);
}
