use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One reranked result.
///
/// Produced exclusively by [`MmrReranker`](crate::rerank::MmrReranker);
/// `rank` is 1-based and strictly increasing in selection order (best first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MmrResult {
    /// Opaque document identifier.
    pub id: String,
    /// The candidate's stored embedding.
    pub vector: Vec<f32>,
    /// Cosine similarity to the query at scan time.
    pub initial_score: f64,
    /// The MMR objective value at selection time.
    pub mmr_score: f64,
    /// 1-based selection position.
    pub rank: usize,
    /// Opaque key/value bag carried through from the store.
    pub metadata: Map<String, Value>,
}
