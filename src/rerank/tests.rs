use super::*;
use crate::cancel::CancelFlag;
use crate::scan::{CandidateVector, SimilarityScanner};
use crate::source::StoredVector;

use serde_json::Map;

fn candidate(id: &str, vector: Vec<f32>, initial_score: f64) -> CandidateVector {
    CandidateVector {
        id: id.to_string(),
        vector,
        initial_score,
        metadata: Map::new(),
    }
}

#[test]
fn test_empty_candidates_returns_empty() {
    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&[1.0, 0.0], vec![], 5, 0.5);
    assert!(results.is_empty());
}

#[test]
fn test_zero_top_k_returns_empty() {
    let reranker = MmrReranker::new();
    let candidates = vec![candidate("a", vec![1.0, 0.0], 0.9)];
    let results = reranker.rerank_with(&[1.0, 0.0], candidates, 0, 0.5);
    assert!(results.is_empty());
}

#[test]
fn test_near_duplicate_is_suppressed() {
    // v2 nearly duplicates v1 and outscores v3 on raw relevance, but MMR
    // at λ=0.5 trades it away for the diverse v3.
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("v1", vec![1.0, 0.0], 0.9),
        candidate("v2", vec![0.99, 0.1], 0.85),
        candidate("v3", vec![0.0, 1.0], 0.4),
    ];

    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&query, candidates, 2, 0.5);

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["v1", "v3"]);
}

#[test]
fn test_top_k_larger_than_pool_returns_each_exactly_once() {
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("a", vec![1.0, 0.0], 0.9),
        candidate("b", vec![0.0, 1.0], 0.5),
        candidate("c", vec![1.0, 1.0], 0.7),
    ];

    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&query, candidates, 10, 0.5);

    assert_eq!(results.len(), 3);
    let mut ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_ranks_are_one_based_and_increasing() {
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("a", vec![1.0, 0.0], 0.9),
        candidate("b", vec![0.0, 1.0], 0.5),
        candidate("c", vec![1.0, 1.0], 0.7),
    ];

    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&query, candidates, 3, 0.5);

    let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn test_lambda_one_matches_pure_relevance_order() {
    let query = [1.0f32, 0.0, 0.0];
    let stored = vec![
        StoredVector::new("low", vec![0.0, 1.0, 0.0]),
        StoredVector::new("high", vec![1.0, 0.0, 0.0]),
        StoredVector::new("mid", vec![1.0, 1.0, 0.0]),
        StoredVector::new("duplicate-of-high", vec![0.999, 0.01, 0.0]),
    ];

    let scanner = SimilarityScanner::new();
    let pool = scanner.top_n(&query, &stored, stored.len());
    let relevance_order: Vec<String> = pool.iter().map(|c| c.id.clone()).collect();

    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&query, pool, stored.len(), 1.0);
    let mmr_order: Vec<String> = results.iter().map(|r| r.id.clone()).collect();

    assert_eq!(mmr_order, relevance_order);
}

#[test]
fn test_first_pick_is_pure_relevance() {
    let query = [1.0f32, 0.0];
    // Least relevant first: the pick must come from similarity, not input order.
    let candidates = vec![
        candidate("worse", vec![0.5, 0.5], 0.6),
        candidate("best", vec![1.0, 0.0], 0.95),
    ];

    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&query, candidates, 1, 0.5);

    assert_eq!(results[0].id, "best");
}

#[test]
fn test_exact_tie_prefers_later_candidate() {
    // With the query equal to the first pick, a near-duplicate's relevance
    // and redundancy cancel exactly, tying it with an orthogonal candidate
    // at zero. The later (diverse) candidate wins the tie.
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("anchor", vec![1.0, 0.0], 0.9),
        candidate("duplicate", vec![0.99, 0.1], 0.85),
        candidate("diverse", vec![0.0, 1.0], 0.4),
    ];

    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&query, candidates, 3, 0.5);

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["anchor", "diverse", "duplicate"]);
}

#[test]
fn test_out_of_range_lambda_is_clamped() {
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("a", vec![1.0, 0.0], 0.9),
        candidate("b", vec![0.0, 1.0], 0.4),
    ];

    let reranker = MmrReranker::new();
    let clamped = reranker.rerank_with(&query, candidates.clone(), 2, 1.7);
    let exact = reranker.rerank_with(&query, candidates, 2, 1.0);

    let clamped_ids: Vec<&str> = clamped.iter().map(|r| r.id.as_str()).collect();
    let exact_ids: Vec<&str> = exact.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(clamped_ids, exact_ids);
}

#[test]
fn test_mismatched_candidate_does_not_poison_batch() {
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("good", vec![1.0, 0.0], 0.9),
        candidate("bad-dims", vec![1.0, 0.0, 0.0], 0.0),
        candidate("diverse", vec![0.0, 1.0], 0.4),
    ];

    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&query, candidates, 3, 0.5);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].id, "good");
}

#[test]
fn test_mmr_scores_are_recorded() {
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("a", vec![1.0, 0.0], 0.9),
        candidate("b", vec![0.0, 1.0], 0.4),
    ];

    let reranker = MmrReranker::new();
    let results = reranker.rerank_with(&query, candidates, 2, 0.5);

    // First pick: λ·1.0 − 0. Second: λ·0.0 − (1−λ)·0.0 (orthogonal).
    assert!((results[0].mmr_score - 0.5).abs() < 1e-6);
    assert!(results[1].mmr_score.abs() < 1e-6);
}

#[test]
fn test_cancelled_rerank_returns_error() {
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("a", vec![1.0, 0.0], 0.9),
        candidate("b", vec![0.0, 1.0], 0.4),
    ];

    let cancel = CancelFlag::new();
    cancel.cancel();

    let reranker = MmrReranker::new();
    let result = reranker.rerank_cancellable(&query, candidates, 2, 0.5, &cancel);

    assert!(matches!(result, Err(RerankError::Cancelled)));
}

#[test]
fn test_config_defaults_are_used() {
    let reranker = MmrReranker::with_config(MmrConfig::default().with_top_k(1).with_lambda(0.5));
    let query = [1.0f32, 0.0];
    let candidates = vec![
        candidate("a", vec![1.0, 0.0], 0.9),
        candidate("b", vec![0.9, 0.1], 0.8),
    ];

    let results = reranker.rerank(&query, candidates);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "a");
}
