use super::*;

fn stored(id: &str, vector: Vec<f32>) -> StoredVector {
    StoredVector::new(id, vector)
}

#[test]
fn test_empty_candidates_returns_empty() {
    let scanner = SimilarityScanner::new();
    let results = scanner.top_n(&[1.0, 0.0], &[], 5);
    assert!(results.is_empty());
}

#[test]
fn test_orders_by_descending_similarity() {
    let scanner = SimilarityScanner::new();
    let candidates = vec![
        stored("far", vec![0.0, 1.0]),
        stored("near", vec![1.0, 0.0]),
        stored("mid", vec![1.0, 1.0]),
    ];

    let results = scanner.top_n(&[1.0, 0.0], &candidates, 3);

    let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["near", "mid", "far"]);
    assert!(results[0].initial_score > results[1].initial_score);
    assert!(results[1].initial_score > results[2].initial_score);
}

#[test]
fn test_truncates_to_n() {
    let scanner = SimilarityScanner::new();
    let candidates: Vec<StoredVector> = (0..10)
        .map(|i| stored(&format!("doc-{i}"), vec![1.0, i as f32 * 0.1]))
        .collect();

    let results = scanner.top_n(&[1.0, 0.0], &candidates, 3);

    assert_eq!(results.len(), 3);
}

#[test]
fn test_returns_fewer_when_pool_is_small() {
    let scanner = SimilarityScanner::new();
    let candidates = vec![stored("only", vec![1.0, 0.0])];

    let results = scanner.top_n(&[1.0, 0.0], &candidates, 10);

    assert_eq!(results.len(), 1);
}

#[test]
fn test_dimension_mismatch_ranks_last() {
    let scanner = SimilarityScanner::new();
    let candidates = vec![
        stored("bad", vec![1.0, 0.0, 0.0]),
        stored("good", vec![0.5, 0.5]),
    ];

    let results = scanner.top_n(&[1.0, 0.0], &candidates, 2);

    assert_eq!(results[0].id, "good");
    assert_eq!(results[1].id, "bad");
    assert_eq!(results[1].initial_score, 0.0);
}

#[test]
fn test_zero_norm_candidate_ranks_last() {
    let scanner = SimilarityScanner::new();
    let candidates = vec![
        stored("zero", vec![0.0, 0.0]),
        stored("good", vec![1.0, 0.0]),
    ];

    let results = scanner.top_n(&[1.0, 0.0], &candidates, 2);

    assert_eq!(results[0].id, "good");
    assert_eq!(results[1].initial_score, 0.0);
}

#[test]
fn test_ties_keep_input_order() {
    let scanner = SimilarityScanner::new();
    // Both candidates are scaled copies of the query: identical similarity.
    let candidates = vec![
        stored("first", vec![2.0, 0.0]),
        stored("second", vec![3.0, 0.0]),
    ];

    let results = scanner.top_n(&[1.0, 0.0], &candidates, 2);

    assert_eq!(results[0].id, "first");
    assert_eq!(results[1].id, "second");
}

#[test]
fn test_metadata_is_carried_through() {
    let scanner = SimilarityScanner::new();
    let mut metadata = Map::new();
    metadata.insert("title".to_string(), Value::String("Q3 invoice".into()));
    let candidates =
        vec![StoredVector::new("doc-1", vec![1.0, 0.0]).with_metadata(metadata.clone())];

    let results = scanner.top_n(&[1.0, 0.0], &candidates, 1);

    assert_eq!(results[0].metadata, metadata);
}

#[test]
fn test_cancelled_scan_returns_error() {
    let scanner = SimilarityScanner::new();
    let candidates = vec![stored("a", vec![1.0, 0.0]), stored("b", vec![0.0, 1.0])];

    let cancel = CancelFlag::new();
    cancel.cancel();

    let result = scanner.top_n_cancellable(&[1.0, 0.0], &candidates, 2, &cancel);

    assert!(matches!(result, Err(ScanError::Cancelled)));
}

#[test]
fn test_uncancelled_scan_matches_plain_scan() {
    let scanner = SimilarityScanner::new();
    let candidates = vec![
        stored("a", vec![1.0, 0.0]),
        stored("b", vec![0.0, 1.0]),
        stored("c", vec![1.0, 1.0]),
    ];

    let plain = scanner.top_n(&[1.0, 0.0], &candidates, 2);
    let cancellable = scanner
        .top_n_cancellable(&[1.0, 0.0], &candidates, 2, &CancelFlag::new())
        .unwrap();

    let plain_ids: Vec<&str> = plain.iter().map(|c| c.id.as_str()).collect();
    let cancellable_ids: Vec<&str> = cancellable.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(plain_ids, cancellable_ids);
}
