use super::types::ScoredCandidate;
use crate::models::EmbeddingRecord;

/// Cosine similarity between two vectors.
///
/// Degenerate pairs (length mismatch, either norm zero) score exactly 0
/// rather than erroring, so a ranking pass over an open-ended corpus is
/// always total. Scale-invariant: embedding magnitudes come from an
/// external model this system does not control.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Rank a candidate snapshot against a query vector.
///
/// Scores every candidate (no early pruning), keeps those at or above
/// `threshold`, sorts descending by score, and truncates to `top_k`. The
/// sort is stable, so equal-scoring candidates keep their snapshot order
/// and repeated calls with identical inputs return identical results.
///
/// Pure — never touches the store, never mutates the snapshot.
pub fn rank(
    query: &[f32],
    candidates: &[EmbeddingRecord],
    top_k: usize,
    threshold: f32,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|record| ScoredCandidate {
            record: record.clone(),
            score: cosine_similarity(query, &record.embedding),
        })
        .filter(|c| c.score >= threshold)
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmbeddingRecord;

    const TOLERANCE: f32 = 1e-6;

    fn record(content: &str, embedding: Vec<f32>) -> EmbeddingRecord {
        EmbeddingRecord {
            id: uuid::Uuid::new_v4(),
            content: content.to_string(),
            embedding,
            source: None,
            metadata: None,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = vec![0.3, -1.2, 4.0];
        let b = vec![2.0, 0.5, -0.7];
        assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < TOLERANCE);
    }

    #[test]
    fn identical_vectors_score_one() {
        let a = vec![0.4, 0.9, -2.5];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn scale_does_not_change_similarity() {
        let a = vec![1.0, 2.0, 3.0];
        let scaled: Vec<f32> = a.iter().map(|x| x * 40.0).collect();
        assert!((cosine_similarity(&a, &scaled) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn zero_vector_scores_zero() {
        let a = vec![1.0, 2.0, 3.0];
        let z = vec![0.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &z), 0.0);
        assert_eq!(cosine_similarity(&z, &a), 0.0);
        assert_eq!(cosine_similarity(&z, &z), 0.0);
    }

    #[test]
    fn mismatched_lengths_score_zero() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn opposite_vectors_score_negative_one() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn rank_filters_sorts_and_truncates() {
        let candidates = vec![
            record("aligned", vec![1.0, 0.0]),
            record("orthogonal", vec![0.0, 1.0]),
            record("close", vec![0.9, 0.1]),
        ];

        let results = rank(&[1.0, 0.0], &candidates, 2, 0.5);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].record.content, "aligned");
        assert!((results[0].score - 1.0).abs() < TOLERANCE);
        assert_eq!(results[1].record.content, "close");
        assert!((results[1].score - 0.994).abs() < 0.001);
    }

    #[test]
    fn every_result_clears_the_threshold() {
        let candidates = vec![
            record("a", vec![1.0, 0.0]),
            record("b", vec![0.7, 0.7]),
            record("c", vec![0.0, 1.0]),
            record("d", vec![-1.0, 0.0]),
        ];

        let results = rank(&[1.0, 0.0], &candidates, 10, 0.6);
        assert!(!results.is_empty());
        assert!(results.iter().all(|c| c.score >= 0.6));
    }

    #[test]
    fn equal_scores_keep_snapshot_order() {
        let candidates = vec![
            record("first", vec![2.0, 0.0]),
            record("second", vec![3.0, 0.0]),
            record("third", vec![0.5, 0.0]),
        ];

        let results = rank(&[1.0, 0.0], &candidates, 3, 0.0);
        let order: Vec<&str> = results.iter().map(|c| c.record.content.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_pool_yields_empty() {
        assert!(rank(&[1.0, 0.0], &[], 4, 0.5).is_empty());
    }

    #[test]
    fn zero_top_k_yields_empty() {
        let candidates = vec![record("a", vec![1.0, 0.0])];
        assert!(rank(&[1.0, 0.0], &candidates, 0, 0.5).is_empty());
    }

    #[test]
    fn threshold_above_one_yields_empty() {
        let candidates = vec![record("a", vec![1.0, 0.0])];
        assert!(rank(&[1.0, 0.0], &candidates, 4, 1.5).is_empty());
    }

    #[test]
    fn threshold_below_minus_one_admits_everything() {
        let candidates = vec![
            record("a", vec![1.0, 0.0]),
            record("b", vec![-1.0, 0.0]),
            record("c", vec![0.0, 1.0]),
        ];

        let results = rank(&[1.0, 0.0], &candidates, 10, -2.0);
        assert_eq!(results.len(), 3);
        // Still sorted descending
        assert_eq!(results[0].record.content, "a");
        assert_eq!(results[2].record.content, "b");
    }

    #[test]
    fn mismatched_candidate_never_matches() {
        let candidates = vec![
            record("wrong dim", vec![1.0, 0.0, 0.0]),
            record("right dim", vec![1.0, 0.0]),
        ];

        let results = rank(&[1.0, 0.0], &candidates, 4, 0.5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.content, "right dim");
    }
}
