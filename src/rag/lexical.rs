use crate::models::EmbeddingRecord;

/// Case-insensitive substring search over passage content.
///
/// The fallback path when no usable query vector exists: no tokenization,
/// no ranking by match quality. Snapshot enumeration order is preserved and
/// the result is truncated to `limit`. An empty query matches every record —
/// callers rely on that as "no filter" pass-through, so it must stay.
pub fn search_by_content(
    candidates: &[EmbeddingRecord],
    query: &str,
    limit: usize,
) -> Vec<EmbeddingRecord> {
    let needle = query.to_lowercase();

    candidates
        .iter()
        .filter(|record| record.content.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content: &str) -> EmbeddingRecord {
        EmbeddingRecord {
            id: uuid::Uuid::new_v4(),
            content: content.to_string(),
            embedding: vec![1.0, 0.0],
            source: None,
            metadata: None,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let pool = vec![record("Egg Retrieval"), record("Embryo transfer")];

        let results = search_by_content(&pool, "egg retrieval", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "Egg Retrieval");

        let results = search_by_content(&pool, "EMBRYO", 10);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn empty_query_matches_everything() {
        let pool = vec![record("A"), record("B"), record("C")];
        assert_eq!(search_by_content(&pool, "", 10).len(), 3);
    }

    #[test]
    fn empty_query_still_respects_limit() {
        let pool: Vec<_> = (0..15).map(|i| record(&format!("Passage {i}"))).collect();
        assert_eq!(search_by_content(&pool, "", 10).len(), 10);
    }

    #[test]
    fn enumeration_order_is_preserved() {
        let pool = vec![
            record("stimulation protocol"),
            record("trigger shot timing"),
            record("stimulation side effects"),
        ];

        let results = search_by_content(&pool, "stimulation", 10);
        let order: Vec<&str> = results.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(order, vec!["stimulation protocol", "stimulation side effects"]);
    }

    #[test]
    fn no_match_and_empty_pool_yield_empty() {
        let pool = vec![record("Egg Retrieval")];
        assert!(search_by_content(&pool, "acupuncture", 10).is_empty());
        assert!(search_by_content(&[], "anything", 10).is_empty());
    }
}
