use serde::Serialize;

use super::{status_from_score, DimensionScore};
use crate::embedding::{cosine_similarity, Embedding};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SemanticBreakdown {
    /// False when either embedding was absent or unusable and the
    /// neutral default applied.
    pub available: bool,
    pub similarity: Option<f64>,
}

/// Semantic similarity between candidate and job embeddings. Best-effort:
/// a missing or unusable embedding on either side degrades to neutral.
pub fn score_semantic(
    candidate_embedding: Option<&Embedding>,
    job_embedding: Option<&Embedding>,
) -> (DimensionScore, SemanticBreakdown) {
    let (Some(candidate), Some(job)) = (candidate_embedding, job_embedding) else {
        return (
            DimensionScore::neutral("UNKNOWN", "embedding unavailable"),
            SemanticBreakdown::default(),
        );
    };

    match cosine_similarity(&candidate.vector, &job.vector) {
        Some(similarity) => {
            let details = format!("cosine similarity {similarity:.4}");
            (
                DimensionScore::new(similarity, status_from_score(similarity), details),
                SemanticBreakdown {
                    available: true,
                    similarity: Some(similarity),
                },
            )
        }
        None => (
            DimensionScore::neutral("UNKNOWN", "embeddings not comparable"),
            SemanticBreakdown::default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_embeddings_are_neutral() {
        let emb = Embedding::new(vec![1.0, 0.0]);

        let (score, breakdown) = score_semantic(None, None);
        assert_eq!(score.score, 0.5);
        assert!(!breakdown.available);

        let (score, _) = score_semantic(Some(&emb), None);
        assert_eq!(score.score, 0.5);
    }

    #[test]
    fn identical_embeddings_score_near_one() {
        let emb = Embedding::new(vec![0.6, 0.8]);
        let (score, breakdown) = score_semantic(Some(&emb), Some(&emb));
        assert!(score.score > 0.99);
        assert!(breakdown.available);
    }

    #[test]
    fn mismatched_dimensions_fall_back_to_neutral() {
        let a = Embedding::new(vec![1.0, 0.0, 0.0]);
        let b = Embedding::new(vec![1.0, 0.0]);
        let (score, breakdown) = score_semantic(Some(&a), Some(&b));
        assert_eq!(score.score, 0.5);
        assert!(!breakdown.available);
    }
}
