pub mod education;
pub mod experience;
pub mod progression;
pub mod scoring;
pub mod semantic;
pub mod skills;
pub mod stability;
pub mod title;
pub mod weights;

use serde::Serialize;

/// Result of a single scoring dimension. `score` is always within
/// [0.0, 1.0]; `status` is a short machine-readable label and `details`
/// a human-readable explanation for reviewers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub score: f64,
    pub status: &'static str,
    pub details: String,
}

impl DimensionScore {
    pub fn new(score: f64, status: &'static str, details: impl Into<String>) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            status,
            details: details.into(),
        }
    }

    /// Neutral score for inputs that cannot be evaluated. Absence of a
    /// requirement is not absence of fit, so unscoreable never means zero.
    pub fn neutral(status: &'static str, details: impl Into<String>) -> Self {
        Self::new(0.5, status, details)
    }
}

/// Generic status label from a score, for dimensions whose contract does
/// not name its own statuses.
pub fn status_from_score(score: f64) -> &'static str {
    if score >= 0.9 {
        "PERFECT_MATCH"
    } else if score >= 0.7 {
        "MATCH"
    } else if score >= 0.4 {
        "PARTIAL_MATCH"
    } else {
        "MISS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_score_clamps_to_unit_interval() {
        assert_eq!(DimensionScore::new(1.7, "MATCH", "").score, 1.0);
        assert_eq!(DimensionScore::new(-0.2, "MISS", "").score, 0.0);
    }

    #[test]
    fn neutral_is_half() {
        assert_eq!(DimensionScore::neutral("UNKNOWN", "n/a").score, 0.5);
    }

    #[test]
    fn status_tiers() {
        assert_eq!(status_from_score(0.95), "PERFECT_MATCH");
        assert_eq!(status_from_score(0.75), "MATCH");
        assert_eq!(status_from_score(0.5), "PARTIAL_MATCH");
        assert_eq!(status_from_score(0.1), "MISS");
    }
}
