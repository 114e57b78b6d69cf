use serde::Serialize;

use super::DimensionScore;
use crate::parse::parse_experience_range;

/// Penalty per year of experience beyond the requested maximum.
const OVERSHOOT_PENALTY_PER_YEAR: f64 = 0.05;
const OVERQUALIFIED_FLOOR: f64 = 0.6;
const UNDERQUALIFIED_FLOOR: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceBreakdown {
    pub candidate_years: f64,
    /// Parsed requirement, e.g. "3-5 years"; absent when nothing parsed.
    pub required_range: Option<String>,
    pub status: &'static str,
}

/// Score candidate experience against a free-text requirement such as
/// "3-5 years" or "5+ years". No parseable requirement scores neutral.
pub fn score_experience(
    candidate_years: f64,
    requirement: &str,
) -> (DimensionScore, ExperienceBreakdown) {
    let Some((min_years, max_years)) = parse_experience_range(requirement) else {
        let status = "No experience requirement specified";
        return (
            DimensionScore::neutral("UNKNOWN", status),
            ExperienceBreakdown {
                candidate_years,
                required_range: None,
                status,
            },
        );
    };

    let years = candidate_years.max(0.0);

    let (score, status) = if years >= min_years && years <= max_years {
        (1.0, "Perfect match")
    } else if years > max_years {
        let overshoot = years - max_years;
        (
            (1.0 - overshoot * OVERSHOOT_PENALTY_PER_YEAR).max(OVERQUALIFIED_FLOOR),
            "Overqualified",
        )
    } else if years > 0.0 {
        ((years / min_years).max(UNDERQUALIFIED_FLOOR), "Underqualified")
    } else {
        (UNDERQUALIFIED_FLOOR, "No experience data")
    };

    let range = format!("{min_years}-{max_years} years");
    let details = format!("{years:.1} years vs {range}: {status}");

    (
        DimensionScore::new(score, status, details),
        ExperienceBreakdown {
            candidate_years: years,
            required_range: Some(range),
            status,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_range_is_perfect() {
        let (score, breakdown) = score_experience(5.0, "3-7 years");
        assert_eq!(score.score, 1.0);
        assert_eq!(breakdown.status, "Perfect match");
        assert_eq!(breakdown.required_range.as_deref(), Some("3-7 years"));
    }

    #[test]
    fn overqualified_takes_slight_penalty() {
        let (score, breakdown) = score_experience(15.0, "3-5 years");
        assert!(score.score > 0.5 && score.score < 1.0);
        assert_eq!(breakdown.status, "Overqualified");
    }

    #[test]
    fn heavy_overshoot_hits_floor() {
        let (score, _) = score_experience(40.0, "1-2 years");
        assert_eq!(score.score, OVERQUALIFIED_FLOOR);
    }

    #[test]
    fn underqualified_scores_proportionally() {
        let (score, breakdown) = score_experience(1.0, "5-8 years");
        assert!(score.score < 0.5);
        assert_eq!(breakdown.status, "Underqualified");
        assert!((score.score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn zero_years_is_floor() {
        let (score, breakdown) = score_experience(0.0, "2-4 years");
        assert_eq!(score.score, UNDERQUALIFIED_FLOOR);
        assert_eq!(breakdown.status, "No experience data");
    }

    #[test]
    fn missing_requirement_is_neutral() {
        let (score, breakdown) = score_experience(5.0, "");
        assert_eq!(score.score, 0.5);
        assert_eq!(breakdown.required_range, None);
    }

    #[test]
    fn single_figure_gets_three_year_band() {
        let (score, breakdown) = score_experience(4.0, "3+ years");
        assert!(score.score >= 0.8);
        assert_eq!(breakdown.required_range.as_deref(), Some("3-6 years"));
    }
}
