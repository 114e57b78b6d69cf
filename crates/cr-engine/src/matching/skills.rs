use std::collections::BTreeSet;

use serde::Serialize;

use super::{status_from_score, DimensionScore};

/// Share of the final score carried by required-skill coverage; the
/// remainder is the ceiling of the preferred-skill bonus.
const REQUIRED_SHARE: f64 = 0.85;
const PREFERRED_BONUS_MAX: f64 = 0.15;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillBreakdown {
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub extra_skills: Vec<String>,
    /// Human-readable "matched/required" coverage, e.g. "3/4".
    pub required_coverage: String,
}

/// Lowercased, trimmed, deduplicated skill set. BTreeSet keeps breakdown
/// ordering deterministic across runs.
fn normalize_set(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// One candidate skill counts as a fuzzy match for a required skill when
/// either string contains the other ("react" vs "react.js").
fn is_fuzzy_match(candidate_skill: &str, required_skill: &str) -> bool {
    candidate_skill.contains(required_skill) || required_skill.contains(candidate_skill)
}

/// Score candidate skills against required and preferred skill sets.
///
/// Two-pass set algebra: exact intersection first, then one fuzzy
/// containment pass over the still-missing required skills, each of
/// which can be claimed at most once. No requirement at all scores a
/// neutral 0.5 — unscoreable is not zero.
pub fn score_skills(
    candidate_skills: &[String],
    required_skills: &[String],
    preferred_skills: &[String],
) -> (DimensionScore, SkillBreakdown) {
    let required = normalize_set(required_skills);
    if required.is_empty() {
        return (
            DimensionScore::neutral("UNKNOWN", "no required skills specified"),
            SkillBreakdown::default(),
        );
    }

    let candidate = normalize_set(candidate_skills);
    let preferred = normalize_set(preferred_skills);

    // Pass 1: exact intersection.
    let exact: BTreeSet<String> = required.intersection(&candidate).cloned().collect();

    // Pass 2: fuzzy containment over the remainder.
    let fuzzy: BTreeSet<String> = required
        .difference(&exact)
        .filter(|req| candidate.iter().any(|cand| is_fuzzy_match(cand, req)))
        .cloned()
        .collect();

    let matched: BTreeSet<String> = exact.union(&fuzzy).cloned().collect();
    let missing: BTreeSet<String> = required.difference(&matched).cloned().collect();

    let base = matched.len() as f64 / required.len() as f64;

    // Preferred skills are exact-match only and worth at most the bonus.
    let matched_preferred: BTreeSet<String> =
        preferred.intersection(&candidate).cloned().collect();
    let bonus = if preferred.is_empty() {
        0.0
    } else {
        matched_preferred.len() as f64 / preferred.len() as f64 * PREFERRED_BONUS_MAX
    };

    let score = (base * REQUIRED_SHARE + bonus).min(1.0);
    let coverage = format!("{}/{}", matched.len(), required.len());

    let breakdown = SkillBreakdown {
        matched_required: matched.iter().cloned().collect(),
        missing_required: missing.iter().cloned().collect(),
        matched_preferred: matched_preferred.iter().cloned().collect(),
        extra_skills: candidate
            .difference(&required)
            .filter(|s| !preferred.contains(*s))
            .cloned()
            .collect(),
        required_coverage: coverage.clone(),
    };

    let details = format!(
        "required {} matched, preferred {}/{}",
        coverage,
        matched_preferred.len(),
        preferred.len()
    );

    (
        DimensionScore::new(score, status_from_score(score), details),
        breakdown,
    )
}
