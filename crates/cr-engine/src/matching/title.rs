use serde::Serialize;

use super::{status_from_score, DimensionScore};
use crate::WorkEntry;

/// Generic seniority/role words stripped from the job title before
/// keyword overlap, so "Senior Backend Engineer" keys on "backend".
const TITLE_STOPWORDS: &[&str] = &[
    "senior",
    "junior",
    "lead",
    "staff",
    "principal",
    "manager",
    "ii",
    "iii",
    "developer",
    "engineer",
];

/// Minimum score forced when one title is a substring of the other.
const SUBSTRING_FLOOR: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleMatch {
    pub title: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TitleBreakdown {
    pub job_keywords: Vec<String>,
    pub matches: Vec<TitleMatch>,
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Score how closely any held title matches the job title. The maximum
/// across the whole history counts; there is no recency weighting.
pub fn score_title(job_title: &str, work_history: &[WorkEntry]) -> (DimensionScore, TitleBreakdown) {
    let job_lower = job_title.trim().to_lowercase();
    if job_lower.is_empty() {
        return (
            DimensionScore::neutral("UNKNOWN", "no job title specified"),
            TitleBreakdown::default(),
        );
    }

    if work_history.is_empty() {
        return (
            DimensionScore::neutral("UNKNOWN", "no work history to compare against"),
            TitleBreakdown::default(),
        );
    }

    let mut job_keywords: Vec<String> = tokenize(&job_lower)
        .into_iter()
        .filter(|t| !TITLE_STOPWORDS.contains(&t.as_str()))
        .collect();
    job_keywords.dedup();

    let mut best: f64 = 0.0;
    let mut matches = Vec::with_capacity(work_history.len());

    for entry in work_history {
        let entry_lower = entry.title.trim().to_lowercase();
        let entry_tokens = tokenize(&entry_lower);

        let overlaps = job_keywords
            .iter()
            .filter(|k| entry_tokens.contains(k))
            .count();
        let mut entry_score = overlaps as f64 / job_keywords.len().max(1) as f64;

        if !entry_lower.is_empty()
            && (entry_lower.contains(&job_lower) || job_lower.contains(&entry_lower))
        {
            entry_score = entry_score.max(SUBSTRING_FLOOR);
        }

        best = best.max(entry_score);
        matches.push(TitleMatch {
            title: entry.title.clone(),
            score: entry_score,
        });
    }

    let details = format!(
        "best historical title overlap {best:.2} across {} entries",
        matches.len()
    );

    (
        DimensionScore::new(best, status_from_score(best), details),
        TitleBreakdown {
            job_keywords,
            matches,
        },
    )
}
