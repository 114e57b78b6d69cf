use serde::Serialize;

use super::DimensionScore;
use crate::parse::start_year;
use crate::WorkEntry;

/// Seniority hierarchy checked from the top down; the first level whose
/// keyword appears in the title wins, so "senior engineer" ranks 5, not
/// the generic engineer rank. Unrecognized titles rank 0.
const SENIORITY_LEVELS: &[(&[&str], u8)] = &[
    (&["chief", "cto", "ceo", "vp", "vice president", "director"], 8),
    (&["head", "manager"], 7),
    (&["principal", "staff", "lead"], 6),
    (&["senior", "sr."], 5),
    (&["engineer", "developer", "analyst", "consultant", "specialist"], 4),
    (&["associate"], 3),
    (&["junior", "jr.", "graduate"], 2),
    (&["intern", "trainee"], 1),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressionBreakdown {
    pub current_rank: u8,
    pub initial_rank: u8,
    pub status: &'static str,
}

fn title_rank(title: &str) -> u8 {
    let lower = title.to_lowercase();
    SENIORITY_LEVELS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, rank)| *rank)
        .unwrap_or(0)
}

/// Work history ordered most-recent-first. The upstream extractor
/// promises this ordering but does not enforce it, so when every entry
/// carries a parseable start year we re-sort by it instead of trusting
/// position.
fn ordered_history(work_history: &[WorkEntry]) -> Vec<&WorkEntry> {
    let mut entries: Vec<(&WorkEntry, Option<i32>)> = work_history
        .iter()
        .map(|e| (e, start_year(&e.duration_text)))
        .collect();

    if entries.iter().all(|(_, year)| year.is_some()) {
        entries.sort_by_key(|(_, year)| std::cmp::Reverse(year.unwrap_or(0)));
    }

    entries.into_iter().map(|(e, _)| e).collect()
}

/// Score career trajectory: the most recent title's rank against the
/// highest recognizable rank among older positions.
pub fn score_progression(work_history: &[WorkEntry]) -> (DimensionScore, ProgressionBreakdown) {
    if work_history.len() < 2 {
        let status = "Insufficient history";
        return (
            DimensionScore::neutral("UNKNOWN", status),
            ProgressionBreakdown {
                current_rank: work_history.first().map(|e| title_rank(&e.title)).unwrap_or(0),
                initial_rank: 0,
                status,
            },
        );
    }

    let ordered = ordered_history(work_history);
    let current_rank = title_rank(&ordered[0].title);
    let initial_rank = ordered[1..]
        .iter()
        .map(|e| title_rank(&e.title))
        .filter(|rank| *rank > 0)
        .max()
        .unwrap_or(0);

    if initial_rank == 0 {
        let status = "Earlier titles unrecognized";
        return (
            DimensionScore::new(0.6, status, "no recognizable rank in older positions"),
            ProgressionBreakdown {
                current_rank,
                initial_rank,
                status,
            },
        );
    }

    let (score, status) = if current_rank > initial_rank {
        (1.0, "Upward growth")
    } else if current_rank == initial_rank && current_rank > 2 {
        (0.8, "Consistent seniority")
    } else if current_rank < initial_rank {
        (0.5, "Level drop")
    } else {
        (0.6, "Lateral")
    };

    let details = format!("rank {initial_rank} -> {current_rank}: {status}");

    (
        DimensionScore::new(score, status, details),
        ProgressionBreakdown {
            current_rank,
            initial_rank,
            status,
        },
    )
}
