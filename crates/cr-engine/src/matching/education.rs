use serde::Serialize;

use super::DimensionScore;

/// Keyword → level hierarchy applied to both sides by containment. Each
/// side takes the maximum level among all keywords found, so "MBA and
/// B.Sc" resolves to 4.
const EDUCATION_HIERARCHY: &[(&str, u8)] = &[
    ("phd", 5),
    ("doctorate", 5),
    ("master", 4),
    ("mba", 4),
    ("m.tech", 4),
    ("m.sc", 4),
    ("m.e", 4),
    ("m.a", 4),
    ("bachelor", 3),
    ("b.tech", 3),
    ("b.sc", 3),
    ("b.e", 3),
    ("b.a", 3),
    ("diploma", 2),
    ("associate", 2),
    ("certificate", 1),
    ("high school", 0),
];

const CLOSE_MISS_SCORE: f64 = 0.7;
const BELOW_FLOOR: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationBreakdown {
    pub candidate_level: u8,
    pub job_level: u8,
    pub status: &'static str,
}

fn detect_level(text: &str) -> u8 {
    let lower = text.to_lowercase();
    EDUCATION_HIERARCHY
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|(_, level)| *level)
        .max()
        .unwrap_or(0)
}

/// Score candidate education against the job requirement, both as free
/// text. A job with no recognizable level requirement scores neutral.
pub fn score_education(
    candidate_education: &str,
    job_education: &str,
) -> (DimensionScore, EducationBreakdown) {
    let candidate_level = detect_level(candidate_education);
    let job_level = detect_level(job_education);

    if job_level == 0 {
        let status = "No education requirement specified";
        return (
            DimensionScore::neutral("UNKNOWN", status),
            EducationBreakdown {
                candidate_level,
                job_level,
                status,
            },
        );
    }

    let (score, status) = if candidate_level >= job_level {
        (1.0, "Meets or exceeds requirement")
    } else if candidate_level + 1 == job_level {
        (CLOSE_MISS_SCORE, "Below requirement (close)")
    } else {
        (
            (f64::from(candidate_level) / f64::from(job_level)).max(BELOW_FLOOR),
            "Below requirement",
        )
    };

    let details = format!("candidate level {candidate_level} vs required {job_level}: {status}");

    (
        DimensionScore::new(score, status, details),
        EducationBreakdown {
            candidate_level,
            job_level,
            status,
        },
    )
}
