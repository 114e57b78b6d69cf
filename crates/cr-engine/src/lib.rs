pub mod embedding;
pub mod error;
pub mod logging;
pub mod matching;
pub mod parse;
pub mod session;

use serde::{Deserialize, Serialize};

pub use error::EngineError;
pub use matching::scoring::{score_candidate, MatchResult, ScoreBreakdown};
pub use matching::weights::{MatchConfig, MatchWeights, DEFAULT_WEIGHTS};
pub use session::{run_session, MatchSession, SessionCandidate, SessionOptions, SessionStatus};

// Common data models consumed by the scoring functions. Profiles are
// produced upstream (resume/job-description extraction) and are read-only
// for the duration of a session.

/// One position in a candidate's work history. The upstream extractor
/// emits entries most-recent-first; `duration_text` is free text such as
/// "2019 - 2022" or "2021 - present".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration_text: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub total_experience_years: f64,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    /// Free-text education fallback used when no structured entries exist.
    #[serde(default)]
    pub education_text: Option<String>,
    #[serde(default)]
    pub work_history: Vec<WorkEntry>,
    /// Short free-text summary, used only as embedding input.
    #[serde(default)]
    pub summary: Option<String>,
}

impl CandidateProfile {
    /// Education as one searchable string: structured degrees joined with
    /// spaces, falling back to the free-text field.
    pub fn education_string(&self) -> String {
        if !self.education.is_empty() {
            return self
                .education
                .iter()
                .map(|e| e.degree.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }
        self.education_text.clone().unwrap_or_default()
    }

    /// Text handed to the embedder. Mirrors what the upstream extractor
    /// feeds the model: summary plus skills plus held titles.
    pub fn embedding_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(summary) = self.summary.as_deref() {
            parts.push(summary);
        }
        parts.extend(self.skills.iter().map(String::as_str));
        parts.extend(self.work_history.iter().map(|w| w.title.as_str()));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    /// Free text such as "3-5 years" or "5+ years".
    #[serde(default)]
    pub experience_range: String,
    #[serde(default)]
    pub education_requirement: String,
}

impl JobProfile {
    /// A job with no structured data at all cannot drive a session; the
    /// orchestrator marks such sessions failed before scoring anything.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.required_skills.is_empty()
            && self.preferred_skills.is_empty()
            && self.experience_range.trim().is_empty()
            && self.education_requirement.trim().is_empty()
            && self.description.as_deref().map_or(true, |d| d.trim().is_empty())
    }

    pub fn embedding_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.title.as_str()];
        if let Some(description) = self.description.as_deref() {
            parts.push(description);
        }
        parts.extend(self.required_skills.iter().map(String::as_str));
        parts.extend(self.preferred_skills.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Externally computed bias-language risk for a candidate's source text.
/// Informational only: it can flip `MatchResult::bias_adjusted` but never
/// moves a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasRisk {
    Low,
    Medium,
    High,
}

impl BiasRisk {
    pub fn is_elevated(&self) -> bool {
        matches!(self, BiasRisk::Medium | BiasRisk::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_job_profile_is_detected() {
        let job = JobProfile::default();
        assert!(job.is_empty());

        let job = JobProfile {
            title: "  ".into(),
            required_skills: vec!["rust".into()],
            ..JobProfile::default()
        };
        assert!(!job.is_empty());
    }

    #[test]
    fn education_string_prefers_structured_entries() {
        let candidate = CandidateProfile {
            education: vec![
                EducationEntry {
                    degree: "Master of Science".into(),
                    ..EducationEntry::default()
                },
                EducationEntry {
                    degree: "Bachelor of Science".into(),
                    ..EducationEntry::default()
                },
            ],
            education_text: Some("ignored".into()),
            ..CandidateProfile::default()
        };

        assert_eq!(
            candidate.education_string(),
            "Master of Science Bachelor of Science"
        );
    }

    #[test]
    fn education_string_falls_back_to_free_text() {
        let candidate = CandidateProfile {
            education_text: Some("Diploma in Electronics".into()),
            ..CandidateProfile::default()
        };
        assert_eq!(candidate.education_string(), "Diploma in Electronics");
    }

    #[test]
    fn bias_risk_elevation() {
        assert!(!BiasRisk::Low.is_elevated());
        assert!(BiasRisk::Medium.is_elevated());
        assert!(BiasRisk::High.is_elevated());
    }
}
