use serde::Serialize;

use super::education::{score_education, EducationBreakdown};
use super::experience::{score_experience, ExperienceBreakdown};
use super::progression::{score_progression, ProgressionBreakdown};
use super::semantic::{score_semantic, SemanticBreakdown};
use super::skills::{score_skills, SkillBreakdown};
use super::stability::{score_stability, StabilityBreakdown};
use super::title::{score_title, TitleBreakdown};
use super::weights::{MatchConfig, MatchWeights};
use crate::embedding::Embedding;
use crate::{BiasRisk, CandidateProfile, JobProfile};

/// Per-dimension diagnostics plus the weights used, kept alongside every
/// result for explainability and audit. Never read back for control flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub skills: SkillBreakdown,
    pub experience: ExperienceBreakdown,
    pub education: EducationBreakdown,
    pub title: TitleBreakdown,
    pub stability: StabilityBreakdown,
    pub progression: ProgressionBreakdown,
    pub semantic: SemanticBreakdown,
    pub weights: MatchWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate_id: String,
    pub skill_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub title_score: f64,
    pub stability_score: f64,
    pub growth_score: f64,
    pub semantic_score: f64,
    /// Literal weighted sum of the dimensions; unbounded above unless
    /// the caller constrains the weights.
    pub overall_score: f64,
    pub breakdown: ScoreBreakdown,
    /// Informational flag from the external bias-risk signal; never
    /// affects any score.
    pub bias_adjusted: bool,
    /// 1-based position, assigned only after the whole batch is scored.
    pub rank: Option<u32>,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Score one candidate against one job. Pure and side-effect-free:
/// identical inputs always produce identical results.
pub fn score_candidate(
    candidate: &CandidateProfile,
    job: &JobProfile,
    candidate_embedding: Option<&Embedding>,
    job_embedding: Option<&Embedding>,
    bias_risk: Option<BiasRisk>,
    config: &MatchConfig,
) -> MatchResult {
    let (skill, skills_breakdown) =
        score_skills(&candidate.skills, &job.required_skills, &job.preferred_skills);
    let (experience, experience_breakdown) =
        score_experience(candidate.total_experience_years, &job.experience_range);
    let (education, education_breakdown) =
        score_education(&candidate.education_string(), &job.education_requirement);
    let (title, title_breakdown) = score_title(&job.title, &candidate.work_history);
    let (stability, stability_breakdown) = score_stability(&candidate.work_history);
    let (growth, progression_breakdown) = score_progression(&candidate.work_history);
    let (semantic, semantic_breakdown) = score_semantic(candidate_embedding, job_embedding);

    let weights = config.weights;
    let overall = skill.score * weights.skill
        + experience.score * weights.experience
        + education.score * weights.education
        + title.score * weights.title
        + stability.score * weights.stability
        + growth.score * weights.growth
        + semantic.score * weights.semantic;

    let bias_adjusted = config.bias_check
        && bias_risk.map_or(false, |risk| risk.is_elevated());

    MatchResult {
        candidate_id: candidate.id.clone(),
        skill_score: round4(skill.score),
        experience_score: round4(experience.score),
        education_score: round4(education.score),
        title_score: round4(title.score),
        stability_score: round4(stability.score),
        growth_score: round4(growth.score),
        semantic_score: round4(semantic.score),
        overall_score: round4(overall),
        breakdown: ScoreBreakdown {
            skills: skills_breakdown,
            experience: experience_breakdown,
            education: education_breakdown,
            title: title_breakdown,
            stability: stability_breakdown,
            progression: progression_breakdown,
            semantic: semantic_breakdown,
            weights,
        },
        bias_adjusted,
        rank: None,
    }
}
