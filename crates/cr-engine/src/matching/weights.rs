use serde::{Deserialize, Serialize};

/// Canonical default weights. Every call site starts from this one value
/// and overrides individual fields; the per-scorer literals the legacy
/// system scattered around are gone.
pub const DEFAULT_WEIGHTS: MatchWeights = MatchWeights {
    skill: 0.30,
    experience: 0.20,
    education: 0.10,
    title: 0.10,
    stability: 0.15,
    growth: 0.15,
    semantic: 0.0,
};

/// Per-dimension weights for the overall score. The aggregate is a
/// literal weighted sum: weights are not renormalized, so sums other
/// than 1.0 are valid and simply change the scale of `overall_score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub title: f64,
    pub stability: f64,
    pub growth: f64,
    pub semantic: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skill
            + self.experience
            + self.education
            + self.title
            + self.stability
            + self.growth
            + self.semantic
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub weights: MatchWeights,
    /// Enables bias-adjustment bookkeeping on results. Informational
    /// only; scores are never perturbed.
    pub bias_check: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            bias_check: true,
        }
    }
}

impl MatchConfig {
    /// Defaults overridden by `CR_*` environment variables where set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            weights: MatchWeights {
                skill: env_f64("CR_SKILL_WEIGHT", defaults.weights.skill),
                experience: env_f64("CR_EXPERIENCE_WEIGHT", defaults.weights.experience),
                education: env_f64("CR_EDUCATION_WEIGHT", defaults.weights.education),
                title: env_f64("CR_TITLE_WEIGHT", defaults.weights.title),
                stability: env_f64("CR_STABILITY_WEIGHT", defaults.weights.stability),
                growth: env_f64("CR_GROWTH_WEIGHT", defaults.weights.growth),
                semantic: env_f64("CR_SEMANTIC_WEIGHT", defaults.weights.semantic),
            },
            bias_check: env_bool("CR_BIAS_CHECK", defaults.bias_check),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|v| *v >= 0.0)
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
