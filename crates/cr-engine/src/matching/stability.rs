use serde::Serialize;

use super::DimensionScore;
use crate::parse::duration_months;
use crate::WorkEntry;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StabilityBreakdown {
    pub average_tenure_years: f64,
    pub entries: usize,
}

/// Score tenure stability from average time per position. Durations that
/// cannot be parsed silently resolve to a 1-year fallback so a noisy
/// resume never fails scoring.
pub fn score_stability(work_history: &[WorkEntry]) -> (DimensionScore, StabilityBreakdown) {
    if work_history.is_empty() {
        return (
            DimensionScore::neutral("UNKNOWN", "no work history"),
            StabilityBreakdown::default(),
        );
    }

    let total_months: u32 = work_history
        .iter()
        .map(|entry| duration_months(&entry.duration_text))
        .sum();
    let average_years = f64::from(total_months) / work_history.len() as f64 / 12.0;

    let (score, status) = if average_years >= 2.0 {
        (1.0, "High stability")
    } else if average_years >= 1.5 {
        (0.85, "Good stability")
    } else if average_years >= 1.0 {
        (0.7, "Moderate stability")
    } else {
        (0.4, "Job-hopper risk")
    };

    let details = format!(
        "average tenure {average_years:.1}y over {} positions",
        work_history.len()
    );

    (
        DimensionScore::new(score, status, details),
        StabilityBreakdown {
            average_tenure_years: average_years,
            entries: work_history.len(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(duration: &str) -> WorkEntry {
        WorkEntry {
            duration_text: duration.to_string(),
            ..WorkEntry::default()
        }
    }

    #[test]
    fn long_tenures_score_high() {
        let history = vec![entry("2015 - 2019"), entry("2019 - 2023")];
        let (score, breakdown) = score_stability(&history);
        assert_eq!(score.score, 1.0);
        assert_eq!(score.status, "High stability");
        assert_eq!(breakdown.average_tenure_years, 4.0);
    }

    #[test]
    fn short_stints_flag_hopping_risk() {
        let history = vec![
            entry("2020 - 2020"),
            entry("2021 - 2021"),
            entry("2022 - 2022"),
        ];
        let (score, _) = score_stability(&history);
        assert_eq!(score.score, 0.4);
        assert_eq!(score.status, "Job-hopper risk");
    }

    #[test]
    fn unparseable_durations_count_as_one_year() {
        let history = vec![entry("a while"), entry("")];
        let (score, breakdown) = score_stability(&history);
        assert_eq!(breakdown.average_tenure_years, 1.0);
        assert_eq!(score.score, 0.7);
    }

    #[test]
    fn empty_history_is_neutral() {
        let (score, breakdown) = score_stability(&[]);
        assert_eq!(score.score, 0.5);
        assert_eq!(breakdown.entries, 0);
    }

    #[test]
    fn mid_band_thresholds() {
        // 1.5y average lands in the 0.85 band.
        let history = vec![entry("2020 - 2021"), entry("2020 - 2022")];
        let (score, _) = score_stability(&history);
        assert_eq!(score.score, 0.85);
    }
}
