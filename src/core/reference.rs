//! Calibration tables for the radar normalizer and life-expectancy defaults.
//!
//! Values default to the published Mexico benchmarks (CONAPO 2024 life tables,
//! ENIGH income deciles, OECD working-hour averages) and can be overridden
//! through the `[reference]` section of the configuration file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{BiologicalProfile, EducationLevel};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LifeExpectancyBaselines {
    pub male: f64,
    pub female: f64,
}

impl Default for LifeExpectancyBaselines {
    fn default() -> Self {
        Self {
            male: 72.3,
            female: 77.8,
        }
    }
}

impl LifeExpectancyBaselines {
    /// Whole-year default offered for a profile; fractional years are truncated.
    pub fn default_years(&self, profile: BiologicalProfile) -> u32 {
        let baseline = match profile {
            BiologicalProfile::Male => self.male,
            BiologicalProfile::Female => self.female,
        };
        baseline.max(0.0).trunc() as u32
    }
}

/// Full-scale denominators: a raw metric equal to its denominator scores 100.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RadarScales {
    pub income_full_scale: f64,
    pub net_worth_full_scale: f64,
    pub free_hours_full_scale: f64,
    pub savings_rate_full_scale: f64,
    pub education_scores: BTreeMap<String, f64>,
    pub education_fallback: f64,
}

impl Default for RadarScales {
    fn default() -> Self {
        let education_scores = [
            (EducationLevel::HighSchool, 40.0),
            (EducationLevel::Bachelor, 65.0),
            (EducationLevel::Master, 90.0),
            (EducationLevel::Doctorate, 100.0),
        ]
        .into_iter()
        .map(|(level, score)| (level.slug().to_string(), score))
        .collect();

        Self {
            income_full_scale: 30_000.0,
            net_worth_full_scale: 1_000_000.0,
            free_hours_full_scale: 50.0,
            savings_rate_full_scale: 30.0,
            education_scores,
            education_fallback: 50.0,
        }
    }
}

impl RadarScales {
    pub fn education_score(&self, level: EducationLevel) -> f64 {
        self.education_scores
            .get(level.slug())
            .copied()
            .unwrap_or(self.education_fallback)
    }
}

/// Reference population plotted next to the user on the radar chart.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Benchmark {
    pub name: String,
    pub scores: [f64; 5],
    pub hover_text: [String; 5],
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            name: "MX average".to_string(),
            scores: [40.0, 20.0, 60.0, 60.0, 20.0],
            hover_text: [
                "~$12,000".to_string(),
                "~$200,000".to_string(),
                "~31h/wk".to_string(),
                "Bachelor's".to_string(),
                "~5%".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReferenceTable {
    pub life_expectancy: LifeExpectancyBaselines,
    pub radar: RadarScales,
    pub benchmark: Benchmark,
}
