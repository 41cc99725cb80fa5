//! Performance model tuning.
//!
//! Stat weighting, style re-weighting, aptitude multipliers and the
//! race-type normalization bands. These tables were never settled by
//! successive balance passes, so they live here as data rather than code.

use serde::{Deserialize, Serialize};

use crate::models::{AptitudeGrade, RaceType, RunningStyle};

/// Per-stat weighting used by the weighted-sum performance score.
/// Weights are relative; the model renormalizes them to sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatWeights {
    pub speed: f64,
    pub stamina: f64,
    pub power: f64,
    pub guts: f64,
    pub wit: f64,
}

impl StatWeights {
    pub fn sum(&self) -> f64 {
        self.speed + self.stamina + self.power + self.guts + self.wit
    }
}

/// Closed min/max band the field's coefficients are scaled into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NormalizationBand {
    pub min: f64,
    pub max: f64,
}

impl NormalizationBand {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    // === Stat Weights (per race type) ===
    /// Sprint favors raw Speed/Power (default: 0.42/0.08/0.26/0.10/0.14)
    pub sprint_weights: StatWeights,
    /// (default: 0.36/0.16/0.22/0.12/0.14)
    pub mile_weights: StatWeights,
    /// (default: 0.30/0.26/0.18/0.13/0.13)
    pub medium_weights: StatWeights,
    /// Long favors Stamina (default: 0.24/0.36/0.14/0.15/0.11)
    pub long_weights: StatWeights,

    // === Style Re-weighting ===
    /// Multiplier applied to a style's two priority stats before the
    /// weighted sum is renormalized (default: 1.12)
    pub style_emphasis: f64,

    // === Aptitude Multipliers ===
    /// Base multiplier per grade, S..G
    /// (default: 1.12/1.06/1.00/0.94/0.88/0.82/0.76/0.70)
    pub grade_multipliers: [f64; 8],
    /// Spread factor per race type applied to the grade multipliers as
    /// `1 + (m - 1) * spread` — Sprint compresses aptitude gaps, Long
    /// widens them (default: 0.90/1.00/1.05/1.10)
    pub grade_spread: [f64; 4],

    // === Normalization Bands (per race type) ===
    /// (default: [0.97,1.03] / [0.95,1.05] / [0.93,1.07] / [0.91,1.09])
    pub sprint_band: NormalizationBand,
    pub mile_band: NormalizationBand,
    pub medium_band: NormalizationBand,
    pub long_band: NormalizationBand,

    /// Divisor converting raw stat points to the unit scale (default: 1200)
    pub stat_scale: f64,
}

impl PerformanceConfig {
    pub fn weights_for(&self, race_type: RaceType) -> StatWeights {
        match race_type {
            RaceType::Sprint => self.sprint_weights,
            RaceType::Mile => self.mile_weights,
            RaceType::Medium => self.medium_weights,
            RaceType::Long => self.long_weights,
        }
    }

    pub fn band_for(&self, race_type: RaceType) -> NormalizationBand {
        match race_type {
            RaceType::Sprint => self.sprint_band,
            RaceType::Mile => self.mile_band,
            RaceType::Medium => self.medium_band,
            RaceType::Long => self.long_band,
        }
    }

    /// Aptitude multiplier for a grade in a given race type.
    pub fn grade_multiplier(&self, grade: AptitudeGrade, race_type: RaceType) -> f64 {
        let base = self.grade_multipliers[grade.rank()];
        let spread = self.grade_spread[race_type.index()];
        1.0 + (base - 1.0) * spread
    }

    /// The two stats a running style leans on when pacing itself.
    pub fn style_priority(style: RunningStyle) -> (StyleStat, StyleStat) {
        match style {
            RunningStyle::FrontRunner => (StyleStat::Speed, StyleStat::Wit),
            RunningStyle::PaceChaser => (StyleStat::Speed, StyleStat::Stamina),
            RunningStyle::LateSurger => (StyleStat::Power, StyleStat::Wit),
            RunningStyle::EndCloser => (StyleStat::Speed, StyleStat::Power),
        }
    }
}

/// Identifies one of the five stats inside weighting tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleStat {
    Speed,
    Stamina,
    Power,
    Guts,
    Wit,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            sprint_weights: StatWeights {
                speed: 0.42,
                stamina: 0.08,
                power: 0.26,
                guts: 0.10,
                wit: 0.14,
            },
            mile_weights: StatWeights {
                speed: 0.36,
                stamina: 0.16,
                power: 0.22,
                guts: 0.12,
                wit: 0.14,
            },
            medium_weights: StatWeights {
                speed: 0.30,
                stamina: 0.26,
                power: 0.18,
                guts: 0.13,
                wit: 0.13,
            },
            long_weights: StatWeights {
                speed: 0.24,
                stamina: 0.36,
                power: 0.14,
                guts: 0.15,
                wit: 0.11,
            },

            style_emphasis: 1.12,

            grade_multipliers: [1.12, 1.06, 1.00, 0.94, 0.88, 0.82, 0.76, 0.70],
            grade_spread: [0.90, 1.00, 1.05, 1.10],

            sprint_band: NormalizationBand { min: 0.97, max: 1.03 },
            mile_band: NormalizationBand { min: 0.95, max: 1.05 },
            medium_band: NormalizationBand { min: 0.93, max: 1.07 },
            long_band: NormalizationBand { min: 0.91, max: 1.09 },

            stat_scale: 1200.0,
        }
    }
}
