//! Speed calculator tuning.

use serde::{Deserialize, Serialize};

use crate::engine::phase::RacePhase;
use crate::models::{RaceType, RunningStyle, TrackCondition};

/// One value per race phase. JSON keys match the phase labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseTable {
    pub start: f64,
    pub mid: f64,
    #[serde(rename = "final")]
    pub final_stage: f64,
    pub sprint: f64,
}

impl PhaseTable {
    pub fn get(&self, phase: RacePhase) -> f64 {
        match phase {
            RacePhase::Start => self.start,
            RacePhase::Mid => self.mid,
            RacePhase::Final => self.final_stage,
            RacePhase::Sprint => self.sprint,
        }
    }
}

/// Base / top / sprint speed constants for one race type, in m/s.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedBand {
    pub base: f64,
    pub top: f64,
    pub sprint: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedConfig {
    // === Phase Target Speeds (per race type, m/s) ===
    /// (default: 17.0/19.5/21.0)
    pub sprint_speeds: SpeedBand,
    /// (default: 16.5/18.8/20.2)
    pub mile_speeds: SpeedBand,
    /// (default: 16.0/18.2/19.5)
    pub medium_speeds: SpeedBand,
    /// (default: 15.2/17.4/18.6)
    pub long_speeds: SpeedBand,
    /// Premium on top speed in the Final phase (default: 1.03)
    pub final_premium: f64,

    // === Style Phase Adjustments (signed m/s, 0.0 = neutral) ===
    pub front_runner_adjust: PhaseTable,
    pub pace_chaser_adjust: PhaseTable,
    pub late_surger_adjust: PhaseTable,
    pub end_closer_adjust: PhaseTable,

    // === Fatigue Penalty ===
    /// Speed loss per accumulated fatigue point (default: 0.004)
    pub fatigue_k: f64,
    /// Cap on the total fatigue speed loss (default: 0.35)
    pub fatigue_cap: f64,

    // === Stamina Staircase ===
    /// Effective-stamina thresholds, ascending (default: 0.10/0.30/0.50/0.70)
    pub stamina_thresholds: [f64; 4],
    /// Speed multiplier applied below each threshold
    /// (default: 0.80/0.88/0.94/0.98)
    pub stamina_multipliers: [f64; 4],
    /// Weight of the guts-derived efficiency term inside effective
    /// stamina (default: 0.25)
    pub guts_blend: f64,

    // === Jitter & Clamps ===
    /// Half-width of the uniform speed jitter (default: 0.02 = ±2%)
    pub jitter: f64,
    /// Floor as a fraction of the race type's base speed — an active
    /// competitor never stalls outright (default: 0.55)
    pub floor_fraction: f64,
    /// Ceiling as a multiple of the phase target speed (default: 1.25)
    pub ceiling_factor: f64,

    // === Track Condition ===
    /// Speed factor per condition, Firm..Heavy
    /// (default: 1.01/1.00/0.97/0.93)
    pub condition_speed: [f64; 4],
}

impl SpeedConfig {
    pub fn speeds_for(&self, race_type: RaceType) -> SpeedBand {
        match race_type {
            RaceType::Sprint => self.sprint_speeds,
            RaceType::Mile => self.mile_speeds,
            RaceType::Medium => self.medium_speeds,
            RaceType::Long => self.long_speeds,
        }
    }

    pub fn style_adjust(&self, style: RunningStyle) -> &PhaseTable {
        match style {
            RunningStyle::FrontRunner => &self.front_runner_adjust,
            RunningStyle::PaceChaser => &self.pace_chaser_adjust,
            RunningStyle::LateSurger => &self.late_surger_adjust,
            RunningStyle::EndCloser => &self.end_closer_adjust,
        }
    }

    pub fn condition_factor(&self, condition: TrackCondition) -> f64 {
        self.condition_speed[condition.index()]
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            sprint_speeds: SpeedBand { base: 17.0, top: 19.5, sprint: 21.0 },
            mile_speeds: SpeedBand { base: 16.5, top: 18.8, sprint: 20.2 },
            medium_speeds: SpeedBand { base: 16.0, top: 18.2, sprint: 19.5 },
            long_speeds: SpeedBand { base: 15.2, top: 17.4, sprint: 18.6 },
            final_premium: 1.03,

            front_runner_adjust: PhaseTable {
                start: 0.60,
                mid: 0.15,
                final_stage: -0.10,
                sprint: -0.45,
            },
            pace_chaser_adjust: PhaseTable {
                start: 0.15,
                mid: 0.20,
                final_stage: 0.10,
                sprint: -0.10,
            },
            late_surger_adjust: PhaseTable {
                start: -0.25,
                mid: -0.05,
                final_stage: 0.35,
                sprint: 0.30,
            },
            end_closer_adjust: PhaseTable {
                start: -0.50,
                mid: -0.15,
                final_stage: 0.30,
                sprint: 0.65,
            },

            fatigue_k: 0.004,
            fatigue_cap: 0.35,

            stamina_thresholds: [0.10, 0.30, 0.50, 0.70],
            stamina_multipliers: [0.80, 0.88, 0.94, 0.98],
            guts_blend: 0.25,

            jitter: 0.02,
            floor_fraction: 0.55,
            ceiling_factor: 1.25,

            condition_speed: [1.01, 1.00, 0.97, 0.93],
        }
    }
}
