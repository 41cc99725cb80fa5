//! Stamina and fatigue tracker tuning.

use serde::{Deserialize, Serialize};

use super::speed_config::PhaseTable;
use crate::models::{RaceType, TrackCondition};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaminaConfig {
    // === Fatigue Accrual ===
    /// Base fatigue points per second, per race type Sprint..Long
    /// (default: 0.90/0.80/0.70/0.60)
    pub fatigue_base: [f64; 4],
    /// Phase multiplier on fatigue accrual
    /// (default: 0.60/1.00/1.35/1.80)
    pub fatigue_phase: PhaseTable,
    /// How strongly the Stamina stat dampens accrual (default: 0.60)
    pub stamina_damp: f64,
    /// Damping floor — fatigue never stops accruing entirely (default: 0.35)
    pub stamina_damp_floor: f64,

    // === Stamina Depletion ===
    /// Stamina points per second per phase, Start < Mid < Final < Sprint
    /// (default: 0.35/0.55/0.80/1.10)
    pub depletion_phase: PhaseTable,
    /// Extra depletion per accumulated fatigue point per second
    /// (default: 0.004)
    pub fatigue_feedback: f64,
    /// How strongly the Guts stat dampens depletion (default: 0.40)
    pub guts_damp: f64,
    /// Damping floor — depletion never stops entirely (default: 0.50)
    pub guts_damp_floor: f64,

    /// Low non-zero stamina floor during the race. True exhaustion is a
    /// DNF outcome, not a stamina value of exactly zero (default: 2.0)
    pub stamina_floor: f64,

    // === Track Condition ===
    /// Fatigue factor per condition, Firm..Heavy
    /// (default: 0.97/1.00/1.12/1.25)
    pub condition_fatigue: [f64; 4],
}

impl StaminaConfig {
    pub fn fatigue_base_for(&self, race_type: RaceType) -> f64 {
        self.fatigue_base[race_type.index()]
    }

    pub fn condition_factor(&self, condition: TrackCondition) -> f64 {
        self.condition_fatigue[condition.index()]
    }
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            fatigue_base: [0.90, 0.80, 0.70, 0.60],
            fatigue_phase: PhaseTable { start: 0.60, mid: 1.00, final_stage: 1.35, sprint: 1.80 },
            stamina_damp: 0.60,
            stamina_damp_floor: 0.35,

            depletion_phase: PhaseTable { start: 0.35, mid: 0.55, final_stage: 0.80, sprint: 1.10 },
            fatigue_feedback: 0.004,
            guts_damp: 0.40,
            guts_damp_floor: 0.50,

            stamina_floor: 2.0,

            condition_fatigue: [0.97, 1.00, 1.12, 1.25],
        }
    }
}
