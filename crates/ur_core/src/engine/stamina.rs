//! Stamina and fatigue tracker.
//!
//! Fatigue only ever accrues; stamina only ever drains (duel top-ups are
//! applied by the engine, not here). Both rates are phase-driven and
//! dampened by stats, with floors so neither process ever stops entirely.

use crate::engine::config::StaminaConfig;
use crate::engine::phase::RacePhase;
use crate::engine::state::CompetitorState;
use crate::models::{RaceType, TrackCondition};

/// Pre-derived per-competitor inputs for one update.
#[derive(Debug, Clone, Copy)]
pub struct StaminaInputs {
    pub race_type: RaceType,
    pub condition: TrackCondition,
    /// Stamina stat on the unit scale.
    pub stamina_norm: f64,
    /// Guts stat on the unit scale.
    pub guts_norm: f64,
}

/// Advance fatigue and stamina by one tick of `dt` seconds.
pub fn update(state: &mut CompetitorState, phase: RacePhase, inputs: StaminaInputs, dt: f64, cfg: &StaminaConfig) {
    // Fatigue accrual: phase- and race-type-driven, dampened by the
    // Stamina stat down to a floor.
    let damp = (1.0 - inputs.stamina_norm * cfg.stamina_damp).max(cfg.stamina_damp_floor);
    let fatigue_rate = cfg.fatigue_base_for(inputs.race_type)
        * cfg.fatigue_phase.get(phase)
        * cfg.condition_factor(inputs.condition)
        * damp;
    state.fatigue += fatigue_rate * dt;

    // Stamina depletion: phase multiplier plus fatigue feedback, dampened
    // by Guts down to a floor.
    let guts_damp = (1.0 - inputs.guts_norm * cfg.guts_damp).max(cfg.guts_damp_floor);
    let depletion =
        (cfg.depletion_phase.get(phase) + state.fatigue * cfg.fatigue_feedback) * guts_damp;
    state.stamina = (state.stamina - depletion * dt).clamp(cfg.stamina_floor, 100.0);
}
