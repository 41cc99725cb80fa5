//! Incident model.
//!
//! Temporary, randomly triggered speed reductions. Trigger probability is
//! inversely related to Wit and modulated by running style, gated behind a
//! warm-up period plus a secondary random draw so incidents stay rare even
//! when the base probability is non-trivial.

use rand::Rng;

use crate::engine::config::IncidentConfig;
use crate::engine::phase::RacePhase;
use crate::engine::state::{ActiveIncident, CompetitorState};
use crate::models::{IncidentKind, RunningStyle};

/// Phase-appropriate incident pool. Gate trouble happens early, traffic
/// trouble in the middle, composure trouble late.
fn kind_pool(phase: RacePhase) -> &'static [IncidentKind] {
    match phase {
        RacePhase::Start => &[IncidentKind::SlowStart, IncidentKind::Stumble],
        RacePhase::Mid => &[IncidentKind::Stumble, IncidentKind::BoxedIn],
        RacePhase::Final => &[IncidentKind::BoxedIn, IncidentKind::WideRun],
        RacePhase::Sprint => &[IncidentKind::WideRun, IncidentKind::Flustered],
    }
}

/// Roll for a new incident. Only call for competitors without an active
/// incident. Returns the triggered kind; attaching it to the state and
/// emitting the event is the engine's job.
pub fn maybe_trigger<R: Rng>(
    rng: &mut R,
    tick: u64,
    phase: RacePhase,
    wit_norm: f64,
    style: RunningStyle,
    cfg: &IncidentConfig,
) -> Option<IncidentKind> {
    if tick <= cfg.warmup_ticks {
        return None;
    }

    let damp = (1.0 - wit_norm * cfg.wit_damp).max(cfg.wit_damp_floor);
    let prob = cfg.base_prob * damp * cfg.style_factor(style);
    if rng.gen::<f64>() >= prob {
        return None;
    }
    // Secondary gate keeps incidents rare even at non-trivial base rates.
    if rng.gen::<f64>() >= cfg.gate_prob {
        return None;
    }

    let pool = kind_pool(phase);
    Some(pool[rng.gen_range(0..pool.len())])
}

/// Attach a freshly triggered incident and apply its one-time momentum
/// penalty.
pub fn apply_trigger(state: &mut CompetitorState, kind: IncidentKind, cfg: &IncidentConfig) {
    let params = cfg.params(kind);
    state.incident = Some(ActiveIncident { kind, remaining_ticks: params.duration_ticks });
    state.nudge_momentum(-params.momentum_penalty);
}

/// Speed multiplier for this tick and expiry bookkeeping. The multiplier
/// applies for exactly `duration_ticks` ticks; on the tick the counter
/// reaches zero the incident is cleared and a small momentum rebound lands,
/// so the next tick runs the normal calculation again.
pub fn tick_active(state: &mut CompetitorState, cfg: &IncidentConfig) -> f64 {
    let Some(active) = state.incident.as_mut() else {
        return 1.0;
    };
    let multiplier = cfg.params(active.kind).speed_multiplier;
    active.remaining_ticks -= 1;
    if active.remaining_ticks == 0 {
        state.incident = None;
        state.nudge_momentum(cfg.momentum_rebound);
    }
    multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::IntoEnumIterator;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_no_trigger_during_warmup() {
        let cfg = IncidentConfig { base_prob: 1.0, gate_prob: 1.0, ..IncidentConfig::default() };
        let mut rng = test_rng();
        for tick in 0..=cfg.warmup_ticks {
            assert_eq!(
                maybe_trigger(&mut rng, tick, RacePhase::Start, 0.0, RunningStyle::PaceChaser, &cfg),
                None
            );
        }
    }

    #[test]
    fn test_certain_trigger_past_warmup() {
        let cfg = IncidentConfig { base_prob: 2.0, gate_prob: 1.0, ..IncidentConfig::default() };
        let mut rng = test_rng();
        let kind =
            maybe_trigger(&mut rng, 100, RacePhase::Mid, 0.0, RunningStyle::PaceChaser, &cfg);
        assert!(kind.is_some());
        assert!(kind_pool(RacePhase::Mid).contains(&kind.unwrap()));
    }

    #[test]
    fn test_zero_base_prob_never_triggers() {
        let cfg = IncidentConfig { base_prob: 0.0, ..IncidentConfig::default() };
        let mut rng = test_rng();
        for tick in 0..5_000 {
            assert_eq!(
                maybe_trigger(&mut rng, tick, RacePhase::Mid, 0.5, RunningStyle::EndCloser, &cfg),
                None
            );
        }
    }

    #[test]
    fn test_wit_suppresses_trigger_rate() {
        let cfg = IncidentConfig { gate_prob: 1.0, ..IncidentConfig::default() };
        let trials = 200_000u32;

        let mut count_sharp = 0;
        let mut rng = test_rng();
        for tick in 0..trials as u64 {
            if maybe_trigger(&mut rng, tick + 100, RacePhase::Mid, 1.0, RunningStyle::PaceChaser, &cfg)
                .is_some()
            {
                count_sharp += 1;
            }
        }

        let mut count_dull = 0;
        let mut rng = test_rng();
        for tick in 0..trials as u64 {
            if maybe_trigger(&mut rng, tick + 100, RacePhase::Mid, 0.0, RunningStyle::PaceChaser, &cfg)
                .is_some()
            {
                count_dull += 1;
            }
        }

        assert!(count_sharp < count_dull, "high Wit means fewer incidents");
    }

    #[test]
    fn test_multiplier_lasts_exactly_duration_ticks() {
        let cfg = IncidentConfig::default();
        let mut state = CompetitorState::new(0);
        apply_trigger(&mut state, IncidentKind::Stumble, &cfg);
        let duration = cfg.stumble.duration_ticks;

        for _ in 0..duration {
            assert!(state.incident.is_some());
            let multiplier = tick_active(&mut state, &cfg);
            assert!(multiplier < 1.0);
        }
        // Next tick runs the normal calculation again.
        assert!(state.incident.is_none());
        assert_eq!(tick_active(&mut state, &cfg), 1.0);
    }

    #[test]
    fn test_trigger_penalty_and_expiry_rebound() {
        let cfg = IncidentConfig::default();
        let mut state = CompetitorState::new(0);
        apply_trigger(&mut state, IncidentKind::WideRun, &cfg);
        let after_penalty = state.momentum;
        assert!(after_penalty < 1.0);

        for _ in 0..cfg.wide_run.duration_ticks {
            tick_active(&mut state, &cfg);
        }
        assert!(state.momentum > after_penalty, "expiry grants a small rebound");
    }

    #[test]
    fn test_all_kinds_have_reducing_multipliers() {
        let cfg = IncidentConfig::default();
        for kind in IncidentKind::iter() {
            let params = cfg.params(kind);
            assert!(params.speed_multiplier < 1.0);
            assert!(params.duration_ticks > 0);
        }
    }
}
