//! Instantaneous speed calculator.
//!
//! Combines the phase target speed, the style's signed phase adjustment,
//! the performance coefficient, fatigue/stamina penalties, track condition
//! and a bounded jitter. The jitter draw is an explicit input: identical
//! state plus an identical draw is bit-reproducible, with no ambient
//! randomness anywhere on this path.

use crate::engine::config::SpeedConfig;
use crate::engine::phase::RacePhase;
use crate::models::{RaceType, RunningStyle, TrackCondition};

/// Everything the calculator reads for one tick, pre-derived by the
/// engine. `guts_norm` is the Guts stat on the unit scale.
#[derive(Debug, Clone, Copy)]
pub struct SpeedContext {
    pub phase: RacePhase,
    pub race_type: RaceType,
    pub condition: TrackCondition,
    pub style: RunningStyle,
    pub coefficient: f64,
    pub fatigue: f64,
    /// Current stamina in `[0, 100]`.
    pub stamina: f64,
    pub guts_norm: f64,
    /// Uniform draw in `[-cfg.jitter, cfg.jitter]`.
    pub jitter: f64,
}

/// Effective stamina blends the raw stamina ratio with a guts-derived
/// efficiency term: gutsy runners hold form below the same tank level.
fn effective_stamina(stamina: f64, guts_norm: f64, blend: f64) -> f64 {
    let ratio = (stamina / 100.0).clamp(0.0, 1.0);
    ratio * (1.0 - blend) + guts_norm.clamp(0.0, 1.0) * blend
}

/// Staircase multiplier: below each ascending threshold a progressively
/// harsher multiplier applies; above the top threshold speed is untouched.
fn stamina_multiplier(effective: f64, cfg: &SpeedConfig) -> f64 {
    for (threshold, multiplier) in
        cfg.stamina_thresholds.iter().zip(cfg.stamina_multipliers.iter())
    {
        if effective < *threshold {
            return *multiplier;
        }
    }
    1.0
}

/// Speed in m/s for this tick. Incident multipliers and momentum are
/// applied by the engine on top of this value.
pub fn compute_speed(ctx: &SpeedContext, cfg: &SpeedConfig) -> f64 {
    let band = cfg.speeds_for(ctx.race_type);

    // 1. Phase target speed
    let target = match ctx.phase {
        RacePhase::Start => band.base,
        RacePhase::Mid => band.top,
        RacePhase::Final => band.top * cfg.final_premium,
        RacePhase::Sprint => band.sprint,
    };

    // 2. Style phase adjustment (signed, 0.0 = neutral)
    let mut speed = target + cfg.style_adjust(ctx.style).get(ctx.phase);

    // 3. Performance coefficient
    speed *= ctx.coefficient;

    // 4. Fatigue penalty, capped
    speed *= 1.0 - (ctx.fatigue * cfg.fatigue_k).min(cfg.fatigue_cap);

    // 5. Stamina staircase on guts-blended effective stamina
    let effective = effective_stamina(ctx.stamina, ctx.guts_norm, cfg.guts_blend);
    speed *= stamina_multiplier(effective, cfg);

    // 6. Track condition
    speed *= cfg.condition_factor(ctx.condition);

    // 7. Bounded jitter
    speed *= 1.0 + ctx.jitter;

    // 8. Clamp: never stall outright, never exceed the phase ceiling
    let floor = band.base * cfg.floor_fraction;
    let ceiling = target * cfg.ceiling_factor;
    speed.clamp(floor, ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SpeedContext {
        SpeedContext {
            phase: RacePhase::Mid,
            race_type: RaceType::Mile,
            condition: TrackCondition::Good,
            style: RunningStyle::PaceChaser,
            coefficient: 1.0,
            fatigue: 0.0,
            stamina: 100.0,
            guts_norm: 0.5,
            jitter: 0.0,
        }
    }

    #[test]
    fn test_identical_inputs_are_bit_reproducible() {
        let cfg = SpeedConfig::default();
        let a = compute_speed(&ctx(), &cfg);
        let b = compute_speed(&ctx(), &cfg);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_phase_targets_ordered() {
        let cfg = SpeedConfig::default();
        let mut c = ctx();
        c.style = RunningStyle::PaceChaser;

        c.phase = RacePhase::Start;
        let start = compute_speed(&c, &cfg);
        c.phase = RacePhase::Mid;
        let mid = compute_speed(&c, &cfg);
        c.phase = RacePhase::Sprint;
        let sprint = compute_speed(&c, &cfg);

        assert!(start < mid, "base speed below top speed");
        assert!(mid < sprint, "top speed below sprint speed");
    }

    #[test]
    fn test_fatigue_penalty_is_capped() {
        let cfg = SpeedConfig::default();
        let mut c = ctx();
        c.fatigue = 100.0;
        let at_hundred = compute_speed(&c, &cfg);
        c.fatigue = 10_000.0;
        let absurd = compute_speed(&c, &cfg);
        assert_eq!(at_hundred.to_bits(), absurd.to_bits(), "penalty capped at fatigue_cap");
    }

    #[test]
    fn test_stamina_staircase_progressively_harsher() {
        let cfg = SpeedConfig::default();
        let mut c = ctx();
        c.guts_norm = 0.0;

        let mut last = f64::INFINITY;
        for stamina in [80.0, 60.0, 40.0, 20.0, 5.0] {
            c.stamina = stamina;
            let speed = compute_speed(&c, &cfg);
            assert!(speed <= last, "lower stamina never speeds a runner up");
            last = speed;
        }
    }

    #[test]
    fn test_guts_softens_low_stamina() {
        let cfg = SpeedConfig::default();
        let mut c = ctx();
        c.stamina = 15.0;
        c.guts_norm = 0.0;
        let fragile = compute_speed(&c, &cfg);
        c.guts_norm = 1.0;
        let gritty = compute_speed(&c, &cfg);
        assert!(gritty > fragile);
    }

    #[test]
    fn test_floor_holds_under_worst_case() {
        let cfg = SpeedConfig::default();
        let mut c = ctx();
        c.coefficient = 0.91;
        c.fatigue = 1e6;
        c.stamina = 0.0;
        c.guts_norm = 0.0;
        c.jitter = -cfg.jitter;
        c.condition = TrackCondition::Heavy;
        let speed = compute_speed(&c, &cfg);
        let band = cfg.speeds_for(c.race_type);
        assert!(speed >= band.base * cfg.floor_fraction - 1e-12);
        assert!(speed > 0.0, "an active competitor never stalls outright");
    }

    #[test]
    fn test_jitter_bounds() {
        let cfg = SpeedConfig::default();
        let mut c = ctx();
        c.jitter = cfg.jitter;
        let high = compute_speed(&c, &cfg);
        c.jitter = -cfg.jitter;
        let low = compute_speed(&c, &cfg);
        c.jitter = 0.0;
        let nominal = compute_speed(&c, &cfg);
        assert!(low < nominal && nominal < high);
        assert!((high / nominal - 1.0 - cfg.jitter).abs() < 1e-9);
    }
}
