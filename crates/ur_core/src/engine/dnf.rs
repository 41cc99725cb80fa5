//! DNF model.
//!
//! The designed failure path for a competitor: recorded, never thrown.
//! Only evaluated inside a mid-race progress window, driven by stat
//! deficits and the worst relevant aptitude grades, and gated by a
//! secondary draw to keep retirements rare.

use rand::Rng;

use crate::engine::config::DnfConfig;
use crate::models::{CompetitorProfile, RaceConfig};

fn deficit(stat: u16, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    ((threshold - f64::from(stat)) / threshold).max(0.0)
}

/// Roll for a retirement. Returns the composed human-readable reason on
/// trigger; freezing distance/time and emitting the event is the engine's
/// job.
pub fn evaluate<R: Rng>(
    rng: &mut R,
    profile: &CompetitorProfile,
    race: &RaceConfig,
    progress: f64,
    cfg: &DnfConfig,
) -> Option<String> {
    // Never at the very start, never in the last stretch.
    if progress <= cfg.window_min || progress >= cfg.window_max {
        return None;
    }

    let stamina_deficit = deficit(profile.stats.stamina, cfg.stamina_threshold);
    let guts_deficit = deficit(profile.stats.guts, cfg.guts_threshold);

    // Worst of the grades that matter for this assignment.
    let distance_grade = profile.distance_aptitude.for_type(race.race_type);
    let surface_grade = profile.surface_aptitude.for_surface(race.surface);
    let worst_rank = distance_grade.rank().max(surface_grade.rank());
    // Grades E and worse contribute; D and better do not.
    let aptitude_term = cfg.aptitude_penalty * (worst_rank as f64 - 4.0).max(0.0);

    let prob = cfg.base_scale
        * (cfg.stamina_weight * stamina_deficit + cfg.guts_weight * guts_deficit + aptitude_term);
    if prob <= 0.0 || rng.gen::<f64>() >= prob {
        return None;
    }
    if rng.gen::<f64>() >= cfg.gate_prob {
        return None;
    }

    Some(compose_reason(stamina_deficit, guts_deficit, worst_rank))
}

/// Reason string naming whichever deficits contributed.
fn compose_reason(stamina_deficit: f64, guts_deficit: f64, worst_rank: usize) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if stamina_deficit > 0.66 {
        parts.push("complete exhaustion");
    } else if stamina_deficit > 0.0 {
        parts.push("exhaustion");
    }
    if guts_deficit > 0.0 {
        parts.push("loss of will to keep running");
    }
    if worst_rank > 4 {
        parts.push("outclassed by the assignment");
    }
    if parts.is_empty() {
        parts.push("sudden loss of condition");
    }
    format!("retired mid-race: {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AptitudeGrade, DistanceAptitude, RaceType, RunningStyle, Stats, Surface,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn long_race() -> RaceConfig {
        RaceConfig::new(3000.0, RaceType::Long, Surface::Turf)
    }

    fn frail() -> CompetitorProfile {
        CompetitorProfile::new("frail", Stats::new(500, 0, 500, 0, 500), RunningStyle::PaceChaser)
    }

    #[test]
    fn test_never_outside_window() {
        let cfg = DnfConfig { base_scale: 1.0, gate_prob: 1.0, ..DnfConfig::default() };
        let mut rng = StdRng::seed_from_u64(1);
        for progress in [0.0, 0.1, cfg.window_min, cfg.window_max, 0.9, 1.0] {
            for _ in 0..1_000 {
                assert_eq!(evaluate(&mut rng, &frail(), &long_race(), progress, &cfg), None);
            }
        }
    }

    #[test]
    fn test_sound_competitor_never_retires() {
        let cfg = DnfConfig::default();
        let sound = CompetitorProfile::new(
            "sound",
            Stats::new(600, 800, 600, 700, 600),
            RunningStyle::PaceChaser,
        );
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50_000 {
            assert_eq!(evaluate(&mut rng, &sound, &long_race(), 0.5, &cfg), None);
        }
    }

    #[test]
    fn test_frail_competitor_retires_sometimes() {
        let cfg = DnfConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut triggered = 0;
        for _ in 0..100_000 {
            if evaluate(&mut rng, &frail(), &long_race(), 0.5, &cfg).is_some() {
                triggered += 1;
            }
        }
        assert!(triggered > 0, "deficits produce a non-zero retirement rate");
        assert!(triggered < 1_000, "the gate keeps retirements rare");
    }

    #[test]
    fn test_reason_names_contributing_deficits() {
        let reason = compose_reason(1.0, 1.0, 2);
        assert!(reason.contains("exhaustion"));
        assert!(reason.contains("loss of will"));
        assert!(!reason.contains("outclassed"));

        let reason = compose_reason(0.0, 0.0, 7);
        assert!(reason.contains("outclassed"));
    }

    #[test]
    fn test_bad_aptitude_alone_can_retire() {
        let cfg = DnfConfig { gate_prob: 1.0, ..DnfConfig::default() };
        let outclassed = CompetitorProfile::new(
            "outclassed",
            Stats::new(600, 800, 600, 700, 600),
            RunningStyle::PaceChaser,
        )
        .with_distance_aptitude(DistanceAptitude::uniform(AptitudeGrade::G));
        let mut rng = StdRng::seed_from_u64(4);
        let mut triggered = 0;
        for _ in 0..200_000 {
            if let Some(reason) = evaluate(&mut rng, &outclassed, &long_race(), 0.5, &cfg) {
                assert!(reason.contains("outclassed"));
                triggered += 1;
            }
        }
        assert!(triggered > 0);
    }
}
