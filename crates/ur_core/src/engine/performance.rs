//! Performance model.
//!
//! Derives one normalized performance coefficient per competitor from
//! stats, running style and aptitudes. Computed once before the race
//! starts and read-only afterwards; the tick path only multiplies by it.

use crate::engine::config::{PerformanceConfig, StatWeights, StyleStat};
use crate::models::{CompetitorProfile, RaceConfig};

fn emphasized(weights: StatWeights, stat: StyleStat, factor: f64) -> StatWeights {
    let mut w = weights;
    match stat {
        StyleStat::Speed => w.speed *= factor,
        StyleStat::Stamina => w.stamina *= factor,
        StyleStat::Power => w.power *= factor,
        StyleStat::Guts => w.guts *= factor,
        StyleStat::Wit => w.wit *= factor,
    }
    w
}

/// Raw (pre-normalization) performance score for one competitor.
fn raw_score(profile: &CompetitorProfile, race: &RaceConfig, cfg: &PerformanceConfig) -> f64 {
    let (first, second) = PerformanceConfig::style_priority(profile.style);
    let mut weights = cfg.weights_for(race.race_type);
    weights = emphasized(weights, first, cfg.style_emphasis);
    weights = emphasized(weights, second, cfg.style_emphasis);
    let total = weights.sum();

    let stats = &profile.stats;
    let weighted = (f64::from(stats.speed) * weights.speed
        + f64::from(stats.stamina) * weights.stamina
        + f64::from(stats.power) * weights.power
        + f64::from(stats.guts) * weights.guts
        + f64::from(stats.wit) * weights.wit)
        / (total * cfg.stat_scale);

    let distance_grade = profile.distance_aptitude.for_type(race.race_type);
    let surface_grade = profile.surface_aptitude.for_surface(race.surface);

    weighted
        * cfg.grade_multiplier(distance_grade, race.race_type)
        * cfg.grade_multiplier(surface_grade, race.race_type)
}

/// Compute the whole field's coefficients: raw weighted scores min-max
/// scaled into the race type's normalization band. A field of identical
/// scores lands on the band midpoint.
pub fn field_coefficients(
    profiles: &[CompetitorProfile],
    race: &RaceConfig,
    cfg: &PerformanceConfig,
) -> Vec<f64> {
    let raw: Vec<f64> = profiles.iter().map(|p| raw_score(p, race, cfg)).collect();
    let band = cfg.band_for(race.race_type);

    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    if span < 1e-9 {
        return vec![band.midpoint(); raw.len()];
    }

    raw.iter().map(|&score| band.min + (score - min) / span * band.width()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AptitudeGrade, DistanceAptitude, RaceType, RunningStyle, Stats, Surface, SurfaceAptitude,
    };

    fn race(race_type: RaceType) -> RaceConfig {
        RaceConfig::new(1600.0, race_type, Surface::Turf)
    }

    fn profile(name: &str, stats: Stats) -> CompetitorProfile {
        CompetitorProfile::new(name, stats, RunningStyle::PaceChaser)
    }

    #[test]
    fn test_identical_field_lands_on_midpoint() {
        let cfg = PerformanceConfig::default();
        let profiles =
            vec![profile("a", Stats::uniform(600)), profile("b", Stats::uniform(600))];
        let coeffs = field_coefficients(&profiles, &race(RaceType::Mile), &cfg);
        let mid = cfg.band_for(RaceType::Mile).midpoint();
        assert!(coeffs.iter().all(|&c| (c - mid).abs() < 1e-12));
    }

    #[test]
    fn test_field_extremes_hit_band_edges() {
        let cfg = PerformanceConfig::default();
        let profiles = vec![
            profile("weak", Stats::uniform(300)),
            profile("mid", Stats::uniform(600)),
            profile("strong", Stats::uniform(900)),
        ];
        let coeffs = field_coefficients(&profiles, &race(RaceType::Mile), &cfg);
        let band = cfg.band_for(RaceType::Mile);
        assert!((coeffs[0] - band.min).abs() < 1e-12);
        assert!((coeffs[2] - band.max).abs() < 1e-12);
        assert!(coeffs[1] > coeffs[0] && coeffs[1] < coeffs[2]);
    }

    #[test]
    fn test_sprint_band_is_narrower_than_long() {
        let cfg = PerformanceConfig::default();
        assert!(
            cfg.band_for(RaceType::Sprint).width() < cfg.band_for(RaceType::Long).width(),
            "short races compress performance gaps"
        );
    }

    #[test]
    fn test_aptitude_drags_coefficient_down() {
        let cfg = PerformanceConfig::default();
        let strong = profile("apt", Stats::uniform(600));
        let weak = profile("no_apt", Stats::uniform(600))
            .with_distance_aptitude(DistanceAptitude::uniform(AptitudeGrade::G));
        let coeffs =
            field_coefficients(&[strong, weak], &race(RaceType::Mile), &cfg);
        assert!(coeffs[0] > coeffs[1]);
    }

    #[test]
    fn test_surface_aptitude_matters() {
        let cfg = PerformanceConfig::default();
        let mut dirt_race = race(RaceType::Mile);
        dirt_race.surface = Surface::Dirt;
        let mudlark = profile("mudlark", Stats::uniform(600)).with_surface_aptitude(
            SurfaceAptitude { turf: AptitudeGrade::B, dirt: AptitudeGrade::S },
        );
        let turf_only = profile("turf_only", Stats::uniform(600)).with_surface_aptitude(
            SurfaceAptitude { turf: AptitudeGrade::S, dirt: AptitudeGrade::F },
        );
        let coeffs = field_coefficients(&[mudlark, turf_only], &dirt_race, &cfg);
        assert!(coeffs[0] > coeffs[1]);
    }

    #[test]
    fn test_long_weighting_rewards_stamina_over_speed() {
        let cfg = PerformanceConfig::default();
        let stayer = profile("stayer", Stats::new(400, 900, 500, 500, 500));
        let speedster = profile("speedster", Stats::new(900, 400, 500, 500, 500));
        let coeffs = field_coefficients(
            &[stayer, speedster],
            &RaceConfig::new(3000.0, RaceType::Long, Surface::Turf),
            &cfg,
        );
        assert!(coeffs[0] > coeffs[1]);
    }
}
