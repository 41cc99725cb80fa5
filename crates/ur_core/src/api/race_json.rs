use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::engine::RaceEngine;
use crate::error::{RaceError, Result};
use crate::models::{
    AptitudeGrade, CompetitorProfile, DistanceAptitude, DnfRecord, RaceConfig, RaceEvent,
    RaceResult, RaceType, RunningStyle, Stats, Surface, SurfaceAptitude, TrackCondition,
};

/// Logical tick length used when the request does not specify one.
pub const DEFAULT_TICK_SECONDS: f64 = 0.25;

#[derive(Debug, Deserialize)]
pub struct RaceRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub race: RaceData,
    pub competitors: Vec<CompetitorData>,
    /// Engine tuning overrides; defaults to the balanced baseline.
    #[serde(default)]
    pub config: Option<EngineConfig>,
    /// Logical tick length in seconds (default 0.25).
    #[serde(default)]
    pub tick_seconds: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RaceData {
    pub distance_m: f64,
    /// "sprint" | "mile" | "medium" | "long". Missing or unrecognized
    /// labels fall back to the conventional category for the distance.
    #[serde(default)]
    pub race_type: Option<String>,
    /// "turf" | "dirt" (default turf).
    #[serde(default)]
    pub surface: Option<String>,
    /// "firm" | "good" | "soft" | "heavy" (default good).
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitorData {
    pub name: String,
    /// Stats are accepted signed; negatives are clamped to 0 with a
    /// recorded warning rather than rejected.
    pub speed: i64,
    pub stamina: i64,
    pub power: i64,
    pub guts: i64,
    pub wit: i64,
    /// Running style label. Unrecognized labels fall back to the neutral
    /// baseline (pace chaser) with a recorded warning.
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub distance_aptitude: Option<AptitudeLabels>,
    #[serde(default)]
    pub surface_aptitude: Option<SurfaceAptitudeLabels>,
}

/// Aptitude letter grades as free-form labels ("S".."G"); anything else
/// falls back to grade B with a recorded warning.
#[derive(Debug, Default, Deserialize)]
pub struct AptitudeLabels {
    #[serde(default)]
    pub sprint: Option<String>,
    #[serde(default)]
    pub mile: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub long: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SurfaceAptitudeLabels {
    #[serde(default)]
    pub turf: Option<String>,
    #[serde(default)]
    pub dirt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RaceResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub distance_m: f64,
    pub race_type: RaceType,
    pub surface: Surface,
    pub condition: TrackCondition,
    pub total_ticks: u64,
    /// Finishers by finish time ascending, 1-based positions.
    pub standings: Vec<StandingEntry>,
    pub dnfs: Vec<DnfRecord>,
    pub events: Vec<RaceEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub event_digest: String,
}

#[derive(Debug, Serialize)]
pub struct StandingEntry {
    pub position: u32,
    pub competitor_id: u32,
    pub name: String,
    pub finish_time: f64,
}

fn clamp_stat(name: &str, field: &str, value: i64, warnings: &mut Vec<String>) -> u16 {
    if value < 0 {
        warnings.push(format!("{name}: negative {field} {value} clamped to 0"));
        return 0;
    }
    if value > i64::from(u16::MAX) {
        warnings.push(format!("{name}: {field} {value} clamped to {}", u16::MAX));
        return u16::MAX;
    }
    value as u16
}

fn parse_grade(
    name: &str,
    slot: &str,
    label: Option<&String>,
    warnings: &mut Vec<String>,
) -> AptitudeGrade {
    match label {
        None => AptitudeGrade::default(),
        Some(raw) => AptitudeGrade::from_label(raw).unwrap_or_else(|| {
            warnings.push(format!(
                "{name}: unknown {slot} aptitude grade '{raw}', defaulting to B"
            ));
            AptitudeGrade::default()
        }),
    }
}

fn build_race(data: &RaceData, warnings: &mut Vec<String>) -> RaceConfig {
    let race_type = match &data.race_type {
        None => RaceType::for_distance(data.distance_m),
        Some(raw) => RaceType::from_label(raw).unwrap_or_else(|| {
            let fallback = RaceType::for_distance(data.distance_m);
            warnings.push(format!(
                "unknown race type '{raw}', using {fallback:?} for {} m",
                data.distance_m
            ));
            fallback
        }),
    };
    let surface = match &data.surface {
        None => Surface::default(),
        Some(raw) => Surface::from_label(raw).unwrap_or_else(|| {
            warnings.push(format!("unknown surface '{raw}', defaulting to turf"));
            Surface::default()
        }),
    };
    let condition = match &data.condition {
        None => TrackCondition::default(),
        Some(raw) => TrackCondition::from_label(raw).unwrap_or_else(|| {
            warnings.push(format!("unknown track condition '{raw}', defaulting to good"));
            TrackCondition::default()
        }),
    };
    RaceConfig::new(data.distance_m, race_type, surface).with_condition(condition)
}

fn build_profile(data: &CompetitorData, warnings: &mut Vec<String>) -> CompetitorProfile {
    let name = data.name.as_str();
    let stats = Stats::new(
        clamp_stat(name, "speed", data.speed, warnings),
        clamp_stat(name, "stamina", data.stamina, warnings),
        clamp_stat(name, "power", data.power, warnings),
        clamp_stat(name, "guts", data.guts, warnings),
        clamp_stat(name, "wit", data.wit, warnings),
    );

    let style = match &data.style {
        None => RunningStyle::default(),
        Some(raw) => RunningStyle::from_label(raw).unwrap_or_else(|| {
            warnings.push(format!(
                "{name}: unknown running style '{raw}', defaulting to pace chaser"
            ));
            RunningStyle::default()
        }),
    };

    let labels = data.distance_aptitude.as_ref();
    let distance_aptitude = DistanceAptitude {
        sprint: parse_grade(name, "sprint", labels.and_then(|l| l.sprint.as_ref()), warnings),
        mile: parse_grade(name, "mile", labels.and_then(|l| l.mile.as_ref()), warnings),
        medium: parse_grade(name, "medium", labels.and_then(|l| l.medium.as_ref()), warnings),
        long: parse_grade(name, "long", labels.and_then(|l| l.long.as_ref()), warnings),
    };
    let labels = data.surface_aptitude.as_ref();
    let surface_aptitude = SurfaceAptitude {
        turf: parse_grade(name, "turf", labels.and_then(|l| l.turf.as_ref()), warnings),
        dirt: parse_grade(name, "dirt", labels.and_then(|l| l.dirt.as_ref()), warnings),
    };

    CompetitorProfile::new(name, stats, style)
        .with_distance_aptitude(distance_aptitude)
        .with_surface_aptitude(surface_aptitude)
}

/// Typed entry point: normalize the request, run the whole race, return
/// the final result.
pub fn simulate_race(request: RaceRequest) -> Result<RaceResult> {
    if request.schema_version != crate::SCHEMA_VERSION {
        return Err(RaceError::ValidationError(format!(
            "unsupported schema_version {} (expected {})",
            request.schema_version,
            crate::SCHEMA_VERSION
        )));
    }

    let mut warnings = Vec::new();
    let race = build_race(&request.race, &mut warnings);
    let profiles: Vec<CompetitorProfile> =
        request.competitors.iter().map(|c| build_profile(c, &mut warnings)).collect();

    let config = request.config.unwrap_or_default();
    let mut engine = RaceEngine::with_config(race, profiles, request.seed, config)?;
    for warning in warnings {
        engine.record_warning(warning);
    }

    let dt = request.tick_seconds.unwrap_or(DEFAULT_TICK_SECONDS);
    engine.run(dt)
}

/// JSON-in / JSON-out entry point mirroring the typed path.
pub fn simulate_race_json(request_json: &str) -> Result<String> {
    let request: RaceRequest = serde_json::from_str(request_json)?;
    let schema_version = request.schema_version;
    let seed = request.seed;
    let result = simulate_race(request)?;

    let standings = result
        .finishers
        .iter()
        .enumerate()
        .map(|(i, f)| StandingEntry {
            position: (i + 1) as u32,
            competitor_id: f.competitor_id,
            name: f.name.clone(),
            finish_time: f.finish_time,
        })
        .collect();

    let response = RaceResponse {
        schema_version,
        seed,
        distance_m: result.distance_m,
        race_type: result.race_type,
        surface: result.surface,
        condition: result.condition,
        total_ticks: result.total_ticks,
        standings,
        dnfs: result.dnfs,
        events: result.events,
        warnings: result.warnings,
        event_digest: result.event_digest,
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_json(seed: u64) -> String {
        json!({
            "schema_version": 1,
            "seed": seed,
            "race": { "distance_m": 1600.0, "race_type": "mile", "surface": "turf" },
            "competitors": [
                { "name": "First", "speed": 700, "stamina": 600, "power": 620,
                  "guts": 540, "wit": 580, "style": "front_runner" },
                { "name": "Second", "speed": 640, "stamina": 660, "power": 560,
                  "guts": 620, "wit": 540, "style": "end_closer" }
            ]
        })
        .to_string()
    }

    #[test]
    fn test_basic_simulation() {
        let result = simulate_race_json(&request_json(42));
        assert!(result.is_ok(), "simulation should succeed");

        let parsed: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert!(parsed["total_ticks"].as_u64().unwrap() > 0);
        let standings = parsed["standings"].as_array().unwrap();
        let dnfs = parsed["dnfs"].as_array().unwrap();
        assert_eq!(standings.len() + dnfs.len(), 2);
    }

    #[test]
    fn test_determinism_same_seed_same_json() {
        let a = simulate_race_json(&request_json(999)).unwrap();
        let b = simulate_race_json(&request_json(999)).unwrap();
        assert_eq!(a, b, "same seed should produce byte-identical output");
    }

    #[test]
    fn test_negative_stats_clamped_with_warning() {
        let request = json!({
            "schema_version": 1,
            "seed": 7,
            "race": { "distance_m": 1200.0 },
            "competitors": [
                { "name": "Oops", "speed": -50, "stamina": 500, "power": 500,
                  "guts": 500, "wit": 500 },
                { "name": "Fine", "speed": 500, "stamina": 500, "power": 500,
                  "guts": 500, "wit": 500 }
            ]
        })
        .to_string();
        let response = simulate_race_json(&request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        let warnings = parsed["warnings"].as_array().unwrap();
        assert!(warnings.iter().any(|w| w.as_str().unwrap().contains("negative speed")));
    }

    #[test]
    fn test_unknown_labels_fall_back_to_defaults() {
        let request = json!({
            "schema_version": 1,
            "seed": 7,
            "race": { "distance_m": 1200.0, "race_type": "marathon", "surface": "sand" },
            "competitors": [
                { "name": "Odd", "speed": 500, "stamina": 500, "power": 500,
                  "guts": 500, "wit": 500, "style": "zigzag",
                  "distance_aptitude": { "sprint": "Z" } }
            ]
        })
        .to_string();
        let response = simulate_race_json(&request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["race_type"], "sprint", "derived from distance");
        assert_eq!(parsed["surface"], "turf");
        let warnings = parsed["warnings"].as_array().unwrap();
        assert!(warnings.len() >= 3, "race type, surface, style and grade all warned");
    }

    #[test]
    fn test_schema_version_mismatch_is_rejected() {
        let request = json!({
            "schema_version": 9,
            "seed": 1,
            "race": { "distance_m": 1200.0 },
            "competitors": [
                { "name": "A", "speed": 500, "stamina": 500, "power": 500,
                  "guts": 500, "wit": 500 }
            ]
        })
        .to_string();
        assert!(simulate_race_json(&request).is_err());
    }

    #[test]
    fn test_invalid_distance_fails_fast() {
        let request = json!({
            "schema_version": 1,
            "seed": 1,
            "race": { "distance_m": -5.0 },
            "competitors": [
                { "name": "A", "speed": 500, "stamina": 500, "power": 500,
                  "guts": 500, "wit": 500 }
            ]
        })
        .to_string();
        assert!(simulate_race_json(&request).is_err());
    }
}
