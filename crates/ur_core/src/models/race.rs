use serde::{Deserialize, Serialize};

use crate::error::{RaceError, Result};

/// Distance category of a race. Determines stat weighting, phase boundaries
/// and speed constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum RaceType {
    Sprint,
    Mile,
    Medium,
    Long,
}

impl RaceType {
    /// Conventional category for a distance in meters.
    pub fn for_distance(distance_m: f64) -> Self {
        if distance_m < 1400.0 {
            RaceType::Sprint
        } else if distance_m < 1800.0 {
            RaceType::Mile
        } else if distance_m < 2500.0 {
            RaceType::Medium
        } else {
            RaceType::Long
        }
    }

    /// Stable index used by per-race-type lookup tables.
    pub fn index(self) -> usize {
        match self {
            RaceType::Sprint => 0,
            RaceType::Mile => 1,
            RaceType::Medium => 2,
            RaceType::Long => 3,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "sprint" => Some(RaceType::Sprint),
            "mile" => Some(RaceType::Mile),
            "medium" => Some(RaceType::Medium),
            "long" => Some(RaceType::Long),
            _ => None,
        }
    }
}

/// Racing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Turf,
    Dirt,
}

impl Surface {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "turf" => Some(Surface::Turf),
            "dirt" => Some(Surface::Dirt),
            _ => None,
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Surface::Turf
    }
}

/// Going of the track on race day. Softer going slows the field and
/// accelerates fatigue accrual (factors in `SpeedConfig`/`StaminaConfig`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackCondition {
    Firm,
    Good,
    Soft,
    Heavy,
}

impl TrackCondition {
    /// Stable index used by per-condition lookup tables.
    pub fn index(self) -> usize {
        match self {
            TrackCondition::Firm => 0,
            TrackCondition::Good => 1,
            TrackCondition::Soft => 2,
            TrackCondition::Heavy => 3,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "firm" => Some(TrackCondition::Firm),
            "good" => Some(TrackCondition::Good),
            "soft" => Some(TrackCondition::Soft),
            "heavy" => Some(TrackCondition::Heavy),
            _ => None,
        }
    }
}

impl Default for TrackCondition {
    fn default() -> Self {
        TrackCondition::Good
    }
}

/// Immutable race definition. Validated once at engine setup and never
/// mutated for the lifetime of the race.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Total race distance in meters. Must be > 0.
    pub distance_m: f64,
    pub race_type: RaceType,
    pub surface: Surface,
    #[serde(default)]
    pub condition: TrackCondition,
}

impl RaceConfig {
    pub fn new(distance_m: f64, race_type: RaceType, surface: Surface) -> Self {
        Self { distance_m, race_type, surface, condition: TrackCondition::default() }
    }

    pub fn with_condition(mut self, condition: TrackCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Fail-fast setup validation. Called before any tick executes so no
    /// partial race state is ever observable.
    pub fn validate(&self) -> Result<()> {
        if !self.distance_m.is_finite() || self.distance_m <= 0.0 {
            return Err(RaceError::InvalidDistance(self.distance_m));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_type_for_distance() {
        assert_eq!(RaceType::for_distance(1200.0), RaceType::Sprint);
        assert_eq!(RaceType::for_distance(1600.0), RaceType::Mile);
        assert_eq!(RaceType::for_distance(2000.0), RaceType::Medium);
        assert_eq!(RaceType::for_distance(3000.0), RaceType::Long);
    }

    #[test]
    fn test_validate_rejects_bad_distance() {
        let config = RaceConfig::new(0.0, RaceType::Sprint, Surface::Turf);
        assert!(config.validate().is_err());

        let config = RaceConfig::new(-100.0, RaceType::Sprint, Surface::Turf);
        assert!(config.validate().is_err());

        let config = RaceConfig::new(f64::NAN, RaceType::Sprint, Surface::Turf);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_labels_parse_case_insensitive() {
        assert_eq!(RaceType::from_label("LONG"), Some(RaceType::Long));
        assert_eq!(Surface::from_label(" dirt "), Some(Surface::Dirt));
        assert_eq!(TrackCondition::from_label("Heavy"), Some(TrackCondition::Heavy));
        assert_eq!(RaceType::from_label("marathon"), None);
    }
}
