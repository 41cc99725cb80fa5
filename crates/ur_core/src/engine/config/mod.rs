//! # Engine Configuration Module
//!
//! Every tuning constant the balance passes kept revisiting lives here as
//! data: speed constants, stat weights, normalization bands, incident/DNF
//! probability curves and duel windows. One engine, parameterized — no
//! code forks per variant.
//!
//! ## Usage
//! ```rust
//! use ur_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let calm = EngineConfig::calm();
//! ```

mod dnf_config;
mod duel_config;
mod incident_config;
mod performance_config;
mod speed_config;
mod stamina_config;

pub use dnf_config::DnfConfig;
pub use duel_config::{DuelConfig, GutsTier};
pub use incident_config::{IncidentConfig, IncidentParams};
pub use performance_config::{NormalizationBand, PerformanceConfig, StatWeights, StyleStat};
pub use speed_config::{PhaseTable, SpeedBand, SpeedConfig};
pub use stamina_config::StaminaConfig;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Full engine tuning. `Default` is the balanced baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub performance: PerformanceConfig,
    pub speed: SpeedConfig,
    pub stamina: StaminaConfig,
    pub incident: IncidentConfig,
    pub dnf: DnfConfig,
    pub duel: DuelConfig,
    /// Momentum nudge granted on a successful overtake (default: 0.005)
    #[serde(default = "default_overtake_nudge")]
    pub overtake_nudge: f64,
    /// Optional safety cutoff. `None` (the default) runs until full-field
    /// completion; when set, every still-active competitor is retired at
    /// this tick and the race completes. Documented deviation for systems
    /// contexts that need bounded worst-case runtime.
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

fn default_overtake_nudge() -> f64 {
    0.005
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            performance: PerformanceConfig::default(),
            speed: SpeedConfig::default(),
            stamina: StaminaConfig::default(),
            incident: IncidentConfig::default(),
            dnf: DnfConfig::default(),
            duel: DuelConfig::default(),
            overtake_nudge: default_overtake_nudge(),
            max_ticks: None,
        }
    }
}

impl EngineConfig {
    /// Stochastics disabled: no incidents, no DNFs, no duels, no jitter.
    /// Used by tests and calibration runs that need clean speed curves.
    pub fn calm() -> Self {
        let mut cfg = Self::default();
        cfg.incident.base_prob = 0.0;
        cfg.dnf.base_scale = 0.0;
        cfg.duel.base_prob = 0.0;
        cfg.speed.jitter = 0.0;
        cfg
    }

    /// Rowdier field: more incidents, more duels. Demo preset.
    pub fn eventful() -> Self {
        let mut cfg = Self::default();
        cfg.incident.base_prob = 0.02;
        cfg.incident.gate_prob = 0.5;
        cfg.duel.base_prob = 0.08;
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        let back = EngineConfig::from_json(&json).unwrap();
        assert_eq!(back.speed.jitter, config.speed.jitter);
        assert_eq!(back.dnf.window_min, config.dnf.window_min);
        assert_eq!(back.max_ticks, None);
    }

    #[test]
    fn test_calm_disables_stochastics() {
        let calm = EngineConfig::calm();
        assert_eq!(calm.incident.base_prob, 0.0);
        assert_eq!(calm.dnf.base_scale, 0.0);
        assert_eq!(calm.duel.base_prob, 0.0);
        assert_eq!(calm.speed.jitter, 0.0);
    }
}
