//! DNF model tuning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnfConfig {
    /// DNF is only evaluated while progress is strictly inside this
    /// window — never at the very start, never in the last stretch
    /// (default: 0.32 / 0.82)
    pub window_min: f64,
    pub window_max: f64,

    /// Overall probability scale per tick (default: 0.003)
    pub base_scale: f64,
    /// Stamina stat below this contributes a deficit (default: 400)
    pub stamina_threshold: f64,
    /// Guts stat below this contributes a deficit (default: 350)
    pub guts_threshold: f64,
    /// Weight of the stamina deficit (default: 0.60)
    pub stamina_weight: f64,
    /// Weight of the guts deficit (default: 0.40)
    pub guts_weight: f64,
    /// Extra contribution per aptitude grade rank below D, from the worst
    /// distance/surface grade (default: 0.10)
    pub aptitude_penalty: f64,
    /// Secondary random gate keeping DNF rare (default: 0.25)
    pub gate_prob: f64,
}

impl Default for DnfConfig {
    fn default() -> Self {
        Self {
            window_min: 0.32,
            window_max: 0.82,

            base_scale: 0.003,
            stamina_threshold: 400.0,
            guts_threshold: 350.0,
            stamina_weight: 0.60,
            guts_weight: 0.40,
            aptitude_penalty: 0.10,
            gate_prob: 0.25,
        }
    }
}
