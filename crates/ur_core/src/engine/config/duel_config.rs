//! Duel subsystem tuning.

use serde::{Deserialize, Serialize};

/// Guts threshold paired with the momentum boost it unlocks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GutsTier {
    pub min_guts: u16,
    pub momentum_boost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Duels only fire while progress is inside this late-race window
    /// (default: 0.55 / 0.92)
    pub window_min: f64,
    pub window_max: f64,

    /// Two active competitors belong to the same cluster when their gap
    /// is at most this many meters (default: 2.5)
    pub proximity_m: f64,
    /// Base initiation probability per member per tick (default: 0.04)
    pub base_prob: f64,
    /// Guts scaling: member probability is
    /// `base_prob * (0.5 + guts_norm) * (1 + pack_factor * position)`
    pub pack_factor: f64,

    /// One-time stamina top-up for every cluster member (default: 12.0)
    pub stamina_topup: f64,
    /// Momentum boost tiers, checked top-down; a member below every tier
    /// gets the top-up but no boost
    pub guts_tiers: [GutsTier; 3],
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            window_min: 0.55,
            window_max: 0.92,

            proximity_m: 2.5,
            base_prob: 0.04,
            pack_factor: 0.15,

            stamina_topup: 12.0,
            guts_tiers: [
                GutsTier { min_guts: 800, momentum_boost: 0.06 },
                GutsTier { min_guts: 550, momentum_boost: 0.04 },
                GutsTier { min_guts: 300, momentum_boost: 0.02 },
            ],
        }
    }
}
