//! Mutable per-competitor race state.
//!
//! Owned exclusively by `RaceEngine` in a dense array indexed by the
//! competitor id assigned at setup. No name-keyed lookups on the tick path.

use serde::{Deserialize, Serialize};

use crate::models::IncidentKind;

/// Momentum stays inside this band no matter how many nudges land.
pub const MOMENTUM_MIN: f64 = 0.85;
pub const MOMENTUM_MAX: f64 = 1.15;

/// At most one incident is active per competitor at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveIncident {
    pub kind: IncidentKind,
    pub remaining_ticks: u32,
}

/// Permanent retirement record. Distance and time are frozen at the
/// instant of the DNF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnfInfo {
    pub reason: String,
    pub distance_at_dnf: f64,
    pub time_at_dnf: f64,
}

/// A competitor is in exactly one of {active, finished, DNF}; the only
/// transitions are active→finished and active→DNF, never reversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorState {
    /// Dense id assigned at setup (registration order).
    pub id: u32,
    /// Monotonically non-decreasing while active, frozen afterwards.
    pub distance_covered: f64,
    /// Clamped to `[stamina_floor, 100]` for the whole race.
    pub stamina: f64,
    /// Accumulates monotonically, never resets mid-race.
    pub fatigue: f64,
    /// Multiplicative modifier nudged by incidents, overtakes and duels.
    pub momentum: f64,
    pub incident: Option<ActiveIncident>,
    pub dnf: Option<DnfInfo>,
    pub finished: bool,
    pub finish_time: Option<f64>,
    /// A competitor benefits from a duel at most once per race.
    pub duel_spent: bool,
}

impl CompetitorState {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            distance_covered: 0.0,
            stamina: 100.0,
            fatigue: 0.0,
            momentum: 1.0,
            incident: None,
            dnf: None,
            finished: false,
            finish_time: None,
            duel_spent: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.finished && self.dnf.is_none()
    }

    /// Progress fraction of a race of the given distance.
    pub fn progress(&self, race_distance: f64) -> f64 {
        (self.distance_covered / race_distance).clamp(0.0, 1.0)
    }

    /// Apply a signed momentum nudge, keeping momentum inside the band.
    pub fn nudge_momentum(&mut self, delta: f64) {
        self.momentum = (self.momentum + delta).clamp(MOMENTUM_MIN, MOMENTUM_MAX);
    }
}
