use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::events::RaceEvent;
use super::race::{RaceType, Surface, TrackCondition};

/// One finisher, ordered by finish time ascending in `RaceResult`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinishRecord {
    pub competitor_id: u32,
    pub name: String,
    /// Simulated seconds from the start to the finish line.
    pub finish_time: f64,
}

/// One non-finisher. DNF competitors keep the distance and time frozen at
/// the moment of retirement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DnfRecord {
    pub competitor_id: u32,
    pub name: String,
    pub distance_at_dnf: f64,
    pub time_at_dnf: f64,
    pub reason: String,
}

/// Final race output: ranked finishers, non-finishers, and the full event
/// log. `finishers.len() + dnfs.len()` always equals the field size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceResult {
    pub distance_m: f64,
    pub race_type: RaceType,
    pub surface: Surface,
    pub condition: TrackCondition,
    pub seed: u64,
    pub total_ticks: u64,
    /// Ordered by finish time ascending (ties broken by registration order).
    pub finishers: Vec<FinishRecord>,
    pub dnfs: Vec<DnfRecord>,
    pub events: Vec<RaceEvent>,
    /// Setup normalization warnings (clamped stats, defaulted labels).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
    /// SHA-256 over the serialized event log. Two runs with identical
    /// inputs and seed produce identical digests.
    pub event_digest: String,
}

impl RaceResult {
    pub fn field_size(&self) -> usize {
        self.finishers.len() + self.dnfs.len()
    }

    /// Winner, if anyone finished.
    pub fn winner(&self) -> Option<&FinishRecord> {
        self.finishers.first()
    }
}

/// Hex SHA-256 digest of the serialized event log. Used both for the
/// result payload and by the determinism tests.
pub fn compute_event_digest(events: &[RaceEvent]) -> String {
    let serialized = serde_json::to_string(events).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
