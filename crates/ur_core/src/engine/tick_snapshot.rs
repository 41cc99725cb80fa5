//! Read-only per-tick snapshot handed to rendering/commentary consumers.
//!
//! This is the entire per-tick contract: positions in ranking order plus
//! the events generated on that tick. Consumers never receive references
//! into engine-internal state and see each event exactly once.

use serde::{Deserialize, Serialize};

use crate::engine::state::CompetitorState;
use crate::models::{IncidentKind, RaceEvent};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitorPosition {
    pub competitor_id: u32,
    pub distance_covered: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident: Option<IncidentKind>,
    pub finished: bool,
    pub dnf: bool,
}

impl CompetitorPosition {
    pub fn from_state(state: &CompetitorState) -> Self {
        Self {
            competitor_id: state.id,
            distance_covered: state.distance_covered,
            incident: state.incident.map(|i| i.kind),
            finished: state.finished,
            dnf: state.dnf.is_some(),
        }
    }
}

/// Output of one `step(dt)` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickResult {
    pub tick: u64,
    /// Simulated race time in seconds after this tick.
    pub time: f64,
    /// The live ranking: all competitors (active, finished and DNF alike)
    /// sorted by distance descending, stable on registration order.
    pub positions: Vec<CompetitorPosition>,
    /// Events generated on this tick, in emission order.
    pub events: Vec<RaceEvent>,
    /// True once every competitor is Finished or DNF.
    pub complete: bool,
}
