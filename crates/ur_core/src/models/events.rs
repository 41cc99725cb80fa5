use serde::{Deserialize, Serialize};

/// Structured race event. The engine's only output besides ranking
/// snapshots; commentary/UI consumers receive each event exactly once and
/// must not be able to mutate engine state through it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaceEvent {
    /// Simulated race time in seconds.
    pub time: f64,
    /// Tick index the event was emitted on.
    pub tick: u64,
    /// Dense competitor id assigned at setup (registration order).
    pub competitor_id: u32,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Competitor leaves the gate (emitted once per competitor on tick 0).
    Start,
    /// Temporary speed-reduction incident triggered.
    Incident,
    /// Rank improved over the previous tick.
    Overtake,
    /// Late-race duel initiated within a pack cluster.
    Duel,
    /// Competitor permanently retired mid-race.
    Dnf,
    /// Competitor crossed the finish line.
    Finish,
}

/// Temporary incident kinds. Early-race kinds differ from late-race kinds;
/// the phase-appropriate pool is selected in `engine::incident`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum IncidentKind {
    /// Missed the break out of the gate.
    SlowStart,
    /// Lost footing for a few strides.
    Stumble,
    /// Trapped behind traffic with nowhere to go.
    BoxedIn,
    /// Forced to run wide around the pack.
    WideRun,
    /// Lost composure in the closing stages.
    Flustered,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EventDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident: Option<IncidentKind>,
    /// Incident duration in ticks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ticks: Option<u32>,
    /// Competitor that was passed (Overtake events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<u32>,
    /// Human-readable retirement reason (Dnf events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<f64>,
    /// All cluster members of a duel, initiator included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<Vec<u32>>,
}

impl RaceEvent {
    pub fn start(time: f64, tick: u64, competitor_id: u32) -> Self {
        Self { time, tick, competitor_id, event_type: EventType::Start, details: None }
    }

    pub fn incident(
        time: f64,
        tick: u64,
        competitor_id: u32,
        kind: IncidentKind,
        duration_ticks: u32,
    ) -> Self {
        Self {
            time,
            tick,
            competitor_id,
            event_type: EventType::Incident,
            details: Some(EventDetails {
                incident: Some(kind),
                duration_ticks: Some(duration_ticks),
                ..EventDetails::default()
            }),
        }
    }

    pub fn overtake(time: f64, tick: u64, competitor_id: u32, passed: u32) -> Self {
        Self {
            time,
            tick,
            competitor_id,
            event_type: EventType::Overtake,
            details: Some(EventDetails { passed: Some(passed), ..EventDetails::default() }),
        }
    }

    pub fn duel(time: f64, tick: u64, initiator: u32, cluster: Vec<u32>) -> Self {
        Self {
            time,
            tick,
            competitor_id: initiator,
            event_type: EventType::Duel,
            details: Some(EventDetails { cluster: Some(cluster), ..EventDetails::default() }),
        }
    }

    pub fn dnf(time: f64, tick: u64, competitor_id: u32, reason: String) -> Self {
        Self {
            time,
            tick,
            competitor_id,
            event_type: EventType::Dnf,
            details: Some(EventDetails { reason: Some(reason), ..EventDetails::default() }),
        }
    }

    pub fn finish(time: f64, tick: u64, competitor_id: u32, finish_time: f64) -> Self {
        Self {
            time,
            tick,
            competitor_id,
            event_type: EventType::Finish,
            details: Some(EventDetails {
                finish_time: Some(finish_time),
                ..EventDetails::default()
            }),
        }
    }
}
