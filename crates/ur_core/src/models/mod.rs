//! Data models for race setup, events, and results.

pub mod events;
pub mod profile;
pub mod race;
pub mod result;

pub use events::{EventDetails, EventType, IncidentKind, RaceEvent};
pub use profile::{
    AptitudeGrade, CompetitorProfile, DistanceAptitude, RunningStyle, Stats, SurfaceAptitude,
};
pub use race::{RaceConfig, RaceType, Surface, TrackCondition};
pub use result::{compute_event_digest, DnfRecord, FinishRecord, RaceResult};
