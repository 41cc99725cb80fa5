//! # ur_core - Deterministic Uma Race Simulation Engine
//!
//! This library provides a deterministic multi-competitor race simulation
//! engine with a JSON API for easy integration with game engines and
//! commentary frontends.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result)
//! - Logical-tick driven: callers own all pacing via `step(dt)`
//! - Structured event stream (starts, incidents, overtakes, duels,
//!   retirements, finishes)
//! - Every tuning constant exposed as configuration

// Large parameter sets are inherent to the physical model
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{simulate_race, simulate_race_json, RaceRequest, RaceResponse};
pub use error::{RaceError, Result};

// Re-export engine types
pub use engine::{
    CompetitorPosition, CompetitorState, EngineConfig, RaceEngine, RacePhase, TickResult,
};

// Re-export model types
pub use models::{
    AptitudeGrade, CompetitorProfile, DistanceAptitude, DnfRecord, EventType, FinishRecord,
    IncidentKind, RaceConfig, RaceEvent, RaceResult, RaceType, RunningStyle, Stats, Surface,
    SurfaceAptitude, TrackCondition,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
