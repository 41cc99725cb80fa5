//! External JSON API.
//!
//! The integration surface for hosts that do not link the typed engine
//! API directly: one request JSON in, one response JSON out.

pub mod race_json;

pub use race_json::{
    simulate_race, simulate_race_json, CompetitorData, RaceData, RaceRequest, RaceResponse,
    StandingEntry,
};
