//! Race simulation engine internals.
//!
//! Layering, leaf to root:
//! - `config` — every tuning constant as data (one struct per concern)
//! - `performance` — field-normalized performance coefficients (setup-time)
//! - `phase` — pure progress → phase mapping
//! - `speed` / `stamina` — per-tick physical model
//! - `incident` / `dnf` — stochastic modifiers and exits
//! - `duel` — late-race pack clustering
//! - `race_sim` — the orchestrating `RaceEngine`

pub mod config;
pub mod dnf;
pub mod duel;
pub mod incident;
pub mod performance;
pub mod phase;
pub mod race_sim;
pub mod speed;
pub mod stamina;
pub mod state;
pub mod tick_snapshot;

pub use config::EngineConfig;
pub use phase::{phase_at, RacePhase};
pub use race_sim::{RaceEngine, RaceStatus};
pub use state::{ActiveIncident, CompetitorState, DnfInfo};
pub use tick_snapshot::{CompetitorPosition, TickResult};
