//! Race Simulation Engine
//!
//! Orchestrates the whole race: per-tick state machine over all
//! competitors, ranking, overtake/duel detection and event emission.
//!
//! ## Data Flow
//!
//! ```text
//! [INPUT]  RaceConfig + ordered Vec<CompetitorProfile> + seed
//!      │
//!      ▼
//! RaceEngine::new()
//!   • validates (fail fast, before any tick)
//!   • assigns dense ids in registration order, builds name → id once
//!   • computes the field's performance coefficients (read-only after)
//!      │
//!      ▼
//! step(dt) — one logical tick, caller-paced:
//!   1. DNF evaluation (active competitors only)
//!   2. incident trigger/expiry → speed → stamina/fatigue → advance
//!   3. finish-line check
//!   4. full-field ranking (distance desc, registration order on ties)
//!   5. overtake events for improved ranks
//!   6. late-race duel clustering
//!   7. completion check (every competitor Finished or DNF)
//!      │
//!      ▼
//! [OUTPUT] TickResult snapshots per tick; RaceResult at completion
//! ```
//!
//! Per-competitor state machine: `Active → Finished` or `Active → DNF`,
//! both terminal. Race state machine: `Running → Complete`, terminal.
//!
//! All randomness flows through one seeded `ChaCha8Rng`; identical
//! `(RaceConfig, profiles, seed)` reproduce the full event log
//! byte-for-byte.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::engine::config::EngineConfig;
use crate::engine::phase::phase_at;
use crate::engine::speed::{compute_speed, SpeedContext};
use crate::engine::stamina::{self, StaminaInputs};
use crate::engine::state::{CompetitorState, DnfInfo};
use crate::engine::tick_snapshot::{CompetitorPosition, TickResult};
use crate::engine::{dnf, duel, incident};
use crate::error::{RaceError, Result};
use crate::models::{
    compute_event_digest, CompetitorProfile, DnfRecord, FinishRecord, RaceConfig, RaceEvent,
    RaceResult,
};

/// Global race state. Complete is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    Running,
    Complete,
}

pub struct RaceEngine {
    rng: ChaCha8Rng,
    /// Original seed, kept for the result payload.
    original_seed: u64,
    race: RaceConfig,
    config: EngineConfig,
    profiles: Vec<CompetitorProfile>,
    /// One normalized coefficient per competitor, never mutated after setup.
    coefficients: Vec<f64>,
    /// Dense array indexed by competitor id (registration order). The
    /// engine is the single owner; consumers only ever get snapshots.
    states: Vec<CompetitorState>,
    /// Built once at setup; the tick path never does name lookups.
    name_to_id: HashMap<String, u32>,
    tick: u64,
    time: f64,
    status: RaceStatus,
    prev_ranking: Vec<u32>,
    event_log: Vec<RaceEvent>,
    /// Setup normalization warnings, surfaced in the final result.
    warnings: Vec<String>,
    start_emitted: bool,
}

impl RaceEngine {
    /// Build an engine with the default tuning.
    pub fn new(race: RaceConfig, profiles: Vec<CompetitorProfile>, seed: u64) -> Result<Self> {
        Self::with_config(race, profiles, seed, EngineConfig::default())
    }

    /// Build an engine with explicit tuning. Fails fast on a non-positive
    /// distance or an empty field; no partial race state is observable
    /// after an error.
    pub fn with_config(
        race: RaceConfig,
        profiles: Vec<CompetitorProfile>,
        seed: u64,
        config: EngineConfig,
    ) -> Result<Self> {
        race.validate()?;
        if profiles.is_empty() {
            return Err(RaceError::EmptyField);
        }

        let mut name_to_id = HashMap::with_capacity(profiles.len());
        let mut warnings = Vec::new();
        for (id, profile) in profiles.iter().enumerate() {
            if name_to_id.insert(profile.name.clone(), id as u32).is_some() {
                let msg = format!(
                    "duplicate competitor name '{}': name lookup resolves to the later entry",
                    profile.name
                );
                log::warn!("{msg}");
                warnings.push(msg);
            }
        }

        let coefficients =
            crate::engine::performance::field_coefficients(&profiles, &race, &config.performance);

        let field = profiles.len();
        let states: Vec<CompetitorState> =
            (0..field as u32).map(CompetitorState::new).collect();
        let prev_ranking: Vec<u32> = (0..field as u32).collect();

        log::debug!(
            "race setup: {} m {:?}/{:?}, field of {}, seed {}",
            race.distance_m,
            race.race_type,
            race.surface,
            field,
            seed
        );

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            original_seed: seed,
            race,
            config,
            profiles,
            coefficients,
            states,
            name_to_id,
            tick: 0,
            time: 0.0,
            status: RaceStatus::Running,
            prev_ranking,
            event_log: Vec::new(),
            warnings,
            start_emitted: false,
        })
    }

    /// Record a setup-time normalization warning (clamped stat, defaulted
    /// label). Called by input boundaries before the first tick.
    pub fn record_warning(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }

    // ========== Read-only accessors ==========

    pub fn seed(&self) -> u64 {
        self.original_seed
    }

    pub fn race(&self) -> &RaceConfig {
        &self.race
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_complete(&self) -> bool {
        self.status == RaceStatus::Complete
    }

    pub fn field_size(&self) -> usize {
        self.states.len()
    }

    pub fn profiles(&self) -> &[CompetitorProfile] {
        &self.profiles
    }

    pub fn states(&self) -> &[CompetitorState] {
        &self.states
    }

    pub fn coefficient(&self, id: u32) -> Option<f64> {
        self.coefficients.get(id as usize).copied()
    }

    /// One-time name → id lookup built at setup.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.name_to_id.get(name).copied()
    }

    /// Full event log so far.
    pub fn events(&self) -> &[RaceEvent] {
        &self.event_log
    }

    /// Current ranking: every competitor, distance descending, ties broken
    /// by registration order.
    pub fn ranking(&self) -> Vec<u32> {
        self.compute_ranking()
    }

    // ========== Tick loop ==========

    /// Advance the race by one logical tick of `dt` seconds. Synchronous,
    /// never blocks; the caller owns all pacing. Calling `step` on a
    /// complete race is a no-op snapshot.
    pub fn step(&mut self, dt: f64) -> TickResult {
        if self.status == RaceStatus::Complete || !(dt > 0.0) {
            return self.snapshot(Vec::new());
        }

        let mut events: Vec<RaceEvent> = Vec::new();

        // Every competitor leaves the gate on the first step.
        if !self.start_emitted {
            for state in &self.states {
                events.push(RaceEvent::start(0.0, 0, state.id));
            }
            self.start_emitted = true;
        }

        self.tick += 1;
        self.time += dt;
        let time = self.time;
        let tick = self.tick;
        let distance = self.race.distance_m;
        let stat_scale = self.config.performance.stat_scale;

        for idx in 0..self.states.len() {
            if !self.states[idx].is_active() {
                continue;
            }
            let profile = &self.profiles[idx];
            let progress = self.states[idx].progress(distance);

            // 1. DNF: designed failure path, evaluated before anything else.
            if let Some(reason) =
                dnf::evaluate(&mut self.rng, profile, &self.race, progress, &self.config.dnf)
            {
                let state = &mut self.states[idx];
                state.dnf = Some(DnfInfo {
                    reason: reason.clone(),
                    distance_at_dnf: state.distance_covered,
                    time_at_dnf: time,
                });
                events.push(RaceEvent::dnf(time, tick, state.id, reason));
                continue;
            }

            let phase = phase_at(progress, self.race.race_type);
            let wit_norm = f64::from(profile.stats.wit) / stat_scale;
            let guts_norm = f64::from(profile.stats.guts) / stat_scale;

            // 2a. Incident trigger (only outside an active incident).
            if self.states[idx].incident.is_none() {
                if let Some(kind) = incident::maybe_trigger(
                    &mut self.rng,
                    tick,
                    phase,
                    wit_norm,
                    profile.style,
                    &self.config.incident,
                ) {
                    incident::apply_trigger(&mut self.states[idx], kind, &self.config.incident);
                    let duration = self.config.incident.params(kind).duration_ticks;
                    events.push(RaceEvent::incident(time, tick, idx as u32, kind, duration));
                }
            }
            let incident_multiplier =
                incident::tick_active(&mut self.states[idx], &self.config.incident);

            // 2b. Speed. The jitter draw is explicit; one draw per active
            // competitor per tick keeps the RNG stream shape stable.
            let jitter = (self.rng.gen::<f64>() * 2.0 - 1.0) * self.config.speed.jitter;
            let state = &self.states[idx];
            let speed = compute_speed(
                &SpeedContext {
                    phase,
                    race_type: self.race.race_type,
                    condition: self.race.condition,
                    style: profile.style,
                    coefficient: self.coefficients[idx],
                    fatigue: state.fatigue,
                    stamina: state.stamina,
                    guts_norm,
                    jitter,
                },
                &self.config.speed,
            ) * incident_multiplier;

            // 2c. Stamina/fatigue, then advance.
            let state = &mut self.states[idx];
            stamina::update(
                state,
                phase,
                StaminaInputs {
                    race_type: self.race.race_type,
                    condition: self.race.condition,
                    stamina_norm: f64::from(profile.stats.stamina) / stat_scale,
                    guts_norm,
                },
                dt,
                &self.config.stamina,
            );
            let advance = speed * dt * state.momentum;
            let before = state.distance_covered;
            state.distance_covered += advance;

            // 3. Finish line. Crossing time is interpolated inside the
            // tick; the frozen distance is the line itself.
            if state.distance_covered >= distance {
                let needed = distance - before;
                let fraction = if advance > 0.0 { (needed / advance).clamp(0.0, 1.0) } else { 1.0 };
                let finish_time = time - dt + dt * fraction;
                state.distance_covered = distance;
                state.finished = true;
                state.finish_time = Some(finish_time);
                state.incident = None;
                events.push(RaceEvent::finish(time, tick, state.id, finish_time));
            }
        }

        // 4. Live ranking over the whole field; frozen distances keep
        // Finished/DNF entries sortable.
        let ranking = self.compute_ranking();

        // 5. Overtakes: one event per active competitor whose rank
        // improved, naming the previous holder of the gained rank.
        let mut prev_rank_of = vec![0usize; self.states.len()];
        for (rank, &id) in self.prev_ranking.iter().enumerate() {
            prev_rank_of[id as usize] = rank;
        }
        for (rank, &id) in ranking.iter().enumerate() {
            if !self.states[id as usize].is_active() {
                continue;
            }
            let prev = prev_rank_of[id as usize];
            if rank < prev {
                let passed = self.prev_ranking[rank];
                self.states[id as usize].nudge_momentum(self.config.overtake_nudge);
                events.push(RaceEvent::overtake(time, tick, id, passed));
            }
        }

        // 6. Late-race duels.
        for outcome in duel::run(
            &mut self.rng,
            &ranking,
            &mut self.states,
            &self.profiles,
            distance,
            stat_scale,
            &self.config.duel,
        ) {
            events.push(RaceEvent::duel(time, tick, outcome.initiator, outcome.members));
        }

        // Optional safety cutoff (documented deviation): force-retire the
        // rest of the field once the tick budget is spent.
        if let Some(max_ticks) = self.config.max_ticks {
            if tick >= max_ticks {
                for state in &mut self.states {
                    if state.is_active() {
                        let reason = format!("race cut off at tick limit {max_ticks}");
                        state.dnf = Some(DnfInfo {
                            reason: reason.clone(),
                            distance_at_dnf: state.distance_covered,
                            time_at_dnf: time,
                        });
                        events.push(RaceEvent::dnf(time, tick, state.id, reason));
                    }
                }
            }
        }

        // 7. Complete when nobody is left active.
        if self.states.iter().all(|s| !s.is_active()) {
            self.status = RaceStatus::Complete;
            log::debug!("race complete after {} ticks ({:.2} s)", tick, time);
        }

        self.prev_ranking = ranking;
        self.event_log.extend(events.iter().cloned());
        self.snapshot(events)
    }

    /// Batch driver: tight `step` loop until completion.
    pub fn run(&mut self, dt: f64) -> Result<RaceResult> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(RaceError::ValidationError(format!(
                "tick duration must be positive and finite, got {dt}"
            )));
        }
        while self.status == RaceStatus::Running {
            self.step(dt);
        }
        Ok(self.result())
    }

    /// Final output. Meaningful once complete; callable at any partial
    /// tick for inspection (engine state stays fully queryable).
    pub fn result(&self) -> RaceResult {
        let mut finishers: Vec<FinishRecord> = self
            .states
            .iter()
            .filter(|s| s.finished)
            .map(|s| FinishRecord {
                competitor_id: s.id,
                name: self.profiles[s.id as usize].name.clone(),
                finish_time: s.finish_time.unwrap_or(self.time),
            })
            .collect();
        finishers.sort_by(|a, b| {
            a.finish_time
                .partial_cmp(&b.finish_time)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.competitor_id.cmp(&b.competitor_id))
        });

        let dnfs: Vec<DnfRecord> = self
            .states
            .iter()
            .filter_map(|s| {
                s.dnf.as_ref().map(|info| DnfRecord {
                    competitor_id: s.id,
                    name: self.profiles[s.id as usize].name.clone(),
                    distance_at_dnf: info.distance_at_dnf,
                    time_at_dnf: info.time_at_dnf,
                    reason: info.reason.clone(),
                })
            })
            .collect();

        RaceResult {
            distance_m: self.race.distance_m,
            race_type: self.race.race_type,
            surface: self.race.surface,
            condition: self.race.condition,
            seed: self.original_seed,
            total_ticks: self.tick,
            finishers,
            dnfs,
            events: self.event_log.clone(),
            warnings: self.warnings.clone(),
            event_digest: compute_event_digest(&self.event_log),
        }
    }

    // ========== Internals ==========

    fn compute_ranking(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = (0..self.states.len() as u32).collect();
        // Stable sort + id tiebreak: ties resolve to registration order.
        ids.sort_by(|&a, &b| {
            let da = self.states[a as usize].distance_covered;
            let db = self.states[b as usize].distance_covered;
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal).then(a.cmp(&b))
        });
        ids
    }

    fn snapshot(&self, events: Vec<RaceEvent>) -> TickResult {
        let positions = self
            .compute_ranking()
            .into_iter()
            .map(|id| CompetitorPosition::from_state(&self.states[id as usize]))
            .collect();
        TickResult {
            tick: self.tick,
            time: self.time,
            positions,
            events,
            complete: self.status == RaceStatus::Complete,
        }
    }
}
