//! Incident model tuning.

use serde::{Deserialize, Serialize};

use crate::models::{IncidentKind, RunningStyle};

/// Fixed parameters of one incident kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IncidentParams {
    /// Duration in ticks.
    pub duration_ticks: u32,
    /// Speed multiplier (< 1.0) applied while the incident is active.
    pub speed_multiplier: f64,
    /// One-time momentum penalty on trigger.
    pub momentum_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentConfig {
    /// No incident can trigger before this tick (default: 12)
    pub warmup_ticks: u64,
    /// Base trigger probability per tick before damping (default: 0.008)
    pub base_prob: f64,
    /// How strongly Wit suppresses the trigger probability (default: 0.70)
    pub wit_damp: f64,
    /// Damping floor (default: 0.20)
    pub wit_damp_floor: f64,
    /// Style modulation, FrontRunner..EndCloser — closers run in more
    /// traffic (default: 0.90/1.00/1.10/1.20)
    pub style_factor: [f64; 4],
    /// Secondary random gate keeping incidents rare even when the base
    /// probability is non-trivial (default: 0.35)
    pub gate_prob: f64,

    pub slow_start: IncidentParams,
    pub stumble: IncidentParams,
    pub boxed_in: IncidentParams,
    pub wide_run: IncidentParams,
    pub flustered: IncidentParams,

    /// Momentum rebound granted when an incident expires (default: 0.015)
    pub momentum_rebound: f64,
}

impl IncidentConfig {
    pub fn params(&self, kind: IncidentKind) -> IncidentParams {
        match kind {
            IncidentKind::SlowStart => self.slow_start,
            IncidentKind::Stumble => self.stumble,
            IncidentKind::BoxedIn => self.boxed_in,
            IncidentKind::WideRun => self.wide_run,
            IncidentKind::Flustered => self.flustered,
        }
    }

    pub fn style_factor(&self, style: RunningStyle) -> f64 {
        self.style_factor[style.index()]
    }
}

impl Default for IncidentConfig {
    fn default() -> Self {
        Self {
            warmup_ticks: 12,
            base_prob: 0.008,
            wit_damp: 0.70,
            wit_damp_floor: 0.20,
            style_factor: [0.90, 1.00, 1.10, 1.20],
            gate_prob: 0.35,

            slow_start: IncidentParams {
                duration_ticks: 8,
                speed_multiplier: 0.82,
                momentum_penalty: 0.03,
            },
            stumble: IncidentParams {
                duration_ticks: 6,
                speed_multiplier: 0.75,
                momentum_penalty: 0.04,
            },
            boxed_in: IncidentParams {
                duration_ticks: 10,
                speed_multiplier: 0.88,
                momentum_penalty: 0.02,
            },
            wide_run: IncidentParams {
                duration_ticks: 12,
                speed_multiplier: 0.92,
                momentum_penalty: 0.02,
            },
            flustered: IncidentParams {
                duration_ticks: 8,
                speed_multiplier: 0.85,
                momentum_penalty: 0.03,
            },

            momentum_rebound: 0.015,
        }
    }
}
