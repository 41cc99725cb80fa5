//! Late-race duel subsystem.
//!
//! When the closing stages pack active competitors into tight clusters,
//! one of them may kick for home: every cluster member gets a one-time
//! stamina top-up, and members with enough Guts also pick up a momentum
//! boost. Each competitor benefits at most once per race.

use rand::Rng;

use crate::engine::config::DuelConfig;
use crate::engine::state::CompetitorState;
use crate::models::CompetitorProfile;

/// One duel that fired this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelOutcome {
    pub initiator: u32,
    /// All cluster members, initiator included, in ranking order.
    pub members: Vec<u32>,
}

/// Cluster the eligible field and roll for initiations. `ranking` is this
/// tick's id list sorted by distance descending; iteration order is fully
/// deterministic so a seeded RNG reproduces the same duels.
pub fn run<R: Rng>(
    rng: &mut R,
    ranking: &[u32],
    states: &mut [CompetitorState],
    profiles: &[CompetitorProfile],
    race_distance: f64,
    stat_scale: f64,
    cfg: &DuelConfig,
) -> Vec<DuelOutcome> {
    let eligible: Vec<u32> = ranking
        .iter()
        .copied()
        .filter(|&id| {
            let state = &states[id as usize];
            if !state.is_active() || state.duel_spent {
                return false;
            }
            let progress = state.progress(race_distance);
            progress >= cfg.window_min && progress <= cfg.window_max
        })
        .collect();

    // Group consecutive eligible competitors whose gap stays inside the
    // proximity band.
    let mut clusters: Vec<Vec<u32>> = Vec::new();
    for &id in &eligible {
        let distance = states[id as usize].distance_covered;
        match clusters.last_mut() {
            Some(cluster) => {
                let last = *cluster.last().expect("clusters are never empty");
                let gap = states[last as usize].distance_covered - distance;
                if gap <= cfg.proximity_m {
                    cluster.push(id);
                } else {
                    clusters.push(vec![id]);
                }
            }
            None => clusters.push(vec![id]),
        }
    }

    let mut outcomes = Vec::new();
    for cluster in clusters.iter().filter(|c| c.len() >= 2) {
        // Trailing members push harder; the front of the pack has less to
        // prove. First passing draw initiates for the whole cluster.
        let initiator = cluster.iter().enumerate().find_map(|(position, &id)| {
            let guts_norm = f64::from(profiles[id as usize].stats.guts) / stat_scale;
            let prob = cfg.base_prob
                * (0.5 + guts_norm)
                * (1.0 + cfg.pack_factor * position as f64);
            (rng.gen::<f64>() < prob).then_some(id)
        });
        let Some(initiator) = initiator else {
            continue;
        };

        for &id in cluster {
            let guts = profiles[id as usize].stats.guts;
            let state = &mut states[id as usize];
            state.stamina = (state.stamina + cfg.stamina_topup).min(100.0);
            if let Some(tier) = cfg.guts_tiers.iter().find(|t| guts >= t.min_guts) {
                state.nudge_momentum(tier.momentum_boost);
            }
            state.duel_spent = true;
        }
        outcomes.push(DuelOutcome { initiator, members: cluster.clone() });
    }
    outcomes
}
