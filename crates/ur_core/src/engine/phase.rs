//! Race phase scheduler.
//!
//! Pure mapping from race progress to one of four phases. Each race type
//! partitions `[0, 1]` into four non-overlapping sub-ranges; a boundary
//! value belongs to the phase that starts there. Longer race types shift
//! every boundary later, so a Long race enters its closing Sprint phase
//! at a higher absolute progress than a Sprint race does.

use serde::{Deserialize, Serialize};

use crate::models::RaceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum RacePhase {
    Start,
    Mid,
    Final,
    Sprint,
}

impl RacePhase {
    /// Stable index, non-decreasing over a race.
    pub fn index(self) -> usize {
        match self {
            RacePhase::Start => 0,
            RacePhase::Mid => 1,
            RacePhase::Final => 2,
            RacePhase::Sprint => 3,
        }
    }
}

/// `(mid_from, final_from, sprint_from)` boundaries per race type.
/// Start always begins at 0.0.
fn boundaries(race_type: RaceType) -> (f64, f64, f64) {
    match race_type {
        RaceType::Sprint => (0.12, 0.45, 0.70),
        RaceType::Mile => (0.14, 0.52, 0.76),
        RaceType::Medium => (0.16, 0.58, 0.82),
        RaceType::Long => (0.18, 0.64, 0.88),
    }
}

/// Phase for a progress fraction. Progress outside `[0, 1]` is clamped.
pub fn phase_at(progress: f64, race_type: RaceType) -> RacePhase {
    let p = progress.clamp(0.0, 1.0);
    let (mid_from, final_from, sprint_from) = boundaries(race_type);
    if p >= sprint_from {
        RacePhase::Sprint
    } else if p >= final_from {
        RacePhase::Final
    } else if p >= mid_from {
        RacePhase::Mid
    } else {
        RacePhase::Start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_boundary_belongs_to_starting_phase() {
        for race_type in RaceType::iter() {
            let (mid_from, final_from, sprint_from) = boundaries(race_type);
            assert_eq!(phase_at(0.0, race_type), RacePhase::Start);
            assert_eq!(phase_at(mid_from, race_type), RacePhase::Mid);
            assert_eq!(phase_at(final_from, race_type), RacePhase::Final);
            assert_eq!(phase_at(sprint_from, race_type), RacePhase::Sprint);
            assert_eq!(phase_at(1.0, race_type), RacePhase::Sprint);
        }
    }

    #[test]
    fn test_longer_races_shift_boundaries_later() {
        let (s_mid, s_fin, s_spr) = boundaries(RaceType::Sprint);
        let (l_mid, l_fin, l_spr) = boundaries(RaceType::Long);
        assert!(s_mid < l_mid);
        assert!(s_fin < l_fin);
        assert!(s_spr < l_spr);
    }

    proptest! {
        #[test]
        fn prop_phase_monotonic(p1 in 0.0f64..=1.0, p2 in 0.0f64..=1.0) {
            for race_type in RaceType::iter() {
                let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
                prop_assert!(
                    phase_at(lo, race_type).index() <= phase_at(hi, race_type).index()
                );
            }
        }

        #[test]
        fn prop_out_of_range_progress_is_clamped(p in -10.0f64..10.0) {
            for race_type in RaceType::iter() {
                let phase = phase_at(p, race_type);
                prop_assert_eq!(phase, phase_at(p.clamp(0.0, 1.0), race_type));
            }
        }
    }
}
