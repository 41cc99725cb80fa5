use serde::{Deserialize, Serialize};

use super::race::{RaceType, Surface};

/// The five core stats of an uma, on a 0..=1200 scale.
///
/// Stats are stored unsigned; negative values arriving over the JSON
/// boundary are clamped to 0 there, with a recorded warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub speed: u16,
    pub stamina: u16,
    pub power: u16,
    pub guts: u16,
    pub wit: u16,
}

impl Stats {
    pub fn new(speed: u16, stamina: u16, power: u16, guts: u16, wit: u16) -> Self {
        Self { speed, stamina, power, guts, wit }
    }

    /// All five stats set to the same value. Test/demo helper.
    pub fn uniform(value: u16) -> Self {
        Self::new(value, value, value, value, value)
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::uniform(500)
    }
}

/// Preferred pack position and pacing pattern of a competitor.
///
/// Determines phase-speed adjustments (see `SpeedConfig`) and the stat
/// priority re-weighting applied by the performance model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum RunningStyle {
    FrontRunner,
    PaceChaser,
    LateSurger,
    EndCloser,
}

impl RunningStyle {
    /// Stable index used by per-style lookup tables.
    pub fn index(self) -> usize {
        match self {
            RunningStyle::FrontRunner => 0,
            RunningStyle::PaceChaser => 1,
            RunningStyle::LateSurger => 2,
            RunningStyle::EndCloser => 3,
        }
    }

    /// Lenient label parsing for the JSON boundary. Unknown labels return
    /// `None`; the caller substitutes the neutral default and records a
    /// warning rather than aborting setup.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().replace(' ', "_").replace('-', "_").as_str() {
            "front_runner" | "frontrunner" | "runner" => Some(RunningStyle::FrontRunner),
            "pace_chaser" | "pacechaser" | "chaser" => Some(RunningStyle::PaceChaser),
            "late_surger" | "latesurger" | "surger" => Some(RunningStyle::LateSurger),
            "end_closer" | "endcloser" | "closer" => Some(RunningStyle::EndCloser),
            _ => None,
        }
    }
}

impl Default for RunningStyle {
    fn default() -> Self {
        RunningStyle::PaceChaser
    }
}

/// Letter aptitude grade, S (best) through G (worst). Mapped to a
/// performance multiplier by `PerformanceConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum AptitudeGrade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl AptitudeGrade {
    /// 0 for S through 7 for G.
    pub fn rank(self) -> usize {
        match self {
            AptitudeGrade::S => 0,
            AptitudeGrade::A => 1,
            AptitudeGrade::B => 2,
            AptitudeGrade::C => 3,
            AptitudeGrade::D => 4,
            AptitudeGrade::E => 5,
            AptitudeGrade::F => 6,
            AptitudeGrade::G => 7,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "S" => Some(AptitudeGrade::S),
            "A" => Some(AptitudeGrade::A),
            "B" => Some(AptitudeGrade::B),
            "C" => Some(AptitudeGrade::C),
            "D" => Some(AptitudeGrade::D),
            "E" => Some(AptitudeGrade::E),
            "F" => Some(AptitudeGrade::F),
            "G" => Some(AptitudeGrade::G),
            _ => None,
        }
    }
}

impl Default for AptitudeGrade {
    fn default() -> Self {
        AptitudeGrade::B
    }
}

/// One aptitude grade per distance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DistanceAptitude {
    #[serde(default)]
    pub sprint: AptitudeGrade,
    #[serde(default)]
    pub mile: AptitudeGrade,
    #[serde(default)]
    pub medium: AptitudeGrade,
    #[serde(default)]
    pub long: AptitudeGrade,
}

impl DistanceAptitude {
    pub fn uniform(grade: AptitudeGrade) -> Self {
        Self { sprint: grade, mile: grade, medium: grade, long: grade }
    }

    pub fn for_type(&self, race_type: RaceType) -> AptitudeGrade {
        match race_type {
            RaceType::Sprint => self.sprint,
            RaceType::Mile => self.mile,
            RaceType::Medium => self.medium,
            RaceType::Long => self.long,
        }
    }

    /// Worst grade across all categories. Consumed by the DNF model.
    pub fn worst(&self) -> AptitudeGrade {
        [self.sprint, self.mile, self.medium, self.long]
            .into_iter()
            .max_by_key(|g| g.rank())
            .unwrap_or_default()
    }
}

/// One aptitude grade per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SurfaceAptitude {
    #[serde(default)]
    pub turf: AptitudeGrade,
    #[serde(default)]
    pub dirt: AptitudeGrade,
}

impl SurfaceAptitude {
    pub fn uniform(grade: AptitudeGrade) -> Self {
        Self { turf: grade, dirt: grade }
    }

    pub fn for_surface(&self, surface: Surface) -> AptitudeGrade {
        match surface {
            Surface::Turf => self.turf,
            Surface::Dirt => self.dirt,
        }
    }

    pub fn worst(&self) -> AptitudeGrade {
        if self.turf.rank() >= self.dirt.rank() {
            self.turf
        } else {
            self.dirt
        }
    }
}

/// Immutable competitor definition. The engine assigns each profile a dense
/// integer id in registration order at setup; profiles themselves are only
/// keyed by name at the input boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub name: String,
    pub stats: Stats,
    #[serde(default)]
    pub style: RunningStyle,
    #[serde(default)]
    pub distance_aptitude: DistanceAptitude,
    #[serde(default)]
    pub surface_aptitude: SurfaceAptitude,
}

impl CompetitorProfile {
    pub fn new(name: impl Into<String>, stats: Stats, style: RunningStyle) -> Self {
        Self {
            name: name.into(),
            stats,
            style,
            distance_aptitude: DistanceAptitude::default(),
            surface_aptitude: SurfaceAptitude::default(),
        }
    }

    pub fn with_distance_aptitude(mut self, aptitude: DistanceAptitude) -> Self {
        self.distance_aptitude = aptitude;
        self
    }

    pub fn with_surface_aptitude(mut self, aptitude: SurfaceAptitude) -> Self {
        self.surface_aptitude = aptitude;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_style_labels_round_trip() {
        for style in RunningStyle::iter() {
            let label = serde_json::to_string(&style).unwrap();
            // serde labels ("front_runner") must parse back leniently
            assert_eq!(RunningStyle::from_label(label.trim_matches('"')), Some(style));
        }
        assert_eq!(RunningStyle::from_label("Front Runner"), Some(RunningStyle::FrontRunner));
        assert_eq!(RunningStyle::from_label("zigzagger"), None);
    }

    #[test]
    fn test_grade_rank_order() {
        let ranks: Vec<usize> = AptitudeGrade::iter().map(|g| g.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted, "grade declaration order must match rank order");
    }

    #[test]
    fn test_worst_aptitude() {
        let mut apt = DistanceAptitude::uniform(AptitudeGrade::A);
        apt.long = AptitudeGrade::E;
        assert_eq!(apt.worst(), AptitudeGrade::E);

        let surf = SurfaceAptitude { turf: AptitudeGrade::S, dirt: AptitudeGrade::G };
        assert_eq!(surf.worst(), AptitudeGrade::G);
    }
}
