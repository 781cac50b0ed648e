//! Threshold labelling for display values.
//!
//! Every label is keyed purely on the current number and recomputed on each
//! render. There is no hysteresis.

use serde::Serialize;

use crate::profile::MetricKey;

/// Three-tier prediction level. Thresholds are strict: 80 is still intermediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Baseline,
    Intermediate,
    Advanced,
}

impl Tier {
    pub const ADVANCED_ABOVE: u8 = 80;
    pub const INTERMEDIATE_ABOVE: u8 = 60;

    pub fn classify(value: u8) -> Self {
        if value > Self::ADVANCED_ABOVE {
            Tier::Advanced
        } else if value > Self::INTERMEDIATE_ABOVE {
            Tier::Intermediate
        } else {
            Tier::Baseline
        }
    }

    fn index(&self) -> usize {
        match self {
            Tier::Baseline => 0,
            Tier::Intermediate => 1,
            Tier::Advanced => 2,
        }
    }
}

impl MetricKey {
    /// 2070 prediction for this metric at `value`.
    pub fn prediction(&self, value: u8) -> &'static str {
        self.predictions()[Tier::classify(value).index()]
    }
}

/// Colour band of the navigation life score. Inclusive thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Fair,
    Good,
}

impl ScoreBand {
    pub fn classify(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::Good
        } else if score >= 60 {
            ScoreBand::Fair
        } else {
            ScoreBand::Low
        }
    }
}

// =============================================================================
// Health timeline
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub age: u32,
    pub status: &'static str,
    pub reached: bool,
}

const MILESTONES: [(u32, &str); 4] = [
    (30, "Preventive Care"),
    (50, "Enhancement Phase"),
    (80, "Longevity Optimization"),
    (120, "Advanced Life Extension"),
];

/// Milestones with `reached` set when the age falls within `lifespan`.
pub fn health_timeline(lifespan: u32) -> Vec<Milestone> {
    MILESTONES
        .into_iter()
        .map(|(age, status)| Milestone {
            age,
            status,
            reached: age <= lifespan,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::classify(0), Tier::Baseline);
        assert_eq!(Tier::classify(60), Tier::Baseline);
        assert_eq!(Tier::classify(61), Tier::Intermediate);
        assert_eq!(Tier::classify(80), Tier::Intermediate);
        assert_eq!(Tier::classify(81), Tier::Advanced);
        assert_eq!(Tier::classify(100), Tier::Advanced);
    }

    #[test]
    fn test_predictions() {
        assert_eq!(MetricKey::Energy.prediction(85), "Net-positive energy home");
        assert_eq!(MetricKey::Energy.prediction(70), "Carbon neutral living");
        assert_eq!(MetricKey::Energy.prediction(50), "Standard efficiency");
        assert_eq!(MetricKey::Wellness.prediction(80), "Optimal health maintenance");
        assert_eq!(MetricKey::Sustainability.prediction(81), "Regenerative living");
    }

    #[test]
    fn test_score_band_inclusive() {
        assert_eq!(ScoreBand::classify(59), ScoreBand::Low);
        assert_eq!(ScoreBand::classify(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::classify(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::classify(80), ScoreBand::Good);
    }

    #[test]
    fn test_timeline_reached() {
        let t = health_timeline(115);
        let reached: Vec<bool> = t.iter().map(|m| m.reached).collect();
        assert_eq!(reached, vec![true, true, true, false]);
        assert!(health_timeline(161).iter().all(|m| m.reached));
    }
}
