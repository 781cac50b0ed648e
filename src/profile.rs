//! Lifestyle profile: six named metrics, each held in [0, 100].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

pub const METRIC_MIN: u8 = 0;
pub const METRIC_MAX: u8 = 100;

/// Clamp an arbitrary slider input into the metric range.
pub fn clamp_value(value: i64) -> u8 {
    value.clamp(METRIC_MIN as i64, METRIC_MAX as i64) as u8
}

// =============================================================================
// Metric keys
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    Energy,
    Diet,
    Transport,
    Wellness,
    Social,
    Sustainability,
}

impl MetricKey {
    /// Display order used by the lifestyle dashboard.
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Energy,
        MetricKey::Diet,
        MetricKey::Transport,
        MetricKey::Wellness,
        MetricKey::Social,
        MetricKey::Sustainability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Energy => "energy",
            MetricKey::Diet => "diet",
            MetricKey::Transport => "transport",
            MetricKey::Wellness => "wellness",
            MetricKey::Social => "social",
            MetricKey::Sustainability => "sustainability",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Energy => "Energy Efficiency",
            MetricKey::Diet => "Nutrition Optimization",
            MetricKey::Transport => "Mobility Score",
            MetricKey::Wellness => "Wellness Index",
            MetricKey::Social => "Social Connection",
            MetricKey::Sustainability => "Eco Impact",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MetricKey::Energy => "Smart home automation and renewable energy usage",
            MetricKey::Diet => "Lab-grown foods and personalized nutrition",
            MetricKey::Transport => "Autonomous vehicles and sustainable transport",
            MetricKey::Wellness => "AI health monitoring and preventive care",
            MetricKey::Social => "Community engagement and virtual interactions",
            MetricKey::Sustainability => "Carbon footprint and environmental stewardship",
        }
    }

    pub fn unit(&self) -> &'static str {
        "%"
    }

    /// Prediction text per tier, ordered baseline, intermediate, advanced.
    pub fn predictions(&self) -> [&'static str; 3] {
        match self {
            MetricKey::Energy => [
                "Standard efficiency",
                "Carbon neutral living",
                "Net-positive energy home",
            ],
            MetricKey::Diet => [
                "Basic nutritional needs",
                "Personalized meal plans",
                "Optimized longevity nutrition",
            ],
            MetricKey::Transport => [
                "Limited automation",
                "Hybrid transport options",
                "Fully autonomous mobility",
            ],
            MetricKey::Wellness => [
                "Standard healthcare",
                "Optimal health maintenance",
                "Enhanced longevity (120+ years)",
            ],
            MetricKey::Social => [
                "Individual focus",
                "Active community member",
                "Global community leader",
            ],
            MetricKey::Sustainability => [
                "Baseline impact",
                "Sustainable practices",
                "Regenerative living",
            ],
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ProfileError::InvalidKey(s.to_string()))
    }
}

// =============================================================================
// Profile
// =============================================================================

/// Snapshot of the six lifestyle metrics.
///
/// Every key is always present and every value stays inside [0, 100]; the
/// only way to change a value is [`Profile::set`], which clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawProfile")]
pub struct Profile {
    energy: u8,
    diet: u8,
    transport: u8,
    wellness: u8,
    social: u8,
    sustainability: u8,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            energy: 50,
            diet: 70,
            transport: 60,
            wellness: 80,
            social: 65,
            sustainability: 75,
        }
    }
}

impl Profile {
    pub fn get(&self, key: MetricKey) -> u8 {
        match key {
            MetricKey::Energy => self.energy,
            MetricKey::Diet => self.diet,
            MetricKey::Transport => self.transport,
            MetricKey::Wellness => self.wellness,
            MetricKey::Social => self.social,
            MetricKey::Sustainability => self.sustainability,
        }
    }

    /// Store `value` clamped to [0, 100]; returns the stored value.
    pub fn set(&mut self, key: MetricKey, value: i64) -> u8 {
        let stored = clamp_value(value);
        let slot = match key {
            MetricKey::Energy => &mut self.energy,
            MetricKey::Diet => &mut self.diet,
            MetricKey::Transport => &mut self.transport,
            MetricKey::Wellness => &mut self.wellness,
            MetricKey::Social => &mut self.social,
            MetricKey::Sustainability => &mut self.sustainability,
        };
        *slot = stored;
        stored
    }

    /// Builder-style variant of [`Profile::set`].
    pub fn with(mut self, key: MetricKey, value: i64) -> Self {
        self.set(key, value);
        self
    }

    pub fn energy(&self) -> f64 {
        self.energy as f64
    }

    pub fn diet(&self) -> f64 {
        self.diet as f64
    }

    pub fn transport(&self) -> f64 {
        self.transport as f64
    }

    pub fn wellness(&self) -> f64 {
        self.wellness as f64
    }

    pub fn social(&self) -> f64 {
        self.social as f64
    }

    pub fn sustainability(&self) -> f64 {
        self.sustainability as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, u8)> + '_ {
        MetricKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    pub fn sum(&self) -> u32 {
        self.iter().map(|(_, v)| v as u32).sum()
    }

    /// Arithmetic mean of all six metrics.
    pub fn mean(&self) -> f64 {
        self.sum() as f64 / MetricKey::ALL.len() as f64
    }
}

/// Wire shape accepted on deserialize; values are clamped on the way in.
#[derive(Deserialize)]
struct RawProfile {
    energy: i64,
    diet: i64,
    transport: i64,
    wellness: i64,
    social: i64,
    sustainability: i64,
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Self {
            energy: clamp_value(raw.energy),
            diet: clamp_value(raw.diet),
            transport: clamp_value(raw.transport),
            wellness: clamp_value(raw.wellness),
            social: clamp_value(raw.social),
            sustainability: clamp_value(raw.sustainability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_values() {
        let p = Profile::default();
        assert_eq!(p.get(MetricKey::Energy), 50);
        assert_eq!(p.get(MetricKey::Diet), 70);
        assert_eq!(p.get(MetricKey::Transport), 60);
        assert_eq!(p.get(MetricKey::Wellness), 80);
        assert_eq!(p.get(MetricKey::Social), 65);
        assert_eq!(p.get(MetricKey::Sustainability), 75);
        assert_eq!(p.sum(), 400);
    }

    #[test]
    fn test_set_clamps_both_ends() {
        let mut p = Profile::default();
        assert_eq!(p.set(MetricKey::Energy, 250), 100);
        assert_eq!(p.set(MetricKey::Diet, -4), 0);
        assert_eq!(p.set(MetricKey::Social, 42), 42);
        assert_eq!(p.get(MetricKey::Energy), 100);
        assert_eq!(p.get(MetricKey::Diet), 0);
    }

    #[test]
    fn test_key_parse_roundtrip_names() {
        for key in MetricKey::ALL {
            assert_eq!(key.as_str().parse::<MetricKey>().unwrap(), key);
        }
        assert_eq!(
            "Energy".parse::<MetricKey>(),
            Err(ProfileError::InvalidKey("Energy".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_wire_names_and_clamps() {
        let json = serde_json::to_value(Profile::default()).unwrap();
        assert_eq!(json["sustainability"], 75);

        let p: Profile = serde_json::from_str(
            r#"{"energy":150,"diet":-3,"transport":60,"wellness":80,"social":65,"sustainability":75}"#,
        )
        .unwrap();
        assert_eq!(p.get(MetricKey::Energy), 100);
        assert_eq!(p.get(MetricKey::Diet), 0);
    }

    #[test]
    fn test_missing_key_rejected_on_deserialize() {
        let res: Result<Profile, _> = serde_json::from_str(r#"{"energy":10}"#);
        assert!(res.is_err());
    }
}
