//! Derived metrics: pure functions of the full [`Profile`].
//!
//! Nothing here is stored. Every view recomputes from the current profile on
//! each render, so two calls on the same profile always agree.
//!
//! All inputs are pre-clamped to [0, 100], which keeps every formula finite
//! and non-negative. Rounding is half-up; on non-negative values that is the
//! same as `f64::round`.

use serde::Serialize;

use crate::profile::Profile;

/// 2025 average lifespan used as the lifespan baseline.
pub const BASE_LIFESPAN: f64 = 85.0;
/// Flat technology bonus added to every lifespan estimate.
pub const TECHNOLOGY_BONUS: f64 = 30.0;
/// 2025 per-capita emissions, tons CO2/year.
pub const BASE_CARBON: f64 = 15.0;
pub const CARBON_FLOOR: f64 = 0.5;
/// 2025 per-capita water usage, gallons/day.
pub const BASE_WATER: f64 = 100.0;
pub const WATER_FLOOR: f64 = 20.0;
/// Baseline mixed into the health score average.
pub const HEALTH_BASELINE: f64 = 85.0;

fn round(x: f64) -> u32 {
    x.round() as u32
}

// =============================================================================
// Health
// =============================================================================

pub fn lifespan(p: &Profile) -> u32 {
    round(BASE_LIFESPAN + 0.4 * p.wellness() + 0.2 * p.diet() + TECHNOLOGY_BONUS)
}

/// Years gained over the 2025 baseline.
pub fn years_beyond_baseline(p: &Profile) -> u32 {
    lifespan(p) - BASE_LIFESPAN as u32
}

pub fn health_score(p: &Profile) -> u32 {
    round((p.wellness() + p.diet() + HEALTH_BASELINE) / 3.0)
}

/// Mental performance boost. Not capped at 100: wellness above 83 reads higher.
pub fn cognitive_enhancement(p: &Profile) -> u32 {
    round(p.wellness() * 1.2)
}

pub fn health_optimization(p: &Profile) -> u32 {
    round((p.wellness() + p.diet()) / 2.0)
}

// =============================================================================
// Environment
// =============================================================================

/// Tons CO2 per year, floored at [`CARBON_FLOOR`].
pub fn carbon_footprint(p: &Profile) -> f64 {
    let reduction = ((p.energy() + p.transport() + p.sustainability()) / 300.0) * 12.0;
    (BASE_CARBON - reduction).max(CARBON_FLOOR)
}

/// Gallons per day, floored at [`WATER_FLOOR`].
pub fn water_usage(p: &Profile) -> f64 {
    let efficiency = (p.energy() + p.sustainability()) / 200.0;
    (BASE_WATER - efficiency * 60.0).max(WATER_FLOOR)
}

pub fn planet_health(p: &Profile) -> u32 {
    round((p.sustainability() + p.energy()) / 2.0)
}

pub fn renewable_energy(p: &Profile) -> u32 {
    p.energy() as u32
}

pub fn waste_reduction(p: &Profile) -> u32 {
    round(p.sustainability() * 0.95)
}

pub fn trees_planted(p: &Profile) -> u32 {
    round(p.sustainability() * 50.0)
}

/// kWh saved annually.
pub fn energy_saved(p: &Profile) -> u32 {
    round((p.energy() / 100.0) * 15000.0)
}

/// Tons CO2 offset against the 2025 baseline, two decimals.
pub fn carbon_offset(p: &Profile) -> f64 {
    ((BASE_CARBON - carbon_footprint(p)) * 100.0).round() / 100.0
}

pub fn ocean_health(p: &Profile) -> u32 {
    round(p.sustainability() * 0.9)
}

pub fn air_quality(p: &Profile) -> u32 {
    round(p.energy() * 0.95)
}

pub fn biodiversity(p: &Profile) -> u32 {
    round((p.sustainability() + p.energy()) / 2.0 * 0.8)
}

// =============================================================================
// Society
// =============================================================================

pub fn social_score(p: &Profile) -> u32 {
    round((p.social() + p.sustainability() + p.wellness()) / 3.0)
}

/// Global-impact composite.
///
/// `social` is counted twice: once directly and once inside the six-metric
/// mean. Kept as is.
pub fn society_impact(p: &Profile) -> u32 {
    round((p.social() + p.mean()) / 2.0)
}

/// Navigation "life score": rounded mean of all six metrics.
pub fn overall_score(p: &Profile) -> u32 {
    round(p.mean())
}

// =============================================================================
// Aggregate
// =============================================================================

/// Every derived value for one profile snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub lifespan: u32,
    pub years_beyond_baseline: u32,
    pub health_score: u32,
    pub cognitive_enhancement: u32,
    pub health_optimization: u32,
    pub carbon_footprint: f64,
    pub water_usage: f64,
    pub planet_health: u32,
    pub climate_contribution: u32,
    pub renewable_energy: u32,
    pub waste_reduction: u32,
    pub trees_planted: u32,
    pub energy_saved: u32,
    pub carbon_offset: f64,
    pub ocean_health: u32,
    pub air_quality: u32,
    pub biodiversity: u32,
    pub social_score: u32,
    pub society_impact: u32,
    pub overall_score: u32,
}

pub fn compute_derived(p: &Profile) -> DerivedMetrics {
    DerivedMetrics {
        lifespan: lifespan(p),
        years_beyond_baseline: years_beyond_baseline(p),
        health_score: health_score(p),
        cognitive_enhancement: cognitive_enhancement(p),
        health_optimization: health_optimization(p),
        carbon_footprint: carbon_footprint(p),
        water_usage: water_usage(p),
        planet_health: planet_health(p),
        climate_contribution: planet_health(p),
        renewable_energy: renewable_energy(p),
        waste_reduction: waste_reduction(p),
        trees_planted: trees_planted(p),
        energy_saved: energy_saved(p),
        carbon_offset: carbon_offset(p),
        ocean_health: ocean_health(p),
        air_quality: air_quality(p),
        biodiversity: biodiversity(p),
        social_score: social_score(p),
        society_impact: society_impact(p),
        overall_score: overall_score(p),
    }
}

// =============================================================================
// Display cards
// =============================================================================

/// Read-only card recomputed from the profile on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetric {
    pub id: &'static str,
    pub name: &'static str,
    pub display_value: f64,
    pub unit: &'static str,
    pub target: f64,
    pub description: &'static str,
}

impl DerivedMetric {
    /// Progress toward target in percent, capped at 100.
    pub fn progress(&self) -> f64 {
        (self.display_value / self.target * 100.0).min(100.0)
    }
}

/// The four environment tracker cards, in display order.
pub fn environment_metrics(p: &Profile) -> [DerivedMetric; 4] {
    [
        DerivedMetric {
            id: "carbon",
            name: "Carbon Footprint",
            display_value: carbon_footprint(p),
            unit: "tons CO2/year",
            target: CARBON_FLOOR,
            description: "Your annual carbon emissions in 2070",
        },
        DerivedMetric {
            id: "water",
            name: "Water Usage",
            display_value: water_usage(p),
            unit: "gallons/day",
            target: WATER_FLOOR,
            description: "Daily water consumption with smart systems",
        },
        DerivedMetric {
            id: "renewable",
            name: "Renewable Energy",
            display_value: renewable_energy(p) as f64,
            unit: "% renewable",
            target: 100.0,
            description: "Percentage of energy from renewable sources",
        },
        DerivedMetric {
            id: "waste",
            name: "Waste Reduction",
            display_value: waste_reduction(p) as f64,
            unit: "% reduced",
            target: 95.0,
            description: "Waste reduction through circular economy",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MetricKey;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_lifespan_default() {
        assert_eq!(lifespan(&Profile::default()), 161);
        assert_eq!(years_beyond_baseline(&Profile::default()), 76);
    }

    #[test]
    fn test_lifespan_bounds() {
        let low = Profile::default().with(MetricKey::Wellness, 0).with(MetricKey::Diet, 0);
        let high = Profile::default().with(MetricKey::Wellness, 100).with(MetricKey::Diet, 100);
        assert_eq!(lifespan(&low), 115);
        assert_eq!(lifespan(&high), 175);
    }

    #[test]
    fn test_health_score_default() {
        assert_eq!(health_score(&Profile::default()), 78);
    }

    #[test]
    fn test_carbon_footprint_default() {
        assert!(approx(carbon_footprint(&Profile::default()), 7.6));
    }

    #[test]
    fn test_carbon_footprint_floor() {
        let p = Profile::default()
            .with(MetricKey::Energy, 100)
            .with(MetricKey::Transport, 100)
            .with(MetricKey::Sustainability, 100);
        // 15 - 12 = 3, floor never engages inside the clamped domain
        assert!(approx(carbon_footprint(&p), 3.0));
        assert!(carbon_footprint(&p) >= CARBON_FLOOR);
    }

    #[test]
    fn test_water_usage() {
        let p = Profile::default()
            .with(MetricKey::Energy, 100)
            .with(MetricKey::Sustainability, 100);
        assert!(approx(water_usage(&p), 40.0));
        let zero = Profile::default()
            .with(MetricKey::Energy, 0)
            .with(MetricKey::Sustainability, 0);
        assert!(approx(water_usage(&zero), 100.0));
    }

    #[test]
    fn test_planet_and_social() {
        let p = Profile::default();
        assert_eq!(planet_health(&p), 63); // 62.5 rounds up
        assert_eq!(social_score(&p), 73);
    }

    #[test]
    fn test_society_impact_double_counts_social() {
        let p = Profile::default();
        // (65 + 400/6) / 2 = 65.83
        assert_eq!(society_impact(&p), 66);

        // Raising social moves the composite by more than 1/6 of the step.
        let q = p.with(MetricKey::Social, 95);
        assert_eq!(society_impact(&q), 83); // (95 + 430/6) / 2 = 83.33
    }

    #[test]
    fn test_environment_extras_default() {
        let p = Profile::default();
        assert_eq!(trees_planted(&p), 3750);
        assert_eq!(energy_saved(&p), 7500);
        assert!(approx(carbon_offset(&p), 7.4));
        assert_eq!(waste_reduction(&p), 71);
        assert_eq!(ocean_health(&p), 68);
        assert_eq!(air_quality(&p), 48);
        assert_eq!(biodiversity(&p), 50);
    }

    #[test]
    fn test_compute_derived_is_pure() {
        let p = Profile::default();
        assert_eq!(compute_derived(&p), compute_derived(&p));
        let d = compute_derived(&p);
        assert_eq!(d.overall_score, 67);
        assert_eq!(d.health_optimization, 75);
        assert_eq!(d.cognitive_enhancement, 96);
        assert_eq!(d.climate_contribution, d.planet_health);
    }

    #[test]
    fn test_environment_cards_progress() {
        let cards = environment_metrics(&Profile::default());
        let ids: Vec<_> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["carbon", "water", "renewable", "waste"]);
        // Carbon and water sit far above their targets: bars pinned at 100.
        assert!(approx(cards[0].progress(), 100.0));
        assert!(approx(cards[2].progress(), 50.0));
    }
}
