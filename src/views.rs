//! Screen selection and per-screen view models.
//!
//! A view model is everything a renderer needs to draw one screen, computed
//! fresh from the profile. Selecting a screen never touches the profile.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::derived::{self, environment_metrics, DerivedMetric};
use crate::error::ProfileError;
use crate::profile::{MetricKey, Profile};
use crate::tiers::{health_timeline, Milestone, ScoreBand, Tier};

// =============================================================================
// Screens
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Welcome,
    City,
    Lifestyle,
    Health,
    Environment,
    Social,
}

impl Screen {
    /// Navigation order.
    pub const ALL: [Screen; 6] = [
        Screen::Welcome,
        Screen::City,
        Screen::Lifestyle,
        Screen::Health,
        Screen::Environment,
        Screen::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::City => "city",
            Screen::Lifestyle => "lifestyle",
            Screen::Health => "health",
            Screen::Environment => "environment",
            Screen::Social => "social",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Screen::Welcome => "Home",
            Screen::City => "City Explorer",
            Screen::Lifestyle => "Lifestyle",
            Screen::Health => "Health",
            Screen::Environment => "Environment",
            Screen::Social => "Social",
        }
    }

    /// Unknown ids fall through to the welcome screen.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|sc| sc.as_str() == s)
            .ok_or_else(|| ProfileError::UnknownScreen(s.to_string()))
    }
}

/// Holds the active screen.
#[derive(Debug, Clone, Default)]
pub struct ViewSelector {
    active: Screen,
}

impl ViewSelector {
    pub fn new(start: Screen) -> Self {
        Self { active: start }
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    /// Switch screens; returns the previous one.
    pub fn select(&mut self, screen: Screen) -> Screen {
        std::mem::replace(&mut self.active, screen)
    }
}

// =============================================================================
// View models
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationBar {
    pub active: Screen,
    pub items: Vec<NavItem>,
    pub life_score: u32,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub screen: Screen,
    pub label: &'static str,
}

pub fn navigation(active: Screen, p: &Profile) -> NavigationBar {
    let life_score = derived::overall_score(p);
    NavigationBar {
        active,
        items: Screen::ALL
            .into_iter()
            .map(|screen| NavItem {
                screen,
                label: screen.nav_label(),
            })
            .collect(),
        life_score,
        band: ScoreBand::classify(life_score),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum ViewModel {
    Welcome(WelcomeView),
    City(CityView),
    Lifestyle(LifestyleView),
    Health(HealthView),
    Environment(EnvironmentView),
    Social(SocialView),
}

impl ViewModel {
    pub fn screen(&self) -> Screen {
        match self {
            ViewModel::Welcome(_) => Screen::Welcome,
            ViewModel::City(_) => Screen::City,
            ViewModel::Lifestyle(_) => Screen::Lifestyle,
            ViewModel::Health(_) => Screen::Health,
            ViewModel::Environment(_) => Screen::Environment,
            ViewModel::Social(_) => Screen::Social,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WelcomeView {
    pub title: &'static str,
    pub tagline: &'static str,
    pub highlights: [(&'static str, &'static str); 3],
    /// Label of the [`crate::session::UiEvent::Explore`] action.
    pub call_to_action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct District {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub features: [&'static str; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityView {
    pub districts: Vec<District>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub key: MetricKey,
    pub label: &'static str,
    pub description: &'static str,
    pub value: u8,
    pub unit: &'static str,
    pub tier: Tier,
    pub prediction: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifestyleView {
    pub cards: Vec<MetricCard>,
    pub climate_contribution: u32,
    pub health_optimization: u32,
    pub society_impact: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthTechnology {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub benefits: [&'static str; 4],
    pub impact: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthView {
    pub lifespan: u32,
    pub years_beyond_baseline: u32,
    pub health_score: u32,
    pub cognitive_enhancement: u32,
    pub timeline: Vec<Milestone>,
    pub technologies: Vec<HealthTechnology>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentView {
    pub metrics: Vec<DerivedMetric>,
    pub trees_planted: u32,
    pub energy_saved: u32,
    pub carbon_offset: f64,
    pub planet_health: u32,
    pub ocean_health: u32,
    pub air_quality: u32,
    pub biodiversity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialView {
    pub social_score: u32,
    pub global_connections: &'static str,
    pub challenges_completed: u32,
    pub community_trust: u32,
    pub communities: Vec<Community>,
    pub challenges: Vec<Challenge>,
    pub impact: ImpactSummary,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Community {
    pub id: &'static str,
    pub name: &'static str,
    pub members: u32,
    pub activity: &'static str,
    pub focus: &'static str,
    pub description: &'static str,
    pub projects: [&'static str; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Challenge {
    pub id: &'static str,
    pub title: &'static str,
    /// Millions of participants.
    pub participants_m: f64,
    /// Global progress, percent.
    pub progress: u8,
    pub reward: &'static str,
    pub deadline: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactSummary {
    pub communities_joined: u32,
    pub projects_contributed: u32,
    pub global_rank: &'static str,
    pub social_credits: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub title: &'static str,
    pub level: &'static str,
}

// =============================================================================
// Static catalogues
// =============================================================================

const DISTRICTS: [District; 5] = [
    District {
        id: "residential",
        name: "Neo Residential",
        description: "Smart homes with integrated ecosystems and adaptive architecture.",
        features: ["Self-cleaning surfaces", "Vertical gardens", "AI home automation", "Climate adaptation"],
    },
    District {
        id: "transport",
        name: "Transit Hub",
        description: "Revolutionary transportation networks connecting the global community.",
        features: ["Autonomous vehicles", "Hyperloop stations", "Drone highways", "Teleportation pods"],
    },
    District {
        id: "green",
        name: "Eco District",
        description: "Sustainable living with nature-integrated urban design.",
        features: ["Vertical farms", "Air purification towers", "Renewable energy", "Biodiversity centers"],
    },
    District {
        id: "energy",
        name: "Power Core",
        description: "Clean energy infrastructure powering the entire city.",
        features: ["Fusion reactors", "Solar collectors", "Energy storage", "Quantum batteries"],
    },
    District {
        id: "social",
        name: "Community Hub",
        description: "Spaces for human connection and collective growth.",
        features: ["VR meeting spaces", "Cultural centers", "Learning pods", "Wellness facilities"],
    },
];

const TECHNOLOGIES: [HealthTechnology; 4] = [
    HealthTechnology {
        id: "nanobots",
        name: "Medical Nanobots",
        description: "Microscopic robots for real-time health monitoring and targeted treatment",
        benefits: ["24/7 health monitoring", "Instant disease detection", "Targeted drug delivery", "Cellular repair"],
        impact: 85,
    },
    HealthTechnology {
        id: "gene-therapy",
        name: "Advanced Gene Therapy",
        description: "Personalized genetic modifications for disease prevention and enhancement",
        benefits: ["Disease immunity", "Enhanced metabolism", "Improved longevity", "Optimized recovery"],
        impact: 92,
    },
    HealthTechnology {
        id: "ai-diagnosis",
        name: "AI Health Assistant",
        description: "Quantum AI for predictive health analysis and personalized recommendations",
        benefits: ["Predictive diagnostics", "Personalized medicine", "Mental health support", "Lifestyle optimization"],
        impact: 78,
    },
    HealthTechnology {
        id: "bioenhancement",
        name: "Biological Enhancement",
        description: "Synthetic biology for enhanced physical and cognitive capabilities",
        benefits: ["Enhanced strength", "Improved cognition", "Extended lifespan", "Rapid healing"],
        impact: 95,
    },
];

const COMMUNITIES: [Community; 3] = [
    Community {
        id: "sustainability",
        name: "EcoFuture Collective",
        members: 12847,
        activity: "High",
        focus: "Climate Solutions",
        description: "Global community working on regenerative technologies and carbon-negative cities.",
        projects: ["Ocean Cleanup 3.0", "Atmospheric Carbon Capture", "Smart Grid Optimization"],
    },
    Community {
        id: "health",
        name: "Longevity Network",
        members: 8932,
        activity: "Very High",
        focus: "Life Extension",
        description: "Researchers and enthusiasts advancing human longevity and wellness technologies.",
        projects: ["Nano-Medicine Trials", "AI Health Diagnostics", "Gene Therapy Research"],
    },
    Community {
        id: "tech",
        name: "Neural Collective",
        members: 15634,
        activity: "Medium",
        focus: "AI & Consciousness",
        description: "Exploring the intersection of human consciousness and artificial intelligence.",
        projects: ["Brain-Computer Interfaces", "Digital Consciousness", "AI Ethics Framework"],
    },
];

const CHALLENGES: [Challenge; 3] = [
    Challenge {
        id: "climate",
        title: "Climate Restoration Challenge",
        participants_m: 2.1,
        progress: 67,
        reward: "50,000 Social Credits",
        deadline: "6 days",
    },
    Challenge {
        id: "wellness",
        title: "Global Wellness Initiative",
        participants_m: 1.8,
        progress: 43,
        reward: "30,000 Social Credits",
        deadline: "12 days",
    },
    Challenge {
        id: "innovation",
        title: "Tech Innovation Sprint",
        participants_m: 0.9,
        progress: 89,
        reward: "75,000 Social Credits",
        deadline: "2 days",
    },
];

const ACHIEVEMENTS: [Achievement; 4] = [
    Achievement { title: "Climate Champion", level: "Gold" },
    Achievement { title: "Health Advocate", level: "Silver" },
    Achievement { title: "Tech Innovator", level: "Bronze" },
    Achievement { title: "Community Builder", level: "Platinum" },
];

// =============================================================================
// Rendering
// =============================================================================

pub fn render(screen: Screen, p: &Profile) -> ViewModel {
    match screen {
        Screen::Welcome => ViewModel::Welcome(WelcomeView {
            title: "Life in 2070",
            tagline: "Explore your future life in an AI-powered world. Simulate smart cities, \
                      optimize your health with nanotechnology, and build sustainable communities.",
            highlights: [
                (
                    "Smart Cities",
                    "Explore autonomous transportation, vertical farms, and AI-managed infrastructure",
                ),
                (
                    "Advanced Health",
                    "Simulate longevity treatments, AI diagnostics, and personalized medicine",
                ),
                (
                    "Global Impact",
                    "See how your choices affect climate, society, and future generations",
                ),
            ],
            call_to_action: "Begin Your 2070 Journey",
        }),
        Screen::City => ViewModel::City(CityView {
            districts: DISTRICTS.to_vec(),
        }),
        Screen::Lifestyle => ViewModel::Lifestyle(lifestyle(p)),
        Screen::Health => ViewModel::Health(health(p)),
        Screen::Environment => ViewModel::Environment(environment(p)),
        Screen::Social => ViewModel::Social(social(p)),
    }
}

fn social(p: &Profile) -> SocialView {
    SocialView {
        social_score: derived::social_score(p),
        global_connections: "147K",
        challenges_completed: 23,
        community_trust: 89,
        communities: COMMUNITIES.to_vec(),
        challenges: CHALLENGES.to_vec(),
        impact: ImpactSummary {
            communities_joined: 7,
            projects_contributed: 23,
            global_rank: "Top 15%",
            social_credits: 847_230,
        },
        achievements: ACHIEVEMENTS.to_vec(),
    }
}

fn lifestyle(p: &Profile) -> LifestyleView {
    let cards = p
        .iter()
        .map(|(key, value)| MetricCard {
            key,
            label: key.label(),
            description: key.description(),
            value,
            unit: key.unit(),
            tier: Tier::classify(value),
            prediction: key.prediction(value),
        })
        .collect();
    LifestyleView {
        cards,
        climate_contribution: derived::planet_health(p),
        health_optimization: derived::health_optimization(p),
        society_impact: derived::society_impact(p),
    }
}

fn health(p: &Profile) -> HealthView {
    let lifespan = derived::lifespan(p);
    HealthView {
        lifespan,
        years_beyond_baseline: derived::years_beyond_baseline(p),
        health_score: derived::health_score(p),
        cognitive_enhancement: derived::cognitive_enhancement(p),
        timeline: health_timeline(lifespan),
        technologies: TECHNOLOGIES.to_vec(),
    }
}

fn environment(p: &Profile) -> EnvironmentView {
    EnvironmentView {
        metrics: environment_metrics(p).to_vec(),
        trees_planted: derived::trees_planted(p),
        energy_saved: derived::energy_saved(p),
        carbon_offset: derived::carbon_offset(p),
        planet_health: derived::planet_health(p),
        ocean_health: derived::ocean_health(p),
        air_quality: derived::air_quality(p),
        biodiversity: derived::biodiversity(p),
    }
}
