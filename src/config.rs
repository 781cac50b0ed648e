//! Runtime configuration read from `PROFILE_*`, `START_SCREEN` and `LOG_UPDATES`.

use crate::profile::{MetricKey, Profile};
use crate::views::Screen;

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile the session starts from (and `reset` returns to).
    pub initial_profile: Profile,
    pub start_screen: Screen,
    /// Emit one profile.update record per accepted update.
    pub log_updates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_profile: Profile::default(),
            start_screen: Screen::Welcome,
            log_updates: true,
        }
    }
}

fn env_var(key: MetricKey) -> String {
    format!("PROFILE_{}", key.as_str().to_uppercase())
}

impl Config {
    pub fn from_env() -> Self {
        let mut initial_profile = Profile::default();
        for key in MetricKey::ALL {
            if let Some(v) = std::env::var(env_var(key)).ok().and_then(|v| v.parse::<i64>().ok()) {
                initial_profile.set(key, v);
            }
        }
        Self {
            initial_profile,
            start_screen: std::env::var("START_SCREEN")
                .map(|v| Screen::parse_lenient(&v))
                .unwrap_or_default(),
            log_updates: std::env::var("LOG_UPDATES")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        }
    }
}
