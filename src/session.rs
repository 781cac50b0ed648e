//! Top-level controller: one owned profile store, one screen selector.
//!
//! ```text
//! UiEvent ──► Session::apply ──► ProfileStore::set ──► observers
//!                  │                                      │
//!                  └──────────► render(active) ◄──────────┘
//! ```
//!
//! All mutation goes through [`Session::apply`], so a session can be replayed
//! from its event list and checked against the logged profile hashes.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;
use crate::derived::DerivedMetrics;
use crate::error::ProfileError;
use crate::logging::{
    content_hash, log_audit, log_event_applied, log_navigation, log_startup, v_str, TimedScope,
};
use crate::profile::{MetricKey, Profile};
use crate::store::{Notification, ObserverId, ProfileChange, ProfileStore};
use crate::views::{navigation, render, NavigationBar, Screen, ViewModel, ViewSelector};

/// Inputs from the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Slider moved. `key` is the raw metric name as the widget sends it.
    SetMetric { key: String, value: i64 },
    Navigate { screen: String },
    /// Welcome screen call to action; opens the city explorer.
    Explore,
    Reset,
}

impl UiEvent {
    pub fn set(key: MetricKey, value: i64) -> Self {
        UiEvent::SetMetric {
            key: key.as_str().to_string(),
            value,
        }
    }

    pub fn navigate(screen: Screen) -> Self {
        UiEvent::Navigate {
            screen: screen.as_str().to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UiEvent::SetMetric { .. } => "set_metric",
            UiEvent::Navigate { .. } => "navigate",
            UiEvent::Explore => "explore",
            UiEvent::Reset => "reset",
        }
    }
}

/// Result of applying one event: the refreshed active view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutput {
    pub update_seq: u64,
    pub change: Option<ProfileChange>,
    pub profile: Profile,
    pub profile_hash: String,
    pub navigation: NavigationBar,
    pub view: ViewModel,
}

pub struct Session {
    store: ProfileStore,
    selector: ViewSelector,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(cfg: &Config) -> Self {
        log_startup(
            cfg.start_screen.as_str(),
            &json!(cfg.initial_profile),
        );
        Self {
            store: ProfileStore::new(cfg.initial_profile).with_update_logging(cfg.log_updates),
            selector: ViewSelector::new(cfg.start_screen),
        }
    }

    pub fn profile(&self) -> &Profile {
        self.store.get()
    }

    pub fn screen(&self) -> Screen {
        self.selector.active()
    }

    pub fn derived(&self) -> DerivedMetrics {
        self.store.derived()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&Notification<'_>) + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Apply one UI event and return the re-rendered active screen.
    ///
    /// Errors leave both the profile and the active screen unchanged.
    pub fn apply(&mut self, event: UiEvent) -> Result<SessionOutput, ProfileError> {
        let _scope = TimedScope::with_context("session.apply", &[("screen", v_str(self.screen().as_str()))]);
        let kind = event.kind();
        match self.dispatch(event) {
            Ok(change) => {
                log_event_applied(kind, self.store.update_seq(), self.screen().as_str(), None);
                Ok(self.output(change))
            }
            Err(err) => {
                let msg = err.to_string();
                log_event_applied(kind, self.store.update_seq(), self.screen().as_str(), Some(&msg));
                Err(err)
            }
        }
    }

    fn dispatch(&mut self, event: UiEvent) -> Result<Option<ProfileChange>, ProfileError> {
        let change = match event {
            UiEvent::SetMetric { key, value } => Some(self.store.set_by_name(&key, value)?),
            UiEvent::Navigate { screen } => {
                let screen: Screen = screen.parse()?;
                self.navigate(screen);
                None
            }
            UiEvent::Explore => {
                if self.screen() == Screen::Welcome {
                    self.navigate(Screen::City);
                }
                None
            }
            UiEvent::Reset => {
                self.store.reset();
                None
            }
        };
        Ok(change)
    }

    /// Apply events in order, stopping at the first error.
    pub fn replay<I>(&mut self, events: I) -> Result<Option<SessionOutput>, ProfileError>
    where
        I: IntoIterator<Item = UiEvent>,
    {
        let mut last = None;
        for event in events {
            last = Some(self.apply(event)?);
        }
        Ok(last)
    }

    /// Current view without applying anything.
    pub fn snapshot(&self) -> SessionOutput {
        self.output(None)
    }

    fn navigate(&mut self, screen: Screen) {
        let from = self.selector.select(screen);
        if from != screen {
            log_navigation(from.as_str(), screen.as_str());
        }
    }

    fn output(&self, change: Option<ProfileChange>) -> SessionOutput {
        let profile = *self.store.get();
        let profile_hash = profile_hash(&profile);
        log_audit("profile_hash", self.store.update_seq(), &profile_hash);
        SessionOutput {
            update_seq: self.store.update_seq(),
            change,
            profile,
            profile_hash,
            navigation: navigation(self.screen(), &profile),
            view: render(self.screen(), &profile),
        }
    }
}

/// SHA-256 over the canonical `key=value` listing of the profile.
pub fn profile_hash(p: &Profile) -> String {
    let canonical = p
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_str(), v))
        .collect::<Vec<_>>()
        .join(",");
    content_hash(&canonical)
}
