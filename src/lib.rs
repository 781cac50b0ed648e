//! Lifestyle simulator core for the "Life in 2070" screens.
//!
//! A six-metric [`profile::Profile`] owned by a [`store::ProfileStore`],
//! pure derived metrics in [`derived`], threshold labels in [`tiers`] and
//! per-screen view models in [`views`], tied together by [`session::Session`].

pub mod config;
pub mod derived;
pub mod error;
pub mod logging;
pub mod profile;
pub mod session;
pub mod store;
pub mod tiers;
pub mod views;

pub use derived::{compute_derived, DerivedMetric, DerivedMetrics};
pub use error::ProfileError;
pub use profile::{MetricKey, Profile};
pub use session::{Session, SessionOutput, UiEvent};
pub use store::{Notification, ProfileChange, ProfileStore};
pub use views::{Screen, ViewModel, ViewSelector};
