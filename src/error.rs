use thiserror::Error;

/// Errors surfaced by the profile core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Metric name is not one of the six profile keys.
    #[error("invalid metric key: {0}")]
    InvalidKey(String),
    #[error("unknown screen: {0}")]
    UnknownScreen(String),
}
