//! Error taxonomy for the simulation core and its loaders.

use thiserror::Error;

/// Errors raised by geometric constructors, entity spawners and loaders.
#[derive(Debug, Error)]
pub enum SimError {
    /// A geometric argument is not a usable vector (non-finite component).
    #[error("invalid {argument}: {value} is not a finite vector")]
    InvalidOperand { argument: &'static str, value: String },

    /// An entity constructor refused to build an actor.
    #[error("entity construction failed: {reason}")]
    ConstructionFailure { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn construction(reason: impl Into<String>) -> Self {
        SimError::ConstructionFailure {
            reason: reason.into(),
        }
    }
}
