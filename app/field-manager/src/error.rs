//! FILENAME: app/field-manager/src/error.rs

use pivot_fields::{ConfigError, DraftError};
use thiserror::Error;

fn join_messages<E: ToString>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Props error: {0}")]
    Props(#[from] serde_json::Error),

    #[error("Invalid Pivot Config: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ConfigError>),

    #[error("Field manager is not mounted")]
    NotMounted,

    #[error("Unknown zone \"{0}\"")]
    UnknownZone(String),

    #[error("Field \"{0}\" not found")]
    UnknownField(String),

    #[error("Invalid sort value \"{0}\"")]
    InvalidSort(String),

    #[error("Aggregation \"{0}\" is not allowed")]
    AggregationNotAllowed(String),

    #[error("New field rejected: {}", join_messages(.0))]
    Draft(Vec<DraftError>),

    #[error("Log error: {0}")]
    Log(String),
}

impl HostError {
    /// Configuration errors carried by an `InvalidConfiguration`, else empty.
    pub fn config_errors(&self) -> &[ConfigError] {
        match self {
            HostError::InvalidConfiguration(errors) => errors,
            _ => &[],
        }
    }
}
