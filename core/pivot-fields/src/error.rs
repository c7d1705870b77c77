//! FILENAME: core/pivot-fields/src/error.rs

use thiserror::Error;

/// A structural problem found in a proposed configuration.
/// The `Display` text is the message surfaced to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Field duplicates: '{}'", .0.join(", "))]
    DuplicateFields(Vec<String>),

    #[error("Field \"{id}\" in config does not exist in fields list.")]
    UnknownField { id: String },

    #[error("Duplicate field \"{id}\" in config.")]
    DuplicateConfigField { id: String },

    #[error("Field \"{id}\" has invalid zone \"{zone}\".")]
    InvalidZone { id: String, zone: String },

    #[error("Field \"{id}\" in \"values\" must have valid aggregation ({}).", .allowed.join(", "))]
    InvalidAggregation { id: String, allowed: Vec<String> },

    #[error("Field \"{id}\" has invalid sort value \"{sort}\".")]
    InvalidSort { id: String, sort: String },
}

impl ConfigError {
    /// The field the error is about, if it concerns a single field.
    pub fn field_id(&self) -> Option<&str> {
        match self {
            ConfigError::DuplicateFields(_) => None,
            ConfigError::UnknownField { id }
            | ConfigError::DuplicateConfigField { id }
            | ConfigError::InvalidZone { id, .. }
            | ConfigError::InvalidAggregation { id, .. }
            | ConfigError::InvalidSort { id, .. } => Some(id),
        }
    }
}

/// Rejection reasons for a new derived field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Field name must be at least {min} characters.")]
    NameTooShort { min: usize },

    #[error("Field name must be at most {max} characters.")]
    NameTooLong { max: usize },

    #[error("Field already exists")]
    NameExists,

    #[error("Expression must be at least {min} characters.")]
    ExpressionTooShort { min: usize },
}
