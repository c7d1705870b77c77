//! FILENAME: app/field-manager/src/config.rs
//! Construction inputs of the field manager and host-level settings.
//!
//! `ManagerProps` is what an embedding application hands over: the field
//! universe, an optional initial configuration and the allowed aggregations.
//! The initial configuration stays in its raw string form until it has
//! passed validation.

use std::path::PathBuf;

use pivot_fields::{validate_config, ConfigError, FieldConfigInput, FieldRecord, Zone};
use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Common aggregation identifiers. Offered for convenience, never applied
/// unless a caller passes them explicitly.
pub const DEFAULT_AGGREGATIONS: [&str; 5] = ["sum", "avg", "count", "min", "max"];

/// Environment variable naming the log file.
pub const LOG_PATH_ENV: &str = "FIELD_MANAGER_LOG";
/// Environment variable enabling the stdout echo of log lines.
pub const LOG_ECHO_ENV: &str = "FIELD_MANAGER_LOG_ECHO";

// ============================================================================
// MANAGER PROPS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerProps {
    /// The field universe, in display order.
    pub fields: Vec<String>,
    #[serde(default)]
    pub initial_config: Vec<FieldConfigInput>,
    #[serde(default)]
    pub aggregations: Vec<String>,
}

impl ManagerProps {
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        ManagerProps {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_initial_config(mut self, initial_config: Vec<FieldConfigInput>) -> Self {
        self.initial_config = initial_config;
        self
    }

    pub fn with_aggregations<S: Into<String>>(mut self, aggregations: impl IntoIterator<Item = S>) -> Self {
        self.aggregations = aggregations.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_json(json: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Runs the validator with every zone allowed.
    pub fn validate(&self) -> Vec<ConfigError> {
        validate_config(&self.fields, &self.initial_config, &Zone::ALL, &self.aggregations)
    }

    /// Typed records of the initial configuration. Entries whose zone or
    /// sort does not parse are skipped; validation reports them first.
    pub fn initial_records(&self) -> Vec<FieldRecord> {
        self.initial_config
            .iter()
            .filter_map(FieldConfigInput::to_record)
            .collect()
    }
}

// ============================================================================
// HOST CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostConfig {
    /// File receiving log lines; `None` leaves only the `log` facade.
    pub log_path: Option<PathBuf>,
    pub echo_stdout: bool,
}

impl HostConfig {
    pub fn from_env() -> Self {
        let log_path = std::env::var_os(LOG_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let echo_stdout = std::env::var(LOG_ECHO_ENV)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        HostConfig { log_path, echo_stdout }
    }

    /// Installs the logging sinks described by this config.
    pub fn apply(&self) -> Result<(), HostError> {
        crate::logging::set_echo_stdout(self.echo_stdout);
        if let Some(path) = &self.log_path {
            let opened = crate::logging::init_log_file(path).map_err(HostError::Log)?;
            crate::log_info!("HOST", "logging to {}", opened.display());
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
