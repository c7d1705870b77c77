//! FILENAME: core/pivot-fields/src/definition.rs
//! Pivot Field Definition - The serializable field configuration.
//!
//! This module contains the types that DESCRIBE where every field of a
//! pivot report sits and how it is configured:
//! - `Zone`: the five areas a field can occupy
//! - `FieldRecord`: one field's zone assignment plus its settings
//! - `FieldConfigInput`: the raw, not yet validated form of a record as it
//!   arrives from the hosting application
//!
//! Records serialize to the compact JSON shape the host exchanges:
//! `{"id":"sales","zone":"values","aggregation":"sum"}`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a field. Unique within the field universe.
pub type FieldId = String;

/// The full ordered collection of field records at a point in time.
pub type Configuration = Vec<FieldRecord>;

// ============================================================================
// ZONES
// ============================================================================

/// One of the destination buckets a field can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Unassigned. Every field starts here unless configured otherwise.
    #[default]
    Available,
    Rows,
    Columns,
    Filters,
    /// The only zone where an aggregation applies.
    Values,
}

impl Zone {
    /// All zones in display order.
    pub const ALL: [Zone; 5] = [
        Zone::Available,
        Zone::Rows,
        Zone::Columns,
        Zone::Filters,
        Zone::Values,
    ];

    /// Wire identifier of the zone ("available", "rows", ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Available => "available",
            Zone::Rows => "rows",
            Zone::Columns => "columns",
            Zone::Filters => "filters",
            Zone::Values => "values",
        }
    }

    /// Parses a wire identifier. Matching is exact (case-sensitive).
    pub fn from_id(id: &str) -> Option<Zone> {
        match id {
            "available" => Some(Zone::Available),
            "rows" => Some(Zone::Rows),
            "columns" => Some(Zone::Columns),
            "filters" => Some(Zone::Filters),
            "values" => Some(Zone::Values),
            _ => None,
        }
    }

    /// Whether fields in this zone carry a per-field sort direction.
    pub fn supports_sort(self) -> bool {
        matches!(self, Zone::Rows | Zone::Columns)
    }

    /// Whether fields in this zone carry an aggregation.
    pub fn supports_aggregation(self) -> bool {
        self == Zone::Values
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD SETTINGS
// ============================================================================

/// Per-field sort direction for row and column fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Parses "asc" / "desc".
    pub fn from_id(id: &str) -> Option<SortDirection> {
        match id {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD RECORDS
// ============================================================================

/// A field's zone assignment and settings.
///
/// `sort` and `aggregation` survive moves between zones: a field that leaves
/// `values` and later comes back still remembers its aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub id: FieldId,
    pub zone: Zone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
}

impl FieldRecord {
    pub fn new(id: impl Into<FieldId>, zone: Zone) -> Self {
        FieldRecord {
            id: id.into(),
            zone,
            sort: None,
            aggregation: None,
        }
    }

    /// The record synthesized for a field absent from the initial configuration.
    pub fn available(id: impl Into<FieldId>) -> Self {
        FieldRecord::new(id, Zone::Available)
    }

    pub fn with_sort(mut self, sort: SortDirection) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_aggregation(mut self, aggregation: impl Into<String>) -> Self {
        self.aggregation = Some(aggregation.into());
        self
    }

    /// Merges a partial update into this record. Unset parts are left alone.
    pub fn apply(&mut self, update: &FieldUpdate) {
        if let Some(sort) = update.sort {
            self.sort = Some(sort);
        }
        if let Some(ref aggregation) = update.aggregation {
            self.aggregation = Some(aggregation.clone());
        }
    }
}

/// Partial settings update for `FieldConfigStore::update_field_config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    #[serde(default)]
    pub sort: Option<SortDirection>,
    #[serde(default)]
    pub aggregation: Option<String>,
}

impl FieldUpdate {
    pub fn sort(sort: SortDirection) -> Self {
        FieldUpdate {
            sort: Some(sort),
            aggregation: None,
        }
    }

    pub fn aggregation(aggregation: impl Into<String>) -> Self {
        FieldUpdate {
            sort: None,
            aggregation: Some(aggregation.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sort.is_none() && self.aggregation.is_none()
    }
}

// ============================================================================
// RAW INPUT
// ============================================================================

/// A field record as supplied by the host, before validation.
/// `zone` and `sort` are kept as strings so invalid values can be reported
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfigInput {
    pub id: String,
    pub zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
}

impl FieldConfigInput {
    pub fn new(id: impl Into<String>, zone: impl Into<String>) -> Self {
        FieldConfigInput {
            id: id.into(),
            zone: zone.into(),
            sort: None,
            aggregation: None,
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_aggregation(mut self, aggregation: impl Into<String>) -> Self {
        self.aggregation = Some(aggregation.into());
        self
    }

    /// Converts to a typed record. Returns None if the zone or sort value
    /// does not parse; run the validator first to get a reason.
    pub fn to_record(&self) -> Option<FieldRecord> {
        let zone = Zone::from_id(&self.zone)?;
        let sort = match self.sort {
            Some(ref s) => Some(SortDirection::from_id(s)?),
            None => None,
        };
        Some(FieldRecord {
            id: self.id.clone(),
            zone,
            sort,
            aggregation: self.aggregation.clone(),
        })
    }
}

impl From<&FieldRecord> for FieldConfigInput {
    fn from(record: &FieldRecord) -> Self {
        FieldConfigInput {
            id: record.id.clone(),
            zone: record.zone.as_str().to_string(),
            sort: record.sort.map(|s| s.as_str().to_string()),
            aggregation: record.aggregation.clone(),
        }
    }
}

// ============================================================================
// EXPORT
// ============================================================================

/// Renders a configuration as indented JSON, the text shown by the
/// "current configuration" viewer and placed on the clipboard by its copy action.
pub fn configuration_to_json(configuration: &[FieldRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zone_is_available() {
        assert_eq!(Zone::default(), Zone::Available);
        let input = FieldConfigInput::new("x", Zone::default().as_str());
        assert_eq!(input.to_record(), Some(FieldRecord::available("x")));
    }

    #[test]
    fn test_zone_ids_roundtrip_through_parser() {
        for zone in Zone::ALL {
            assert_eq!(Zone::from_id(zone.as_str()), Some(zone));
        }
        assert_eq!(Zone::from_id("Rows"), None);
        assert_eq!(Zone::from_id("pages"), None);
    }

    #[test]
    fn test_zone_capabilities() {
        assert!(Zone::Rows.supports_sort());
        assert!(Zone::Columns.supports_sort());
        assert!(!Zone::Filters.supports_sort());
        assert!(Zone::Values.supports_aggregation());
        assert!(!Zone::Available.supports_aggregation());
    }

    #[test]
    fn test_record_json_shape_omits_unset_settings() {
        let record = FieldRecord::new("country", Zone::Rows);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"country","zone":"rows"}"#);

        let record = FieldRecord::new("sales", Zone::Values).with_aggregation("sum");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"sales","zone":"values","aggregation":"sum"}"#);
    }

    #[test]
    fn test_record_parses_sort_direction() {
        let record: FieldRecord =
            serde_json::from_str(r#"{"id":"city","zone":"columns","sort":"desc"}"#).unwrap();
        assert_eq!(record.sort, Some(SortDirection::Descending));
        assert_eq!(record.aggregation, None);
    }

    #[test]
    fn test_apply_merges_only_set_parts() {
        let mut record = FieldRecord::new("sales", Zone::Values)
            .with_aggregation("sum")
            .with_sort(SortDirection::Ascending);

        record.apply(&FieldUpdate::sort(SortDirection::Descending));
        assert_eq!(record.sort, Some(SortDirection::Descending));
        assert_eq!(record.aggregation.as_deref(), Some("sum"));

        record.apply(&FieldUpdate::aggregation("avg"));
        assert_eq!(record.aggregation.as_deref(), Some("avg"));
        assert_eq!(record.sort, Some(SortDirection::Descending));
    }

    #[test]
    fn test_input_to_record() {
        let input = FieldConfigInput::new("city", "rows").with_sort("asc");
        let record = input.to_record().unwrap();
        assert_eq!(record.zone, Zone::Rows);
        assert_eq!(record.sort, Some(SortDirection::Ascending));

        assert!(FieldConfigInput::new("city", "nowhere").to_record().is_none());
        assert!(FieldConfigInput::new("city", "rows")
            .with_sort("sideways")
            .to_record()
            .is_none());
    }

    #[test]
    fn test_configuration_to_json_is_indented() {
        let config = vec![FieldRecord::available("date")];
        let json = configuration_to_json(&config).unwrap();
        assert!(json.starts_with("[\n"));
        assert!(json.contains("\"zone\": \"available\""));
    }
}
