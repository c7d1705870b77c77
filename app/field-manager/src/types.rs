//! FILENAME: app/field-manager/src/types.rs
// PURPOSE: Request and response types of the field manager commands.

use pivot_fields::{FieldId, FieldRecord, SortMode, Zone};
use serde::{Deserialize, Serialize};

/// Move a field into a zone, given by its id string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFieldRequest {
    pub field_id: FieldId,
    pub zone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAggregationRequest {
    pub field_id: FieldId,
    pub aggregation: String,
}

/// `sort` is `"asc"` or `"desc"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSortRequest {
    pub field_id: FieldId,
    pub sort: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneViewRequest {
    pub zone: String,
    /// Search text; empty shows every field.
    #[serde(default)]
    pub query: String,
}

/// Create a derived field. The zone defaults to `available`, the only zone
/// offering the "new field" action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFieldRequest {
    pub id: String,
    pub expression: String,
    #[serde(default)]
    pub zone: Option<String>,
}

/// A zone's fields after its sort toggle was pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSortResponse {
    pub zone: Zone,
    pub mode: SortMode,
    pub fields: Vec<FieldRecord>,
}
