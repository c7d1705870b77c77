//! FILENAME: core/pivot-fields/src/view.rs
//! Pivot Field View - Derived, renderable state for one zone.
//!
//! Nothing here is stored. Views are recomputed from the store on demand and
//! describe what a zone panel shows:
//! - the zone's fields in order, with the per-field settings that apply there
//! - the subset matching the search box
//! - whether the sort toggle and the "new field" affordance are offered

use serde::{Deserialize, Serialize};

use crate::definition::{FieldId, FieldRecord, SortDirection, Zone};
use crate::zone_sort::SortMode;

/// Case-insensitive substring match of a field id against a search query.
/// An empty query matches everything.
pub fn matches_query(id: &str, query: &str) -> bool {
    query.is_empty() || id.to_lowercase().contains(&query.to_lowercase())
}

/// Fields whose id matches `query`, order kept.
pub fn filter_fields<'a>(fields: &'a [FieldRecord], query: &str) -> Vec<&'a FieldRecord> {
    fields.iter().filter(|f| matches_query(&f.id, query)).collect()
}

// ============================================================================
// FIELD VIEW
// ============================================================================

/// A field as shown inside its zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub id: FieldId,
    pub zone: Zone,
    /// Aggregation selector is offered (values zone only).
    pub show_aggregation: bool,
    /// Pre-selected aggregation; only set when it is one of the allowed ones.
    pub selected_aggregation: Option<String>,
    /// Sort selector is offered (rows and columns only).
    pub show_sort: bool,
    pub sort: Option<SortDirection>,
    /// The "send back to available" action is offered.
    pub removable: bool,
}

impl FieldView {
    pub fn for_record(record: &FieldRecord, aggregations: &[String]) -> Self {
        let show_aggregation = record.zone.supports_aggregation();
        let selected_aggregation = record
            .aggregation
            .as_ref()
            .filter(|agg| show_aggregation && aggregations.contains(*agg))
            .cloned();

        FieldView {
            id: record.id.clone(),
            zone: record.zone,
            show_aggregation,
            selected_aggregation,
            show_sort: record.zone.supports_sort(),
            sort: record.sort,
            removable: record.zone != Zone::Available,
        }
    }
}

// ============================================================================
// ZONE VIEW
// ============================================================================

/// A zone panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneView {
    pub zone: Zone,
    /// All fields of the zone in current order.
    pub fields: Vec<FieldView>,
    /// Fields to render: matching the query, minus the one being dragged.
    pub visible: Vec<FieldView>,
    pub query: String,
    pub sort_mode: SortMode,
    /// Search box and sort toggle are offered (more than one field).
    pub can_sort: bool,
    /// The zone has no fields at all.
    pub is_empty: bool,
    /// A query is set and nothing matched it.
    pub no_matches: bool,
    /// The zone offers creating a new derived field.
    pub accepts_new_fields: bool,
}

impl ZoneView {
    pub fn build(
        zone: Zone,
        members: &[FieldRecord],
        query: &str,
        sort_mode: SortMode,
        dragging: Option<&str>,
        aggregations: &[String],
    ) -> Self {
        let fields: Vec<FieldView> = members
            .iter()
            .map(|f| FieldView::for_record(f, aggregations))
            .collect();

        let matching: Vec<&FieldView> = fields
            .iter()
            .filter(|f| matches_query(&f.id, query))
            .collect();
        let no_matches = !query.is_empty() && matching.is_empty();
        let visible = matching
            .into_iter()
            .filter(|f| Some(f.id.as_str()) != dragging)
            .cloned()
            .collect();

        ZoneView {
            zone,
            can_sort: fields.len() > 1,
            is_empty: fields.is_empty(),
            fields,
            visible,
            query: query.to_string(),
            sort_mode,
            no_matches,
            accepts_new_fields: zone == Zone::Available,
        }
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible.iter().map(|f| f.id.as_str()).collect()
    }
}
