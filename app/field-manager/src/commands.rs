//! FILENAME: app/field-manager/src/commands.rs
// PURPOSE: Commands the embedding application calls on a mounted manager.
// CONTEXT: Each command logs under "PIVOT", resolves string inputs (zone and
// sort ids) and returns a `String` error on failure, already logged. A host
// that failed validation answers every command with "not mounted".

use pivot_fields::{
    next_draft_name, validate_draft, FieldDraft, FieldRecord, FieldUpdate, FieldView,
    SortDirection, Zone, ZoneView,
};

use crate::error::HostError;
use crate::types::{
    AddFieldRequest, MoveFieldRequest, SetAggregationRequest, SetSortRequest, ZoneSortResponse,
    ZoneViewRequest,
};
use crate::{log_debug, log_error, log_info, DropOutcome, FieldManagerHost};

fn fail(err: HostError) -> String {
    log_error!("PIVOT", "{}", err);
    err.to_string()
}

fn parse_zone(zone: &str) -> Result<Zone, HostError> {
    Zone::from_id(zone).ok_or_else(|| HostError::UnknownZone(zone.to_string()))
}

fn parse_sort(sort: &str) -> Result<SortDirection, HostError> {
    SortDirection::from_id(sort).ok_or_else(|| HostError::InvalidSort(sort.to_string()))
}

/// The record of `field_id` after a mutation that reported success.
fn record_of(host: &FieldManagerHost, field_id: &str) -> Result<FieldRecord, HostError> {
    host.store()?
        .field(field_id)
        .cloned()
        .ok_or_else(|| HostError::UnknownField(field_id.to_string()))
}

// ============================================================================
// FIELD COMMANDS
// ============================================================================

/// Move a field to a zone. It becomes the zone's last field, or takes its
/// sorted position if the zone is currently sorted.
pub fn move_field(host: &mut FieldManagerHost, request: MoveFieldRequest) -> Result<FieldRecord, String> {
    log_info!("PIVOT", "move_field field={} zone={}", request.field_id, request.zone);

    let zone = parse_zone(&request.zone).map_err(fail)?;
    let store = host.store_mut().map_err(fail)?;
    if !store.move_field_to_zone(&request.field_id, zone) {
        return Err(fail(HostError::UnknownField(request.field_id)));
    }

    record_of(host, &request.field_id).map_err(fail)
}

/// Send a field back to `available`.
pub fn remove_field(host: &mut FieldManagerHost, field_id: &str) -> Result<FieldRecord, String> {
    log_info!("PIVOT", "remove_field field={}", field_id);

    let store = host.store_mut().map_err(fail)?;
    if !store.move_field_to_zone(field_id, Zone::Available) {
        return Err(fail(HostError::UnknownField(field_id.to_string())));
    }

    record_of(host, field_id).map_err(fail)
}

pub fn set_aggregation(
    host: &mut FieldManagerHost,
    request: SetAggregationRequest,
) -> Result<FieldRecord, String> {
    log_info!(
        "PIVOT",
        "set_aggregation field={} aggregation={}",
        request.field_id,
        request.aggregation
    );

    let store = host.store_mut().map_err(fail)?;
    if !store.is_allowed_aggregation(&request.aggregation) {
        return Err(fail(HostError::AggregationNotAllowed(request.aggregation)));
    }
    if !store.update_field_config(&request.field_id, FieldUpdate::aggregation(request.aggregation)) {
        return Err(fail(HostError::UnknownField(request.field_id)));
    }

    record_of(host, &request.field_id).map_err(fail)
}

pub fn set_sort(host: &mut FieldManagerHost, request: SetSortRequest) -> Result<FieldRecord, String> {
    log_info!("PIVOT", "set_sort field={} sort={}", request.field_id, request.sort);

    let sort = parse_sort(&request.sort).map_err(fail)?;
    let store = host.store_mut().map_err(fail)?;
    if !store.update_field_config(&request.field_id, FieldUpdate::sort(sort)) {
        return Err(fail(HostError::UnknownField(request.field_id)));
    }

    record_of(host, &request.field_id).map_err(fail)
}

// ============================================================================
// ZONE COMMANDS
// ============================================================================

/// Press the zone's sort toggle: default, ascending, descending, default.
/// The toggle is disabled below two fields; the zone is then returned as is.
pub fn toggle_zone_sort(host: &mut FieldManagerHost, zone: &str) -> Result<ZoneSortResponse, String> {
    log_info!("PIVOT", "toggle_zone_sort zone={}", zone);

    let zone = parse_zone(zone).map_err(fail)?;
    let store = host.store_mut().map_err(fail)?;
    let current = store.get_fields_for_zone(zone);
    if current.len() < 2 {
        let mode = store.zone_sort_mode(zone);
        log_debug!("PIVOT", "toggle_zone_sort zone={} ignored, fields={}", zone, current.len());
        return Ok(ZoneSortResponse { zone, mode, fields: current });
    }
    let fields = store.toggle_zone_sort(zone);
    let mode = store.zone_sort_mode(zone);

    log_info!("PIVOT", "toggle_zone_sort zone={} mode={:?} fields={}", zone, mode, fields.len());
    Ok(ZoneSortResponse { zone, mode, fields })
}

/// The zone panel as it should be drawn now, search applied and the field
/// being dragged hidden.
pub fn zone_view(host: &mut FieldManagerHost, request: ZoneViewRequest) -> Result<ZoneView, String> {
    log_info!("PIVOT", "zone_view zone={} query={:?}", request.zone, request.query);

    let zone = parse_zone(&request.zone).map_err(fail)?;
    let (store, drag) = host.parts_mut().map_err(fail)?;
    Ok(store.zone_view(zone, &request.query, drag.active_id()))
}

pub fn field_view(host: &FieldManagerHost, field_id: &str) -> Result<FieldView, String> {
    let store = host.store().map_err(fail)?;
    store
        .field_view(field_id)
        .ok_or_else(|| fail(HostError::UnknownField(field_id.to_string())))
}

// ============================================================================
// NEW FIELDS
// ============================================================================

/// Name proposed when the "new field" form opens.
pub fn suggest_field_name(host: &FieldManagerHost) -> Result<String, String> {
    let store = host.store().map_err(fail)?;
    Ok(next_draft_name(store.insertion_tokens()))
}

pub fn add_new_field(host: &mut FieldManagerHost, request: AddFieldRequest) -> Result<FieldRecord, String> {
    log_info!(
        "PIVOT",
        "add_new_field id={} zone={}",
        request.id,
        request.zone.as_deref().unwrap_or(Zone::Available.as_str())
    );

    let zone = match request.zone.as_deref() {
        Some(zone) => parse_zone(zone).map_err(fail)?,
        None => Zone::Available,
    };
    let store = host.store_mut().map_err(fail)?;
    let draft = FieldDraft::new(request.id, request.expression);
    validate_draft(&draft, store.insertion_tokens()).map_err(|errors| fail(HostError::Draft(errors)))?;

    let id = draft.id.clone();
    if !store.add_new_field(draft, zone) {
        return Err(fail(HostError::Draft(vec![pivot_fields::DraftError::NameExists])));
    }

    record_of(host, &id).map_err(fail)
}

// ============================================================================
// CONFIGURATION & DRAG
// ============================================================================

pub fn get_configuration(host: &FieldManagerHost) -> Result<Vec<FieldRecord>, String> {
    Ok(host.store().map_err(fail)?.fields().to_vec())
}

/// Current configuration as indented JSON, for the "view config" panel.
pub fn configuration_json(host: &FieldManagerHost) -> Result<String, String> {
    log_info!("PIVOT", "configuration_json");
    let store = host.store().map_err(fail)?;
    store.to_json().map_err(|e| fail(HostError::from(e)))
}

pub fn drag_start(host: &mut FieldManagerHost, field_id: &str) -> Result<Option<FieldRecord>, String> {
    let (store, drag) = host.parts_mut().map_err(fail)?;
    Ok(drag.drag_start(store, field_id).cloned())
}

/// Finish a drag over the element with id `over`, if any.
pub fn drag_end(host: &mut FieldManagerHost, over: Option<&str>) -> Result<DropOutcome, String> {
    let (store, drag) = host.parts_mut().map_err(fail)?;
    Ok(drag.drag_end(store, over))
}

pub fn drag_cancel(host: &mut FieldManagerHost) -> DropOutcome {
    host.drag_mut().drag_cancel()
}
