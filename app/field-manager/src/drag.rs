//! FILENAME: app/field-manager/src/drag.rs
// PURPOSE: Translates drag gestures over the zone panels into store moves.
// CONTEXT: Only the five zone ids are drop targets. While a drag is active
// the dragged field is hidden from its zone and shown as an overlay, which is
// why the tracker keeps a snapshot of the record taken at drag start.

use pivot_fields::{FieldConfigStore, FieldId, FieldRecord, Zone};
use serde::{Deserialize, Serialize};

use crate::{log_debug, log_info};

/// Result of finishing or abandoning a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DropOutcome {
    /// The field was moved to `to`.
    #[serde(rename_all = "camelCase")]
    Moved { field_id: FieldId, from: Zone, to: Zone },
    /// Released outside any target.
    NoTarget,
    /// Released over something that is not a zone.
    #[serde(rename_all = "camelCase")]
    NotAZone { target: String },
    /// The field vanished from the store while it was being dragged.
    #[serde(rename_all = "camelCase")]
    FieldGone { field_id: FieldId },
    Cancelled,
    /// No drag was in progress.
    Idle,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<FieldRecord>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts dragging `field_id`. An unknown id leaves no drag active.
    pub fn drag_start(&mut self, store: &FieldConfigStore, field_id: &str) -> Option<&FieldRecord> {
        self.active = store.field(field_id).cloned();
        match &self.active {
            Some(record) => log_debug!("DRAG", "start field={} zone={}", record.id, record.zone),
            None => log_debug!("DRAG", "start ignored, unknown field={}", field_id),
        }
        self.active.as_ref()
    }

    /// Snapshot of the field being dragged, for the overlay.
    pub fn active(&self) -> Option<&FieldRecord> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|record| record.id.as_str())
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Finishes the drag over `over` (the id of the element under the
    /// pointer). Dropping on a zone moves the field there, including its
    /// own zone, which re-appends it at the end.
    pub fn drag_end(&mut self, store: &mut FieldConfigStore, over: Option<&str>) -> DropOutcome {
        let Some(record) = self.active.take() else {
            return DropOutcome::Idle;
        };

        let Some(target) = over else {
            log_debug!("DRAG", "end field={} outside any target", record.id);
            return DropOutcome::NoTarget;
        };

        let Some(zone) = Zone::from_id(target) else {
            log_debug!("DRAG", "end field={} over non-zone target={}", record.id, target);
            return DropOutcome::NotAZone {
                target: target.to_string(),
            };
        };

        let from = store.field(&record.id).map(|current| current.zone).unwrap_or(record.zone);
        if !store.move_field_to_zone(&record.id, zone) {
            return DropOutcome::FieldGone { field_id: record.id };
        }

        log_info!("DRAG", "drop field={} from={} to={}", record.id, from, zone);
        DropOutcome::Moved {
            field_id: record.id,
            from,
            to: zone,
        }
    }

    pub fn drag_cancel(&mut self) -> DropOutcome {
        match self.active.take() {
            Some(record) => {
                log_debug!("DRAG", "cancel field={}", record.id);
                DropOutcome::Cancelled
            }
            None => DropOutcome::Idle,
        }
    }
}
