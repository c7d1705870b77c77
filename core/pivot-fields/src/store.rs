//! FILENAME: core/pivot-fields/src/store.rs
//! Field Configuration Store - the authoritative in-memory state.
//!
//! Holds one record per known field, in configuration order, and owns every
//! mutation: moving a field between zones, merging per-field settings,
//! reordering a zone, adding derived fields. Zone toggle-sorting is delegated
//! to one `ZoneSortController` per zone, kept in a `ZoneSortRegistry`.
//!
//! Operations that name an unknown field are no-ops: they leave the
//! configuration untouched, notify nobody and return false.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::definition::{
    configuration_to_json, Configuration, FieldId, FieldRecord, FieldUpdate, Zone,
};
use crate::draft::FieldDraft;
use crate::observer::{ChangeEvent, ChangeKind, ObserverRegistry, SubscriptionId};
use crate::view::{FieldView, ZoneView};
use crate::zone_sort::{SortMode, ZoneSortRegistry};

#[derive(Debug)]
pub struct FieldConfigStore {
    /// One record per field, in configuration order.
    fields: Configuration,
    /// Every field name usable in expressions: the universe plus added fields.
    known_fields: Vec<FieldId>,
    /// Expression text of derived fields, keyed by field id.
    expressions: FxHashMap<FieldId, String>,
    /// Allowed aggregation identifiers.
    aggregations: Vec<String>,
    sorters: ZoneSortRegistry,
    observers: ObserverRegistry,
}

impl FieldConfigStore {
    /// Builds the configuration from the field universe.
    ///
    /// Each universe id takes its record from `initial` when one exists
    /// (the first record wins if `initial` repeats an id) and otherwise gets
    /// a default `available` record. Records in `initial` for ids outside
    /// the universe are dropped, and a repeated universe id yields one record.
    pub fn new<F, A>(universe: &[F], initial: Vec<FieldRecord>, aggregations: &[A]) -> Self
    where
        F: AsRef<str>,
        A: AsRef<str>,
    {
        let mut seeded: FxHashMap<FieldId, FieldRecord> = FxHashMap::default();
        for record in initial {
            seeded.entry(record.id.clone()).or_insert(record);
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut fields = Vec::with_capacity(universe.len());
        let mut known_fields = Vec::with_capacity(universe.len());
        for id in universe {
            let id = id.as_ref();
            if !seen.insert(id) {
                continue;
            }
            known_fields.push(id.to_string());
            fields.push(
                seeded
                    .remove(id)
                    .unwrap_or_else(|| FieldRecord::available(id)),
            );
        }

        FieldConfigStore {
            fields,
            known_fields,
            expressions: FxHashMap::default(),
            aggregations: aggregations.iter().map(|a| a.as_ref().to_string()).collect(),
            sorters: ZoneSortRegistry::new(),
            observers: ObserverRegistry::new(),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// The full current configuration.
    pub fn fields(&self) -> &[FieldRecord] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn aggregations(&self) -> &[String] {
        &self.aggregations
    }

    pub fn is_allowed_aggregation(&self, aggregation: &str) -> bool {
        self.aggregations.iter().any(|a| a == aggregation)
    }

    /// Records in `zone`, in configuration order.
    pub fn get_fields_for_zone(&self, zone: Zone) -> Vec<FieldRecord> {
        self.fields.iter().filter(|f| f.zone == zone).cloned().collect()
    }

    /// Field names offered as insertion tokens while authoring an expression.
    pub fn insertion_tokens(&self) -> &[FieldId] {
        &self.known_fields
    }

    /// Expression text of a derived field.
    pub fn expression(&self, id: &str) -> Option<&str> {
        self.expressions.get(id).map(String::as_str)
    }

    pub fn zone_sort_mode(&self, zone: Zone) -> SortMode {
        self.sorters.mode(zone)
    }

    /// Natural order tracked for `zone`, if its controller has been created.
    pub fn zone_natural_order(&self, zone: Zone) -> Option<&[FieldId]> {
        self.sorters.get(zone).map(|c| c.natural_order())
    }

    /// Configuration as indented JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        configuration_to_json(&self.fields)
    }

    /// Derived view of a zone for presentation. The first query of a zone
    /// seeds its sort controller with the current membership.
    pub fn zone_view(&mut self, zone: Zone, query: &str, dragging: Option<&str>) -> ZoneView {
        let members = self.get_fields_for_zone(zone);
        let mode = self.sorters.get_or_create(zone, &members).mode();
        ZoneView::build(zone, &members, query, mode, dragging, &self.aggregations)
    }

    /// Affordances of a single field as it is shown in its zone.
    pub fn field_view(&self, id: &str) -> Option<FieldView> {
        self.field(id)
            .map(|record| FieldView::for_record(record, &self.aggregations))
    }

    // ========================================================================
    // OBSERVERS
    // ========================================================================

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<'_>) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Moves the registered observers out, leaving none behind.
    pub fn take_observers(&mut self) -> ObserverRegistry {
        std::mem::take(&mut self.observers)
    }

    /// Installs `observers` in place of the current registry.
    pub fn with_observers(mut self, observers: ObserverRegistry) -> Self {
        self.observers = observers;
        self
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Moves a field to `zone`. The record is re-appended at the end of the
    /// configuration, so it becomes the last member of its target zone.
    /// Sort and aggregation settings are kept.
    pub fn move_field_to_zone(&mut self, id: &str, zone: Zone) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };

        let mut record = self.fields.remove(pos);
        let from = record.zone;
        record.zone = zone;
        self.fields.push(record);

        self.after_membership_change(from);
        if zone != from {
            self.after_membership_change(zone);
        }

        self.notify(ChangeKind::Moved, Some(id));
        true
    }

    /// Merges `update` into the field's settings.
    pub fn update_field_config(&mut self, id: &str, update: FieldUpdate) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };

        self.fields[pos].apply(&update);
        self.notify(ChangeKind::SettingsUpdated, Some(id));
        true
    }

    /// Replaces the zone's block of records with `new_order`.
    ///
    /// Only records that are current members of `zone` are taken from
    /// `new_order` (each at most once, with their zone kept as `zone`);
    /// members it does not mention follow in their previous order, so no
    /// field ever loses its record. Other zones keep their relative order.
    pub fn update_zone_fields(&mut self, zone: Zone, new_order: Vec<FieldRecord>) -> bool {
        if !self.fields.iter().any(|f| f.zone == zone) {
            return false;
        }

        self.replace_zone(zone, new_order);
        // An explicit order in an unsorted zone becomes its new natural order.
        if !self.sorters.mode(zone).is_sorted() {
            self.sorters.dispose(zone);
        }
        self.notify(ChangeKind::ZoneReordered, None);
        true
    }

    /// Advances the zone's sort mode (Default -> Ascending -> Descending ->
    /// Default) and applies the resulting order. Returns the zone's fields
    /// in their new order.
    pub fn toggle_zone_sort(&mut self, zone: Zone) -> Vec<FieldRecord> {
        let members = self.get_fields_for_zone(zone);
        let arranged = self
            .sorters
            .get_or_create(zone, &members)
            .toggle_sort(&members);

        self.replace_zone(zone, arranged.clone());
        self.notify(ChangeKind::ZoneReordered, None);
        arranged
    }

    /// Drops the zone's sort controller. The current order stays as it is;
    /// the next query reseeds the natural order from it.
    pub fn dispose_zone_sort(&mut self, zone: Zone) -> bool {
        self.sorters.dispose(zone).is_some()
    }

    /// Appends a derived field to `zone` and to the known field names.
    /// Name and expression rules are enforced upstream (see
    /// `draft::validate_draft`); an id that already exists is ignored.
    pub fn add_new_field(&mut self, draft: FieldDraft, zone: Zone) -> bool {
        if self.contains(&draft.id) || self.known_fields.contains(&draft.id) {
            return false;
        }

        let FieldDraft { id, expression } = draft;
        self.fields.push(FieldRecord::new(id.clone(), zone));
        self.known_fields.push(id.clone());
        self.expressions.insert(id.clone(), expression);

        self.after_membership_change(zone);
        self.notify(ChangeKind::FieldAdded, Some(id.as_str()));
        true
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Keeps an existing controller in step with the zone's membership and
    /// re-applies an active sort so newcomers land in sorted position.
    fn after_membership_change(&mut self, zone: Zone) {
        let members = self.get_fields_for_zone(zone);
        let Some(controller) = self.sorters.get_mut(zone) else {
            return;
        };

        controller.reconcile(&members);
        if controller.mode().is_sorted() {
            let arranged = controller.arrange(&members);
            self.replace_zone(zone, arranged);
        }
    }

    /// Rebuilds the configuration as: other zones (order kept), then the
    /// zone's records as listed in `new_order`, then unmentioned members.
    fn replace_zone(&mut self, zone: Zone, new_order: Vec<FieldRecord>) {
        let (mut members, others): (Vec<FieldRecord>, Vec<FieldRecord>) =
            std::mem::take(&mut self.fields)
                .into_iter()
                .partition(|f| f.zone == zone);

        let mut block = Vec::with_capacity(members.len());
        for mut record in new_order {
            if let Some(pos) = members.iter().position(|m| m.id == record.id) {
                members.remove(pos);
                record.zone = zone;
                block.push(record);
            }
        }
        block.extend(members);

        self.fields = others;
        self.fields.extend(block);
    }

    fn notify(&mut self, kind: ChangeKind, changed: Option<&str>) {
        if self.observers.is_empty() {
            return;
        }
        let changed = changed.and_then(|id| self.fields.iter().find(|f| f.id == id));
        let event = ChangeEvent {
            kind,
            configuration: &self.fields,
            changed,
        };
        self.observers.notify(&event);
    }
}
