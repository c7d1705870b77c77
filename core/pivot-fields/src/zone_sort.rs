//! FILENAME: core/pivot-fields/src/zone_sort.rs
//! Zone Sort - alphabetical toggle-sort with a remembered natural order.
//!
//! Each zone can be toggled through Default -> Ascending -> Descending ->
//! Default. While a sort is active the zone's natural order (the sequence in
//! which fields entered it) is tracked separately, so returning to Default
//! restores the arrangement the user built by hand. Fields that enter the
//! zone during an active sort join the end of the natural order and are
//! sorted into place immediately.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::definition::{FieldId, FieldRecord, Zone};

// ============================================================================
// SORT MODE
// ============================================================================

/// Zone-level sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Natural (insertion/drag) order.
    #[default]
    Default,
    Ascending,
    Descending,
}

impl SortMode {
    /// The next mode in the toggle cycle.
    pub fn next(self) -> SortMode {
        match self {
            SortMode::Default => SortMode::Ascending,
            SortMode::Ascending => SortMode::Descending,
            SortMode::Descending => SortMode::Default,
        }
    }

    pub fn is_sorted(self) -> bool {
        self != SortMode::Default
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// Per-zone companion of the store that owns the natural order and sort mode.
#[derive(Debug, Clone)]
pub struct ZoneSortController {
    zone: Zone,
    natural_order: Vec<FieldId>,
    mode: SortMode,
}

impl ZoneSortController {
    /// Creates a controller seeded with the zone's current membership.
    pub fn create(zone: Zone, current: &[FieldRecord]) -> Self {
        ZoneSortController {
            zone,
            natural_order: current.iter().map(|f| f.id.clone()).collect(),
            mode: SortMode::Default,
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn natural_order(&self) -> &[FieldId] {
        &self.natural_order
    }

    /// Brings the natural order in line with the zone's membership:
    /// ids that left are pruned, ids that entered are appended in the order
    /// they appear in `current`. Returns true if anything changed.
    pub fn reconcile(&mut self, current: &[FieldRecord]) -> bool {
        let present: FxHashSet<&str> = current.iter().map(|f| f.id.as_str()).collect();
        let before = self.natural_order.len();
        self.natural_order.retain(|id| present.contains(id.as_str()));
        let pruned = before != self.natural_order.len();

        let known: FxHashSet<FieldId> = self.natural_order.iter().cloned().collect();
        let entered: Vec<FieldId> = current
            .iter()
            .filter(|f| !known.contains(&f.id))
            .map(|f| f.id.clone())
            .collect();
        let appended = !entered.is_empty();
        self.natural_order.extend(entered);

        pruned || appended
    }

    /// Advances the mode one step and returns the zone's fields arranged for
    /// the new mode. Returning to Default rebuilds the natural order from the
    /// restored arrangement.
    pub fn toggle_sort(&mut self, current: &[FieldRecord]) -> Vec<FieldRecord> {
        self.reconcile(current);
        self.mode = self.mode.next();
        let arranged = self.arrange(current);
        if self.mode == SortMode::Default {
            self.natural_order = arranged.iter().map(|f| f.id.clone()).collect();
        }
        arranged
    }

    /// Arranges `current` according to the active mode without changing it.
    pub fn arrange(&self, current: &[FieldRecord]) -> Vec<FieldRecord> {
        let mut fields = current.to_vec();
        match self.mode {
            SortMode::Ascending => fields.sort_by(|a, b| a.id.cmp(&b.id)),
            SortMode::Descending => fields.sort_by(|a, b| b.id.cmp(&a.id)),
            SortMode::Default => {
                let rank: FxHashMap<&str, usize> = self
                    .natural_order
                    .iter()
                    .enumerate()
                    .map(|(i, id)| (id.as_str(), i))
                    .collect();
                // Unknown ids keep their relative order after the known ones.
                let len = rank.len();
                let mut keyed: Vec<(usize, FieldRecord)> = fields
                    .into_iter()
                    .enumerate()
                    .map(|(i, f)| (rank.get(f.id.as_str()).copied().unwrap_or(len + i), f))
                    .collect();
                keyed.sort_by_key(|(key, _)| *key);
                fields = keyed.into_iter().map(|(_, f)| f).collect();
            }
        }
        fields
    }

    /// Ends the controller's life, handing back the natural order it tracked.
    pub fn dispose(self) -> Vec<FieldId> {
        self.natural_order
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Owns at most one controller per zone. Controllers are created lazily the
/// first time a zone needs one.
#[derive(Debug, Clone, Default)]
pub struct ZoneSortRegistry {
    controllers: FxHashMap<Zone, ZoneSortController>,
}

impl ZoneSortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the zone's controller, seeding a new one from `current` if absent.
    pub fn get_or_create(&mut self, zone: Zone, current: &[FieldRecord]) -> &mut ZoneSortController {
        self.controllers
            .entry(zone)
            .or_insert_with(|| ZoneSortController::create(zone, current))
    }

    pub fn get(&self, zone: Zone) -> Option<&ZoneSortController> {
        self.controllers.get(&zone)
    }

    pub fn get_mut(&mut self, zone: Zone) -> Option<&mut ZoneSortController> {
        self.controllers.get_mut(&zone)
    }

    /// Sort mode of the zone; Default when no controller exists yet.
    pub fn mode(&self, zone: Zone) -> SortMode {
        self.controllers
            .get(&zone)
            .map(|c| c.mode())
            .unwrap_or_default()
    }

    /// Removes and disposes the zone's controller.
    pub fn dispose(&mut self, zone: Zone) -> Option<Vec<FieldId>> {
        self.controllers.remove(&zone).map(ZoneSortController::dispose)
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(ids: &[&str]) -> Vec<FieldRecord> {
        ids.iter().map(|id| FieldRecord::new(*id, Zone::Rows)).collect()
    }

    fn ids(fields: &[FieldRecord]) -> Vec<&str> {
        fields.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_mode_cycle_wraps() {
        assert_eq!(SortMode::Default.next(), SortMode::Ascending);
        assert_eq!(SortMode::Ascending.next(), SortMode::Descending);
        assert_eq!(SortMode::Descending.next(), SortMode::Default);
    }

    #[test]
    fn test_toggle_cycle_restores_natural_order() {
        let current = records(&["b", "a", "c"]);
        let mut controller = ZoneSortController::create(Zone::Rows, &current);

        let asc = controller.toggle_sort(&current);
        assert_eq!(ids(&asc), vec!["a", "b", "c"]);
        assert_eq!(controller.mode(), SortMode::Ascending);

        let desc = controller.toggle_sort(&asc);
        assert_eq!(ids(&desc), vec!["c", "b", "a"]);

        let restored = controller.toggle_sort(&desc);
        assert_eq!(ids(&restored), vec!["b", "a", "c"]);
        assert_eq!(controller.mode(), SortMode::Default);
    }

    #[test]
    fn test_reconcile_appends_and_prunes() {
        let mut controller = ZoneSortController::create(Zone::Rows, &records(&["b", "a"]));

        assert!(controller.reconcile(&records(&["a", "b", "z", "m"])));
        assert_eq!(controller.natural_order(), &["b", "a", "z", "m"]);

        assert!(controller.reconcile(&records(&["z", "m", "b"])));
        assert_eq!(controller.natural_order(), &["b", "z", "m"]);

        assert!(!controller.reconcile(&records(&["m", "b", "z"])));
    }

    #[test]
    fn test_field_added_during_sort_joins_natural_order_at_end() {
        let start = records(&["b", "a", "c"]);
        let mut controller = ZoneSortController::create(Zone::Rows, &start);
        let asc = controller.toggle_sort(&start);

        let mut grown = asc.clone();
        grown.push(FieldRecord::new("aa", Zone::Rows));
        controller.reconcile(&grown);
        assert_eq!(ids(&controller.arrange(&grown)), vec!["a", "aa", "b", "c"]);

        let desc = controller.toggle_sort(&grown);
        assert_eq!(ids(&desc), vec!["c", "b", "aa", "a"]);
        let restored = controller.toggle_sort(&desc);
        assert_eq!(ids(&restored), vec!["b", "a", "c", "aa"]);
    }

    #[test]
    fn test_default_arrangement_places_untracked_ids_last() {
        let controller = ZoneSortController::create(Zone::Rows, &records(&["b", "a"]));
        let arranged = controller.arrange(&records(&["x", "a", "y", "b"]));
        assert_eq!(ids(&arranged), vec!["b", "a", "x", "y"]);
    }

    #[test]
    fn test_registry_creates_lazily_and_disposes() {
        let mut registry = ZoneSortRegistry::new();
        assert_eq!(registry.mode(Zone::Columns), SortMode::Default);
        assert!(registry.get(Zone::Columns).is_none());

        let current = records(&["q", "p"]);
        registry.get_or_create(Zone::Columns, &current).toggle_sort(&current);
        assert_eq!(registry.mode(Zone::Columns), SortMode::Ascending);

        // Existing controller is not reseeded.
        registry.get_or_create(Zone::Columns, &records(&["other"]));
        assert_eq!(registry.get(Zone::Columns).unwrap().natural_order(), &["q", "p"]);

        let natural = registry.dispose(Zone::Columns).unwrap();
        assert_eq!(natural, vec!["q".to_string(), "p".to_string()]);
        assert!(registry.is_empty());
    }
}
