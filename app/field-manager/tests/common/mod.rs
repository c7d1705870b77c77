//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for field manager integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use field_manager::commands;
use field_manager::{FieldManagerHost, ManagerProps, MoveFieldRequest, DEFAULT_AGGREGATIONS};
use pivot_fields::{ChangeKind, FieldConfigInput, FieldRecord, Zone};

/// One observed change, reduced to plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedChange {
    pub kind: ChangeKind,
    /// Field ids of the full configuration, in order.
    pub ids: Vec<String>,
    pub changed: Option<FieldRecord>,
}

/// Observer that keeps every change event it receives.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    changes: Rc<RefCell<Vec<RecordedChange>>>,
}

impl RecordingObserver {
    pub fn attach(host: &mut FieldManagerHost) -> Self {
        let recorder = RecordingObserver::default();
        let sink = Rc::clone(&recorder.changes);
        host.subscribe(move |event| {
            sink.borrow_mut().push(RecordedChange {
                kind: event.kind,
                ids: event.configuration.iter().map(|f| f.id.clone()).collect(),
                changed: event.changed.cloned(),
            });
        });
        recorder
    }

    pub fn changes(&self) -> Vec<RecordedChange> {
        self.changes.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn last(&self) -> Option<RecordedChange> {
        self.changes.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.changes.borrow_mut().clear();
    }
}

/// Test harness: a mounted host plus a recording observer.
pub struct TestHarness {
    pub host: FieldManagerHost,
    pub recorder: RecordingObserver,
}

impl TestHarness {
    /// Sales fields with country in rows and sales summed in values.
    pub fn new() -> Self {
        Self::with_props(SalesFixture::props())
    }

    /// Sales fields, all of them available.
    pub fn all_available() -> Self {
        Self::with_props(
            ManagerProps::new(SalesFixture::fields()).with_aggregations(DEFAULT_AGGREGATIONS),
        )
    }

    pub fn with_props(props: ManagerProps) -> Self {
        let mut host = FieldManagerHost::mount(props);
        let recorder = RecordingObserver::attach(&mut host);
        TestHarness { host, recorder }
    }

    /// Field ids of the whole configuration, in order.
    pub fn config_ids(&self) -> Vec<String> {
        self.records().iter().map(|f| f.id.clone()).collect()
    }

    pub fn records(&self) -> Vec<FieldRecord> {
        commands::get_configuration(&self.host).unwrap()
    }

    /// Field ids of one zone, in order.
    pub fn zone_ids(&self, zone: Zone) -> Vec<String> {
        self.host
            .store()
            .unwrap()
            .get_fields_for_zone(zone)
            .into_iter()
            .map(|f| f.id)
            .collect()
    }

    pub fn record(&self, id: &str) -> Option<FieldRecord> {
        self.host.store().unwrap().field(id).cloned()
    }

    pub fn move_to(&mut self, id: &str, zone: &str) -> Result<FieldRecord, String> {
        commands::move_field(
            &mut self.host,
            MoveFieldRequest {
                field_id: id.to_string(),
                zone: zone.to_string(),
            },
        )
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub struct SalesFixture;

impl SalesFixture {
    pub fn fields() -> Vec<&'static str> {
        vec!["country", "city", "sales", "date", "category"]
    }

    pub fn initial_config() -> Vec<FieldConfigInput> {
        vec![
            FieldConfigInput::new("country", "rows"),
            FieldConfigInput::new("sales", "values").with_aggregation("sum"),
        ]
    }

    pub fn props() -> ManagerProps {
        ManagerProps::new(Self::fields())
            .with_initial_config(Self::initial_config())
            .with_aggregations(DEFAULT_AGGREGATIONS)
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Assert that `zone` holds exactly `expected`, in order.
pub fn assert_zone(harness: &TestHarness, zone: Zone, expected: &[&str]) {
    let actual = harness.zone_ids(zone);
    assert_eq!(actual, expected, "fields of zone {}", zone);
}

/// Assert every field appears exactly once across the configuration.
pub fn assert_each_field_once(harness: &TestHarness, fields: &[&str]) {
    let ids = harness.config_ids();
    assert_eq!(ids.len(), fields.len(), "configuration size");
    for field in fields {
        let hits = ids.iter().filter(|id| id == field).count();
        assert_eq!(hits, 1, "occurrences of {}", field);
    }
}
