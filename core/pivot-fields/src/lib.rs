//! FILENAME: core/pivot-fields/src/lib.rs
//! Pivot field configuration for the Field Manager.
//!
//! This crate is the state machine behind the pivot field panel: which field
//! sits in which zone (available, rows, columns, filters, values), with which
//! settings, in which order. It holds no UI and does no I/O; presentation and
//! drag handling live in the host crate and only call the contract here.
//!
//! Layers:
//! - `definition`: Serializable records (what the configuration IS)
//! - `validate`: Gate for externally supplied initial configurations
//! - `store`: The authoritative state and all mutations
//! - `zone_sort`: Per-zone toggle-sort with remembered natural order
//! - `observer`: Synchronous change notification
//! - `view`: Derived per-zone panels (WHAT we display)
//! - `draft`: New derived fields and expression authoring

pub mod definition;
pub mod draft;
pub mod error;
pub mod observer;
pub mod store;
pub mod validate;
pub mod view;
pub mod zone_sort;

pub use definition::*;
pub use draft::{
    next_draft_name, validate_draft, ExpressionDraft, FieldDraft, MAX_FIELD_NAME_LEN,
    MIN_EXPRESSION_LEN, MIN_FIELD_NAME_LEN,
};
pub use error::{ConfigError, DraftError};
pub use observer::{ChangeEvent, ChangeKind, ObserverRegistry, SubscriptionId};
pub use store::FieldConfigStore;
pub use validate::validate_config;
pub use view::{filter_fields, matches_query, FieldView, ZoneView};
pub use zone_sort::{SortMode, ZoneSortController, ZoneSortRegistry};
