//! FILENAME: app/field-manager/src/lib.rs
//! Field Manager host.
//!
//! Embeds the pivot field configuration behind a mount/validate lifecycle:
//! props are validated first and the manager only becomes usable when the
//! initial configuration is sound. Commands in `commands` are the surface an
//! application calls; drag gestures go through `drag::DragTracker`.

pub mod commands;
pub mod config;
pub mod drag;
pub mod error;
pub mod logging;
pub mod types;

use pivot_fields::{
    ChangeEvent, ConfigError, FieldConfigStore, FieldRecord, ObserverRegistry,
    SubscriptionId,
};

pub use config::{HostConfig, ManagerProps, DEFAULT_AGGREGATIONS};
pub use drag::{DragTracker, DropOutcome};
pub use error::HostError;
pub use types::*;

// ============================================================================
// HOST STATE
// ============================================================================

/// What the manager currently renders: the field panel, or the list of
/// configuration errors that kept it from mounting.
#[derive(Debug)]
pub enum HostState {
    Ready(FieldConfigStore),
    Invalid(Vec<ConfigError>),
}

pub struct FieldManagerHost {
    props: ManagerProps,
    state: HostState,
    drag: DragTracker,
    /// Observers kept while the props are invalid, reattached on recovery.
    parked: ObserverRegistry,
}

impl FieldManagerHost {
    /// Validates `props` and builds the store when they pass. Invalid props
    /// still produce a host, in the `Invalid` state.
    pub fn mount(props: ManagerProps) -> Self {
        crate::log_enter!(
            "HOST",
            "mount",
            "fields={} initial={} aggregations={}",
            props.fields.len(),
            props.initial_config.len(),
            props.aggregations.len()
        );

        let (state, parked) = build_state(&props, ObserverRegistry::new());
        let host = FieldManagerHost {
            props,
            state,
            drag: DragTracker::new(),
            parked,
        };

        crate::log_exit!("HOST", "mount", "ready={}", host.is_ready());
        host
    }

    /// Like `mount`, but invalid props are an error.
    pub fn try_mount(props: ManagerProps) -> Result<Self, HostError> {
        let host = Self::mount(props);
        if let HostState::Invalid(errors) = &host.state {
            return Err(HostError::InvalidConfiguration(errors.clone()));
        }
        Ok(host)
    }

    /// Replaces the props. Unchanged props are ignored; otherwise the props
    /// are validated again and the store rebuilt from them. Observers carry
    /// over, an active drag is dropped. Returns true if a rebuild happened.
    pub fn set_props(&mut self, props: ManagerProps) -> bool {
        if props == self.props {
            return false;
        }

        crate::log_info!(
            "HOST",
            "set_props fields={} initial={}",
            props.fields.len(),
            props.initial_config.len()
        );

        let observers = match &mut self.state {
            HostState::Ready(store) => store.take_observers(),
            HostState::Invalid(_) => std::mem::take(&mut self.parked),
        };
        self.drag.drag_cancel();

        let (state, parked) = build_state(&props, observers);
        self.state = state;
        self.parked = parked;
        self.props = props;
        true
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn props(&self) -> &ManagerProps {
        &self.props
    }

    pub fn state(&self) -> &HostState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, HostState::Ready(_))
    }

    /// Errors that kept the manager from mounting; empty when ready.
    pub fn errors(&self) -> &[ConfigError] {
        match &self.state {
            HostState::Invalid(errors) => errors,
            HostState::Ready(_) => &[],
        }
    }

    /// The messages shown in place of the panel when mounting failed.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }

    pub fn store(&self) -> Result<&FieldConfigStore, HostError> {
        match &self.state {
            HostState::Ready(store) => Ok(store),
            HostState::Invalid(_) => Err(HostError::NotMounted),
        }
    }

    pub fn store_mut(&mut self) -> Result<&mut FieldConfigStore, HostError> {
        match &mut self.state {
            HostState::Ready(store) => Ok(store),
            HostState::Invalid(_) => Err(HostError::NotMounted),
        }
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragTracker {
        &mut self.drag
    }

    /// The store together with the drag tracker, for operations needing both.
    pub fn parts_mut(&mut self) -> Result<(&mut FieldConfigStore, &mut DragTracker), HostError> {
        match &mut self.state {
            HostState::Ready(store) => Ok((store, &mut self.drag)),
            HostState::Invalid(_) => Err(HostError::NotMounted),
        }
    }

    // ========================================================================
    // OBSERVERS
    // ========================================================================

    /// Registers an observer of every store change. Registration works in
    /// either state; observers survive `set_props`.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<'_>) + 'static,
    {
        match &mut self.state {
            HostState::Ready(store) => store.subscribe(callback),
            HostState::Invalid(_) => self.parked.subscribe(callback),
        }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match &mut self.state {
            HostState::Ready(store) => store.unsubscribe(id),
            HostState::Invalid(_) => self.parked.unsubscribe(id),
        }
    }

    /// Called with the full configuration after every change.
    pub fn on_change<F>(&mut self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(&[FieldRecord]) + 'static,
    {
        self.subscribe(move |event| callback(event.configuration))
    }

    /// Called with the affected record after every single-field mutation:
    /// moves, settings updates and added fields. Zone reorders carry no
    /// single record and are not reported here.
    pub fn on_field_update<F>(&mut self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(&FieldRecord) + 'static,
    {
        self.subscribe(move |event| {
            if let Some(record) = event.changed {
                callback(record);
            }
        })
    }
}

impl std::fmt::Debug for FieldManagerHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldManagerHost")
            .field("props", &self.props)
            .field("state", &self.state)
            .field("drag", &self.drag)
            .finish()
    }
}

fn build_state(props: &ManagerProps, observers: ObserverRegistry) -> (HostState, ObserverRegistry) {
    let errors = props.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        crate::log_error!("HOST", "Invalid Pivot Config: {}", messages.join(" | "));
        return (HostState::Invalid(errors), observers);
    }

    let store = FieldConfigStore::new(&props.fields, props.initial_records(), &props.aggregations)
        .with_observers(observers);
    crate::log_info!("HOST", "configuration ready fields={}", store.len());
    (HostState::Ready(store), ObserverRegistry::new())
}
