//! FILENAME: core/pivot-fields/src/observer.rs
//! Change notification for the field configuration store.
//!
//! Observers are plain closures registered with `subscribe`. They run
//! synchronously after a mutation has completed, once per mutation, and
//! receive the full configuration plus the single changed record when the
//! mutation concerned one field.

use crate::definition::FieldRecord;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Which store operation produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Moved,
    SettingsUpdated,
    ZoneReordered,
    FieldAdded,
}

/// Payload delivered to observers.
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    pub kind: ChangeKind,
    /// The complete configuration after the mutation.
    pub configuration: &'a [FieldRecord],
    /// The affected record for single-field mutations.
    pub changed: Option<&'a FieldRecord>,
}

type Callback = Box<dyn FnMut(&ChangeEvent<'_>)>;

/// Registered observers, invoked in subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(SubscriptionId, Callback)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent<'_>) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        before != self.observers.len()
    }

    pub fn notify(&mut self, event: &ChangeEvent<'_>) {
        for (_, callback) in self.observers.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Zone;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_reaches_subscribers_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        let first = Rc::clone(&calls);
        registry.subscribe(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&calls);
        registry.subscribe(move |_| second.borrow_mut().push("second"));

        let config = vec![FieldRecord::new("city", Zone::Rows)];
        registry.notify(&ChangeEvent {
            kind: ChangeKind::Moved,
            configuration: &config,
            changed: config.first(),
        });

        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut registry = ObserverRegistry::new();
        let counter = Rc::clone(&count);
        let id = registry.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.notify(&ChangeEvent {
            kind: ChangeKind::ZoneReordered,
            configuration: &[],
            changed: None,
        });

        assert_eq!(*count.borrow(), 0);
        assert!(registry.is_empty());
    }
}
