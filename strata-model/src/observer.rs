use std::sync::{Mutex, PoisonError};
use strata_types::ChangeEvent;

/// Receives a notification every time a tracked field is marked dirty.
///
/// Implement this for audit trails, undo stacks or UI refresh hooks. The
/// callback runs synchronously inside the setter that triggered it, so it
/// should be cheap and must not call back into the object being mutated.
pub trait ChangeObserver: Send + Sync {
    fn property_changed(&self, event: &ChangeEvent);
}

/// An observer that records every event it sees, in order.
#[derive(Debug, Default)]
pub struct ChangeLog {
    events: Mutex<Vec<ChangeEvent>>,
}

impl ChangeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of the recorded events.
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the recorded events.
    pub fn drain(&self) -> Vec<ChangeEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field names of the recorded events, in order.
    pub fn fields(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.field.clone())
            .collect()
    }
}

impl ChangeObserver for ChangeLog {
    fn property_changed(&self, event: &ChangeEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
