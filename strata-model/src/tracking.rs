//! Dirty-field bookkeeping shared by every tracked object.
//!
//! Each object kind declares a closed enum of its trackable fields
//! ([`TrackedField`]) and embeds a [`ChangeTracker`] over that enum. Setters
//! store the new value first and then call [`ChangeTracker::set_dirty`].
//! Aggregates answer [`TracksChanges`] by consulting their own tracker and then
//! delegating explicitly to the objects they own.

use crate::observer::ChangeObserver;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use strata_types::{ChangeEvent, ChangeScope};
use tracing::trace;

/// A field identity that can be marked dirty.
pub trait TrackedField: Copy + Ord + fmt::Debug + 'static {
    /// Level of the object graph this field belongs to.
    const SCOPE: ChangeScope;

    /// Stable external name of the field, e.g. `"AllowedTemplates"`.
    fn name(&self) -> &'static str;
}

/// Change-tracking capability implemented by every level of the graph.
pub trait TracksChanges {
    /// True if anything on this object, or owned by it, changed since
    /// construction or the last reset.
    fn is_dirty(&self) -> bool;

    /// True if the field called `name` changed on this object or on an
    /// object it owns.
    fn is_property_dirty(&self, name: &str) -> bool;

    /// Forgets recorded changes.
    fn reset_dirty_properties(&mut self);
}

/// The set of dirty fields of one object plus the observers notified on
/// every mark.
///
/// Cloning copies the dirty set and shares the observer handles.
pub struct ChangeTracker<F> {
    dirty: BTreeSet<F>,
    observers: Vec<Arc<dyn ChangeObserver>>,
}

impl<F: TrackedField> ChangeTracker<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: BTreeSet::new(),
            observers: Vec::new(),
        }
    }

    /// Records that `field` changed on the object labelled `owner`.
    ///
    /// Marking an already dirty field leaves the set unchanged but still
    /// notifies observers.
    pub fn set_dirty(&mut self, field: F, owner: &str) {
        let newly_dirty = self.dirty.insert(field);
        let scope = F::SCOPE;
        trace!(
            scope = %scope,
            owner,
            field = field.name(),
            newly_dirty,
            "Field marked dirty"
        );
        if self.observers.is_empty() {
            return;
        }
        let event = ChangeEvent::new(scope, owner, field.name());
        for observer in &self.observers {
            observer.property_changed(&event);
        }
    }

    /// True if a dirty field is named `name`.
    #[must_use]
    pub fn is_property_dirty(&self, name: &str) -> bool {
        self.dirty.iter().any(|f| f.name() == name)
    }

    /// True if `field` is dirty.
    #[must_use]
    pub fn is_field_dirty(&self, field: F) -> bool {
        self.dirty.contains(&field)
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn reset_dirty_properties(&mut self) {
        self.dirty.clear();
    }

    /// Dirty fields in declaration order.
    pub fn dirty_fields(&self) -> impl Iterator<Item = F> + '_ {
        self.dirty.iter().copied()
    }

    /// Adds an observer. Subscribing the same handle twice is a no-op.
    pub fn subscribe(&mut self, observer: Arc<dyn ChangeObserver>) {
        if self.observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            return;
        }
        self.observers.push(observer);
    }

    /// Drops every observer.
    pub fn unsubscribe_all(&mut self) {
        self.observers.clear();
    }

    /// Observers currently attached.
    pub fn observers(&self) -> &[Arc<dyn ChangeObserver>] {
        &self.observers
    }
}

impl<F: TrackedField> TracksChanges for ChangeTracker<F> {
    fn is_dirty(&self) -> bool {
        ChangeTracker::is_dirty(self)
    }

    fn is_property_dirty(&self, name: &str) -> bool {
        ChangeTracker::is_property_dirty(self, name)
    }

    fn reset_dirty_properties(&mut self) {
        ChangeTracker::reset_dirty_properties(self);
    }
}

impl<F: TrackedField> Default for ChangeTracker<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Clone> Clone for ChangeTracker<F> {
    fn clone(&self) -> Self {
        Self {
            dirty: self.dirty.clone(),
            observers: self.observers.clone(),
        }
    }
}

impl<F: fmt::Debug> fmt::Debug for ChangeTracker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeTracker")
            .field("dirty", &self.dirty)
            .field("observers", &self.observers.len())
            .finish()
    }
}
