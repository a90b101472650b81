use crate::error::{ModelError, ModelResult};
use crate::observer::ChangeObserver;
use crate::property::PropertyType;
use crate::tracking::{ChangeTracker, TrackedField, TracksChanges};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strata_types::ChangeScope;

/// Trackable fields of a [`PropertyGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyGroupField {
    Name,
    SortOrder,
    /// The member collection itself (add/remove), not the members' fields.
    PropertyTypes,
}

impl TrackedField for PropertyGroupField {
    const SCOPE: ChangeScope = ChangeScope::PropertyGroup;

    fn name(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::SortOrder => "SortOrder",
            Self::PropertyTypes => "PropertyTypes",
        }
    }
}

/// A named tab of property types, e.g. "Content" or "SEO".
///
/// Owns its property types; aliases are unique within the group. Dirtiness
/// aggregates over the members, but resetting the group only clears the
/// group's own flags. The owning content type resets members explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyGroup {
    name: String,
    sort_order: i32,
    property_types: Vec<PropertyType>,
    #[serde(skip)]
    tracker: ChangeTracker<PropertyGroupField>,
}

impl PropertyGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort_order: 0,
            property_types: Vec::new(),
            tracker: ChangeTracker::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.tracker.set_dirty(PropertyGroupField::Name, &self.name);
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
        self.tracker
            .set_dirty(PropertyGroupField::SortOrder, &self.name);
    }

    /// Members in insertion order.
    pub fn property_types(&self) -> &[PropertyType] {
        &self.property_types
    }

    pub fn property_types_mut(&mut self) -> &mut [PropertyType] {
        &mut self.property_types
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.property_types.iter().any(|pt| pt.alias() == alias)
    }

    pub fn get(&self, alias: &str) -> Option<&PropertyType> {
        self.property_types.iter().find(|pt| pt.alias() == alias)
    }

    pub fn get_mut(&mut self, alias: &str) -> Option<&mut PropertyType> {
        self.property_types.iter_mut().find(|pt| pt.alias() == alias)
    }

    /// Appends a property type. The group's observers are attached to it.
    pub fn add_property_type(&mut self, mut property_type: PropertyType) -> ModelResult<()> {
        if self.contains(property_type.alias()) {
            return Err(ModelError::DuplicatePropertyAlias(
                property_type.alias().to_string(),
            ));
        }
        for observer in self.tracker.observers() {
            property_type.subscribe(Arc::clone(observer));
        }
        self.property_types.push(property_type);
        self.tracker
            .set_dirty(PropertyGroupField::PropertyTypes, &self.name);
        Ok(())
    }

    /// Changes the alias of the member called `from`.
    ///
    /// Returns `false` if no member has that alias, and an error if `to` is
    /// already taken by another member.
    pub fn rename_property_type(&mut self, from: &str, to: &str) -> ModelResult<bool> {
        if from != to && self.contains(to) {
            return Err(ModelError::DuplicatePropertyAlias(to.to_string()));
        }
        let Some(property_type) = self.get_mut(from) else {
            return Ok(false);
        };
        property_type.set_alias(to);
        Ok(true)
    }

    /// Removes and returns the property type with `alias`, if present.
    ///
    /// The returned value no longer reports to this group's observers.
    pub fn remove_property_type(&mut self, alias: &str) -> Option<PropertyType> {
        let index = self.property_types.iter().position(|pt| pt.alias() == alias)?;
        let mut removed = self.property_types.remove(index);
        removed.unsubscribe_all();
        self.tracker
            .set_dirty(PropertyGroupField::PropertyTypes, &self.name);
        Some(removed)
    }

    /// Dirty fields of the group itself.
    pub fn dirty_fields(&self) -> impl Iterator<Item = PropertyGroupField> + '_ {
        self.tracker.dirty_fields()
    }

    /// Attaches `observer` to the group and every member.
    pub fn subscribe(&mut self, observer: Arc<dyn ChangeObserver>) {
        for property_type in &mut self.property_types {
            property_type.subscribe(Arc::clone(&observer));
        }
        self.tracker.subscribe(observer);
    }

    pub fn unsubscribe_all(&mut self) {
        for property_type in &mut self.property_types {
            property_type.unsubscribe_all();
        }
        self.tracker.unsubscribe_all();
    }
}

impl TracksChanges for PropertyGroup {
    fn is_dirty(&self) -> bool {
        self.tracker.is_dirty() || self.property_types.iter().any(|pt| pt.is_dirty())
    }

    fn is_property_dirty(&self, name: &str) -> bool {
        self.tracker.is_property_dirty(name)
            || self
                .property_types
                .iter()
                .any(|pt| pt.is_property_dirty(name))
    }

    /// Group flags only; members are reset by the owner.
    fn reset_dirty_properties(&mut self) {
        self.tracker.reset_dirty_properties();
    }
}
