use crate::observer::ChangeObserver;
use crate::tracking::{ChangeTracker, TrackedField, TracksChanges};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strata_types::{ChangeScope, DataTypeId};

/// Trackable fields of a [`PropertyType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyTypeField {
    Alias,
    Name,
    Description,
    DataTypeId,
    Mandatory,
    HelpText,
    SortOrder,
    ValidationRegExp,
}

impl TrackedField for PropertyTypeField {
    const SCOPE: ChangeScope = ChangeScope::PropertyType;

    fn name(&self) -> &'static str {
        match self {
            Self::Alias => "Alias",
            Self::Name => "Name",
            Self::Description => "Description",
            Self::DataTypeId => "DataTypeId",
            Self::Mandatory => "Mandatory",
            Self::HelpText => "HelpText",
            Self::SortOrder => "SortOrder",
            Self::ValidationRegExp => "ValidationRegExp",
        }
    }
}

/// A single property definition on a content type, e.g. "bodyText backed by
/// the rich text editor".
///
/// The leaf of the tracking graph: its dirtiness is purely local.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyType {
    alias: String,
    name: String,
    description: Option<String>,
    data_type_id: DataTypeId,
    mandatory: bool,
    help_text: Option<String>,
    sort_order: i32,
    validation_regex: Option<String>,
    #[serde(skip)]
    tracker: ChangeTracker<PropertyTypeField>,
}

impl PropertyType {
    /// Creates a clean property type. Construction does not mark anything dirty.
    #[must_use]
    pub fn new(alias: impl Into<String>, name: impl Into<String>, data_type_id: DataTypeId) -> Self {
        Self {
            alias: alias.into(),
            name: name.into(),
            description: None,
            data_type_id,
            mandatory: false,
            help_text: None,
            sort_order: 0,
            validation_regex: None,
            tracker: ChangeTracker::new(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Renames are routed through the owning group so aliases stay unique.
    pub(crate) fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = alias.into();
        self.tracker.set_dirty(PropertyTypeField::Alias, &self.alias);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.tracker.set_dirty(PropertyTypeField::Name, &self.alias);
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.tracker.set_dirty(PropertyTypeField::Description, &self.alias);
    }

    pub fn data_type_id(&self) -> DataTypeId {
        self.data_type_id
    }

    pub fn set_data_type_id(&mut self, data_type_id: DataTypeId) {
        self.data_type_id = data_type_id;
        self.tracker.set_dirty(PropertyTypeField::DataTypeId, &self.alias);
    }

    pub fn mandatory(&self) -> bool {
        self.mandatory
    }

    pub fn set_mandatory(&mut self, mandatory: bool) {
        self.mandatory = mandatory;
        self.tracker.set_dirty(PropertyTypeField::Mandatory, &self.alias);
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    pub fn set_help_text(&mut self, help_text: Option<String>) {
        self.help_text = help_text;
        self.tracker.set_dirty(PropertyTypeField::HelpText, &self.alias);
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
        self.tracker.set_dirty(PropertyTypeField::SortOrder, &self.alias);
    }

    /// Regular expression values must match, if any.
    pub fn validation_regex(&self) -> Option<&str> {
        self.validation_regex.as_deref()
    }

    pub fn set_validation_regex(&mut self, pattern: Option<String>) {
        self.validation_regex = pattern;
        self.tracker
            .set_dirty(PropertyTypeField::ValidationRegExp, &self.alias);
    }

    /// Dirty fields in declaration order.
    pub fn dirty_fields(&self) -> impl Iterator<Item = PropertyTypeField> + '_ {
        self.tracker.dirty_fields()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ChangeObserver>) {
        self.tracker.subscribe(observer);
    }

    pub fn unsubscribe_all(&mut self) {
        self.tracker.unsubscribe_all();
    }
}

impl TracksChanges for PropertyType {
    fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    fn is_property_dirty(&self, name: &str) -> bool {
        self.tracker.is_property_dirty(name)
    }

    fn reset_dirty_properties(&mut self) {
        self.tracker.reset_dirty_properties();
    }
}
