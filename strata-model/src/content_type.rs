//! The content type: the schema a piece of content is created from.
//!
//! A content type owns ordered property groups (which own property types),
//! may be composed with copies of other content types, and lists the
//! templates content of this type may render with.

use crate::config::ModelConfig;
use crate::entity::{EntityBase, EntityField};
use crate::error::{ModelError, ModelResult};
use crate::group::PropertyGroup;
use crate::lifecycle::Lifecycle;
use crate::observer::ChangeObserver;
use crate::property::PropertyType;
use crate::tracking::{TrackedField, TracksChanges};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strata_types::{ChangeScope, EntityKey, NodeId, TemplateId, Timestamp, VersionToken};
use tracing::{debug, warn};

/// Trackable fields of a [`ContentType`], including the base entity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentTypeField {
    Id,
    Key,
    CreateDate,
    UpdateDate,
    Version,
    Alias,
    Name,
    Description,
    Icon,
    Thumbnail,
    SortOrder,
    Level,
    Path,
    AllowedAsRoot,
    IsContainer,
    Trashed,
    CreatorId,
    AllowedContentTypes,
    PropertyGroups,
    PropertyTypes,
    ContentTypeComposition,
    DefaultTemplateId,
    AllowedTemplates,
}

impl From<EntityField> for ContentTypeField {
    fn from(field: EntityField) -> Self {
        match field {
            EntityField::Id => Self::Id,
            EntityField::Key => Self::Key,
            EntityField::CreateDate => Self::CreateDate,
            EntityField::UpdateDate => Self::UpdateDate,
            EntityField::Version => Self::Version,
        }
    }
}

impl TrackedField for ContentTypeField {
    const SCOPE: ChangeScope = ChangeScope::ContentType;

    fn name(&self) -> &'static str {
        match self {
            Self::Id => EntityField::Id.name(),
            Self::Key => EntityField::Key.name(),
            Self::CreateDate => EntityField::CreateDate.name(),
            Self::UpdateDate => EntityField::UpdateDate.name(),
            Self::Version => EntityField::Version.name(),
            Self::Alias => "Alias",
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Icon => "Icon",
            Self::Thumbnail => "Thumbnail",
            Self::SortOrder => "SortOrder",
            Self::Level => "Level",
            Self::Path => "Path",
            Self::AllowedAsRoot => "AllowedAsRoot",
            Self::IsContainer => "IsContainer",
            Self::Trashed => "Trashed",
            Self::CreatorId => "CreatorId",
            Self::AllowedContentTypes => "AllowedContentTypes",
            Self::PropertyGroups => "PropertyGroups",
            Self::PropertyTypes => "PropertyTypes",
            Self::ContentTypeComposition => "ContentTypeComposition",
            Self::DefaultTemplateId => "DefaultTemplateId",
            Self::AllowedTemplates => "AllowedTemplates",
        }
    }
}

/// A reference to a template record. Only the id takes part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub alias: String,
    pub name: String,
}

impl Template {
    #[must_use]
    pub fn new(id: TemplateId, alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentType {
    base: EntityBase<ContentTypeField>,
    parent_id: NodeId,
    alias: String,
    name: String,
    description: Option<String>,
    icon: String,
    thumbnail: String,
    sort_order: i32,
    level: i32,
    path: String,
    allowed_as_root: bool,
    is_container: bool,
    trashed: bool,
    creator_id: NodeId,
    allowed_content_types: Vec<NodeId>,
    property_groups: Vec<PropertyGroup>,
    compositions: Vec<ContentType>,
    default_template_id: Option<TemplateId>,
    allowed_templates: Vec<Template>,
    #[serde(skip)]
    settings: ModelConfig,
}

impl ContentType {
    /// Creates a transient content type under `parent_id` with default settings.
    #[must_use]
    pub fn new(parent_id: NodeId) -> Self {
        Self::with_config(parent_id, &ModelConfig::default())
    }

    /// Creates a transient content type whose hooks use `config`.
    #[must_use]
    pub fn with_config(parent_id: NodeId, config: &ModelConfig) -> Self {
        Self {
            base: EntityBase::new(),
            parent_id,
            alias: String::new(),
            name: String::new(),
            description: None,
            icon: String::new(),
            thumbnail: String::new(),
            sort_order: 0,
            level: 0,
            path: String::new(),
            allowed_as_root: false,
            is_container: false,
            trashed: false,
            creator_id: NodeId::new(0),
            allowed_content_types: Vec::new(),
            property_groups: Vec::new(),
            compositions: Vec::new(),
            default_template_id: None,
            allowed_templates: Vec::new(),
            settings: *config,
        }
    }

    fn mark(&mut self, field: ContentTypeField) {
        self.base.set_dirty(field, &self.alias);
    }

    // ── Identity ────────────────────────────────────────────────

    pub fn id(&self) -> Option<NodeId> {
        self.base.id()
    }

    pub fn key(&self) -> Option<EntityKey> {
        self.base.key()
    }

    pub fn created_at(&self) -> Option<Timestamp> {
        self.base.created_at()
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.base.updated_at()
    }

    pub fn version(&self) -> Option<VersionToken> {
        self.base.version()
    }

    pub fn parent_id(&self) -> NodeId {
        self.parent_id
    }

    pub fn config(&self) -> &ModelConfig {
        &self.settings
    }

    // ── Descriptive fields ──────────────────────────────────────

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = alias.into();
        self.mark(ContentTypeField::Alias);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.mark(ContentTypeField::Name);
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.mark(ContentTypeField::Description);
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.icon = icon.into();
        self.mark(ContentTypeField::Icon);
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn set_thumbnail(&mut self, thumbnail: impl Into<String>) {
        self.thumbnail = thumbnail.into();
        self.mark(ContentTypeField::Thumbnail);
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
        self.mark(ContentTypeField::SortOrder);
    }

    /// Depth in the content type tree.
    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
        self.mark(ContentTypeField::Level);
    }

    /// Comma separated ids from the root, e.g. `"-1,1045,1050"`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.mark(ContentTypeField::Path);
    }

    pub fn allowed_as_root(&self) -> bool {
        self.allowed_as_root
    }

    pub fn set_allowed_as_root(&mut self, allowed: bool) {
        self.allowed_as_root = allowed;
        self.mark(ContentTypeField::AllowedAsRoot);
    }

    pub fn is_container(&self) -> bool {
        self.is_container
    }

    pub fn set_is_container(&mut self, is_container: bool) {
        self.is_container = is_container;
        self.mark(ContentTypeField::IsContainer);
    }

    pub fn trashed(&self) -> bool {
        self.trashed
    }

    pub fn set_trashed(&mut self, trashed: bool) {
        self.trashed = trashed;
        self.mark(ContentTypeField::Trashed);
    }

    pub fn creator_id(&self) -> NodeId {
        self.creator_id
    }

    pub fn set_creator_id(&mut self, creator_id: NodeId) {
        self.creator_id = creator_id;
        self.mark(ContentTypeField::CreatorId);
    }

    /// Content types that may be created beneath content of this type.
    pub fn allowed_content_types(&self) -> &[NodeId] {
        &self.allowed_content_types
    }

    pub fn set_allowed_content_types(&mut self, allowed: Vec<NodeId>) {
        self.allowed_content_types = allowed;
        self.mark(ContentTypeField::AllowedContentTypes);
    }

    // ── Templates ───────────────────────────────────────────────

    /// Id of the default template, if one was chosen.
    pub fn default_template_id(&self) -> Option<TemplateId> {
        self.default_template_id
    }

    /// Raw setter for the default template id; the id is not checked
    /// against the allowed templates.
    pub(crate) fn set_default_template_id(&mut self, id: Option<TemplateId>) {
        self.default_template_id = id;
        self.mark(ContentTypeField::DefaultTemplateId);
    }

    /// The allowed template whose id equals the default template id.
    ///
    /// Recomputed on every call; `None` when no allowed template matches.
    pub fn default_template(&self) -> Option<&Template> {
        let id = self.default_template_id?;
        self.allowed_templates.iter().find(|t| t.id == id)
    }

    pub fn allowed_templates(&self) -> &[Template] {
        &self.allowed_templates
    }

    /// Replaces the allowed templates. Duplicates are not rejected.
    pub fn set_allowed_templates(&mut self, templates: Vec<Template>) {
        self.allowed_templates = templates;
        self.mark(ContentTypeField::AllowedTemplates);
    }

    /// Makes `template` the default, adding it to the allowed templates
    /// when it is not already there.
    pub fn assign_default_template(&mut self, template: Template) {
        let id = template.id;
        if !self.allowed_templates.iter().any(|t| t.id == id) {
            let mut templates = self.allowed_templates.clone();
            templates.push(template);
            self.set_allowed_templates(templates);
        }
        self.set_default_template_id(Some(id));
    }

    pub fn clear_default_template(&mut self) {
        self.set_default_template_id(None);
    }

    // ── Property groups and types ───────────────────────────────

    pub fn property_groups(&self) -> &[PropertyGroup] {
        &self.property_groups
    }

    pub fn property_groups_mut(&mut self) -> &mut [PropertyGroup] {
        &mut self.property_groups
    }

    pub fn property_group(&self, name: &str) -> Option<&PropertyGroup> {
        self.property_groups.iter().find(|g| g.name() == name)
    }

    pub fn property_group_mut(&mut self, name: &str) -> Option<&mut PropertyGroup> {
        self.property_groups.iter_mut().find(|g| g.name() == name)
    }

    /// All property types of this content type, group order then member order.
    pub fn property_types(&self) -> impl Iterator<Item = &PropertyType> + '_ {
        self.property_groups
            .iter()
            .flat_map(|g| g.property_types().iter())
    }

    pub fn property_type_mut(&mut self, alias: &str) -> Option<&mut PropertyType> {
        self.property_groups
            .iter_mut()
            .find_map(|g| g.get_mut(alias))
    }

    /// Adds an empty group. Returns `false` if a group with `name` exists.
    pub fn add_property_group(&mut self, name: &str) -> bool {
        if self.property_group(name).is_some() {
            return false;
        }
        self.attach_group(PropertyGroup::new(name));
        true
    }

    /// Adds a populated group.
    ///
    /// Returns `false` if a group with the same name exists, and an error if
    /// one of its aliases is already used in the composition.
    pub fn insert_property_group(&mut self, group: PropertyGroup) -> ModelResult<bool> {
        if self.property_group(group.name()).is_some() {
            return Ok(false);
        }
        if let Some(clash) = group
            .property_types()
            .iter()
            .find(|pt| self.property_type_exists(pt.alias()))
        {
            return Err(ModelError::DuplicatePropertyAlias(clash.alias().to_string()));
        }
        self.attach_group(group);
        Ok(true)
    }

    fn attach_group(&mut self, mut group: PropertyGroup) {
        for observer in self.base.tracker().observers() {
            group.subscribe(Arc::clone(observer));
        }
        self.property_groups.push(group);
        self.mark(ContentTypeField::PropertyGroups);
    }

    /// Removes and returns the group called `name`. The group and its
    /// members are detached from this content type's observers.
    pub fn remove_property_group(&mut self, name: &str) -> Option<PropertyGroup> {
        let index = self.property_groups.iter().position(|g| g.name() == name)?;
        let mut removed = self.property_groups.remove(index);
        removed.unsubscribe_all();
        self.mark(ContentTypeField::PropertyGroups);
        Some(removed)
    }

    /// Adds `property_type` to the group called `group_name`, creating the
    /// group if needed.
    ///
    /// Returns `false` if the alias already exists anywhere in the
    /// composition.
    pub fn add_property_type(
        &mut self,
        property_type: PropertyType,
        group_name: &str,
    ) -> ModelResult<bool> {
        if self.property_type_exists(property_type.alias()) {
            return Ok(false);
        }
        self.add_property_group(group_name);
        let Some(group) = self.property_group_mut(group_name) else {
            return Ok(false);
        };
        group.add_property_type(property_type)?;
        self.mark(ContentTypeField::PropertyTypes);
        Ok(true)
    }

    /// Changes the alias of the property type called `from`.
    ///
    /// Returns `false` if no local property type has that alias, and an
    /// error if `to` is already used anywhere in the composition.
    pub fn rename_property_type(&mut self, from: &str, to: &str) -> ModelResult<bool> {
        if from != to && self.property_type_exists(to) {
            return Err(ModelError::DuplicatePropertyAlias(to.to_string()));
        }
        for group in &mut self.property_groups {
            if group.contains(from) {
                return group.rename_property_type(from, to);
            }
        }
        Ok(false)
    }

    /// Removes and returns the property type with `alias`. The returned
    /// value is detached from this content type's observers.
    pub fn remove_property_type(&mut self, alias: &str) -> Option<PropertyType> {
        let removed = self
            .property_groups
            .iter_mut()
            .find_map(|g| g.remove_property_type(alias))?;
        self.mark(ContentTypeField::PropertyTypes);
        Some(removed)
    }

    /// True if `alias` is used by this content type or any composition.
    pub fn property_type_exists(&self, alias: &str) -> bool {
        self.composition_property_types()
            .iter()
            .any(|pt| pt.alias() == alias)
    }

    // ── Composition ─────────────────────────────────────────────

    /// Content types composed into this one, in the order they were added.
    pub fn compositions(&self) -> &[ContentType] {
        &self.compositions
    }

    /// Composes a copy of `other` into this content type.
    ///
    /// Returns `false` when a content type with that alias is already part
    /// of the composition. The copy is detached from `other`'s observers.
    pub fn add_content_type(&mut self, other: &ContentType) -> ModelResult<bool> {
        if self.is_same_content_type(other) {
            return Err(ModelError::SelfComposition(other.alias.clone()));
        }
        if self.content_type_composition_exists(&other.alias) {
            return Ok(false);
        }
        if let Some(clash) = other
            .composition_property_types()
            .into_iter()
            .find(|pt| self.property_type_exists(pt.alias()))
        {
            return Err(ModelError::DuplicatePropertyAlias(clash.alias().to_string()));
        }
        let mut copy = other.clone();
        copy.unsubscribe_all();
        self.compositions.push(copy);
        self.mark(ContentTypeField::ContentTypeComposition);
        Ok(true)
    }

    /// Keys decide when both sides have one, then ids. Otherwise two
    /// content types are the same only if they share a non-empty alias.
    fn is_same_content_type(&self, other: &ContentType) -> bool {
        if let (Some(a), Some(b)) = (self.key(), other.key()) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (self.id(), other.id()) {
            return a == b;
        }
        !self.alias.is_empty() && self.alias == other.alias
    }

    /// Removes the directly composed content type with `alias`.
    pub fn remove_content_type(&mut self, alias: &str) -> bool {
        let Some(index) = self.compositions.iter().position(|c| c.alias == alias) else {
            return false;
        };
        self.compositions.remove(index);
        self.mark(ContentTypeField::ContentTypeComposition);
        true
    }

    /// True if `alias` is composed in, directly or through another composition.
    pub fn content_type_composition_exists(&self, alias: &str) -> bool {
        self.compositions
            .iter()
            .any(|c| c.alias == alias || c.content_type_composition_exists(alias))
    }

    /// This content type's alias followed by every composed alias, depth first.
    pub fn composition_aliases(&self) -> Vec<&str> {
        let mut aliases = vec![self.alias.as_str()];
        for composition in &self.compositions {
            aliases.extend(composition.composition_aliases());
        }
        aliases
    }

    /// Own groups followed by the groups of every composition.
    pub fn composition_property_groups(&self) -> Vec<&PropertyGroup> {
        let mut groups: Vec<&PropertyGroup> = self.property_groups.iter().collect();
        for composition in &self.compositions {
            groups.extend(composition.composition_property_groups());
        }
        groups
    }

    /// Own property types followed by those of every composition.
    pub fn composition_property_types(&self) -> Vec<&PropertyType> {
        self.composition_property_groups()
            .into_iter()
            .flat_map(|g| g.property_types().iter())
            .collect()
    }

    // ── Change tracking ─────────────────────────────────────────

    /// Dirty fields on the content type itself.
    pub fn dirty_fields(&self) -> impl Iterator<Item = ContentTypeField> + '_ {
        self.base.tracker().dirty_fields()
    }

    /// Attaches `observer` to this content type, all of its groups and
    /// property types, and any group or type added later.
    pub fn subscribe(&mut self, observer: Arc<dyn ChangeObserver>) {
        for group in &mut self.property_groups {
            group.subscribe(Arc::clone(&observer));
        }
        self.base.tracker_mut().subscribe(observer);
    }

    pub fn unsubscribe_all(&mut self) {
        for group in &mut self.property_groups {
            group.unsubscribe_all();
        }
        self.base.tracker_mut().unsubscribe_all();
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Insert hook: base insert behavior, then a fresh unique key.
    ///
    /// A second call does not touch the key; it runs the update hook.
    pub fn adding_entity(&mut self) -> ModelResult<()> {
        if self.base.has_identity() {
            warn!(alias = %self.alias, "Content type already inserted, treating as update");
            return self.updating_entity();
        }
        self.base
            .adding_entity(&self.alias, self.settings.version_format)?;
        let key = EntityKey::generate(self.settings.key_format);
        self.base.assign_key(key, &self.alias)?;
        debug!(alias = %self.alias, %key, "Content type key assigned");
        Ok(())
    }

    /// Update hook: base update behavior only.
    pub fn updating_entity(&mut self) -> ModelResult<()> {
        self.base
            .updating_entity(&self.alias, self.settings.version_format)
    }

    /// Stores the id handed out by the persistence layer.
    pub fn assign_identity(&mut self, id: NodeId) -> ModelResult<()> {
        self.base.assign_identity(id, &self.alias)
    }
}

impl TracksChanges for ContentType {
    /// Local flags, any group, or any property type. Groups and types are
    /// both consulted even though a dirty type already makes its group dirty.
    fn is_property_dirty(&self, name: &str) -> bool {
        let in_entity = self.base.is_property_dirty(name);
        let in_groups = self
            .property_groups
            .iter()
            .any(|g| g.is_property_dirty(name));
        let in_types = self.property_types().any(|pt| pt.is_property_dirty(name));
        in_entity || in_groups || in_types
    }

    fn is_dirty(&self) -> bool {
        let dirty_entity = self.base.is_dirty();
        let dirty_groups = self.property_groups.iter().any(|g| g.is_dirty());
        let dirty_types = self.property_types().any(|pt| pt.is_dirty());
        dirty_entity || dirty_groups || dirty_types
    }

    /// Clears the entity, then each group, then each group's property types.
    fn reset_dirty_properties(&mut self) {
        self.base.reset_dirty_properties();
        for group in &mut self.property_groups {
            group.reset_dirty_properties();
            for property_type in group.property_types_mut() {
                property_type.reset_dirty_properties();
            }
        }
        debug!(alias = %self.alias, "Dirty properties reset");
    }
}

impl Lifecycle for ContentType {
    fn has_identity(&self) -> bool {
        self.base.has_identity()
    }

    fn adding_entity(&mut self) -> ModelResult<()> {
        ContentType::adding_entity(self)
    }

    fn updating_entity(&mut self) -> ModelResult<()> {
        ContentType::updating_entity(self)
    }

    fn assign_identity(&mut self, id: NodeId) -> ModelResult<()> {
        ContentType::assign_identity(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> Vec<Template> {
        vec![
            Template::new(TemplateId::new(5), "home", "Home"),
            Template::new(TemplateId::new(7), "article", "Article"),
        ]
    }

    #[test]
    fn default_template_follows_the_raw_id() {
        let mut ct = ContentType::new(NodeId::ROOT);
        ct.set_allowed_templates(templates());

        ct.set_default_template_id(Some(TemplateId::new(7)));
        assert_eq!(ct.default_template().map(|t| t.alias.as_str()), Some("article"));

        ct.set_default_template_id(Some(TemplateId::new(9)));
        assert!(ct.default_template().is_none());
    }

    #[test]
    fn raw_default_template_id_setter_marks_dirty() {
        let mut ct = ContentType::new(NodeId::ROOT);
        ct.set_default_template_id(Some(TemplateId::new(5)));
        assert!(ct.is_property_dirty("DefaultTemplateId"));
        assert!(!ct.is_property_dirty("AllowedTemplates"));
    }

    #[test]
    fn default_template_first_match_wins_on_duplicate_ids() {
        let mut ct = ContentType::new(NodeId::ROOT);
        ct.set_allowed_templates(vec![
            Template::new(TemplateId::new(3), "first", "First"),
            Template::new(TemplateId::new(3), "second", "Second"),
        ]);
        ct.set_default_template_id(Some(TemplateId::new(3)));
        assert_eq!(ct.default_template().map(|t| t.alias.as_str()), Some("first"));
    }
}
