use crate::error::{ModelError, ModelResult};
use crate::tracking::{ChangeTracker, TrackedField};
use serde::{Deserialize, Serialize};
use strata_types::{EntityKey, NodeId, Timestamp, UuidFormat, VersionToken};
use tracing::{debug, warn};

/// Identity and audit fields every persisted entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityField {
    Id,
    Key,
    CreateDate,
    UpdateDate,
    Version,
}

impl EntityField {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Key => "Key",
            Self::CreateDate => "CreateDate",
            Self::UpdateDate => "UpdateDate",
            Self::Version => "Version",
        }
    }
}

/// Identity, timestamps and the local dirty set of a tracked entity.
///
/// Embedded by value in concrete entities. `F` is the entity's own field
/// enum; it must be able to represent the base [`EntityField`]s so that one
/// dirty set covers both.
///
/// An entity starts transient: no id, no key, no dates. The insert hook
/// ([`EntityBase::adding_entity`]) runs once and makes it persisted; every
/// later save goes through [`EntityBase::updating_entity`]. Id and key can be
/// assigned at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EntityBase<F: TrackedField> {
    id: Option<NodeId>,
    key: Option<EntityKey>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
    version: Option<VersionToken>,
    persisted: bool,
    #[serde(skip)]
    tracker: ChangeTracker<F>,
}

impl<F: TrackedField> Default for EntityBase<F> {
    fn default() -> Self {
        Self {
            id: None,
            key: None,
            created_at: None,
            updated_at: None,
            version: None,
            persisted: false,
            tracker: ChangeTracker::new(),
        }
    }
}

impl<F: TrackedField + From<EntityField>> EntityBase<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    pub fn key(&self) -> Option<EntityKey> {
        self.key
    }

    pub fn created_at(&self) -> Option<Timestamp> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    pub fn version(&self) -> Option<VersionToken> {
        self.version
    }

    /// True once the insert hook has run.
    pub fn has_identity(&self) -> bool {
        self.persisted
    }

    /// Stores the id handed out by the persistence layer.
    ///
    /// Only valid after the insert hook. Re-assigning the same id is
    /// accepted; a different id is refused.
    pub fn assign_identity(&mut self, id: NodeId, owner: &str) -> ModelResult<()> {
        if !self.persisted {
            return Err(ModelError::Transient);
        }
        match self.id {
            Some(existing) if existing == id => Ok(()),
            Some(existing) => Err(ModelError::IdentityAlreadyAssigned {
                existing,
                attempted: id,
            }),
            None => {
                self.id = Some(id);
                self.tracker.set_dirty(EntityField::Id.into(), owner);
                Ok(())
            }
        }
    }

    /// Stores the entity's unique key. Refused once a key is present.
    pub fn assign_key(&mut self, key: EntityKey, owner: &str) -> ModelResult<()> {
        if let Some(existing) = self.key {
            return Err(ModelError::KeyAlreadyAssigned(existing));
        }
        self.key = Some(key);
        self.tracker.set_dirty(EntityField::Key.into(), owner);
        Ok(())
    }

    /// Insert hook: stamps create/update dates and a first version.
    ///
    /// On an entity that is already persisted this performs the update hook
    /// instead and leaves identity untouched.
    pub fn adding_entity(&mut self, owner: &str, versions: UuidFormat) -> ModelResult<()> {
        if self.persisted {
            warn!(owner, "Insert hook called on a persisted entity, treating as update");
            return self.updating_entity(owner, versions);
        }
        let now = Timestamp::now();
        self.persisted = true;
        self.created_at = Some(now);
        self.updated_at = Some(now);
        self.version = Some(VersionToken::generate(versions));
        self.tracker.set_dirty(EntityField::CreateDate.into(), owner);
        self.tracker.set_dirty(EntityField::UpdateDate.into(), owner);
        self.tracker.set_dirty(EntityField::Version.into(), owner);
        debug!(owner, "Entity inserted");
        Ok(())
    }

    /// Update hook: moves the update date forward and mints a new version.
    pub fn updating_entity(&mut self, owner: &str, versions: UuidFormat) -> ModelResult<()> {
        if !self.persisted {
            return Err(ModelError::Transient);
        }
        let next = match self.updated_at {
            Some(previous) => previous.advance(),
            None => Timestamp::now(),
        };
        self.updated_at = Some(next);
        self.version = Some(VersionToken::generate(versions));
        self.tracker.set_dirty(EntityField::UpdateDate.into(), owner);
        self.tracker.set_dirty(EntityField::Version.into(), owner);
        debug!(owner, "Entity updated");
        Ok(())
    }

    pub fn tracker(&self) -> &ChangeTracker<F> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ChangeTracker<F> {
        &mut self.tracker
    }

    pub fn set_dirty(&mut self, field: F, owner: &str) {
        self.tracker.set_dirty(field, owner);
    }

    /// Local check only; owners of sub-entities add their own.
    pub fn is_property_dirty(&self, name: &str) -> bool {
        self.tracker.is_property_dirty(name)
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn reset_dirty_properties(&mut self) {
        self.tracker.reset_dirty_properties();
    }
}
