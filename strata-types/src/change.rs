//! Change notifications emitted whenever a tracked field is marked dirty.
//!
//! Every dirty mark produces exactly one [`ChangeEvent`], even when the field
//! was already dirty. Observers (audit trails, undo stacks) receive them in
//! the order the mutations happened.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeId(Uuid);

impl ChangeId {
    /// Creates a new, time-ordered change id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ChangeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChangeId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Which level of the content type graph a change happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeScope {
    ContentType,
    PropertyGroup,
    PropertyType,
}

impl fmt::Display for ChangeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ContentType => "content_type",
            Self::PropertyGroup => "property_group",
            Self::PropertyType => "property_type",
        };
        f.write_str(s)
    }
}

/// A single "field was marked dirty" notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub id: ChangeId,

    /// Level of the object that changed.
    pub scope: ChangeScope,

    /// Alias or name of the object that changed, as it was when the change
    /// was recorded. Empty for objects that have not been named yet.
    pub owner: String,

    /// Name of the tracked field, e.g. `"AllowedTemplates"`.
    pub field: String,

    pub at: Timestamp,
}

impl ChangeEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(scope: ChangeScope, owner: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            id: ChangeId::new(),
            scope,
            owner: owner.into(),
            field: field.into(),
            at: Timestamp::now(),
        }
    }

    /// Serializes the event for export to an audit sink.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses an event previously produced by [`ChangeEvent::to_json`].
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
