//! Content type model for Strata.
//!
//! Defines the schema objects content is built from and the change tracking
//! that tells a persistence layer what needs writing:
//! - [`ContentType`]: the composite root (groups, compositions, templates)
//! - [`PropertyGroup`]: a named, ordered set of property types
//! - [`PropertyType`]: a single property definition
//! - [`ChangeTracker`] / [`TracksChanges`]: per-object dirty sets and the
//!   transitive "has anything below me changed?" queries
//! - [`Lifecycle`] / [`save`]: insert/update hooks that assign identity and
//!   versions
//! - [`ChangeObserver`]: optional notification hook for every dirty mark
//!
//! Storage and template lookup are left to the caller. Dirtiness is
//! answered by explicit delegation down the graph: a content type consults
//! itself, its groups, and the flattened list of property types.

mod config;
mod content_type;
mod entity;
mod error;
mod group;
mod lifecycle;
mod observer;
mod property;
mod tracking;

pub use config::ModelConfig;
pub use content_type::{ContentType, ContentTypeField, Template};
pub use entity::{EntityBase, EntityField};
pub use error::{ModelError, ModelResult};
pub use group::{PropertyGroup, PropertyGroupField};
pub use lifecycle::{save, Lifecycle, SaveOutcome};
pub use observer::{ChangeLog, ChangeObserver};
pub use property::{PropertyType, PropertyTypeField};
pub use tracking::{ChangeTracker, TrackedField, TracksChanges};
