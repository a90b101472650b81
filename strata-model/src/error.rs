//! Error types for the content model.

use strata_types::{EntityKey, NodeId};
use thiserror::Error;

/// Content model errors.
///
/// Dirty tracking itself never fails; these cover identity misuse,
/// collection invariants and configuration loading.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The persistence layer tried to assign a second id.
    #[error("identity already assigned: entity has id {existing}, refusing {attempted}")]
    IdentityAlreadyAssigned { existing: NodeId, attempted: NodeId },

    /// A key was assigned to an entity that already has one.
    #[error("key already assigned: {0}")]
    KeyAlreadyAssigned(EntityKey),

    /// An update hook or identity assignment ran on an entity that was never
    /// inserted.
    #[error("entity has not been saved yet")]
    Transient,

    /// A property type alias is already used in the same group or composition.
    #[error("duplicate property alias: {0}")]
    DuplicatePropertyAlias(String),

    /// A content type was asked to compose itself.
    #[error("content type {0:?} cannot be composed with itself")]
    SelfComposition(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
