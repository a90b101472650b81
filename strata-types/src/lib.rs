//! Core type definitions for Strata.
//!
//! This crate defines the small, storage-agnostic types the content model is
//! built from:
//! - Numeric node/template/data-type identifiers and UUID keys
//! - Monotonic timestamps for create/update dates
//! - Change notifications emitted by dirty tracking
//!
//! Content types, property groups and change tracking live in `strata-model`.

mod change;
mod ids;
mod timestamp;

pub use change::{ChangeEvent, ChangeId, ChangeScope};
pub use ids::{DataTypeId, EntityKey, NodeId, TemplateId, UuidFormat, VersionToken};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid id: {0}")]
    InvalidId(String),
}
