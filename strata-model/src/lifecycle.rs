use crate::error::ModelResult;
use crate::tracking::TracksChanges;
use strata_types::NodeId;
use tracing::debug;

/// Save hooks a persistence layer drives.
///
/// `adding_entity` runs once, on the first save, and makes the entity
/// persisted. `updating_entity` runs on every save after that. Ids come from
/// the persistence layer through `assign_identity`.
pub trait Lifecycle: TracksChanges {
    /// True once the insert hook has run.
    fn has_identity(&self) -> bool;

    fn adding_entity(&mut self) -> ModelResult<()>;

    fn updating_entity(&mut self) -> ModelResult<()>;

    fn assign_identity(&mut self, id: NodeId) -> ModelResult<()>;
}

/// What [`save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save; the entity received this id.
    Inserted(NodeId),
    Updated,
}

/// Runs the hooks a repository would run around a write, then clears the
/// dirty state.
///
/// `allocate_id` is only called for transient entities, after the insert
/// hook, mirroring a database handing back the new row id.
pub fn save<E, A>(entity: &mut E, allocate_id: A) -> ModelResult<SaveOutcome>
where
    E: Lifecycle + ?Sized,
    A: FnOnce() -> NodeId,
{
    let outcome = if entity.has_identity() {
        entity.updating_entity()?;
        SaveOutcome::Updated
    } else {
        entity.adding_entity()?;
        let id = allocate_id();
        entity.assign_identity(id)?;
        SaveOutcome::Inserted(id)
    };
    entity.reset_dirty_properties();
    debug!(?outcome, "Entity saved");
    Ok(outcome)
}
