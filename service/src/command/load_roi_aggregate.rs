//! [`Command`] for loading a [`RoiAggregate`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{self, Owner, RoiAggregate},
    infra::{database, Database},
    read::SavedRoiAggregate,
    Service,
};

use super::Command;

/// [`Command`] for loading the [`RoiAggregate`] of an [`Owner`].
///
/// A new default [`RoiAggregate`] is returned (but not persisted) if the
/// [`Owner`] has nothing saved yet.
#[derive(Clone, Copy, Debug, From)]
pub struct LoadRoiAggregate {
    /// [`Owner`] of the [`RoiAggregate`].
    pub owner: Owner,
}

impl<Db, Calc> Command<LoadRoiAggregate> for Service<Db, Calc>
where
    Db: Database<
        Select<By<Option<SavedRoiAggregate>, Owner>>,
        Ok = Option<SavedRoiAggregate>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = RoiAggregate;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(owner = %cmd.owner))]
    async fn execute(
        &self,
        cmd: LoadRoiAggregate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let saved = self
            .database()
            .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(
                cmd.owner,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        SavedRoiAggregate::restore_or_new(saved, &self.config().roi_model)
            .map_err(domain::Error::from)
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`LoadRoiAggregate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Saved [`RoiAggregate`] cannot be restored.
    #[display("Saved `RoiAggregate` is broken: {_0}")]
    Domain(domain::Error),
}
