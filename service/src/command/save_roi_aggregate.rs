//! [`Command`] for saving a [`RoiAggregate`].

use common::operations::{By, Commit, Lock, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{self, roi_aggregate, Owner, RoiAggregate},
    dto::RoiModelToSaveDto,
    infra::{database, Database},
    mapper,
    read::SavedRoiAggregate,
    Service,
};

use super::Command;

/// [`Command`] for saving a [`RoiAggregate`] provided as its
/// [`RoiModelToSaveDto`] for an [`Owner`], replacing the saved one.
#[derive(Clone, Debug)]
pub struct SaveRoiAggregate {
    /// [`Owner`] of the [`RoiAggregate`].
    pub owner: Owner,

    /// [`RoiAggregate`] to save.
    pub model: RoiModelToSaveDto,
}

impl<Db, Calc> Command<SaveRoiAggregate> for Service<Db, Calc>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<SavedRoiAggregate, Owner>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Update<SavedRoiAggregate>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = roi_aggregate::Id;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(owner = %cmd.owner, roi_aggregate.id = %cmd.model.roi_aggregate_id),
    )]
    async fn execute(
        &self,
        cmd: SaveRoiAggregate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SaveRoiAggregate { owner, model } = cmd;

        // Normalize the provided state through the domain.
        let aggregate: RoiAggregate =
            mapper::restore_roi_aggregate(model, &self.config().roi_model)
                .map_err(domain::Error::from)
                .map_err(tracerr::from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Lock(By::<SavedRoiAggregate, _>::new(owner)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(SavedRoiAggregate::new(owner, &aggregate)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(aggregate.id())
    }
}

/// Error of [`SaveRoiAggregate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Provided [`RoiModelToSaveDto`] is invalid.
    #[display("Invalid `RoiModelToSaveDto`: {_0}")]
    Domain(domain::Error),
}
