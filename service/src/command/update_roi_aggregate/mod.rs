//! [`Command`] for applying a [`Mutation`] to a [`RoiAggregate`].

pub mod mutation;

use common::operations::{
    By, Calculate, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        self,
        roi_model::{RoiCalculatorInput, RoiCalculatorOutput},
        Owner, RoiAggregate,
    },
    dto::RoiModelDto,
    infra::{calculator, database, Calculator, Database},
    mapper,
    read::SavedRoiAggregate,
    Service,
};

use super::Command;

pub use self::mutation::Mutation;

/// [`Command`] for applying a [`Mutation`] to the [`RoiAggregate`] of an
/// [`Owner`], recalculating its ROI if needed.
///
/// Results in the [`RoiModelDto`] of the active [`RoiModel`].
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Debug)]
pub struct UpdateRoiAggregate<M> {
    /// [`Owner`] of the [`RoiAggregate`].
    pub owner: Owner,

    /// [`Mutation`] to apply.
    pub mutation: M,
}

impl<M> UpdateRoiAggregate<M> {
    /// Creates a new [`UpdateRoiAggregate`] [`Command`].
    #[must_use]
    pub fn new(owner: Owner, mutation: impl Into<M>) -> Self {
        Self {
            owner,
            mutation: mutation.into(),
        }
    }
}

impl<Db, Calc, M> Command<UpdateRoiAggregate<M>> for Service<Db, Calc>
where
    M: Mutation,
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<SavedRoiAggregate, Owner>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<SavedRoiAggregate>, Owner>>,
            Ok = Option<SavedRoiAggregate>,
            Err = Traced<database::Error>,
        > + Database<
            Update<SavedRoiAggregate>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
    Calc: Calculator<
        Calculate<RoiCalculatorInput>,
        Ok = RoiCalculatorOutput,
        Err = Traced<calculator::Error>,
    >,
{
    type Ok = RoiModelDto;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(owner = %cmd.owner, mutation = M::NAME),
    )]
    async fn execute(
        &self,
        cmd: UpdateRoiAggregate<M>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoiAggregate { owner, mutation } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent mutations of the same `RoiAggregate`.
        tx.execute(Lock(By::<SavedRoiAggregate, _>::new(owner)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let saved = tx
            .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(owner)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let mut aggregate = SavedRoiAggregate::restore_or_new(
            saved,
            &self.config().roi_model,
        )
        .map_err(domain::Error::from)
        .map_err(tracerr::from_and_wrap!(=> E))?;

        mutation
            .apply(&mut aggregate)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        if aggregate.calculate_roi_calculator_input() {
            if let Some(input) = aggregate.roi_calculator_input().cloned() {
                let output = self
                    .calculator()
                    .execute(Calculate(input))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                aggregate.update_roi_calculator_output(output);
            }
        }

        tx.execute(Update(SavedRoiAggregate::new(owner, &aggregate)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let active = aggregate
            .try_active_roi_model()
            .map_err(tracerr::from_and_wrap!(=> E))?;
        Ok(mapper::roi_model_to_dto(
            active,
            aggregate.id(),
            aggregate.current_information(),
        ))
    }
}

/// Error of [`UpdateRoiAggregate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Calculator`] error.
    #[display("`Calculator` failed: {_0}")]
    Calculator(calculator::Error),

    /// [`RoiAggregate`] rejected the [`Mutation`].
    #[display("`RoiAggregate` rejected the mutation: {_0}")]
    Domain(domain::Error),
}
