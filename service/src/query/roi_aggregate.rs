//! [`Query`] collection related to the saved [`RoiAggregate`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{self, Owner},
    dto::RoiModelDto,
    infra::{database, Database},
    mapper::Mapper as _,
    read::SavedRoiAggregate,
    Service,
};
#[cfg(doc)]
use crate::domain::RoiAggregate;

use super::{DatabaseQuery, Query};

/// Queries the [`SavedRoiAggregate`] of an [`Owner`].
pub type Saved = DatabaseQuery<By<Option<SavedRoiAggregate>, Owner>>;

/// [`Query`] listing the saved [`RoiModelDto`]s of an [`Owner`], along with
/// their derived projections.
///
/// Empty if the [`Owner`] has nothing saved.
#[derive(Clone, Copy, Debug, From)]
pub struct SavedRoiModels {
    /// [`Owner`] of the [`RoiAggregate`].
    pub owner: Owner,
}

impl<Db, Calc> Query<SavedRoiModels> for Service<Db, Calc>
where
    Db: Database<
        Select<By<Option<SavedRoiAggregate>, Owner>>,
        Ok = Option<SavedRoiAggregate>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<RoiModelDto>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SavedRoiModels { owner }: SavedRoiModels,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(saved) = self
            .database()
            .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(owner)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        else {
            return Ok(Vec::new());
        };

        // Restoring recomputes the projections against the current rules.
        let aggregate = saved
            .restore(&self.config().roi_model)
            .map_err(domain::Error::from)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        Ok(aggregate.to_dto().roi_model_list)
    }
}

/// Error of [`SavedRoiModels`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Saved [`RoiAggregate`] cannot be restored.
    #[display("Saved `RoiAggregate` is broken: {_0}")]
    Domain(domain::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            mock::{owner, service},
            mutation::CreateRoiModel,
            UpdateRoiAggregate,
        },
        infra::calculator::mock::Counting,
        Command as _,
    };

    use super::{Saved, SavedRoiModels};

    #[tokio::test]
    async fn lists_nothing_for_new_owner() {
        let svc = service(Counting::default());

        let list = svc.execute(SavedRoiModels { owner: owner() }).await.unwrap();

        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn lists_saved_models_in_order() {
        let svc = service(Counting::default());
        let owner = owner();
        for _ in 0..2 {
            _ = svc
                .execute(UpdateRoiAggregate::<CreateRoiModel>::new(
                    owner,
                    CreateRoiModel::default(),
                ))
                .await
                .unwrap();
        }

        let list = svc.execute(SavedRoiModels { owner }).await.unwrap();

        let names = list.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            ["Default ROI Model", "Default ROI Model 1", "Default ROI Model 2"],
        );
        assert!(list.iter().all(|m| m.is_default_model));

        let saved = svc.execute(Saved::by(owner)).await.unwrap().unwrap();
        assert_eq!(saved.owner, owner);
        assert_eq!(saved.model.roi_model_list.len(), 3);
    }
}
