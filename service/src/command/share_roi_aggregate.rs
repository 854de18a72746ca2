//! [`Command`] for sharing a [`RoiAggregate`] with another user.

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{self, roi_aggregate, Owner, RoiAggregate},
    infra::{database, Database},
    read::SavedRoiAggregate,
    Service,
};

use super::Command;

/// [`Command`] for sharing the saved [`RoiAggregate`] of an [`Owner`] with
/// another user of the same tenant.
///
/// The recipient receives a copy under a new [`roi_aggregate::Id`],
/// replacing anything they had saved.
#[derive(Clone, Copy, Debug)]
pub struct ShareRoiAggregate {
    /// [`Owner`] of the shared [`RoiAggregate`].
    pub owner: Owner,

    /// [`Owner`] receiving the copy.
    pub recipient: Owner,
}

impl<Db, Calc> Command<ShareRoiAggregate> for Service<Db, Calc>
where
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
{
    type Ok = roi_aggregate::Id;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(
        skip_all,
        fields(owner = %cmd.owner, recipient = %cmd.recipient),
    )]
    async fn execute(
        &self,
        cmd: ShareRoiAggregate,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ShareRoiAggregate { owner, recipient } = cmd;
        if owner.tenant_id != recipient.tenant_id {
            return Err(tracerr::new!(E::ForeignTenant(recipient)));
        }
        if owner == recipient {
            return Err(tracerr::new!(E::SelfSharing(owner)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Lock in a stable order to avoid deadlocking with a counter-share.
        let (first, second) = if owner < recipient {
            (owner, recipient)
        } else {
            (recipient, owner)
        };
        for o in [first, second] {
            tx.execute(Lock(By::<SavedRoiAggregate, _>::new(o)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        let config = &self.config().roi_model;
        let source = tx
            .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(owner)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoiAggregateNotExists(owner))
            .map_err(tracerr::wrap!())?
            .restore(config)
            .map_err(domain::Error::from)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let copy = RoiAggregate::restore(
            roi_aggregate::Id::new(),
            source.current_information().clone(),
            source.roi_model_list().to_vec(),
            source.active_roi_model_id(),
            *config,
        );
        tx.execute(Update(SavedRoiAggregate::new(recipient, &copy)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(copy.id())
    }
}

/// Error of [`ShareRoiAggregate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Saved [`RoiAggregate`] cannot be restored.
    #[display("Saved `RoiAggregate` is broken: {_0}")]
    Domain(domain::Error),

    /// [`Owner`] has no saved [`RoiAggregate`].
    #[display("`RoiAggregate` of `Owner({_0})` does not exist")]
    #[from(ignore)]
    RoiAggregateNotExists(#[error(not(source))] Owner),

    /// Recipient belongs to another tenant.
    #[display("`Owner({_0})` belongs to another tenant")]
    #[from(ignore)]
    ForeignTenant(#[error(not(source))] Owner),

    /// Recipient is the [`Owner`] itself.
    #[display("`Owner({_0})` cannot share with themselves")]
    #[from(ignore)]
    SelfSharing(#[error(not(source))] Owner),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            mock::{owner, service, valid_current_information},
            update_roi_aggregate::mutation::UpdateCurrentInformation,
            LoadRoiAggregate, UpdateRoiAggregate,
        },
        domain::{owner::UserId, Owner},
        infra::calculator::mock::Counting,
        Command as _,
    };

    use super::{ExecutionError, ShareRoiAggregate};

    #[tokio::test]
    async fn shares_copy_with_colleague() {
        let svc = service(Counting::default());
        let owner = owner();
        let recipient = Owner {
            user_id: UserId::new(),
            ..owner
        };
        let dto = svc
            .execute(UpdateRoiAggregate::<UpdateCurrentInformation>::new(
                owner,
                valid_current_information(),
            ))
            .await
            .unwrap();

        let id = svc
            .execute(ShareRoiAggregate { owner, recipient })
            .await
            .unwrap();

        assert_ne!(id, dto.roi_aggregate_id);
        let copy = svc
            .execute(LoadRoiAggregate { owner: recipient })
            .await
            .unwrap();
        assert_eq!(copy.id(), id);
        assert_eq!(copy.active_roi_model_id(), dto.roi_model_id.unwrap());
        assert!(copy.is_current_information_valid());
        let original = svc.execute(LoadRoiAggregate { owner }).await.unwrap();
        assert_eq!(original.id(), dto.roi_aggregate_id);
    }

    #[tokio::test]
    async fn rejects_foreign_tenant() {
        let svc = service(Counting::default());

        let err = svc
            .execute(ShareRoiAggregate {
                owner: owner(),
                recipient: owner(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.into_inner(), ExecutionError::ForeignTenant(_)));
    }

    #[tokio::test]
    async fn rejects_missing_source() {
        let svc = service(Counting::default());
        let owner = owner();

        let err = svc
            .execute(ShareRoiAggregate {
                owner,
                recipient: Owner {
                    user_id: UserId::new(),
                    ..owner
                },
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::RoiAggregateNotExists(o) if o == owner,
        ));
    }
}
