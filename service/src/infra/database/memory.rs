//! In-memory [`Database`] implementation.

use std::{collections::HashMap, mem, sync::Arc};

use common::operations::{By, Commit, Lock, Select, Transact, Update};
use derive_more::{Display, Error as StdError};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracerr::Traced;

use crate::{
    domain::Owner,
    infra::{database, Database},
    read::SavedRoiAggregate,
};

/// In-memory [`Database`] keeping [`SavedRoiAggregate`]s per [`Owner`].
///
/// Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Shared [`Storage`] of this [`Memory`] database.
    storage: Arc<Storage>,
}

/// Storage of a [`Memory`] database.
#[derive(Debug, Default)]
struct Storage {
    /// Committed [`SavedRoiAggregate`]s.
    rows: RwLock<HashMap<Owner, SavedRoiAggregate>>,

    /// Per-[`Owner`] locks held by [`Tx`]s.
    ///
    /// An entry lives only while some [`Tx`] holds or awaits it.
    locks: Mutex<HashMap<Owner, Arc<Mutex<()>>>>,
}

impl Storage {
    /// Removes the locks of the provided [`Owner`]s nobody holds or awaits
    /// anymore.
    fn prune_locks(
        locks: &mut HashMap<Owner, Arc<Mutex<()>>>,
        owners: impl IntoIterator<Item = Owner>,
    ) {
        for owner in owners {
            if locks.get(&owner).is_some_and(|l| Arc::strong_count(l) == 1) {
                _ = locks.remove(&owner);
            }
        }
    }
}

/// Transaction of a [`Memory`] database.
///
/// Writes are staged until [`Commit`]. Dropping a [`Tx`] without committing
/// discards them, and releases all the held locks.
#[derive(Debug)]
pub struct Tx {
    /// [`Storage`] this [`Tx`] is applied to.
    storage: Arc<Storage>,

    /// Mutable state of this [`Tx`].
    state: Mutex<TxState>,
}

/// Mutable state of a [`Tx`].
#[derive(Debug, Default)]
struct TxState {
    /// Staged [`SavedRoiAggregate`]s.
    staged: HashMap<Owner, SavedRoiAggregate>,

    /// Held per-[`Owner`] locks.
    guards: HashMap<Owner, OwnedMutexGuard<()>>,

    /// Indicator whether this [`Tx`] is committed already.
    is_committed: bool,
}

impl TxState {
    /// Checks this [`Tx`] is still usable.
    fn ensure_active(&self) -> Result<(), Traced<database::Error>> {
        if self.is_committed {
            return Err(tracerr::new!(database::Error::from(
                Error::TxCommitted
            )));
        }
        Ok(())
    }
}

impl Database<Transact> for Memory {
    type Ok = Tx;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Tx {
            storage: Arc::clone(&self.storage),
            state: Mutex::new(TxState::default()),
        })
    }
}

impl Database<Select<By<Option<SavedRoiAggregate>, Owner>>> for Memory {
    type Ok = Option<SavedRoiAggregate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<SavedRoiAggregate>, Owner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner = by.into_inner();
        Ok(self.storage.rows.read().await.get(&owner).cloned())
    }
}

impl Database<Update<SavedRoiAggregate>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(saved): Update<SavedRoiAggregate>,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self.storage.rows.write().await.insert(saved.owner, saved);
        Ok(())
    }
}

impl Database<Lock<By<SavedRoiAggregate, Owner>>> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<SavedRoiAggregate, Owner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner = by.into_inner();

        let mut state = self.state.lock().await;
        state.ensure_active()?;
        if state.guards.contains_key(&owner) {
            return Ok(());
        }

        let lock = {
            let mut locks = self.storage.locks.lock().await;
            // Leftovers of `Tx`s dropped while the map was contended.
            locks.retain(|_, l| Arc::strong_count(l) > 1);
            Arc::clone(locks.entry(owner).or_default())
        };
        let guard = lock.lock_owned().await;
        _ = state.guards.insert(owner, guard);
        Ok(())
    }
}

impl Database<Select<By<Option<SavedRoiAggregate>, Owner>>> for Tx {
    type Ok = Option<SavedRoiAggregate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<SavedRoiAggregate>, Owner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner = by.into_inner();

        let state = self.state.lock().await;
        state.ensure_active()?;
        if let Some(staged) = state.staged.get(&owner) {
            return Ok(Some(staged.clone()));
        }
        Ok(self.storage.rows.read().await.get(&owner).cloned())
    }
}

impl Database<Update<SavedRoiAggregate>> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(saved): Update<SavedRoiAggregate>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.lock().await;
        state.ensure_active()?;
        _ = state.staged.insert(saved.owner, saved);
        Ok(())
    }
}

impl Database<Commit> for Tx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.lock().await;
        state.ensure_active()?;

        let staged = mem::take(&mut state.staged);
        self.storage.rows.write().await.extend(staged);
        state.is_committed = true;
        let released = state
            .guards
            .drain()
            .map(|(owner, _guard)| owner)
            .collect::<Vec<_>>();
        Storage::prune_locks(&mut *self.storage.locks.lock().await, released);
        Ok(())
    }
}

impl Drop for Tx {
    fn drop(&mut self) {
        let released = self
            .state
            .get_mut()
            .guards
            .drain()
            .map(|(owner, _guard)| owner)
            .collect::<Vec<_>>();
        if let Ok(mut locks) = self.storage.locks.try_lock() {
            Storage::prune_locks(&mut locks, released);
        }
    }
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Tx`] is used after being committed.
    #[display("`Tx` is already committed")]
    TxCommitted,
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Commit, Lock, Select, Transact, Update};

    use crate::{
        domain::{
            owner::{TenantId, UserId},
            roi_model::Config,
            Owner, RoiAggregate,
        },
        infra::Database as _,
        read::SavedRoiAggregate,
    };

    use super::Memory;

    fn owner() -> Owner {
        Owner {
            tenant_id: TenantId::new(),
            user_id: UserId::new(),
        }
    }

    fn saved(owner: Owner) -> SavedRoiAggregate {
        SavedRoiAggregate::new(owner, &RoiAggregate::new(Config::default()))
    }

    #[tokio::test]
    async fn staged_writes_visible_only_after_commit() {
        let db = Memory::default();
        let owner = owner();
        let row = saved(owner);

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Update(row.clone())).await.unwrap();

        let in_tx = tx
            .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(owner)))
            .await
            .unwrap();
        assert_eq!(in_tx.as_ref(), Some(&row));
        let outside = db
            .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(owner)))
            .await
            .unwrap();
        assert!(outside.is_none());

        tx.execute(Commit).await.unwrap();

        let committed = db
            .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(owner)))
            .await
            .unwrap();
        assert_eq!(committed, Some(row));
    }

    #[tokio::test]
    async fn dropped_tx_rolls_back() {
        let db = Memory::default();
        let owner = owner();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Lock(By::<SavedRoiAggregate, _>::new(owner)))
            .await
            .unwrap();
        tx.execute(Update(saved(owner))).await.unwrap();
        drop(tx);

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Lock(By::<SavedRoiAggregate, _>::new(owner)))
            .await
            .unwrap();
        let row = tx
            .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(owner)))
            .await
            .unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn released_locks_are_pruned() {
        let db = Memory::default();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Lock(By::<SavedRoiAggregate, _>::new(owner())))
            .await
            .unwrap();
        tx.execute(Lock(By::<SavedRoiAggregate, _>::new(owner())))
            .await
            .unwrap();
        assert_eq!(db.storage.locks.lock().await.len(), 2);
        tx.execute(Commit).await.unwrap();
        assert!(db.storage.locks.lock().await.is_empty());

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Lock(By::<SavedRoiAggregate, _>::new(owner())))
            .await
            .unwrap();
        assert_eq!(db.storage.locks.lock().await.len(), 1);
        drop(tx);
        assert!(db.storage.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn committed_tx_cannot_be_reused() {
        let db = Memory::default();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Commit).await.unwrap();

        assert!(tx.execute(Commit).await.is_err());
        assert!(tx.execute(Update(saved(owner()))).await.is_err());
    }

    #[tokio::test]
    async fn lock_waits_for_another_tx() {
        let db = Memory::default();
        let owner = owner();
        let row = saved(owner);

        let first = db.execute(Transact).await.unwrap();
        first
            .execute(Lock(By::<SavedRoiAggregate, _>::new(owner)))
            .await
            .unwrap();

        let second = db.execute(Transact).await.unwrap();
        let waiting = tokio::spawn(async move {
            second
                .execute(Lock(By::<SavedRoiAggregate, _>::new(owner)))
                .await
                .unwrap();
            second
                .execute(Select(By::<Option<SavedRoiAggregate>, _>::new(
                    owner,
                )))
                .await
                .unwrap()
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!waiting.is_finished());

        first.execute(Update(row.clone())).await.unwrap();
        first.execute(Commit).await.unwrap();

        assert_eq!(waiting.await.unwrap(), Some(row));
    }
}
