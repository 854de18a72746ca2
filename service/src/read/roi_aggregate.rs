//! [`SavedRoiAggregate`] definitions.

use common::{unit, DateTimeOf};

use crate::{
    domain::{roi_model::Config, Owner, RoiAggregate, ValidationError},
    dto::RoiModelToSaveDto,
    mapper::{self, Mapper as _},
};

/// [`RoiAggregate`] as it's persisted for its [`Owner`].
#[derive(Clone, Debug, PartialEq)]
pub struct SavedRoiAggregate {
    /// [`Owner`] of the [`RoiAggregate`].
    pub owner: Owner,

    /// Saved state of the [`RoiAggregate`].
    pub model: RoiModelToSaveDto,

    /// [`DateTime`] when the [`RoiAggregate`] was saved last time.
    ///
    /// [`DateTime`]: common::DateTime
    pub saved_at: SavingDateTime,
}

impl SavedRoiAggregate {
    /// Captures the current state of the provided [`RoiAggregate`].
    #[must_use]
    pub fn new(owner: Owner, aggregate: &RoiAggregate) -> Self {
        Self {
            owner,
            model: aggregate.to_dto(),
            saved_at: SavingDateTime::now(),
        }
    }

    /// Restores the [`RoiAggregate`] out of this [`SavedRoiAggregate`].
    ///
    /// # Errors
    ///
    /// If the saved state doesn't form a valid [`RoiAggregate`].
    pub fn restore(
        self,
        config: &Config,
    ) -> Result<RoiAggregate, ValidationError> {
        mapper::restore_roi_aggregate(self.model, config)
    }

    /// Restores the [`RoiAggregate`] out of the provided
    /// [`SavedRoiAggregate`], or creates a new default one if nothing was
    /// saved yet.
    ///
    /// # Errors
    ///
    /// If the saved state doesn't form a valid [`RoiAggregate`].
    pub fn restore_or_new(
        saved: Option<Self>,
        config: &Config,
    ) -> Result<RoiAggregate, ValidationError> {
        saved.map_or_else(
            || Ok(RoiAggregate::new(*config)),
            |s| s.restore(config),
        )
    }
}

/// [`DateTime`] when a [`SavedRoiAggregate`] was saved.
///
/// [`DateTime`]: common::DateTime
pub type SavingDateTime = DateTimeOf<(SavedRoiAggregate, unit::Modification)>;
