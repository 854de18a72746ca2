//! Domain definitions.

pub mod calculator;
pub mod career_goal;
pub mod current_information;
pub mod education_cost;
pub mod education_financing;
pub mod education_level;
pub mod entity;
pub mod lookup;
pub mod owner;
pub mod roi_aggregate;
pub mod roi_model;

use derive_more::{Display, Error as StdError, From};

pub use self::{
    career_goal::CareerGoal,
    current_information::CurrentInformation,
    education_cost::{EducationCost, EducationCostRefinement},
    education_financing::EducationFinancing,
    education_level::EducationLevel,
    entity::Entity,
    owner::Owner,
    roi_aggregate::RoiAggregate,
    roi_model::RoiModel,
};

/// Error of a domain operation.
#[derive(Clone, Debug, Display, From, StdError)]
pub enum Error {
    /// Provided data cannot form a valid domain entity.
    #[display("Validation failed: {_0}")]
    Validation(ValidationError),

    /// [`RoiModel`] doesn't exist in its [`RoiAggregate`].
    #[display("`RoiModel(id: {_0})` does not exist")]
    #[from(ignore)]
    RoiModelMissing(#[error(not(source))] roi_model::Id),
}

/// Error of a required field being absent while building a domain entity.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
#[display("`{entity}` requires `{field}` to be set")]
pub struct ValidationError {
    /// Name of the entity being built.
    pub entity: &'static str,

    /// Name of the absent field.
    pub field: &'static str,
}

impl ValidationError {
    /// Checks the provided `value` is present, returning a [`ValidationError`]
    /// otherwise.
    ///
    /// # Errors
    ///
    /// If the `value` is [`None`].
    pub fn require<T>(
        entity: &'static str,
        field: &'static str,
        value: Option<&T>,
    ) -> Result<(), Self> {
        value.map(drop).ok_or(Self { entity, field })
    }
}
