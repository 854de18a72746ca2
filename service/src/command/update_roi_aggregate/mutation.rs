//! [`Mutation`]s of a [`RoiAggregate`].

use derive_more::From;

use crate::{
    domain::{
        self,
        roi_model::{self, Name},
        EducationCostRefinement, RoiAggregate,
    },
    dto::{
        CareerGoalDto, CloneRoiModelDto, CurrentInformationDto,
        EducationCostDto, EducationFinancingDto,
    },
};

/// Change applied to a [`RoiAggregate`].
pub trait Mutation {
    /// Name of this [`Mutation`] to be logged.
    const NAME: &'static str;

    /// Applies this [`Mutation`] to the provided [`RoiAggregate`].
    ///
    /// # Errors
    ///
    /// If the [`RoiAggregate`] rejects this [`Mutation`].
    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error>;
}

/// Replaces the shared current information.
#[derive(Clone, Debug, From)]
pub struct UpdateCurrentInformation(pub CurrentInformationDto);

impl Mutation for UpdateCurrentInformation {
    const NAME: &'static str = "updateCurrentInformation";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.update_current_information(self.0)
    }
}

/// Replaces the career goal of the active [`RoiModel`].
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Debug, From)]
pub struct UpdateCareerGoal(pub CareerGoalDto);

impl Mutation for UpdateCareerGoal {
    const NAME: &'static str = "updateCareerGoal";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.update_career_goal(self.0)
    }
}

/// Replaces the education cost of the active [`RoiModel`].
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Debug, From)]
pub struct UpdateEducationCost(pub EducationCostDto);

impl Mutation for UpdateEducationCost {
    const NAME: &'static str = "updateEducationCost";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.update_education_cost(self.0)
    }
}

/// Replaces the [`EducationCostRefinement`] of the active [`RoiModel`].
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Debug, From)]
pub struct UpdateEducationCostRefinement(pub Option<EducationCostRefinement>);

impl Mutation for UpdateEducationCostRefinement {
    const NAME: &'static str = "updateEducationCostRefinement";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.update_education_cost_refinement(self.0);
        Ok(())
    }
}

/// Replaces the education financing of the active [`RoiModel`].
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Debug, From)]
pub struct UpdateEducationFinancing(pub EducationFinancingDto);

impl Mutation for UpdateEducationFinancing {
    const NAME: &'static str = "updateEducationFinancing";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.update_education_financing(self.0)
    }
}

/// Resets the education financing of the active [`RoiModel`].
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Copy, Debug)]
pub struct ClearEducationFinancing;

impl Mutation for ClearEducationFinancing {
    const NAME: &'static str = "clearEducationFinancing";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.clear_education_financing();
        Ok(())
    }
}

/// Creates a new default [`RoiModel`] and makes it active.
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Debug, Default, From)]
pub struct CreateRoiModel {
    /// [`Name`] of the new [`RoiModel`], the next default one if absent.
    ///
    /// [`RoiModel`]: domain::RoiModel
    pub name: Option<Name>,
}

impl Mutation for CreateRoiModel {
    const NAME: &'static str = "createRoiModel";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        _ = aggregate.create_empty_roi_model(self.name);
        Ok(())
    }
}

/// Clones the active [`RoiModel`] and makes the clone active.
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Debug, From)]
pub struct CloneRoiModel(pub CloneRoiModelDto);

impl Mutation for CloneRoiModel {
    const NAME: &'static str = "cloneRoiModel";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        _ = aggregate.clone_roi_model(&self.0);
        Ok(())
    }
}

/// Makes the [`RoiModel`] with the provided ID active.
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Copy, Debug, From)]
pub struct MakeActive(pub roi_model::Id);

impl Mutation for MakeActive {
    const NAME: &'static str = "makeActive";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.make_active(self.0)
    }
}

/// Deletes the [`RoiModel`] with the provided ID.
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteRoiModel(pub roi_model::Id);

impl Mutation for DeleteRoiModel {
    const NAME: &'static str = "deleteRoiModel";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.delete_roi_model(self.0)
    }
}

/// Renames the active [`RoiModel`].
///
/// [`RoiModel`]: domain::RoiModel
#[derive(Clone, Debug, From)]
pub struct RenameRoiModel(pub Name);

impl Mutation for RenameRoiModel {
    const NAME: &'static str = "renameRoiModel";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.update_roi_model_name(self.0);
        Ok(())
    }
}

/// Resets the whole [`RoiAggregate`] to its default state.
#[derive(Clone, Copy, Debug)]
pub struct ClearAll;

impl Mutation for ClearAll {
    const NAME: &'static str = "clearAll";

    fn apply(self, aggregate: &mut RoiAggregate) -> Result<(), domain::Error> {
        aggregate.clear();
        Ok(())
    }
}
